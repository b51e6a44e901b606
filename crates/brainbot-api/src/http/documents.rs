use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::client::HttpBackend;
use crate::documents::{check_uploadable, DocumentItem};
use crate::{ApiError, DocumentStore};

#[async_trait]
impl DocumentStore for HttpBackend {
    async fn list_documents(&self) -> Result<Vec<DocumentItem>, ApiError> {
        let url = Self::endpoint(&self.config.documents_url, &["api", "documents"])?;
        let body: Value = self.send_json(self.request(Method::GET, url)).await?;
        // Either a bare array or `{ "documents": [...] }`.
        let items = if body.is_array() {
            body
        } else {
            body.get("documents")
                .cloned()
                .ok_or_else(|| ApiError::Parse("Unexpected response format from backend".into()))?
        };
        serde_json::from_value(items).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn upload_document(&self, path: &Path) -> Result<String, ApiError> {
        let file_name = check_uploadable(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::InvalidInput(format!("cannot read {}: {e}", path.display())))?;
        let size = bytes.len();

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.clone()));
        let url = Self::endpoint(&self.config.documents_url, &["api", "upload"])?;
        let message = self
            .send_for_message(self.request(Method::POST, url).multipart(form))
            .await?;

        info!(file = %file_name, size, "uploaded document");
        Ok(if message.is_empty() {
            format!("Uploaded {file_name}")
        } else {
            message
        })
    }

    async fn delete_document(&self, file_name: &str) -> Result<(), ApiError> {
        let url = Self::endpoint(&self.config.documents_url, &["api", "documents", file_name])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
