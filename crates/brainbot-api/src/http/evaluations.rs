use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::info;

use super::client::HttpBackend;
use crate::evaluations::EvaluationChart;
use crate::{ApiError, EvaluationReports};

#[async_trait]
impl EvaluationReports for HttpBackend {
    async fn evaluation_chart(&self) -> Result<EvaluationChart, ApiError> {
        let url = Self::endpoint(&self.config.documents_url, &["api", "evaluations", "ragas"])?;
        let response = self.send(self.request(Method::GET, url)).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ApiError::Parse("evaluation chart is empty".into()));
        }

        info!(size = bytes.len(), "fetched evaluation chart");
        Ok(EvaluationChart {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
