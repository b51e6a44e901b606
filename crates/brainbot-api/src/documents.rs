//! Uploaded knowledge-base documents.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Extensions the document service accepts.
pub const ALLOWED_EXTENSIONS: [&str; 8] = ["pdf", "doc", "docx", "xls", "xlsx", "png", "jpg", "jpeg"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    #[serde(alias = "filename", alias = "file_name")]
    pub file_name: String,
    #[serde(default, alias = "uploadDate", alias = "uploaded_at")]
    pub uploaded_at: String,
}

impl DocumentItem {
    /// Lower-case extension, empty when the name has none.
    pub fn extension(&self) -> String {
        extension_of(&self.file_name)
    }
}

fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// Reject files the service would refuse, before reading them.
pub fn check_uploadable(path: &Path) -> Result<String, ApiError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ApiError::InvalidInput(format!("not a file: {}", path.display())))?;
    let ext = extension_of(file_name);
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ApiError::InvalidInput(format!(
            "unsupported file type '.{ext}' (allowed: {})",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }
    Ok(file_name.to_string())
}
