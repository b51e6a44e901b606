//! Chatbot evaluation reports (administrators only).

/// The rendered evaluation chart as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationChart {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl EvaluationChart {
    /// File extension matching the content type; PNG when unknown.
    pub fn extension(&self) -> &'static str {
        let essence = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());
        match essence.as_deref() {
            Some("image/jpeg") => "jpg",
            Some("image/svg+xml") => "svg",
            Some("image/gif") => "gif",
            Some("image/webp") => "webp",
            _ => "png",
        }
    }
}
