use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// No usable title/content pair could be extracted from the completion,
    /// by either strict or fallback parsing.
    #[error("malformed AI response: {reason}")]
    MalformedResponse { reason: String },
}

impl ContentError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        Self::malformed(format!("missing required field \"{field}\""))
    }
}
