use crate::errors::ServerError;
use thiserror::Error;

const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI service unavailable: OPENROUTER_API_KEY is not configured")]
    MissingApiKey,
    #[error("Network error: {0}")]
    Network(String),
    #[error("AI provider returned HTTP {status}")]
    Status { status: u16, body: String },
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),
    #[error("AI response is not valid JSON: {0}")]
    JsonParse(String),
    #[error("AI response contained no usable listing data")]
    EmptyExtraction,
}

impl AiError {
    /// Upstream HTTP status, when the provider answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Start of the provider's error body, short enough for a log line.
    pub fn body_preview(&self) -> Option<&str> {
        match self {
            AiError::Status { body, .. } => Some(
                body.char_indices()
                    .nth(BODY_PREVIEW_CHARS)
                    .map_or(body.as_str(), |(end, _)| &body[..end]),
            ),
            _ => None,
        }
    }
}

impl From<AiError> for ServerError {
    fn from(e: AiError) -> Self {
        match e {
            AiError::MissingApiKey => ServerError::ServiceUnavailable(e.to_string()),
            other => ServerError::UpstreamFailure(other.to_string()),
        }
    }
}
