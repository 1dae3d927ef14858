// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, AI provider).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// Misconfiguration (e.g. no AI credential), not a transient failure.
    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
    /// The AI provider answered with an error status or unusable content.
    #[error("Upstream Failure: {0}")]
    UpstreamFailure(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::ServiceUnavailable(_) => 503,
            ServerError::UpstreamFailure(_) => 502,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }

    /// Message safe to show to the admin user.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound => "Not Found".to_string(),
            ServerError::BadRequest(msg)
            | ServerError::ServiceUnavailable(msg)
            | ServerError::UpstreamFailure(msg) => msg.clone(),
            ServerError::DbError(msg) => format!("Database Error: {msg}"),
            ServerError::InternalError => "Internal Server Error".to_string(),
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
