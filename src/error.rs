use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("{0}")]
    MissingInput(String),
    #[error("Gemini rate limit exceeded")]
    RateLimited,
    #[error("Request failed after {attempts} attempts due to rate limiting")]
    RetriesExhausted { attempts: u32 },
    #[error("Gemini service error ({status}): {message}")]
    ServiceError { status: u16, message: String },
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    NotFound(String),
}

impl TutorError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TutorError::RateLimited)
    }
}

impl ResponseError for TutorError {
    fn status_code(&self) -> StatusCode {
        match self {
            TutorError::MissingInput(_) => StatusCode::BAD_REQUEST,
            TutorError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;
