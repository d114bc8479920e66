//! HTTP adapter error types

use thiserror::Error;
use vani_core::port::CallError;

/// Adapter Result type
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors from the console backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; message extracted from the body
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<ApiError> for CallError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Http { status, message } => CallError::rejected(status, Some(message)),
            other => CallError::Transport(other.to_string()),
        }
    }
}
