//! Diagnostics endpoint error types.

use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Errors returned to HTTP clients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// `items` was present but not an integer.
    #[error("Invalid item count: {value:?}")]
    InvalidItemCount { value: String },

    /// No route for this path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Route exists but not for this method.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Response body could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidItemCount { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the client.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            value: match self {
                ApiError::InvalidItemCount { value } => Some(value.clone()),
                _ => None,
            },
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::SerializationError(e.to_string())
    }
}

/// `{ "error": ..., "value": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
