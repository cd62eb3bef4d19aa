//! Error types and handling for the catalog service.
//!
//! Every failure a request can hit is a variant of [`Error`]. The HTTP layer
//! turns it into a JSON body using [`Error::status_code`], so no handler
//! decides status codes on its own.

use axum::http::StatusCode;
use thiserror::Error;

use super::store::StoreError;
use crate::domains::reviews::ReviewError;
use crate::domains::tools::ToolError;

/// A specialized Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the catalog service.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Error originating from the reviews domain.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// The request body is missing or is not valid JSON for the endpoint.
    #[error("{0}")]
    InvalidPayload(String),

    /// The store could not be reached when the process started.
    #[error("Database not available")]
    StoreUnavailable,

    /// A store operation failed at runtime.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O errors from file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new invalid payload error.
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// HTTP status reported to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Tool(ToolError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Tool(_) | Self::Review(_) | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(_) | Self::Io(_) | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(
            Error::from(ToolError::MissingField("name")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::from(ReviewError::RatingOutOfRange(6)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::invalid_payload("No data provided").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_is_404() {
        let err = Error::from(ToolError::not_found("abc"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Tool not found");
    }

    #[test]
    fn test_store_errors() {
        assert_eq!(
            Error::StoreUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            Error::from(StoreError::state("poisoned")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_messages_pass_through() {
        let err = Error::from(ToolError::MissingField("category"));
        assert_eq!(err.to_string(), "Missing required field: category");
    }
}
