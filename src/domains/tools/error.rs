//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during catalog tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required field is absent from the creation payload.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// No tool exists with the requested identifier.
    #[error("Tool not found")]
    NotFound(String),

    /// A listing filter could not be interpreted.
    #[error("Invalid {param} filter: {value}")]
    InvalidFilter { param: &'static str, value: String },

    /// The seed catalog could not be read.
    #[error("Invalid seed catalog: {0}")]
    InvalidSeed(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a new "invalid filter" error.
    pub fn invalid_filter(param: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFilter {
            param,
            value: value.into(),
        }
    }

    /// Create a new "invalid seed" error.
    pub fn invalid_seed(msg: impl Into<String>) -> Self {
        Self::InvalidSeed(msg.into())
    }
}
