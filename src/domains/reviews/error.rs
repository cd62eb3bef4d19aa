//! Review-specific error types.

use thiserror::Error;

/// Errors that can occur when accepting a review.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// A required field is absent from the review payload.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The rating is an integer outside 1..=5.
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange(i64),

    /// The rating cannot be read as an integer.
    #[error("Rating must be an integer between 1 and 5, got {0}")]
    RatingNotInteger(String),
}
