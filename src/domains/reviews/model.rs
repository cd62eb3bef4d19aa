//! Review records and the review payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ReviewError;
use crate::core::store::{Document, REVIEWS_COLLECTION, StoreError};

/// Lowest accepted rating.
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating.
pub const MAX_RATING: i64 = 5;

/// A user's rating and comment on one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,

    /// Identifier of the reviewed tool. Not checked against the catalog.
    pub tool_id: String,

    pub user_id: String,

    pub rating: u8,

    pub comment: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Decode a stored document.
    pub fn from_document(doc: Document) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| StoreError::malformed(REVIEWS_COLLECTION, e.to_string()))
    }
}

/// Body of `POST /tools/{id}/reviews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReviewRequest {
    pub user_id: Option<String>,

    /// Accepted as a JSON integer, an integral float, or an integer string.
    pub rating: Option<Value>,

    pub comment: Option<String>,
}

impl CreateReviewRequest {
    /// Check required fields in order, coerce the rating, and build the
    /// review for `tool_id` stamped at `now`.
    pub fn validate(self, tool_id: &str, now: DateTime<Utc>) -> Result<NewReview, ReviewError> {
        let user_id = self.user_id.ok_or(ReviewError::MissingField("user_id"))?;
        let rating = self.rating.ok_or(ReviewError::MissingField("rating"))?;
        let comment = self.comment.ok_or(ReviewError::MissingField("comment"))?;

        Ok(NewReview {
            tool_id: tool_id.to_string(),
            user_id,
            rating: coerce_rating(&rating)?,
            comment,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Interpret a rating value as an integer in 1..=5.
pub fn coerce_rating(value: &Value) -> Result<u8, ReviewError> {
    let not_integer = || ReviewError::RatingNotInteger(value.to_string());

    let rating = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => {
                let f = n.as_f64().ok_or_else(not_integer)?;
                if !f.is_finite() || f.fract() != 0.0 || f.abs() > i64::MAX as f64 {
                    return Err(not_integer());
                }
                f as i64
            }
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| not_integer())?,
        _ => return Err(not_integer()),
    };

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ReviewError::RatingOutOfRange(rating));
    }
    Ok(rating as u8)
}

/// A validated review ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub tool_id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewReview {
    pub fn into_document(self) -> Result<Document, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(doc) => Ok(doc),
            _ => Ok(Document::new()),
        }
    }
}
