//! Tool records and the creation payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ToolError;
use crate::core::store::{Document, ID_FIELD, StoreError, TOOLS_COLLECTION};

/// Fields owned by the store or the rating aggregator, never by callers.
const RESERVED_FIELDS: [&str; 4] = [ID_FIELD, "rating", "reviewCount", "created_at"];

/// A catalog entry describing a piece of software.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    pub description: String,

    pub category: String,

    /// Pricing label such as "free" or "paid".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Mean review rating, absent until the first review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(rename = "reviewCount", default)]
    pub review_count: u64,

    #[serde(rename = "releaseDate", default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(rename = "popularityScore", default, skip_serializing_if = "Option::is_none")]
    pub popularity_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Any other fields supplied at creation, returned unchanged.
    #[serde(flatten)]
    pub extra: Document,
}

impl Tool {
    /// Decode a stored document.
    pub fn from_document(doc: Document) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| StoreError::malformed(TOOLS_COLLECTION, e.to_string()))
    }
}

/// Body of `POST /tools`.
///
/// Required fields are optional here so that a missing one is reported by
/// name instead of as a generic decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateToolRequest {
    pub name: Option<String>,

    pub description: Option<String>,

    pub category: Option<String>,

    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,

    #[serde(rename = "popularityScore", default)]
    pub popularity_score: Option<f64>,

    #[serde(flatten)]
    pub extra: Document,
}

impl CreateToolRequest {
    /// Check required fields in order and produce a validated tool.
    pub fn validate(self) -> Result<NewTool, ToolError> {
        let name = self.name.ok_or(ToolError::MissingField("name"))?;
        let description = self
            .description
            .ok_or(ToolError::MissingField("description"))?;
        let category = self.category.ok_or(ToolError::MissingField("category"))?;

        let mut extra = self.extra;
        for field in RESERVED_FIELDS {
            extra.remove(field);
        }

        Ok(NewTool {
            name,
            description,
            category,
            price: self.price,
            tags: self.tags.unwrap_or_default(),
            release_date: self.release_date,
            popularity_score: self.popularity_score,
            extra,
        })
    }
}

/// A validated tool ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTool {
    pub name: String,

    pub description: String,

    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    pub tags: Vec<String>,

    #[serde(rename = "releaseDate", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(rename = "popularityScore", skip_serializing_if = "Option::is_none")]
    pub popularity_score: Option<f64>,

    #[serde(flatten)]
    pub extra: Document,
}

impl NewTool {
    /// Build the stored document, stamping the creation time.
    pub fn into_document(self, created_at: DateTime<Utc>) -> Result<Document, serde_json::Error> {
        let mut doc = match serde_json::to_value(self)? {
            Value::Object(doc) => doc,
            _ => Document::new(),
        };
        doc.insert("reviewCount".to_string(), Value::from(0u64));
        doc.insert("created_at".to_string(), serde_json::to_value(created_at)?);
        Ok(doc)
    }
}
