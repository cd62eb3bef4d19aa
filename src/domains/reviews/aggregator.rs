//! Rating aggregation.
//!
//! A tool's `rating` and `reviewCount` are always recomputed from every
//! review that references it. The read of the reviews and the write onto the
//! tool are two separate store operations, so two reviews landing at the
//! same moment can race and the later write wins with a stale count.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::core::Result;
use crate::core::store::{
    Document, DocumentStore, Filter, FindQuery, ObjectId, REVIEWS_COLLECTION, TOOLS_COLLECTION,
};

/// Average rating and number of reviews for one tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Mean rating rounded to one decimal place.
    pub average: f64,
    pub count: u64,
}

impl RatingSummary {
    /// Summarise a tool's review documents.
    ///
    /// Every review counts towards `count`; only numeric ratings contribute
    /// to the mean. Returns `None` when there is nothing to average.
    pub fn from_reviews(reviews: &[Document]) -> Option<Self> {
        let ratings: Vec<f64> = reviews
            .iter()
            .filter_map(|r| r.get("rating").and_then(Value::as_f64))
            .collect();
        if ratings.is_empty() {
            return None;
        }

        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        Some(Self {
            average: round_one_decimal(mean),
            count: reviews.len() as u64,
        })
    }

    fn to_update(self) -> Document {
        let mut set = Document::new();
        set.insert("rating".to_string(), Value::from(self.average));
        set.insert("reviewCount".to_string(), Value::from(self.count));
        set
    }
}

/// Round to one decimal place.
///
/// Rounds the exact binary value, so `1.05` (stored just above 1.05) gives
/// `1.1` and `1.15` (stored just below) gives `1.1`. Exact ties go to even.
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Recomputes tool ratings from the `reviews` collection.
#[derive(Clone)]
pub struct RatingAggregator {
    store: Arc<dyn DocumentStore>,
}

impl RatingAggregator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Recompute and store the rating of `tool_id`.
    ///
    /// With no reviews the tool is left untouched. An id that is not a valid
    /// object id cannot name a tool, so nothing is written for it either.
    #[instrument(skip(self))]
    pub async fn refresh(&self, tool_id: &str) -> Result<Option<RatingSummary>> {
        let query = FindQuery::all().filter(Filter::eq("tool_id", tool_id));
        let reviews = self.store.find(REVIEWS_COLLECTION, &query).await?;

        let Some(summary) = RatingSummary::from_reviews(&reviews) else {
            debug!("No ratings to aggregate");
            return Ok(None);
        };

        let Ok(object_id) = ObjectId::parse_str(tool_id) else {
            debug!("Tool id is not an object id, skipping write");
            return Ok(Some(summary));
        };

        let matched = self
            .store
            .update_by_id(TOOLS_COLLECTION, &object_id, summary.to_update())
            .await?;
        info!(
            average = summary.average,
            count = summary.count,
            matched,
            "Refreshed tool rating"
        );
        Ok(Some(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn reviews(ratings: &[i64]) -> Vec<Document> {
        ratings
            .iter()
            .map(|r| doc(json!({"tool_id": "t", "rating": r})))
            .collect()
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(4.0), 4.0);
        assert_eq!(round_one_decimal(11.0 / 3.0), 3.7);
        assert_eq!(round_one_decimal(10.0 / 3.0), 3.3);
        assert_eq!(round_one_decimal(2.25), 2.2);
        assert_eq!(round_one_decimal(2.75), 2.8);
    }

    #[test]
    fn test_round_uses_exact_binary_value() {
        assert_eq!(round_one_decimal(21.0 / 20.0), 1.1);
        assert_eq!(round_one_decimal(23.0 / 20.0), 1.1);
        assert_eq!(round_one_decimal(69.0 / 20.0), 3.5);
    }

    #[test]
    fn test_summary_of_twenty_reviews() {
        // One 2 and nineteen 1s: mean 21/20
        let mut ratings = vec![1i64; 19];
        ratings.push(2);
        let summary = RatingSummary::from_reviews(&reviews(&ratings)).unwrap();
        assert_eq!(summary.average, 1.1);
        assert_eq!(summary.count, 20);
    }

    #[test]
    fn test_summary_mean_and_count() {
        let summary = RatingSummary::from_reviews(&reviews(&[4, 2])).unwrap();
        assert_eq!(summary.average, 3.0);
        assert_eq!(summary.count, 2);

        let summary = RatingSummary::from_reviews(&reviews(&[5, 4, 4])).unwrap();
        assert_eq!(summary.average, 4.3);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_summary_empty_is_none() {
        assert!(RatingSummary::from_reviews(&[]).is_none());
    }

    #[tokio::test]
    async fn test_refresh_writes_onto_tool() {
        let store = Arc::new(MemoryStore::new());
        let tool_id = store
            .insert(TOOLS_COLLECTION, doc(json!({"name": "Foo", "reviewCount": 0})))
            .await
            .unwrap();
        for rating in [5, 4, 4] {
            store
                .insert(
                    REVIEWS_COLLECTION,
                    doc(json!({"tool_id": tool_id.to_hex(), "rating": rating})),
                )
                .await
                .unwrap();
        }
        // A review of another tool must not count
        store
            .insert(REVIEWS_COLLECTION, doc(json!({"tool_id": "other", "rating": 1})))
            .await
            .unwrap();

        let aggregator = RatingAggregator::new(store.clone());
        let summary = aggregator.refresh(&tool_id.to_hex()).await.unwrap().unwrap();
        assert_eq!(summary.count, 3);

        let tool = store
            .find_by_id(TOOLS_COLLECTION, &tool_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tool["rating"], 4.3);
        assert_eq!(tool["reviewCount"], 3);
    }

    #[tokio::test]
    async fn test_refresh_without_reviews_keeps_prior_rating() {
        let store = Arc::new(MemoryStore::new());
        let tool_id = store
            .insert(
                TOOLS_COLLECTION,
                doc(json!({"name": "Foo", "rating": 4.5, "reviewCount": 9})),
            )
            .await
            .unwrap();

        let aggregator = RatingAggregator::new(store.clone());
        assert!(aggregator.refresh(&tool_id.to_hex()).await.unwrap().is_none());

        let tool = store
            .find_by_id(TOOLS_COLLECTION, &tool_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tool["rating"], 4.5);
        assert_eq!(tool["reviewCount"], 9);
    }

    #[tokio::test]
    async fn test_refresh_with_malformed_tool_id() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(REVIEWS_COLLECTION, doc(json!({"tool_id": "not-an-id", "rating": 2})))
            .await
            .unwrap();

        let aggregator = RatingAggregator::new(store);
        let summary = aggregator.refresh("not-an-id").await.unwrap().unwrap();
        assert_eq!(summary.average, 2.0);
    }
}
