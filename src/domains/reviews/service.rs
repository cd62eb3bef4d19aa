//! Review service: listing and creation of reviews for a tool.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::aggregator::RatingAggregator;
use super::model::{CreateReviewRequest, Review};
use crate::core::Result;
use crate::core::store::{
    DocumentStore, Filter, FindQuery, ObjectId, REVIEWS_COLLECTION, StoreError,
};

/// Review operations on the `reviews` collection.
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn DocumentStore>,
    aggregator: RatingAggregator,
}

impl ReviewService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            aggregator: RatingAggregator::new(store.clone()),
            store,
        }
    }

    /// All reviews referencing `tool_id`, in store order.
    #[instrument(skip(self))]
    pub async fn list(&self, tool_id: &str) -> Result<Vec<Review>> {
        let query = FindQuery::all().filter(Filter::eq("tool_id", tool_id));
        let docs = self.store.find(REVIEWS_COLLECTION, &query).await?;
        debug!(count = docs.len(), "Listed reviews");

        let reviews = docs
            .into_iter()
            .map(Review::from_document)
            .collect::<std::result::Result<Vec<_>, StoreError>>()?;
        Ok(reviews)
    }

    /// Validate and persist a review, then recompute the tool's rating.
    ///
    /// The tool is not required to exist. If the recompute fails the review
    /// stays stored and the error is returned.
    #[instrument(skip(self, request))]
    pub async fn create(&self, tool_id: &str, request: CreateReviewRequest) -> Result<ObjectId> {
        let review = request.validate(tool_id, Utc::now())?;
        let rating = review.rating;

        let id = self
            .store
            .insert(REVIEWS_COLLECTION, review.into_document()?)
            .await?;
        info!(%id, rating, "Review created");

        self.aggregator.refresh(tool_id).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::core::store::MemoryStore;
    use crate::domains::reviews::ReviewError;
    use crate::domains::tools::{CreateToolRequest, ToolService};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    struct Fixture {
        tools: ToolService,
        reviews: ReviewService,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        Fixture {
            tools: ToolService::new(store.clone()),
            reviews: ReviewService::new(store),
        }
    }

    fn review(value: serde_json::Value) -> CreateReviewRequest {
        serde_json::from_value(value).unwrap()
    }

    async fn create_tool(fixture: &Fixture) -> String {
        let request: CreateToolRequest =
            serde_json::from_value(json!({"name": "Foo", "description": "Bar", "category": "free"}))
                .unwrap();
        fixture.tools.create(request).await.unwrap().to_hex()
    }

    #[tokio::test]
    async fn test_reviews_update_tool_rating() {
        let fixture = fixture();
        let tool_id = create_tool(&fixture).await;

        assert_ok!(
            fixture
                .reviews
                .create(&tool_id, review(json!({"user_id": "u1", "rating": 4, "comment": "ok"})))
                .await
        );
        let tool = fixture.tools.get(&tool_id).await.unwrap();
        assert_eq!(tool.rating, Some(4.0));
        assert_eq!(tool.review_count, 1);

        assert_ok!(
            fixture
                .reviews
                .create(&tool_id, review(json!({"user_id": "u2", "rating": 2, "comment": "meh"})))
                .await
        );
        let tool = fixture.tools.get(&tool_id).await.unwrap();
        assert_eq!(tool.rating, Some(3.0));
        assert_eq!(tool.review_count, 2);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_not_persisted() {
        let fixture = fixture();
        let tool_id = create_tool(&fixture).await;

        for rating in [0, 6] {
            let err = assert_err!(
                fixture
                    .reviews
                    .create(
                        &tool_id,
                        review(json!({"user_id": "u1", "rating": rating, "comment": "x"}))
                    )
                    .await
            );
            assert!(matches!(err, Error::Review(ReviewError::RatingOutOfRange(_))));
        }

        assert!(fixture.reviews.list(&tool_id).await.unwrap().is_empty());
        let tool = fixture.tools.get(&tool_id).await.unwrap();
        assert_eq!(tool.review_count, 0);
        assert!(tool.rating.is_none());
    }

    #[tokio::test]
    async fn test_list_only_returns_reviews_for_tool_in_order() {
        let fixture = fixture();
        let first = create_tool(&fixture).await;
        let second = create_tool(&fixture).await;

        for (tool_id, user) in [(&first, "a"), (&second, "b"), (&first, "c")] {
            fixture
                .reviews
                .create(tool_id, review(json!({"user_id": user, "rating": 3, "comment": "x"})))
                .await
                .unwrap();
        }

        let reviews = fixture.reviews.list(&first).await.unwrap();
        let users: Vec<_> = reviews.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(users, vec!["a", "c"]);
        assert!(reviews.iter().all(|r| r.tool_id == first));
    }

    #[tokio::test]
    async fn test_review_for_unknown_tool_is_accepted() {
        let fixture = fixture();
        let ghost = ObjectId::new().to_hex();

        assert_ok!(
            fixture
                .reviews
                .create(&ghost, review(json!({"user_id": "u1", "rating": 5, "comment": "?"})))
                .await
        );
        assert_eq!(fixture.reviews.list(&ghost).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_comment_rejected() {
        let fixture = fixture();
        let err = fixture
            .reviews
            .create("t", review(json!({"user_id": "u1", "rating": 5})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: comment");
    }
}
