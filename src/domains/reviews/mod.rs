//! Reviews domain module.
//!
//! Reviews are user ratings (1 to 5) with a comment, attached to a tool by
//! its identifier. Creating a review recomputes the tool's aggregate rating.

mod aggregator;
mod error;
mod model;
mod service;

pub use aggregator::{RatingAggregator, RatingSummary, round_one_decimal};
pub use error::ReviewError;
pub use model::{CreateReviewRequest, MAX_RATING, MIN_RATING, NewReview, Review, coerce_rating};
pub use service::ReviewService;
