//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: catalog entries, listing, retrieval, creation and seed import
//! - **reviews**: user reviews and the rating aggregator
//! - **health**: boot-time store connectivity

pub mod health;
pub mod reviews;
pub mod tools;
