//! Tool Catalog Library
//!
//! This crate provides a catalog service for software tools and their user
//! reviews, backed by a document store and served over HTTP.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the document store, the server
//!   and its HTTP transport
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: catalog entries with search, filter and sort
//!   - **reviews**: user reviews and rating aggregation
//!   - **health**: boot-time store connectivity
//!
//! # Example
//!
//! ```rust,no_run
//! use tool_catalog::core::{CatalogServer, Config, HttpTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = HttpTransport::new(config.http.clone());
//!     let server = CatalogServer::connect(config).await;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{CatalogServer, Config, Error, Result};
