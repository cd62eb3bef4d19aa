//! HTTP transport for the catalog service.
//!
//! The router maps each endpoint onto the domain services held by
//! [`CatalogServer`](crate::core::CatalogServer) and translates every
//! [`Error`](crate::core::Error) into a JSON error body with the matching
//! status code.

mod config;
mod error;
mod extract;
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::{HttpTransport, build_router};
