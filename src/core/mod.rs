//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the catalog
//! service: configuration, error handling, the document store, server
//! lifecycle, and the HTTP transport.

pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::CatalogServer;
pub use transport::{HttpConfig, HttpTransport};
