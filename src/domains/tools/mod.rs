//! Tools domain module.
//!
//! A tool is a catalog entry describing a piece of software. This module
//! handles listing with search/filter/sort, retrieval by id, creation, and
//! bulk import of a seed catalog.
//!
//! ## Architecture
//!
//! - `model.rs` - Stored record and creation payload
//! - `query.rs` - Listing parameters and their store query
//! - `service.rs` - Operations against the `tools` collection
//! - `import.rs` - Seed catalog import
//! - `error.rs` - Tool-specific error types

mod error;
mod import;
mod model;
mod query;
mod service;

pub use error::ToolError;
pub use import::{import_catalog, parse_catalog};
pub use model::{CreateToolRequest, NewTool, Tool};
pub use query::{ToolListParams, ToolSort};
pub use service::ToolService;
