//! Document store layer.
//!
//! The catalog persists two flat collections of JSON documents. Backends
//! implement [`DocumentStore`] and are selected from the connection string:
//!
//! - `memory://` keeps everything in process memory
//! - `jsonl://<dir>` (or a bare path) keeps one JSON-lines file per collection
//!   under `<dir>/<database>/`

mod error;
mod jsonl;
mod memory;
mod object_id;
mod query;
mod traits;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

pub use error::{StoreError, StoreResult};
pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use object_id::ObjectId;
pub use query::{FindQuery, Filter, Sort, SortDirection, compare_values};
pub use traits::{DocumentStore, ID_FIELD, document_id};

use crate::core::config::StoreConfig;

/// A stored document.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Collection holding tool records.
pub const TOOLS_COLLECTION: &str = "tools";

/// Collection holding review records.
pub const REVIEWS_COLLECTION: &str = "reviews";

/// Open the backend named by the connection string and verify it responds.
pub async fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.uri.split_once("://") {
        Some(("memory", _)) => Arc::new(MemoryStore::new()),
        Some(("jsonl", path)) => Arc::new(JsonlStore::open(
            PathBuf::from(path).join(&config.database),
        )?),
        Some((scheme, _)) => return Err(StoreError::UnsupportedScheme(scheme.to_string())),
        None => Arc::new(JsonlStore::open(
            PathBuf::from(&config.uri).join(&config.database),
        )?),
    };

    store.ping().await?;
    info!("Connected to {} store", store.backend());
    Ok(store)
}
