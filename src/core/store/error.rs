//! Document store error types.

use thiserror::Error;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection string names a backend this build does not provide.
    #[error("Unsupported store scheme: {0}")]
    UnsupportedScheme(String),

    /// The store could not be opened or reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// An identifier could not be parsed as an object id.
    #[error("Invalid object id: {0}")]
    InvalidId(String),

    /// A stored document is not a JSON object or lacks its `_id`.
    #[error("Malformed document in '{collection}': {reason}")]
    MalformedDocument { collection: String, reason: String },

    /// Internal state of the backend is unusable (e.g. a poisoned lock).
    #[error("Store state error: {0}")]
    State(String),

    /// I/O error from a file-backed collection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a malformed document error.
    pub fn malformed(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            collection: collection.into(),
            reason: reason.into(),
        }
    }

    /// Create a state error.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }
}
