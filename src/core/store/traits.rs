//! The document store interface.

use async_trait::async_trait;

use super::error::StoreResult;
use super::object_id::ObjectId;
use super::query::FindQuery;
use super::Document;

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// Query, insert and update-by-id over named collections of JSON documents.
///
/// Each call is atomic on its own; nothing spans two calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logging.
    fn backend(&self) -> &'static str;

    /// Verify the store is reachable and its collections are readable.
    async fn ping(&self) -> StoreResult<()>;

    /// Insert a document, assigning it a fresh `_id`.
    ///
    /// Any `_id` already present in `doc` is replaced.
    async fn insert(&self, collection: &str, doc: Document) -> StoreResult<ObjectId>;

    /// Insert several documents, returning their ids in input order.
    async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> StoreResult<Vec<ObjectId>> {
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            ids.push(self.insert(collection, doc).await?);
        }
        Ok(ids)
    }

    /// Return the documents matching `query`, in query order.
    async fn find(&self, collection: &str, query: &FindQuery) -> StoreResult<Vec<Document>>;

    /// Fetch a single document by id.
    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> StoreResult<Option<Document>>;

    /// Overwrite the given fields on the document with this id.
    ///
    /// Fields not named in `set` are left untouched. Returns whether a
    /// document matched.
    async fn update_by_id(&self, collection: &str, id: &ObjectId, set: Document) -> StoreResult<bool>;
}

/// Read the `_id` of a stored document as text.
pub fn document_id(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(|v| v.as_str())
}
