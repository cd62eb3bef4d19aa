//! In-process document store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::error::{StoreError, StoreResult};
use super::object_id::ObjectId;
use super::query::FindQuery;
use super::traits::{DocumentStore, ID_FIELD, document_id};
use super::Document;

/// Document store held entirely in memory. Contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.collections
            .read()
            .map(|_| ())
            .map_err(|e| StoreError::state(e.to_string()))
    }

    async fn insert(&self, collection: &str, mut doc: Document) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));

        let mut collections = self
            .collections
            .write()
            .map_err(|e| StoreError::state(e.to_string()))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(doc);

        Ok(id)
    }

    async fn find(&self, collection: &str, query: &FindQuery) -> StoreResult<Vec<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StoreError::state(e.to_string()))?;

        Ok(collections
            .get(collection)
            .map(|docs| query.apply(docs))
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> StoreResult<Option<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StoreError::state(e.to_string()))?;

        let hex = id.to_hex();
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| document_id(doc) == Some(hex.as_str()))
                .cloned()
        }))
    }

    async fn update_by_id(&self, collection: &str, id: &ObjectId, set: Document) -> StoreResult<bool> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| StoreError::state(e.to_string()))?;

        let hex = id.to_hex();
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| document_id(doc) == Some(hex.as_str())))
        else {
            return Ok(false);
        };

        for (key, value) in set {
            if key != ID_FIELD {
                doc.insert(key, value);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::Filter;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_find_by_id() {
        let store = MemoryStore::new();
        let id = store
            .insert("tools", doc(json!({"name": "Foo"})))
            .await
            .unwrap();

        let found = store.find_by_id("tools", &id).await.unwrap().unwrap();
        assert_eq!(found["name"], "Foo");
        assert_eq!(found[ID_FIELD], id.to_hex());
    }

    #[tokio::test]
    async fn test_insert_replaces_caller_id() {
        let store = MemoryStore::new();
        let id = store
            .insert("tools", doc(json!({"_id": "mine", "name": "Foo"})))
            .await
            .unwrap();

        let all = store.find("tools", &FindQuery::all()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0][ID_FIELD], id.to_hex());
    }

    #[tokio::test]
    async fn test_find_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        let found = store.find("reviews", &FindQuery::all()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order() {
        let store = MemoryStore::new();
        for n in 0..5 {
            store.insert("reviews", doc(json!({"n": n}))).await.unwrap();
        }

        let found = store.find("reviews", &FindQuery::all()).await.unwrap();
        let order: Vec<_> = found.iter().map(|d| d["n"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_update_by_id_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert("tools", doc(json!({"name": "Foo", "reviewCount": 0})))
            .await
            .unwrap();

        let matched = store
            .update_by_id("tools", &id, doc(json!({"rating": 4.0, "reviewCount": 1})))
            .await
            .unwrap();
        assert!(matched);

        let found = store.find_by_id("tools", &id).await.unwrap().unwrap();
        assert_eq!(found["name"], "Foo");
        assert_eq!(found["rating"], 4.0);
        assert_eq!(found["reviewCount"], 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_matches_nothing() {
        let store = MemoryStore::new();
        let matched = store
            .update_by_id("tools", &ObjectId::new(), doc(json!({"rating": 1.0})))
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_find_with_filter() {
        let store = MemoryStore::new();
        store
            .insert("reviews", doc(json!({"tool_id": "a", "rating": 5})))
            .await
            .unwrap();
        store
            .insert("reviews", doc(json!({"tool_id": "b", "rating": 1})))
            .await
            .unwrap();

        let query = FindQuery::all().filter(Filter::eq("tool_id", "a"));
        let found = store.find("reviews", &query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["rating"], 5);
    }
}
