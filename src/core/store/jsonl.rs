//! JSONL-backed document store with an in-memory cache.
//!
//! Each collection lives in `<base>/<collection>.jsonl`, one document per
//! line. Inserts append to the file; updates rewrite it from the cache.
//! File access is blocking, so every operation runs on tokio's blocking pool.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::object_id::ObjectId;
use super::query::FindQuery;
use super::traits::{DocumentStore, ID_FIELD, document_id};
use super::{Document, REVIEWS_COLLECTION, TOOLS_COLLECTION};

/// File-backed document store.
pub struct JsonlStore {
    files: Arc<CollectionFiles>,
}

/// Collection files and their cached contents.
struct CollectionFiles {
    base_path: PathBuf,
    cache: RwLock<HashMap<String, Vec<Document>>>,
}

impl JsonlStore {
    /// Open (creating if needed) a store rooted at `base_path`.
    pub fn open(base_path: impl AsRef<Path>) -> StoreResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| {
            StoreError::connection(format!("cannot create {}: {}", base_path.display(), e))
        })?;

        Ok(Self {
            files: Arc::new(CollectionFiles {
                base_path,
                cache: RwLock::new(HashMap::new()),
            }),
        })
    }

    /// Run a file operation on the blocking pool.
    async fn blocking<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&CollectionFiles) -> StoreResult<T> + Send + 'static,
    {
        let files = Arc::clone(&self.files);
        tokio::task::spawn_blocking(move || op(&files))
            .await
            .map_err(|e| StoreError::state(format!("file task failed: {}", e)))?
    }
}

impl CollectionFiles {
    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_path.join(format!("{}.jsonl", collection))
    }

    /// Load a collection into the cache if not already loaded.
    fn ensure_loaded(&self, collection: &str) -> StoreResult<()> {
        {
            let cache = self.cache.read().map_err(|e| StoreError::state(e.to_string()))?;
            if cache.contains_key(collection) {
                return Ok(());
            }
        }

        let mut cache = self.cache.write().map_err(|e| StoreError::state(e.to_string()))?;
        if cache.contains_key(collection) {
            return Ok(());
        }

        let path = self.collection_path(collection);
        let mut docs = Vec::new();
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<Value>(&line)? {
                    Value::Object(doc) if document_id(&doc).is_some() => docs.push(doc),
                    _ => {
                        return Err(StoreError::malformed(
                            collection,
                            "line is not an object with a string _id",
                        ));
                    }
                }
            }
        }

        debug!(collection, count = docs.len(), "Loaded collection");
        cache.insert(collection.to_string(), docs);
        Ok(())
    }

    fn append_to_file(&self, collection: &str, doc: &Document) -> StoreResult<()> {
        let path = self.collection_path(collection);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", serde_json::to_string(doc)?)?;
        Ok(())
    }

    fn rewrite_file(&self, collection: &str, docs: &[Document]) -> StoreResult<()> {
        let path = self.collection_path(collection);
        let tmp_path = path.with_extension("jsonl.tmp");
        {
            let mut file = File::create(&tmp_path)?;
            for doc in docs {
                writeln!(file, "{}", serde_json::to_string(doc)?)?;
            }
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn ping(&self) -> StoreResult<()> {
        if !self.base_path.is_dir() {
            return Err(StoreError::connection(format!(
                "{} is not a directory",
                self.base_path.display()
            )));
        }
        self.ensure_loaded(TOOLS_COLLECTION)?;
        self.ensure_loaded(REVIEWS_COLLECTION)?;
        Ok(())
    }

    fn insert(&self, collection: &str, mut doc: Document) -> StoreResult<ObjectId> {
        self.ensure_loaded(collection)?;

        let id = ObjectId::new();
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));

        // Hold the write lock across the append so a concurrent rewrite
        // cannot drop this line. File first, then cache.
        let mut cache = self.cache.write().map_err(|e| StoreError::state(e.to_string()))?;
        self.append_to_file(collection, &doc)?;
        cache.entry(collection.to_string()).or_default().push(doc);

        Ok(id)
    }

    fn find(&self, collection: &str, query: &FindQuery) -> StoreResult<Vec<Document>> {
        self.ensure_loaded(collection)?;

        let cache = self.cache.read().map_err(|e| StoreError::state(e.to_string()))?;
        Ok(cache
            .get(collection)
            .map(|docs| query.apply(docs))
            .unwrap_or_default())
    }

    fn find_by_id(&self, collection: &str, id: &ObjectId) -> StoreResult<Option<Document>> {
        self.ensure_loaded(collection)?;

        let cache = self.cache.read().map_err(|e| StoreError::state(e.to_string()))?;
        let hex = id.to_hex();
        Ok(cache.get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| document_id(doc) == Some(hex.as_str()))
                .cloned()
        }))
    }

    fn update_by_id(&self, collection: &str, id: &ObjectId, set: Document) -> StoreResult<bool> {
        self.ensure_loaded(collection)?;

        let mut cache = self.cache.write().map_err(|e| StoreError::state(e.to_string()))?;
        let Some(docs) = cache.get_mut(collection) else {
            return Ok(false);
        };

        let hex = id.to_hex();
        let Some(doc) = docs
            .iter_mut()
            .find(|doc| document_id(doc) == Some(hex.as_str()))
        else {
            return Ok(false);
        };

        for (key, value) in set {
            if key != ID_FIELD {
                doc.insert(key, value);
            }
        }

        self.rewrite_file(collection, docs)?;
        Ok(true)
    }
}

#[async_trait]
impl DocumentStore for JsonlStore {
    fn backend(&self) -> &'static str {
        "jsonl"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.blocking(|files| files.ping()).await
    }

    async fn insert(&self, collection: &str, doc: Document) -> StoreResult<ObjectId> {
        let collection = collection.to_string();
        self.blocking(move |files| files.insert(&collection, doc)).await
    }

    async fn find(&self, collection: &str, query: &FindQuery) -> StoreResult<Vec<Document>> {
        let collection = collection.to_string();
        let query = query.clone();
        self.blocking(move |files| files.find(&collection, &query)).await
    }

    async fn find_by_id(&self, collection: &str, id: &ObjectId) -> StoreResult<Option<Document>> {
        let collection = collection.to_string();
        let id = *id;
        self.blocking(move |files| files.find_by_id(&collection, &id)).await
    }

    async fn update_by_id(&self, collection: &str, id: &ObjectId, set: Document) -> StoreResult<bool> {
        let collection = collection.to_string();
        let id = *id;
        self.blocking(move |files| files.update_by_id(&collection, &id, set)).await
    }
}
