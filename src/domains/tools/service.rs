//! Tool service: listing, retrieval and creation of catalog entries.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::error::ToolError;
use super::model::{CreateToolRequest, Tool};
use super::query::ToolListParams;
use crate::core::Result;
use crate::core::store::{DocumentStore, ObjectId, StoreError, TOOLS_COLLECTION};

/// Catalog operations on the `tools` collection.
#[derive(Clone)]
pub struct ToolService {
    store: Arc<dyn DocumentStore>,
}

impl ToolService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// List tools matching the filters, in the requested order.
    #[instrument(skip_all)]
    pub async fn list(&self, params: &ToolListParams) -> Result<Vec<Tool>> {
        let query = params.to_query()?;
        let docs = self.store.find(TOOLS_COLLECTION, &query).await?;
        debug!(count = docs.len(), "Listed tools");

        let tools = docs
            .into_iter()
            .map(Tool::from_document)
            .collect::<std::result::Result<Vec<_>, StoreError>>()?;
        Ok(tools)
    }

    /// Fetch one tool. Malformed identifiers are reported as not found.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Tool> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            debug!("Malformed tool id");
            return Err(ToolError::not_found(id).into());
        };

        match self.store.find_by_id(TOOLS_COLLECTION, &object_id).await? {
            Some(doc) => Ok(Tool::from_document(doc)?),
            None => Err(ToolError::not_found(id).into()),
        }
    }

    /// Validate and persist a new tool, returning its identifier.
    #[instrument(skip_all)]
    pub async fn create(&self, request: CreateToolRequest) -> Result<ObjectId> {
        let tool = request.validate()?;
        let name = tool.name.clone();

        let doc = tool.into_document(Utc::now())?;
        let id = self.store.insert(TOOLS_COLLECTION, doc).await?;

        info!(%id, name = %name, "Tool created");
        Ok(id)
    }
}
