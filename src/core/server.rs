//! Catalog server and its lifecycle.
//!
//! The server owns the store handle opened at startup and the domain services
//! built on it. If the store could not be opened the server still runs: every
//! catalog operation answers [`Error::StoreUnavailable`] and health reports
//! unhealthy for the rest of the process lifetime.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::config::{Config, redact_uri};
use super::error::{Error, Result};
use super::store::{self, DocumentStore};
use crate::domains::health::{HealthReport, HealthReporter};
use crate::domains::reviews::ReviewService;
use crate::domains::tools::{ToolService, import_catalog};

/// The catalog service shared by every request handler.
#[derive(Clone)]
pub struct CatalogServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Store handle, absent when the boot-time connection failed.
    store: Option<Arc<dyn DocumentStore>>,

    /// Service for the `tools` collection.
    tools: Option<ToolService>,

    /// Service for the `reviews` collection.
    reviews: Option<ReviewService>,

    /// Boot-time connectivity result.
    health: HealthReporter,
}

impl CatalogServer {
    /// Open the configured store and build the server around it.
    ///
    /// A connection failure is logged, not returned.
    pub async fn connect(config: Config) -> Self {
        let uri = redact_uri(&config.store.uri);
        let store = match store::connect(&config.store).await {
            Ok(store) => {
                info!("Document store ready at {}", uri);
                Some(store)
            }
            Err(e) => {
                error!("Document store connection failed for {}: {}", uri, e);
                None
            }
        };
        Self::with_store(config, store)
    }

    /// Build a server around an already opened store (or none).
    pub fn with_store(config: Config, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self {
            config: Arc::new(config),
            tools: store.clone().map(ToolService::new),
            reviews: store.clone().map(ReviewService::new),
            health: HealthReporter::new(store.is_some()),
            store,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Tool operations, if the store is available.
    pub fn tools(&self) -> Result<&ToolService> {
        self.tools.as_ref().ok_or(Error::StoreUnavailable)
    }

    /// Review operations, if the store is available.
    pub fn reviews(&self) -> Result<&ReviewService> {
        self.reviews.as_ref().ok_or(Error::StoreUnavailable)
    }

    /// Health as captured at startup.
    pub fn health(&self) -> HealthReport {
        self.health.report()
    }

    /// Import the configured seed catalog, if any.
    ///
    /// Failures are logged and do not stop the server.
    pub async fn import_seed(&self) -> Option<usize> {
        let path = self.config.store.seed_file.as_ref()?;
        let Some(store) = &self.store else {
            warn!("Skipping seed import from {}: store unavailable", path.display());
            return None;
        };

        match import_catalog(store.as_ref(), path).await {
            Ok(count) => Some(count),
            Err(e) => {
                error!("Seed import from {} failed: {}", path.display(), e);
                None
            }
        }
    }
}
