//! Configuration management for the catalog service.
//!
//! Everything is read from environment variables (optionally via a `.env`
//! file) once at startup. Nothing here affects request handling afterwards.

use super::transport::HttpConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Deployment mode.
    pub environment: Environment,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Document store connection.
    pub store: StoreConfig,

    /// HTTP listener configuration.
    pub http: HttpConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the service as reported on `/`.
    pub name: String,

    /// The version of the service.
    pub version: String,
}

/// Deployment mode of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse a mode name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Log level used when none is configured explicitly.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production => "info",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Document store configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection string: `memory://`, `jsonl://<dir>` or a bare directory.
    pub uri: String,

    /// Database name, used as a subdirectory by file-backed stores.
    pub database: String,

    /// Optional JSON file of tools grouped by category, imported at startup.
    pub seed_file: Option<PathBuf>,
}

/// Custom Debug implementation to keep credentials out of logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("uri", &redact_uri(&self.uri))
            .field("database", &self.database)
            .field("seed_file", &self.seed_file)
            .finish()
    }
}

/// Hide any `user:password@` part of a connection string.
pub fn redact_uri(uri: &str) -> String {
    match uri.split_once("://") {
        Some((scheme, rest)) => match rest.rsplit_once('@') {
            Some((_, host)) => format!("{}://[REDACTED]@{}", scheme, host),
            None => uri.to_string(),
        },
        None => uri.to_string(),
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "jsonl://./data".to_string(),
            database: "catalog".to_string(),
            seed_file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            server: ServerConfig {
                name: "tool-catalog".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            environment,
            logging: LoggingConfig {
                level: environment.default_log_level().to_string(),
            },
            store: StoreConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Variables are prefixed with `CATALOG_`, for example
    /// `CATALOG_STORE_URI` or `CATALOG_HTTP_PORT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("CATALOG_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(env) = std::env::var("CATALOG_ENV") {
            match Environment::parse(&env) {
                Some(mode) => config.environment = mode,
                None => warn!("Unknown CATALOG_ENV '{}', using development", env),
            }
        }

        config.logging.level = std::env::var("CATALOG_LOG_LEVEL")
            .unwrap_or_else(|_| config.environment.default_log_level().to_string());

        if let Ok(uri) = std::env::var("CATALOG_STORE_URI") {
            config.store.uri = uri;
        } else {
            info!("CATALOG_STORE_URI not set, using {}", config.store.uri);
        }

        if let Ok(database) = std::env::var("CATALOG_DATABASE") {
            config.store.database = database;
        }

        if let Ok(seed) = std::env::var("CATALOG_SEED_FILE") {
            config.store.seed_file = Some(PathBuf::from(seed));
        }

        config.http = HttpConfig::from_env();

        config
    }
}
