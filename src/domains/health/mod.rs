//! Health domain module.
//!
//! Health reflects whether the document store connected when the process
//! started. It is captured once and never re-probed.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Overall health state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,

    /// Present only when unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,

    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Reports the boot-time store connection result.
#[derive(Debug, Clone, Copy)]
pub struct HealthReporter {
    store_connected: bool,
}

impl HealthReporter {
    pub fn new(store_connected: bool) -> Self {
        Self { store_connected }
    }

    pub fn report(&self) -> HealthReport {
        if self.store_connected {
            HealthReport {
                status: HealthStatus::Healthy,
                database: None,
                timestamp: Utc::now(),
            }
        } else {
            HealthReport {
                status: HealthStatus::Unhealthy,
                database: Some("disconnected"),
                timestamp: Utc::now(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_is_healthy() {
        let report = HealthReporter::new(true).report();
        assert!(report.is_healthy());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("database").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_disconnected_is_unhealthy() {
        let report = HealthReporter::new(false).report();
        assert!(!report.is_healthy());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["database"], "disconnected");
    }
}
