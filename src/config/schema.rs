//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the places service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Key-value store client settings.
    pub store: StoreConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 100 * 1024, // 100KB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Key-value store client configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Table the client reads and writes.
    pub table: String,

    /// Region of the managed endpoint.
    pub region: String,

    /// Target `local_endpoint` instead of the managed endpoint.
    pub offline: bool,

    /// Endpoint used when `offline` is set.
    pub local_endpoint: String,

    /// Name of the partition key attribute.
    pub key_attribute: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: "users-table-dev".to_string(),
            region: "us-east-1".to_string(),
            offline: false,
            local_endpoint: "http://localhost:8000".to_string(),
            key_attribute: "id".to_string(),
        }
    }
}

impl StoreConfig {
    /// Region used for requests; offline clients always sign for `localhost`.
    pub fn effective_region(&self) -> &str {
        if self.offline {
            "localhost"
        } else {
            &self.region
        }
    }

    /// Endpoint override, if any. `None` means the managed cloud endpoint.
    pub fn endpoint_override(&self) -> Option<&str> {
        self.offline.then_some(self.local_endpoint.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.limits.max_body_bytes, 102_400);
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [store]
            table = "places-dev"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.table, "places-dev");
        assert_eq!(config.store.key_attribute, "id");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_offline_endpoint() {
        let mut store = StoreConfig::default();
        assert_eq!(store.endpoint_override(), None);
        assert_eq!(store.effective_region(), "us-east-1");

        store.offline = true;
        assert_eq!(store.endpoint_override(), Some("http://localhost:8000"));
        assert_eq!(store.effective_region(), "localhost");
    }
}
