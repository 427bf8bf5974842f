//! Key-value store subsystem.
//!
//! # Data Flow
//! ```text
//! StoreConfig (table, region, offline, local_endpoint)
//!     → connect() picks the backend
//!     → Arc<dyn KeyValueStore> held in AppState
//!     → available to handlers (none of the current routes call it)
//! ```
//!
//! # Design Decisions
//! - Values are JSON documents addressed by a single string key
//! - The client is built once at startup and passed in; no global instance
//! - Offline mode redirects the managed client to a local endpoint

pub mod memory;

#[cfg(feature = "aws")]
pub mod dynamo;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::StoreConfig;

pub use memory::MemoryStore;

#[cfg(feature = "aws")]
pub use dynamo::DynamoStore;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("item '{key}' could not be decoded: {reason}")]
    Codec { key: String, reason: String },
}

/// Reads and writes JSON values in a single table.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Table this client is bound to.
    fn table(&self) -> &str;

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Build the store client described by `config`.
#[cfg(feature = "aws")]
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    let store = DynamoStore::connect(config).await;
    tracing::info!(
        table = %store.table(),
        endpoint = config.endpoint_override().unwrap_or("managed"),
        "DynamoDB store client configured"
    );
    Ok(Arc::new(store))
}

/// Build the store client described by `config`.
///
/// Without the `aws` feature there is no managed backend; the table is served
/// from process memory.
#[cfg(not(feature = "aws"))]
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    tracing::warn!(
        table = %config.table,
        "Built without the `aws` feature, using in-memory store"
    );
    Ok(Arc::new(MemoryStore::new(config.table.clone())))
}
