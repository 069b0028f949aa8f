//! Store capability traits

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a store client
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

/// An open session against a key-value store
///
/// Implementations must allow concurrent calls through a shared reference;
/// the rate-driven benchmark keeps many operations in flight on one session.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Fetch a value, `None` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store a value under a key
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Round-trip a PING
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the session
    async fn disconnect(&self) -> Result<(), StoreError>;
}

/// Opens store sessions
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn StoreClient>, StoreError>;
}
