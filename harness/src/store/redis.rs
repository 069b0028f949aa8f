//! Redis-protocol store client over a multiplexed async connection

use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError};
use tracing::debug;

use super::service::{StoreClient, StoreConnector, StoreError};

/// Connects to a Redis-protocol server by URL
#[derive(Debug, Clone)]
pub struct RedisConnector {
    url: String,
}

impl RedisConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StoreConnector for RedisConnector {
    async fn connect(&self) -> Result<Arc<dyn StoreClient>, StoreError> {
        let store = RedisStore::connect(&self.url).await?;
        Ok(Arc::new(store))
    }
}

/// A single multiplexed session
///
/// Every call clones the connection handle; clones pipeline their requests
/// over the same socket, so concurrent calls do not wait on each other.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    /// Open a session and verify it answers
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(connection_error)?;
        let mut connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(connection_error)?;
        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(connection_error)?;
        debug!("Connected to {}", url);
        Ok(Self { connection })
    }
}

#[async_trait]
impl StoreClient for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut con = self.connection.clone();
        con.get(key).await.map_err(operation_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut con = self.connection.clone();
        con.set(key, value).await.map_err(operation_error)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut con = self.connection.clone();
        // Servers differ on the reply: Redis counts removed keys, others send +OK
        let _: () = con.del(key).await.map_err(operation_error)?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut con = self.connection.clone();
        let _pong: String = redis::cmd("PING")
            .query_async(&mut con)
            .await
            .map_err(operation_error)?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        let mut con = self.connection.clone();
        let _: () = redis::cmd("QUIT")
            .query_async(&mut con)
            .await
            .map_err(shutdown_error)?;
        Ok(())
    }
}

fn connection_error(err: RedisError) -> StoreError {
    StoreError::Connection(err.to_string())
}

fn operation_error(err: RedisError) -> StoreError {
    StoreError::Operation(err.to_string())
}

fn shutdown_error(err: RedisError) -> StoreError {
    StoreError::Shutdown(err.to_string())
}
