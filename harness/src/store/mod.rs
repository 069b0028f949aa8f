//! Store client capability and its Redis-protocol implementation

pub mod redis;
pub mod service;

pub use self::redis::{RedisConnector, RedisStore};
pub use service::{StoreClient, StoreConnector, StoreError};
