//! redbench library
//!
//! Benchmark drivers for Redis-protocol key-value stores. Two independent
//! scenarios share the same store capability:
//! - [`rate`]: fixed-duration, fixed-tick load with a random operation mix
//! - [`lifecycle`]: sequential SET/GET/DELETE over a generated key population

pub mod config;
pub mod counter;
pub mod error;
pub mod lifecycle;
pub mod operation;
pub mod payload;
pub mod rate;
pub mod store;

// Re-export commonly used types
pub use config::{Config, LifecycleConfig, RateConfig};
pub use counter::CompletionCounter;
pub use error::BenchError;
pub use lifecycle::{KeyPopulation, LifecycleBenchmark, LifecycleReport, Phase, PhaseTiming};
pub use operation::{Operation, OperationKind, OperationMix};
pub use payload::{AlphanumericGenerator, PayloadGenerator};
pub use rate::{RateDrivenBenchmark, RateReport};
pub use store::{RedisConnector, RedisStore, StoreClient, StoreConnector, StoreError};
