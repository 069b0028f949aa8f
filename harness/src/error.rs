use thiserror::Error;

use crate::lifecycle::Phase;
use crate::store::StoreError;

/// Errors that abort a benchmark run
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Store unreachable: {0}")]
    Connection(#[source] StoreError),

    #[error("{phase} phase failed on key {key:?}: {source}")]
    Operation {
        phase: Phase,
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("Operation mix has no selectable kinds")]
    EmptyOperationMix,

    #[error("Invalid benchmark configuration: {0}")]
    InvalidConfig(&'static str),
}
