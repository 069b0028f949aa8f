//! Store operations and the random operation mix

use std::fmt;

use rand::Rng;

use crate::error::BenchError;
use crate::payload::PayloadGenerator;
use crate::store::{StoreClient, StoreError};

/// The kinds of store interaction the benchmarks issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Get,
    Set,
    Del,
    Ping,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Get,
        OperationKind::Set,
        OperationKind::Del,
        OperationKind::Ping,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Get => "GET",
            OperationKind::Set => "SET",
            OperationKind::Del => "DEL",
            OperationKind::Ping => "PING",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single store call with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Get { key: String },
    Set { key: String, value: String },
    Del { key: String },
    Ping,
}

impl Operation {
    /// Build an operation of `kind` with freshly generated arguments
    pub fn generate(
        kind: OperationKind,
        payload: &dyn PayloadGenerator,
        key_len: usize,
        value_len: usize,
    ) -> Self {
        match kind {
            OperationKind::Get => Operation::Get {
                key: payload.generate(key_len),
            },
            OperationKind::Set => Operation::Set {
                key: payload.generate(key_len),
                value: payload.generate(value_len),
            },
            OperationKind::Del => Operation::Del {
                key: payload.generate(key_len),
            },
            OperationKind::Ping => Operation::Ping,
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Get { .. } => OperationKind::Get,
            Operation::Set { .. } => OperationKind::Set,
            Operation::Del { .. } => OperationKind::Del,
            Operation::Ping => OperationKind::Ping,
        }
    }

    /// Run the operation against a store session
    ///
    /// GET results are discarded; only success matters.
    pub async fn execute(&self, client: &dyn StoreClient) -> Result<(), StoreError> {
        match self {
            Operation::Get { key } => client.get(key).await.map(|_| ()),
            Operation::Set { key, value } => client.set(key, value).await,
            Operation::Del { key } => client.delete(key).await,
            Operation::Ping => client.ping().await,
        }
    }
}

/// Relative selection weights over operation kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMix {
    weights: Vec<(OperationKind, u32)>,
}

impl OperationMix {
    /// Equal weight for every kind
    pub fn uniform() -> Self {
        Self::weighted(OperationKind::ALL.iter().map(|&kind| (kind, 1)))
    }

    /// Arbitrary weights; zero-weight kinds are never selected
    pub fn weighted(weights: impl IntoIterator<Item = (OperationKind, u32)>) -> Self {
        Self {
            weights: weights
                .into_iter()
                .filter(|(_, weight)| *weight > 0)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    fn total_weight(&self) -> u64 {
        self.weights.iter().map(|(_, w)| u64::from(*w)).sum()
    }

    /// Draw one kind according to the weights
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Result<OperationKind, BenchError> {
        let total = self.total_weight();
        if total == 0 {
            return Err(BenchError::EmptyOperationMix);
        }

        let mut ticket = rng.random_range(0..total);
        for &(kind, weight) in &self.weights {
            let weight = u64::from(weight);
            if ticket < weight {
                return Ok(kind);
            }
            ticket -= weight;
        }

        // Unreachable while ticket < total
        Err(BenchError::EmptyOperationMix)
    }
}

impl Default for OperationMix {
    fn default() -> Self {
        Self::uniform()
    }
}
