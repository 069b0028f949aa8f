//! Sequential bulk lifecycle benchmark
//!
//! Writes, reads, then deletes a generated key population, one awaited call
//! at a time. All SETs finish before the first GET, and all GETs before the
//! first DELETE. The first failed call aborts the run.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::LifecycleConfig;
use crate::error::BenchError;
use crate::payload::PayloadGenerator;
use crate::store::{StoreClient, StoreConnector};

/// One stage of the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Set,
    Get,
    Delete,
}

impl Phase {
    /// Phases in execution order
    pub const ALL: [Phase; 3] = [Phase::Set, Phase::Get, Phase::Delete];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Set => "SET",
            Phase::Get => "GET",
            Phase::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// The keys exercised by one run, fixed once generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPopulation {
    keys: Vec<String>,
}

impl KeyPopulation {
    pub fn generate(size: usize, key_len: usize, payload: &dyn PayloadGenerator) -> Self {
        Self {
            keys: (0..size).map(|_| payload.generate(key_len)).collect(),
        }
    }

    pub fn from_keys(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// Wall-clock cost of one phase
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTiming {
    pub phase: Phase,
    pub operations: usize,
    pub elapsed: Duration,
}

impl PhaseTiming {
    pub fn ops_per_sec(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.operations as f64 / secs)
    }
}

/// Outcome of a completed lifecycle run
#[derive(Debug, Clone)]
pub struct LifecycleReport {
    pub population: usize,
    pub phases: Vec<PhaseTiming>,
}

impl LifecycleReport {
    pub fn total_operations(&self) -> usize {
        self.phases.iter().map(|p| p.operations).sum()
    }
}

/// Three-phase SET/GET/DELETE workload
pub struct LifecycleBenchmark {
    config: LifecycleConfig,
}

impl LifecycleBenchmark {
    pub fn new(config: LifecycleConfig) -> Self {
        Self { config }
    }

    /// Connect, generate the key population, and execute all phases
    pub async fn run(
        &self,
        connector: &dyn StoreConnector,
        payload: &dyn PayloadGenerator,
    ) -> Result<LifecycleReport, BenchError> {
        let client = connector.connect().await.map_err(BenchError::Connection)?;

        let population =
            KeyPopulation::generate(self.config.population, self.config.key_len, payload);
        info!(
            "Generated {} keys of length {}",
            population.len(),
            self.config.key_len
        );

        self.execute(client.as_ref(), &population).await
    }

    /// Execute all phases over an existing population, then close the session
    ///
    /// A failed close is logged and otherwise ignored.
    pub async fn execute(
        &self,
        client: &dyn StoreClient,
        population: &KeyPopulation,
    ) -> Result<LifecycleReport, BenchError> {
        let mut phases = Vec::with_capacity(Phase::ALL.len());
        for phase in Phase::ALL {
            let timing = self.run_phase(client, phase, population).await?;
            info!(
                "{} phase: {} operations in {:?}",
                timing.phase, timing.operations, timing.elapsed
            );
            phases.push(timing);
        }

        if let Err(e) = client.disconnect().await {
            warn!("Ignoring failed disconnect: {}", e);
        }

        Ok(LifecycleReport {
            population: population.len(),
            phases,
        })
    }

    async fn run_phase(
        &self,
        client: &dyn StoreClient,
        phase: Phase,
        population: &KeyPopulation,
    ) -> Result<PhaseTiming, BenchError> {
        let start = Instant::now();

        for key in population.iter() {
            let result = match phase {
                Phase::Set => client.set(key, &self.config.value).await,
                Phase::Get => client.get(key).await.map(|_| ()),
                Phase::Delete => client.delete(key).await,
            };
            result.map_err(|source| BenchError::Operation {
                phase,
                key: key.to_string(),
                source,
            })?;
        }

        Ok(PhaseTiming {
            phase,
            operations: population.len(),
            elapsed: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::AlphanumericGenerator;

    #[test]
    fn test_phase_order() {
        assert_eq!(Phase::ALL, [Phase::Set, Phase::Get, Phase::Delete]);
        assert_eq!(Phase::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_generated_population() {
        let payload = AlphanumericGenerator::seeded(11);
        let population = KeyPopulation::generate(25, 100, &payload);

        assert_eq!(population.len(), 25);
        assert!(population.iter().all(|k| k.len() == 100));
    }

    #[test]
    fn test_empty_population() {
        let payload = AlphanumericGenerator::seeded(11);
        let population = KeyPopulation::generate(0, 100, &payload);
        assert!(population.is_empty());
        assert_eq!(population.iter().count(), 0);
    }

    #[test]
    fn test_phase_throughput() {
        let timing = PhaseTiming {
            phase: Phase::Get,
            operations: 500,
            elapsed: Duration::from_millis(250),
        };
        assert_eq!(timing.ops_per_sec(), Some(2_000.0));

        let instant = PhaseTiming {
            elapsed: Duration::ZERO,
            ..timing
        };
        assert_eq!(instant.ops_per_sec(), None);
    }
}
