//! Rate-driven mixed-operation benchmark
//!
//! Dispatches one randomly chosen operation per tick for a fixed duration.
//! Dispatched operations run as detached tasks; each successful completion
//! bumps a shared [`CompletionCounter`]. Failed and stalled operations are
//! never counted and never retried, so they only depress the reported RPS.

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

use crate::config::RateConfig;
use crate::counter::CompletionCounter;
use crate::error::BenchError;
use crate::operation::{Operation, OperationMix};
use crate::payload::PayloadGenerator;
use crate::store::{StoreClient, StoreConnector};

/// Outcome of a rate-driven run
#[derive(Debug, Clone, Serialize)]
pub struct RateReport {
    /// Operations that completed successfully before the counter was read
    pub completions: u64,
    /// Dispatch attempts made before cancellation
    pub dispatched: u64,
    /// Target duration the dispatch loop ran for
    pub duration_secs: f64,
    /// completions / duration
    pub rps: f64,
}

impl RateReport {
    fn new(completions: u64, dispatched: u64, duration: Duration) -> Self {
        let duration_secs = duration.as_secs_f64();
        Self {
            completions,
            dispatched,
            duration_secs,
            rps: completions as f64 / duration_secs,
        }
    }
}

/// Fixed-duration, fixed-rate load generator
pub struct RateDrivenBenchmark {
    config: RateConfig,
    mix: OperationMix,
    seed: Option<u64>,
}

impl RateDrivenBenchmark {
    pub fn new(config: RateConfig) -> Self {
        Self {
            config,
            mix: OperationMix::uniform(),
            seed: None,
        }
    }

    pub fn with_mix(mut self, mix: OperationMix) -> Self {
        self.mix = mix;
        self
    }

    /// Seed operation-kind selection for reproducible runs
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Connect, then run the dispatch loop
    ///
    /// The session is left open: operations may still be in flight when the
    /// report is produced. Callers exit once it is printed.
    pub async fn run(
        &self,
        connector: &dyn StoreConnector,
        payload: &dyn PayloadGenerator,
    ) -> Result<RateReport, BenchError> {
        self.validate()?;
        let client = connector.connect().await.map_err(BenchError::Connection)?;
        self.drive(client, payload).await
    }

    /// Run the dispatch loop against an open session
    pub async fn drive(
        &self,
        client: Arc<dyn StoreClient>,
        payload: &dyn PayloadGenerator,
    ) -> Result<RateReport, BenchError> {
        self.validate()?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let counter = CompletionCounter::new();
        let mut dispatched: u64 = 0;

        info!(
            "Dispatching every {:?} for {:?}",
            self.config.dispatch_interval, self.config.duration
        );

        let start = Instant::now();
        let cancel = tokio::time::sleep_until(start + self.config.duration);
        tokio::pin!(cancel);

        let mut ticker = tokio::time::interval(self.config.dispatch_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Cancellation wins over a tick that becomes ready at the same instant
                biased;
                _ = &mut cancel => break,
                _ = ticker.tick() => {
                    let kind = self.mix.choose(&mut rng)?;
                    let operation = Operation::generate(
                        kind,
                        payload,
                        self.config.key_len,
                        self.config.value_len,
                    );
                    dispatched += 1;

                    let client = Arc::clone(&client);
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        if operation.execute(client.as_ref()).await.is_ok() {
                            counter.increment();
                        }
                    });
                }
            }
        }

        info!(
            "Dispatch cancelled after {:?} ({} operations dispatched)",
            start.elapsed(),
            dispatched
        );

        if !self.config.settle_grace.is_zero() {
            tokio::time::sleep(self.config.settle_grace).await;
        }

        let report = RateReport::new(counter.value(), dispatched, self.config.duration);
        info!(
            "Completed {} of {} operations ({:.1} ops/s)",
            report.completions, report.dispatched, report.rps
        );
        Ok(report)
    }

    fn validate(&self) -> Result<(), BenchError> {
        if self.config.duration.is_zero() {
            return Err(BenchError::InvalidConfig("duration must be positive"));
        }
        if self.config.dispatch_interval.is_zero() {
            return Err(BenchError::InvalidConfig(
                "dispatch interval must be positive",
            ));
        }
        if self.mix.is_empty() {
            return Err(BenchError::EmptyOperationMix);
        }
        Ok(())
    }
}
