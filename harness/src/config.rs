//! Benchmark configuration
//!
//! Configuration is loaded from environment variables. Every field has a
//! reference default; a variable that is unset or fails to parse leaves the
//! default in place.

use std::env;
use std::time::Duration;

/// Main benchmark configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL of the store under test
    pub store_url: String,
    /// Seed for operation selection and payload generation (random if unset)
    pub seed: Option<u64>,
    /// Print a JSON summary line after the human-readable report
    pub json_output: bool,

    /// Rate-driven scenario configuration
    pub rate: RateConfig,

    /// Lifecycle scenario configuration
    pub lifecycle: LifecycleConfig,
}

/// Rate-driven scenario configuration
#[derive(Debug, Clone)]
pub struct RateConfig {
    /// How long new operations are dispatched
    pub duration: Duration,
    /// Spacing between successive dispatch attempts
    pub dispatch_interval: Duration,
    /// Wait between cancellation and reading the completion counter
    pub settle_grace: Duration,
    /// Length of generated keys
    pub key_len: usize,
    /// Length of generated SET values
    pub value_len: usize,
}

/// Lifecycle scenario configuration
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Number of keys generated for the run
    pub population: usize,
    /// Length of each generated key
    pub key_len: usize,
    /// Value written for every key
    pub value: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: "redis://127.0.0.1:6379/".to_string(),
            seed: None,
            json_output: false,
            rate: RateConfig::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5),
            dispatch_interval: Duration::from_millis(1),
            settle_grace: Duration::ZERO,
            key_len: 32,
            value_len: 32,
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            population: 100_000,
            key_len: 100,
            value: "value".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Store config
        if let Some(url) = lookup("REDIS_URL")
            && !url.is_empty()
        {
            config.store_url = url;
        }
        if let Some(val) = lookup("BENCH_SEED")
            && let Ok(seed) = val.parse()
        {
            config.seed = Some(seed);
        }
        if let Some(val) = lookup("BENCH_JSON") {
            config.json_output = val.to_lowercase() == "true" || val == "1";
        }

        // Rate-driven config
        if let Some(val) = lookup("BENCH_DURATION_SECS")
            && let Ok(secs) = val.parse::<u64>()
            && secs > 0
        {
            config.rate.duration = Duration::from_secs(secs);
        }
        if let Some(val) = lookup("BENCH_DISPATCH_INTERVAL_MS")
            && let Ok(ms) = val.parse::<u64>()
            && ms > 0
        {
            config.rate.dispatch_interval = Duration::from_millis(ms);
        }
        if let Some(val) = lookup("BENCH_SETTLE_GRACE_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.rate.settle_grace = Duration::from_millis(ms);
        }
        if let Some(val) = lookup("BENCH_PAYLOAD_LEN")
            && let Ok(len) = val.parse::<usize>()
        {
            config.rate.key_len = len;
            config.rate.value_len = len;
        }

        // Lifecycle config
        if let Some(val) = lookup("LIFECYCLE_POPULATION")
            && let Ok(n) = val.parse()
        {
            config.lifecycle.population = n;
        }
        if let Some(val) = lookup("LIFECYCLE_KEY_LEN")
            && let Ok(len) = val.parse()
        {
            config.lifecycle.key_len = len;
        }
        if let Some(value) = lookup("LIFECYCLE_VALUE") {
            config.lifecycle.value = value;
        }

        config
    }
}
