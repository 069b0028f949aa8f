//! Random key and value generation

use std::sync::{Mutex, PoisonError};

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces throwaway strings for keys and values
///
/// Only the length matters; outputs may collide.
pub trait PayloadGenerator: Send + Sync {
    /// Return a string of exactly `len` characters
    fn generate(&self, len: usize) -> String;
}

/// ASCII alphanumeric strings drawn from a seedable RNG
#[derive(Debug)]
pub struct AlphanumericGenerator {
    rng: Mutex<StdRng>,
}

impl AlphanumericGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for AlphanumericGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadGenerator for AlphanumericGenerator {
    fn generate(&self, len: usize) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (&mut *rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}
