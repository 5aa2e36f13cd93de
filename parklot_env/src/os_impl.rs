//! Production implementation of LotContext using OS entropy.

use crate::{EnvError, LotContext};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Production context backed by OS entropy.
///
/// This is the "real" implementation: every run differs.
/// The generator is seeded once from the OS and then drawn from locally.
pub struct OsContext {
    rng: StdRng,
}

impl OsContext {
    /// Creates a new OsContext.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for OsContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LotContext for OsContext {
    fn draw_below(&mut self, bound: u64) -> Result<u64, EnvError> {
        if bound == 0 {
            return Err(EnvError::EmptyRange);
        }
        Ok(self.rng.gen_range(0..bound))
    }

    fn seed(&self) -> u64 {
        // Production is not seeded
        0
    }
}
