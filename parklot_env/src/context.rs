//! Core entropy context trait for the simulation engine.

use crate::EnvError;

/// The central interface for entropy.
///
/// This trait abstracts the random source so that the engine can run
/// with OS entropy in production and with a seeded generator in simulation.
///
/// # Implementations
///
/// - **Production**: `OsContext` - wraps an OS-seeded `StdRng`
/// - **Simulation**: `SimContext` - wraps `ChaCha8Rng(seed)`
///
/// # Determinism
///
/// Integer draws are the only primitive. Probabilities are exact rationals in
/// the engine, so a draw in `[0, denominator)` compared against the numerator
/// decides an event without any floating-point rounding.
pub trait LotContext {
    /// Returns a uniformly distributed integer in `[0, bound)`.
    ///
    /// Fails with [`EnvError::EmptyRange`] when `bound == 0`.
    fn draw_below(&mut self, bound: u64) -> Result<u64, EnvError>;

    /// Returns the context's seed (for logging/debugging).
    ///
    /// In production, returns 0 (not seeded).
    /// In simulation, returns the master seed.
    fn seed(&self) -> u64;
}

impl<C: LotContext + ?Sized> LotContext for &mut C {
    fn draw_below(&mut self, bound: u64) -> Result<u64, EnvError> {
        (**self).draw_below(bound)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}
