//! Error types for the parking lot environment abstraction.

use thiserror::Error;

/// Errors that can occur in the environment abstraction layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A draw was requested from an empty range `[0, 0)`
    #[error("Cannot draw from an empty range")]
    EmptyRange,
}
