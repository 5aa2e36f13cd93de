//! Error types for the simulation harness.

use parklot_core::LotError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a harness run before or instead of simulating.
#[derive(Debug, Error)]
pub enum SimError {
    /// Lot construction or simulator setup failed
    #[error("Lot error: {0}")]
    Lot(#[from] LotError),

    /// A design file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario name did not match any built-in scenario
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// Command-line arguments were inconsistent
    #[error("Usage error: {0}")]
    Usage(String),
}

impl SimError {
    /// Creates a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
