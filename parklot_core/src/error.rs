//! Error types for the parking lot core.

use thiserror::Error;

/// Errors surfaced by the simulation core.
///
/// All of these are construction-time failures. Out-of-range grid access and
/// empty-queue dequeues are absorbed locally and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    /// A rational was constructed with a zero denominator
    #[error("Invalid argument: denominator must be non-zero")]
    ZeroDenominator,

    /// Triangular distribution parameters violate a < c < b
    #[error("Invalid argument: triangular distribution requires a < c < b (got a={a}, c={c}, b={b})")]
    InvalidDistribution { a: i64, c: i64, b: i64 },

    /// Lot grid is empty in at least one dimension
    #[error("Invalid argument: lot must be at least 1x1 (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Lot design text contains a label that names no car type
    #[error("Unknown spot label '{label}' on line {line}")]
    UnknownLabel { line: usize, label: String },

    /// Lot design text has rows of differing widths
    #[error("Row on line {line} has {found} spots, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Exact arithmetic left the representable range
    #[error("Arithmetic overflow in exact rational computation")]
    Overflow,

    /// `simulate()` was called on a run that already completed
    #[error("Simulation already finished at clock {0}")]
    SimulationFinished(u64),
}
