//! Parking lot deterministic simulation harness
//!
//! This crate drives the `parklot_core` engine under controlled conditions.
//! All randomness flows through a [`SimContext`] derived from a single 64-bit
//! seed, so every run can be replayed bit-for-bit.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  ScenarioRunner                  │
//! │  ┌────────────┐   ┌─────────────────────────┐    │
//! │  │ SimContext │──►│ Simulator<ContextRandom>│    │
//! │  │ (ChaCha8)  │   │   ParkingLot + queues   │    │
//! │  └────────────┘   └───────────┬─────────────┘    │
//! │                               │ LotEvent         │
//! │                  ┌────────────▼──────────┐       │
//! │                  │ TracingSink/SimExport │       │
//! │                  └───────────────────────┘       │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use parklot_sim::{ScenarioRunner, scenarios::ScenarioId};
//! use parklot_core::NullSink;
//!
//! let runner = ScenarioRunner::new(42).with_steps(3600);
//! let result = runner.run(ScenarioId::Standard, &mut NullSink).unwrap();
//! assert!(result.passed);
//! ```

mod context;
mod error;
mod exporter;
mod runner;
mod sink;
pub mod scenarios;

pub use context::SimContext;
pub use error::SimError;
pub use exporter::{OccupancyFrame, SimExport};
pub use runner::{check_invariants, load_design, ScenarioResult, ScenarioRunner};
pub use sink::TracingSink;
