//! Parking Lot Environment Abstraction Layer
//!
//! This crate provides the seam through which the simulation engine reaches
//! the outside world. The engine itself is a pure function of its inputs;
//! the only non-deterministic input it consumes is entropy.
//!
//! # Core Concept
//!
//! For reproducible runs, all randomness is drawn through [`LotContext`]:
//! - **Production**: [`OsContext`] - OS-seeded RNG, not reproducible
//! - **Simulation**: `SimContext` (in `parklot_sim`) - ChaCha8 seeded from a `u64`
//!
//! By deriving all entropy from a single 64-bit seed, any run (and any bug)
//! becomes reproducible via its seed number.
//!
//! # Example
//!
//! ```
//! use parklot_env::{LotContext, OsContext};
//!
//! let mut ctx = OsContext::new();
//! let roll = ctx.draw_below(3600).unwrap();
//! assert!(roll < 3600);
//! ```

mod context;
mod error;
mod os_impl;

pub use context::LotContext;
pub use error::EnvError;
pub use os_impl::OsContext;
