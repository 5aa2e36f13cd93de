//! Parklot Core - Discrete-Event Parking Lot Simulation
//!
//! Cars arrive and leave according to probabilistic models while a scheduler
//! decides, every simulated second, whether the car at the head of the queue
//! can be admitted to a compatible spot and whether a parked car must leave.
//!
//! 1. **Exact probabilities**: [`Rational`] fractions, never floating point
//! 2. **Departure model**: [`TriangularDistribution`] over time parked
//! 3. **Typed grid**: [`ParkingLot`] with a fixed design and mutable occupancy
//! 4. **Event loop**: [`Simulator`] with FIFO queues and blocking head-of-line retry
//!
//! All randomness enters through the [`RandomGenerator`] capability, so a run
//! is fully determined by its random source.

pub mod distribution;
pub mod error;
pub mod events;
pub mod layout;
pub mod lot;
pub mod random;
pub mod rational;
pub mod simulator;
pub mod vehicle;

// Re-export key types for convenience
pub use distribution::TriangularDistribution;
pub use error::LotError;
pub use events::{EventSink, LotEvent, NullSink, SimulationStats};
pub use layout::LotDesign;
pub use lot::{ParkingLot, Spot};
pub use random::{ContextRandom, RandomGenerator};
pub use rational::Rational;
pub use simulator::{Simulator, SimulatorConfig, MAX_PARKING_DURATION, SIMULATION_DURATION};
pub use vehicle::{Car, CarType};
