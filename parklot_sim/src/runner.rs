//! Scenario runner - executes simulation runs and checks lot invariants.

use crate::context::SimContext;
use crate::error::SimError;
use crate::scenarios::ScenarioId;

use parklot_core::{
    ContextRandom, EventSink, LotDesign, NullSink, ParkingLot, SimulationStats, Simulator,
    SimulatorConfig, MAX_PARKING_DURATION, SIMULATION_DURATION,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Results from one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Scenario or design name
    pub name: String,

    /// Seed used
    pub seed: u64,

    /// Steps executed
    pub steps: u64,

    /// Hourly arrival rate used
    pub arrival_rate_per_hour: u32,

    /// Number of parkable spots
    pub capacity: usize,

    /// Cars parked when the run ended
    pub final_occupancy: usize,

    /// Counters collected during run
    pub stats: SimulationStats,

    /// Whether every lot invariant held at the end
    pub passed: bool,

    /// Failure message if any
    pub failure_reason: Option<String>,

    /// Wall-clock duration of the run
    pub elapsed_ms: u128,
}

/// Runs simulations.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Configuration seed
    seed: u64,

    /// Number of one-second steps
    steps: u64,

    /// Overrides the scenario's arrival rate when set
    arrival_rate: Option<u32>,

    /// Parking ceiling in seconds
    max_parking_duration: u64,
}

impl ScenarioRunner {
    /// Creates a new scenario runner.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            steps: SIMULATION_DURATION,
            arrival_rate: None,
            max_parking_duration: MAX_PARKING_DURATION,
        }
    }

    /// Sets the number of steps.
    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the hourly arrival rate for every run.
    pub fn with_arrival_rate(mut self, per_hour: u32) -> Self {
        self.arrival_rate = Some(per_hour);
        self
    }

    /// Sets the parking ceiling.
    pub fn with_max_parking_duration(mut self, secs: u64) -> Self {
        self.max_parking_duration = secs;
        self
    }

    /// Same configuration, different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Simulator configuration for a lot whose own default rate is `default_rate`.
    pub fn config(&self, default_rate: u32) -> SimulatorConfig {
        SimulatorConfig::default()
            .with_arrival_rate(self.arrival_rate.unwrap_or(default_rate))
            .with_steps(self.steps)
            .with_max_parking_duration(self.max_parking_duration)
    }

    /// Runs a built-in scenario and returns the result.
    pub fn run<S: EventSink>(
        &self,
        scenario: ScenarioId,
        sink: &mut S,
    ) -> Result<ScenarioResult, SimError> {
        info!("Starting scenario: {} (seed={})", scenario.name(), self.seed);
        debug!("  {}", scenario.description());
        self.run_design(
            scenario.name(),
            scenario.design()?,
            scenario.default_arrival_rate(),
            sink,
        )
    }

    /// Runs an arbitrary lot design.
    pub fn run_design<S: EventSink>(
        &self,
        name: &str,
        design: LotDesign,
        default_rate: u32,
        sink: &mut S,
    ) -> Result<ScenarioResult, SimError> {
        let lot = ParkingLot::new(design);
        info!("Total number of parkable spots (capacity): {}", lot.total_capacity());
        info!("=== SIMULATION START ===");

        let result = self.execute(name, lot, default_rate, sink)?;

        info!("=== SIMULATION END ===");
        info!("Simulation took {}ms.", result.elapsed_ms);
        info!(
            "Length of car queue at the front at the end of simulation: {}",
            result.stats.final_queue_length
        );
        if !result.passed {
            warn!(
                "{} (seed={}) violated lot invariants: {}",
                name,
                self.seed,
                result.failure_reason.as_deref().unwrap_or("unknown")
            );
        }
        Ok(result)
    }

    /// Runs one independent replica per seed, in parallel.
    ///
    /// Each replica owns its own lot, simulator and queues; results come back
    /// in the order of `seeds`.
    pub fn run_batch(
        &self,
        name: &str,
        design: &LotDesign,
        default_rate: u32,
        seeds: &[u64],
    ) -> Result<Vec<ScenarioResult>, SimError> {
        info!("Running {} replicas of {}", seeds.len(), name);
        seeds
            .par_iter()
            .map(|&seed| {
                let runner = self.clone().with_seed(seed);
                runner.execute(name, ParkingLot::new(design.clone()), default_rate, &mut NullSink)
            })
            .collect()
    }

    fn execute<S: EventSink>(
        &self,
        name: &str,
        lot: ParkingLot,
        default_rate: u32,
        sink: &mut S,
    ) -> Result<ScenarioResult, SimError> {
        let config = self.config(default_rate);
        let random = ContextRandom::new(SimContext::new(self.seed));
        let mut sim = Simulator::new(lot, random, config)?;

        let start = Instant::now();
        let stats = sim.simulate(sink)?;
        let elapsed_ms = start.elapsed().as_millis();

        let violations = check_invariants(sim.lot(), config.max_parking_duration, sim.clock());
        let passed = violations.is_empty();

        Ok(ScenarioResult {
            name: name.to_string(),
            seed: self.seed,
            steps: sim.clock(),
            arrival_rate_per_hour: config.arrival_rate_per_hour,
            capacity: sim.lot().total_capacity(),
            final_occupancy: sim.lot().total_occupancy(),
            stats,
            passed,
            failure_reason: if passed {
                None
            } else {
                Some(violations.join("; "))
            },
            elapsed_ms,
        })
    }
}

/// Checks the lot invariants after a run ending at `clock`.
///
/// Returns one message per violation:
/// - occupancy never exceeds capacity
/// - NA cells are empty
/// - every parked car is admissible for its cell's design
/// - no car has been parked longer than the ceiling
pub fn check_invariants(lot: &ParkingLot, max_parking_duration: u64, clock: u64) -> Vec<String> {
    let mut violations = Vec::new();

    let capacity = lot.total_capacity();
    let occupancy = lot.total_occupancy();
    if occupancy > capacity {
        violations.push(format!("occupancy {} exceeds capacity {}", occupancy, capacity));
    }

    for ((i, j), spot) in lot.occupied_spots() {
        let Some(design) = lot.design_at(i, j) else {
            continue;
        };
        if !design.is_parkable() {
            violations.push(format!("car {} parked on lane cell ({}, {})", spot.car(), i, j));
        } else if !spot.car().car_type().fits_in(design) {
            violations.push(format!(
                "car {} parked on incompatible {} spot ({}, {})",
                spot.car(),
                design,
                i,
                j
            ));
        }
        let parked_for = clock.saturating_sub(spot.timestamp());
        if parked_for > max_parking_duration {
            violations.push(format!(
                "car {} at ({}, {}) parked for {}s, ceiling is {}s",
                spot.car(),
                i,
                j,
                parked_for,
                max_parking_duration
            ));
        }
    }

    violations
}

/// Reads and parses a lot design file.
pub fn load_design(path: impl AsRef<Path>) -> Result<LotDesign, SimError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.parse()?)
}
