//! The simulation engine.
//!
//! A logical clock advances one second per step. Each step runs, in order:
//!
//! 1. **Arrival sampling** - with probability `rate / 3600` a new car joins
//!    the incoming queue.
//! 2. **Departure sweep** - every parked car is checked in row-major order;
//!    a car at the parking ceiling is evicted, any other car leaves with the
//!    probability given by the departure density. Leavers join the outgoing
//!    queue.
//! 3. **Admission** - one attempt to park the head of the incoming queue. A
//!    head that finds no spot stays pending and is retried on every following
//!    step before any newer arrival is considered.
//! 4. **Exit report** - at most one car is dequeued from the outgoing queue.
//! 5. **Clock advance** - exactly one second.

use crate::distribution::TriangularDistribution;
use crate::error::LotError;
use crate::events::{EventSink, LotEvent, SimulationStats};
use crate::lot::{ParkingLot, Spot};
use crate::random::RandomGenerator;
use crate::rational::Rational;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Longest a car may stay parked, in simulated seconds (8 hours).
pub const MAX_PARKING_DURATION: u64 = 8 * 3600;

/// Default simulation length, in simulated seconds (24 hours).
pub const SIMULATION_DURATION: u64 = 24 * 3600;

const SECONDS_PER_HOUR: i64 = 3600;

/// Parameters of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulatorConfig {
    /// Average number of cars showing up per hour
    pub arrival_rate_per_hour: u32,

    /// Number of one-second steps to run
    pub steps: u64,

    /// Parking ceiling; also the upper limit of the departure density
    pub max_parking_duration: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            arrival_rate_per_hour: 0,
            steps: SIMULATION_DURATION,
            max_parking_duration: MAX_PARKING_DURATION,
        }
    }
}

impl SimulatorConfig {
    pub fn with_arrival_rate(mut self, per_hour: u32) -> Self {
        self.arrival_rate_per_hour = per_hour;
        self
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_max_parking_duration(mut self, secs: u64) -> Self {
        self.max_parking_duration = secs;
        self
    }
}

/// Runs one parking lot through a fixed number of steps.
///
/// Owns the lot, the random source, both queues and the pending slot. A
/// simulator runs once; it is not resumable after [`simulate`](Self::simulate)
/// returns.
pub struct Simulator<R> {
    lot: ParkingLot,
    random: R,
    config: SimulatorConfig,
    arrival_probability: Rational,
    departure_pdf: TriangularDistribution,
    clock: u64,
    incoming: VecDeque<Spot>,
    outgoing: VecDeque<Spot>,
    /// Head of the incoming queue that failed to park and must be retried.
    pending: Option<Spot>,
    cancel: Option<Arc<AtomicBool>>,
    stats: SimulationStats,
    finished: bool,
}

impl<R: RandomGenerator> Simulator<R> {
    /// Creates a simulator over `lot`.
    ///
    /// Fails when the parking ceiling cannot define a triangular density
    /// (`Triangular(0, max/2, max)` needs `max >= 2`).
    pub fn new(lot: ParkingLot, random: R, config: SimulatorConfig) -> Result<Self, LotError> {
        let arrival_probability =
            Rational::new(i64::from(config.arrival_rate_per_hour), SECONDS_PER_HOUR)?;
        let max = i64::try_from(config.max_parking_duration).map_err(|_| LotError::Overflow)?;
        let departure_pdf = TriangularDistribution::new(0, max / 2, max)?;

        Ok(Self {
            lot,
            random,
            config,
            arrival_probability,
            departure_pdf,
            clock: 0,
            incoming: VecDeque::new(),
            outgoing: VecDeque::new(),
            pending: None,
            cancel: None,
            stats: SimulationStats::default(),
            finished: false,
        })
    }

    /// Attaches a stop flag checked once per step boundary.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn steps(&self) -> u64 {
        self.config.steps
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    pub fn into_lot(self) -> ParkingLot {
        self.lot
    }

    pub fn arrival_probability(&self) -> Rational {
        self.arrival_probability
    }

    pub fn departure_pdf(&self) -> &TriangularDistribution {
        &self.departure_pdf
    }

    /// Cars waiting in the incoming queue, excluding the pending car.
    pub fn incoming_len(&self) -> usize {
        self.incoming.len()
    }

    pub fn outgoing_len(&self) -> usize {
        self.outgoing.len()
    }

    /// The head-of-line car currently blocked waiting for a spot.
    pub fn pending(&self) -> Option<&Spot> {
        self.pending.as_ref()
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Runs until the clock reaches the step budget (or the stop flag is set).
    ///
    /// Every event is handed to `sink` in step order. Calling this again after
    /// it returned fails with [`LotError::SimulationFinished`].
    pub fn simulate<S: EventSink>(&mut self, sink: &mut S) -> Result<SimulationStats, LotError> {
        if self.finished {
            return Err(LotError::SimulationFinished(self.clock));
        }

        while self.clock < self.config.steps {
            if self.is_cancelled() {
                break;
            }
            self.step(sink);
        }

        self.finished = true;
        self.stats.final_queue_length = self.incoming.len();
        self.stats.pending_at_end = self.pending.is_some();
        Ok(self.stats.clone())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn step<S: EventSink>(&mut self, sink: &mut S) {
        self.sample_arrival(sink);
        self.sweep_departures(sink);
        self.admit(sink);
        self.report_exit(sink);
        self.clock += 1;
    }

    fn sample_arrival<S: EventSink>(&mut self, sink: &mut S) {
        if !self.random.event_occurred(&self.arrival_probability) {
            return;
        }
        let car = self.random.generate_random_car();
        self.stats.arrivals += 1;
        sink.on_event(&LotEvent::Arrived {
            clock: self.clock,
            car: car.clone(),
        });
        self.incoming.push_back(Spot::new(car, self.clock));
    }

    fn sweep_departures<S: EventSink>(&mut self, sink: &mut S) {
        for i in 0..self.lot.num_rows() {
            for j in 0..self.lot.num_spots_per_row() {
                let Some(parked_at) = self.lot.get_spot_at(i, j).map(Spot::timestamp) else {
                    continue;
                };
                let duration = self.clock.saturating_sub(parked_at);

                let forced = duration == self.config.max_parking_duration;
                let leaves = forced || {
                    let x = i64::try_from(duration).unwrap_or(i64::MAX);
                    let p = self.departure_pdf.pdf(x);
                    self.random.event_occurred(&p)
                };
                if !leaves {
                    continue;
                }

                if let Some(spot) = self.lot.remove(i, j) {
                    if forced {
                        self.stats.forced_departures += 1;
                    } else {
                        self.stats.departures += 1;
                    }
                    sink.on_event(&LotEvent::Departed {
                        clock: self.clock,
                        car: spot.car().clone(),
                        row: i,
                        col: j,
                        parked_at,
                        forced,
                    });
                    self.outgoing.push_back(spot);
                }
            }
        }
    }

    fn admit<S: EventSink>(&mut self, sink: &mut S) {
        // A pending car always goes before anything still in the queue.
        let entry = match self.pending.take() {
            Some(entry) => entry,
            None => match self.incoming.pop_front() {
                Some(entry) => entry,
                None => return,
            },
        };

        match self.lot.attempt_parking(entry.car(), self.clock) {
            Some((row, col)) => {
                self.stats.admissions += 1;
                sink.on_event(&LotEvent::Entered {
                    clock: self.clock,
                    car: entry.car().clone(),
                    row,
                    col,
                    waited: self.clock - entry.timestamp(),
                    occupancy: self.lot.total_occupancy(),
                });
            }
            None => {
                self.stats.failed_attempts += 1;
                self.pending = Some(entry);
            }
        }
    }

    fn report_exit<S: EventSink>(&mut self, sink: &mut S) {
        if let Some(spot) = self.outgoing.pop_front() {
            self.stats.exits += 1;
            sink.on_event(&LotEvent::Exited {
                clock: self.clock,
                car: spot.into_car(),
                occupancy: self.lot.total_occupancy(),
            });
        }
    }
}
