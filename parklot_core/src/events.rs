//! Observable simulation events and run statistics.

use crate::vehicle::Car;
use serde::Serialize;
use std::fmt;

/// One observable thing that happened during a step.
///
/// Every admission, departure and exit report is emitted exactly once, in
/// step order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LotEvent {
    /// A car showed up and joined the incoming queue.
    Arrived { clock: u64, car: Car },

    /// A car left the incoming queue and parked at `(row, col)`.
    Entered {
        clock: u64,
        car: Car,
        row: usize,
        col: usize,
        /// Seconds spent queueing before admission.
        waited: u64,
        occupancy: usize,
    },

    /// A parked car was removed and moved to the outgoing queue.
    Departed {
        clock: u64,
        car: Car,
        row: usize,
        col: usize,
        parked_at: u64,
        /// Removed because it hit the parking ceiling, not by chance.
        forced: bool,
    },

    /// A car was dequeued from the outgoing queue.
    Exited {
        clock: u64,
        car: Car,
        occupancy: usize,
    },
}

impl LotEvent {
    pub fn clock(&self) -> u64 {
        match self {
            LotEvent::Arrived { clock, .. }
            | LotEvent::Entered { clock, .. }
            | LotEvent::Departed { clock, .. }
            | LotEvent::Exited { clock, .. } => *clock,
        }
    }

    pub fn car(&self) -> &Car {
        match self {
            LotEvent::Arrived { car, .. }
            | LotEvent::Entered { car, .. }
            | LotEvent::Departed { car, .. }
            | LotEvent::Exited { car, .. } => car,
        }
    }
}

impl fmt::Display for LotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotEvent::Arrived { clock, car } => {
                write!(f, "{} ARRIVED at timestep {}", car, clock)
            }
            LotEvent::Entered {
                clock,
                car,
                occupancy,
                ..
            } => write!(
                f,
                "{} ENTERED at timestep {}; occupancy is at {}",
                car, clock, occupancy
            ),
            LotEvent::Departed {
                clock,
                car,
                row,
                col,
                forced,
                ..
            } => write!(
                f,
                "{} LEFT ({}, {}) at timestep {}{}",
                car,
                row,
                col,
                clock,
                if *forced { " (max duration reached)" } else { "" }
            ),
            LotEvent::Exited {
                clock,
                car,
                occupancy,
            } => write!(
                f,
                "{} EXITED at timestep {}; occupancy is at {}",
                car, clock, occupancy
            ),
        }
    }
}

/// Observer receiving events as the simulation produces them.
pub trait EventSink {
    fn on_event(&mut self, event: &LotEvent);
}

impl EventSink for Vec<LotEvent> {
    fn on_event(&mut self, event: &LotEvent) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_event(&mut self, event: &LotEvent) {
        (**self).on_event(event)
    }
}

/// Forwards every event to both sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn on_event(&mut self, event: &LotEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &LotEvent) {}
}

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    /// Cars that joined the incoming queue
    pub arrivals: u64,

    /// Cars admitted into the lot
    pub admissions: u64,

    /// Admission attempts that found no compatible spot
    pub failed_attempts: u64,

    /// Cars evicted at the parking ceiling
    pub forced_departures: u64,

    /// Cars that left by chance
    pub departures: u64,

    /// Cars reported out of the outgoing queue
    pub exits: u64,

    /// Cars still waiting in the incoming queue at the end (pending car excluded)
    pub final_queue_length: usize,

    /// Whether a rejected head-of-line car was still waiting at the end
    pub pending_at_end: bool,
}

impl SimulationStats {
    /// Every car that left its spot, forced or not.
    pub fn total_departures(&self) -> u64 {
        self.forced_departures + self.departures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::CarType;

    #[test]
    fn test_event_display() {
        let car = Car::new(CarType::Small, "QWE321");
        let entered = LotEvent::Entered {
            clock: 12,
            car: car.clone(),
            row: 0,
            col: 1,
            waited: 0,
            occupancy: 3,
        };
        assert_eq!(
            entered.to_string(),
            "S(QWE321) ENTERED at timestep 12; occupancy is at 3"
        );

        let forced = LotEvent::Departed {
            clock: 100,
            car: car.clone(),
            row: 2,
            col: 3,
            parked_at: 0,
            forced: true,
        };
        assert!(forced.to_string().ends_with("(max duration reached)"));
        assert_eq!(forced.clock(), 100);
        assert_eq!(forced.car(), &car);
    }

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink: Vec<LotEvent> = Vec::new();
        let car = Car::new(CarType::Regular, "A");
        sink.on_event(&LotEvent::Arrived {
            clock: 1,
            car: car.clone(),
        });
        sink.on_event(&LotEvent::Exited {
            clock: 2,
            car,
            occupancy: 0,
        });
        let clocks: Vec<u64> = sink.iter().map(LotEvent::clock).collect();
        assert_eq!(clocks, vec![1, 2]);
    }

    #[test]
    fn test_pair_sink_forwards_to_both() {
        let mut pair: (Vec<LotEvent>, Vec<LotEvent>) = (Vec::new(), Vec::new());
        pair.on_event(&LotEvent::Arrived {
            clock: 9,
            car: Car::new(CarType::Large, "L1"),
        });
        assert_eq!(pair.0, pair.1);
        assert_eq!(pair.0.len(), 1);
    }

    #[test]
    fn test_total_departures() {
        let stats = SimulationStats {
            forced_departures: 2,
            departures: 5,
            ..Default::default()
        };
        assert_eq!(stats.total_departures(), 7);
    }
}
