//! Built-in lot scenarios.

use parklot_core::{LotDesign, LotError};

const COMPACT: &str = "\
R, N
S, L
";

const STANDARD: &str = "\
R, R, R, R, N, S, S, S
L, L, R, R, N, R, R, E
N, N, N, N, N, N, N, N
R, R, R, R, N, R, R, R
S, S, E, E, N, L, L, L
";

const EV_HUB: &str = "\
E, E, E, E, E, E
N, N, N, N, N, N
E, E, R, R, E, E
E, E, S, S, E, E
";

const TRUCK_STOP: &str = "\
L, L, L, L, L
N, N, N, N, N
L, L, L, R, R
";

const GRIDLOCK: &str = "\
S, S, N, S
";

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// 2x2 lot with a lane cell and no arrivals
    Compact,

    /// Mixed 5x8 lot with a central driving lane
    Standard,

    /// Charging-heavy lot
    EvHub,

    /// Mostly large spots
    TruckStop,

    /// Tiny small-only lot under heavy demand
    Gridlock,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Compact,
            ScenarioId::Standard,
            ScenarioId::EvHub,
            ScenarioId::TruckStop,
            ScenarioId::Gridlock,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Compact => "compact",
            ScenarioId::Standard => "standard",
            ScenarioId::EvHub => "ev_hub",
            ScenarioId::TruckStop => "truck_stop",
            ScenarioId::Gridlock => "gridlock",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Compact => "2x2 lot, no arrivals: capacity 3 and occupancy 0 must never change",
            ScenarioId::Standard => "5x8 mixed lot at 11 cars/hour",
            ScenarioId::EvHub => "Charging hub: only electric and small cars fit most spots",
            ScenarioId::TruckStop => "Large spots with a few regular ones at 15 cars/hour",
            ScenarioId::Gridlock => "3 small spots at 60 cars/hour: the queue must block, never reorder",
        }
    }

    /// Lot design in the text file format.
    pub fn design_text(&self) -> &'static str {
        match self {
            ScenarioId::Compact => COMPACT,
            ScenarioId::Standard => STANDARD,
            ScenarioId::EvHub => EV_HUB,
            ScenarioId::TruckStop => TRUCK_STOP,
            ScenarioId::Gridlock => GRIDLOCK,
        }
    }

    /// Parsed lot design.
    pub fn design(&self) -> Result<LotDesign, LotError> {
        self.design_text().parse()
    }

    /// Hourly arrival rate used unless overridden.
    pub fn default_arrival_rate(&self) -> u32 {
        match self {
            ScenarioId::Compact => 0,
            ScenarioId::Standard => 11,
            ScenarioId::EvHub => 20,
            ScenarioId::TruckStop => 15,
            ScenarioId::Gridlock => 60,
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(ScenarioId::Compact),
            "standard" | "default" => Ok(ScenarioId::Standard),
            "ev_hub" | "evhub" | "ev" => Ok(ScenarioId::EvHub),
            "truck_stop" | "truckstop" | "trucks" => Ok(ScenarioId::TruckStop),
            "gridlock" => Ok(ScenarioId::Gridlock),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parklot_core::ParkingLot;

    #[test]
    fn test_all_designs_parse() {
        for scenario in ScenarioId::all() {
            let design = scenario.design();
            assert!(design.is_ok(), "{} failed: {:?}", scenario, design);
        }
    }

    #[test]
    fn test_compact_capacity() {
        let lot = ParkingLot::new(ScenarioId::Compact.design().unwrap());
        assert_eq!(lot.total_capacity(), 3);
        assert_eq!(ScenarioId::Compact.default_arrival_rate(), 0);
    }

    #[test]
    fn test_standard_capacity() {
        let lot = ParkingLot::new(ScenarioId::Standard.design().unwrap());
        assert_eq!(lot.num_rows(), 5);
        assert_eq!(lot.num_spots_per_row(), 8);
        // One full lane row plus one lane column
        assert_eq!(lot.total_capacity(), 40 - 8 - 4);
    }

    #[test]
    fn test_names_round_trip() {
        for scenario in ScenarioId::all() {
            assert_eq!(scenario.name().parse::<ScenarioId>(), Ok(scenario));
            assert_eq!(scenario.to_string(), scenario.name());
        }
        assert!("nowhere".parse::<ScenarioId>().is_err());
    }
}
