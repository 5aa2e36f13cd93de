//! Vehicles and the spot types they are built for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a car is, or what a spot is built to hold.
///
/// `Small`, `Regular` and `Large` form a physical size hierarchy.
/// `Electric` is a charging spot/car and sits outside that hierarchy.
/// `Na` marks a cell that is not a parking spot at all (a driving lane, a pillar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarType {
    Small,
    Regular,
    Large,
    Electric,
    Na,
}

impl CarType {
    /// Every type a real car can have.
    pub const PARKABLE: [CarType; 4] = [
        CarType::Small,
        CarType::Regular,
        CarType::Large,
        CarType::Electric,
    ];

    /// Single-letter label used in lot design files and reports.
    pub fn label(&self) -> char {
        match self {
            CarType::Small => 'S',
            CarType::Regular => 'R',
            CarType::Large => 'L',
            CarType::Electric => 'E',
            CarType::Na => 'N',
        }
    }

    /// Parses a design label (case-insensitive).
    pub fn from_label(label: &str) -> Option<CarType> {
        match label.trim().to_ascii_uppercase().as_str() {
            "S" => Some(CarType::Small),
            "R" => Some(CarType::Regular),
            "L" => Some(CarType::Large),
            "E" => Some(CarType::Electric),
            "N" => Some(CarType::Na),
            _ => None,
        }
    }

    /// Position in the size hierarchy, `None` for `Electric` and `Na`.
    pub fn size_rank(&self) -> Option<u8> {
        match self {
            CarType::Small => Some(0),
            CarType::Regular => Some(1),
            CarType::Large => Some(2),
            CarType::Electric | CarType::Na => None,
        }
    }

    pub fn is_parkable(&self) -> bool {
        *self != CarType::Na
    }

    /// Admission rule: may a car of this type use a spot designed as `design`?
    ///
    /// Precedence is fixed: electric cars take any real spot; small cars take
    /// anything but a charging spot; regular cars take regular or large spots;
    /// large cars take large spots only. The rule is deliberately not symmetric
    /// (an electric car may take a large spot, a large car may not take a
    /// charging spot).
    pub fn fits_in(&self, design: CarType) -> bool {
        if design == CarType::Na {
            return false;
        }
        match self {
            CarType::Electric => true,
            CarType::Small => design != CarType::Electric,
            CarType::Regular => design != CarType::Electric && design != CarType::Small,
            CarType::Large => design == CarType::Large,
            CarType::Na => false,
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A car: its type and plate number. Immutable once built.
///
/// Plates are for display only; nothing requires two parked cars to have
/// distinct plates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Car {
    car_type: CarType,
    plate: String,
}

impl Car {
    pub fn new(car_type: CarType, plate: impl Into<String>) -> Self {
        Self {
            car_type,
            plate: plate.into(),
        }
    }

    pub fn car_type(&self) -> CarType {
        self.car_type
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.car_type.label(), self.plate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CarType::*;

    #[test]
    fn test_truth_table() {
        // (car, design, admitted)
        let table = [
            (Small, Small, true),
            (Small, Regular, true),
            (Small, Large, true),
            (Small, Electric, false),
            (Regular, Small, false),
            (Regular, Regular, true),
            (Regular, Large, true),
            (Regular, Electric, false),
            (Large, Small, false),
            (Large, Regular, false),
            (Large, Large, true),
            (Large, Electric, false),
            (Electric, Small, true),
            (Electric, Regular, true),
            (Electric, Large, true),
            (Electric, Electric, true),
        ];
        for (car, design, admitted) in table {
            assert_eq!(car.fits_in(design), admitted, "{:?} in {:?}", car, design);
        }
    }

    #[test]
    fn test_nothing_fits_na() {
        for car in CarType::PARKABLE {
            assert!(!car.fits_in(Na));
        }
        for design in CarType::PARKABLE {
            assert!(!Na.fits_in(design));
        }
    }

    #[test]
    fn test_rule_is_asymmetric() {
        // Electric cars may take a large spot, large cars may not take a charger.
        assert!(Electric.fits_in(Large));
        assert!(!Large.fits_in(Electric));
    }

    #[test]
    fn test_labels_round_trip() {
        for t in [Small, Regular, Large, Electric, Na] {
            assert_eq!(CarType::from_label(&t.label().to_string()), Some(t));
        }
        assert_eq!(CarType::from_label(" e "), Some(Electric));
        assert_eq!(CarType::from_label("X"), None);
        assert_eq!(CarType::from_label(""), None);
    }

    #[test]
    fn test_size_rank() {
        assert!(Small.size_rank() < Regular.size_rank());
        assert!(Regular.size_rank() < Large.size_rank());
        assert_eq!(Electric.size_rank(), None);
        assert_eq!(Na.size_rank(), None);
    }

    #[test]
    fn test_car_display() {
        let car = Car::new(Regular, "ABC123");
        assert_eq!(car.to_string(), "R(ABC123)");
        assert_eq!(car.plate(), "ABC123");
        assert_eq!(car.car_type(), Regular);
    }
}
