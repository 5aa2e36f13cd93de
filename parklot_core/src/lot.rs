//! The parking lot grid: design, occupancy and the admission rule.
//!
//! Two co-indexed row-major grids of identical dimensions:
//! - `design`: what each cell is built to hold, fixed at construction
//! - `occupancy`: the car parked in each cell and when it entered, if any
//!
//! Every accessor is bounds-safe. An out-of-range coordinate yields `None`,
//! `false`, or a no-op; it never panics.

use crate::layout::LotDesign;
use crate::vehicle::{Car, CarType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A car bound to a simulated timestamp.
///
/// In the occupancy grid the timestamp is the second the car entered its
/// cell, i.e. its admission time, not the time it joined the incoming queue.
/// In the incoming and outgoing queues it is the second the car joined
/// the queue (incoming) or the second it was parked (outgoing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    car: Car,
    timestamp: u64,
}

impl Spot {
    pub fn new(car: Car, timestamp: u64) -> Self {
        Self { car, timestamp }
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn into_car(self) -> Car {
        self.car
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, timestamp: {}", self.car, self.timestamp)
    }
}

/// A rectangular parking lot.
///
/// Invariants: at least 1x1, dimensions fixed for the lifetime of the lot,
/// and a cell designed as [`CarType::Na`] never holds a car.
#[derive(Debug, Clone)]
pub struct ParkingLot {
    num_rows: usize,
    num_spots_per_row: usize,
    design: Vec<CarType>,
    occupancy: Vec<Option<Spot>>,
}

impl ParkingLot {
    /// Creates an empty lot from a validated design.
    pub fn new(design: LotDesign) -> Self {
        let num_rows = design.rows();
        let num_spots_per_row = design.cols();
        let design = design.into_cells();
        let occupancy = vec![None; design.len()];
        Self {
            num_rows,
            num_spots_per_row,
            design,
            occupancy,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_spots_per_row(&self) -> usize {
        self.num_spots_per_row
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        if i < self.num_rows && j < self.num_spots_per_row {
            Some(i * self.num_spots_per_row + j)
        } else {
            None
        }
    }

    /// Designed type of cell `(i, j)`.
    pub fn design_at(&self, i: usize, j: usize) -> Option<CarType> {
        self.index(i, j).map(|idx| self.design[idx])
    }

    /// The car parked at `(i, j)` and when it entered, if any.
    pub fn get_spot_at(&self, i: usize, j: usize) -> Option<&Spot> {
        self.index(i, j).and_then(|idx| self.occupancy[idx].as_ref())
    }

    /// Whether `car` may park at `(i, j)` right now.
    ///
    /// False when the coordinate is outside the grid, the cell is taken, or
    /// the cell is not a parking spot; otherwise [`CarType::fits_in`] decides.
    pub fn can_park_at(&self, i: usize, j: usize, car: &Car) -> bool {
        let Some(idx) = self.index(i, j) else {
            return false;
        };
        if self.occupancy[idx].is_some() {
            return false;
        }
        let design = self.design[idx];
        design != CarType::Na && car.car_type().fits_in(design)
    }

    /// Writes `car` into cell `(i, j)` without re-checking admissibility.
    ///
    /// Callers validate with [`can_park_at`](Self::can_park_at) first.
    /// Out-of-range coordinates and NA cells are ignored, so NA cells stay
    /// empty.
    pub fn park(&mut self, i: usize, j: usize, car: Car, timestamp: u64) {
        match self.index(i, j) {
            Some(idx) if self.design[idx] != CarType::Na => {
                self.occupancy[idx] = Some(Spot::new(car, timestamp));
            }
            _ => {}
        }
    }

    /// Clears cell `(i, j)`, returning what was parked there.
    ///
    /// Returns `None` when out of range or already empty.
    pub fn remove(&mut self, i: usize, j: usize) -> Option<Spot> {
        let idx = self.index(i, j)?;
        self.occupancy[idx].take()
    }

    /// First admissible cell for `car` in row-major order.
    pub fn first_fit(&self, car: &Car) -> Option<(usize, usize)> {
        (0..self.num_rows)
            .flat_map(|i| (0..self.num_spots_per_row).map(move |j| (i, j)))
            .find(|&(i, j)| self.can_park_at(i, j, car))
    }

    /// Parks `car` at the first admissible cell in row-major order.
    ///
    /// Returns the chosen cell, or `None` (and leaves the lot untouched) when
    /// no cell admits the car.
    pub fn attempt_parking(&mut self, car: &Car, timestamp: u64) -> Option<(usize, usize)> {
        let (i, j) = self.first_fit(car)?;
        self.park(i, j, car.clone(), timestamp);
        Some((i, j))
    }

    /// Number of real parking spots (cells not designed as NA).
    ///
    /// Recomputed on every call: O(rows * cols).
    pub fn total_capacity(&self) -> usize {
        self.design.iter().filter(|t| t.is_parkable()).count()
    }

    /// Number of real parking spots currently holding a car.
    ///
    /// Recomputed on every call: O(rows * cols).
    pub fn total_occupancy(&self) -> usize {
        self.design
            .iter()
            .zip(&self.occupancy)
            .filter(|(t, spot)| t.is_parkable() && spot.is_some())
            .count()
    }

    /// Occupied cells in row-major order.
    pub fn occupied_spots(&self) -> impl Iterator<Item = ((usize, usize), &Spot)> + '_ {
        let cols = self.num_spots_per_row;
        self.occupancy
            .iter()
            .enumerate()
            .filter_map(move |(idx, spot)| spot.as_ref().map(|s| ((idx / cols, idx % cols), s)))
    }
}

impl fmt::Display for ParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==== Lot Design ====")?;
        for row in self.design.chunks(self.num_spots_per_row) {
            let labels: Vec<String> = row.iter().map(|t| t.label().to_string()).collect();
            writeln!(f, "{}", labels.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "==== Parking Occupancy ====")?;
        for i in 0..self.num_rows {
            for j in 0..self.num_spots_per_row {
                match self.get_spot_at(i, j) {
                    Some(spot) => writeln!(f, "({}, {}): {}", i, j, spot)?,
                    None => writeln!(f, "({}, {}): Unoccupied", i, j)?,
                }
            }
        }
        Ok(())
    }
}
