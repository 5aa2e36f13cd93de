//! The random-source capability consumed by the simulator.

use crate::rational::Rational;
use crate::vehicle::{Car, CarType};
use parklot_env::LotContext;

const PLATE_LETTERS: usize = 3;
const PLATE_DIGITS: usize = 3;

/// Source of arrival and departure events and of newly arriving cars.
pub trait RandomGenerator {
    /// Returns true with exactly `probability`.
    fn event_occurred(&mut self, probability: &Rational) -> bool;

    /// Synthesizes an arriving car with a random type and plate.
    fn generate_random_car(&mut self) -> Car;
}

impl<R: RandomGenerator + ?Sized> RandomGenerator for &mut R {
    fn event_occurred(&mut self, probability: &Rational) -> bool {
        (**self).event_occurred(probability)
    }

    fn generate_random_car(&mut self) -> Car {
        (**self).generate_random_car()
    }
}

/// Default [`RandomGenerator`] drawing from a [`LotContext`].
///
/// Events are decided by one integer draw `u` in `[0, denominator)`: the event
/// happens iff `u < numerator`. This is exact for every representable
/// probability.
pub struct ContextRandom<C> {
    ctx: C,
}

impl<C: LotContext> ContextRandom<C> {
    pub fn new(ctx: C) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn into_context(self) -> C {
        self.ctx
    }

    fn pick(&mut self, bound: usize) -> usize {
        // Bounds here are non-zero constants; a failed draw falls back to 0.
        self.ctx.draw_below(bound as u64).unwrap_or(0) as usize
    }
}

impl<C: LotContext> RandomGenerator for ContextRandom<C> {
    fn event_occurred(&mut self, probability: &Rational) -> bool {
        if probability.numerator() <= 0 {
            return false;
        }
        if !probability.is_proper() {
            return true;
        }
        // Both terms are positive here.
        let numerator = probability.numerator() as u64;
        let denominator = probability.denominator() as u64;
        match self.ctx.draw_below(denominator) {
            Ok(u) => u < numerator,
            Err(_) => false,
        }
    }

    fn generate_random_car(&mut self) -> Car {
        let car_type = CarType::PARKABLE[self.pick(CarType::PARKABLE.len())];

        let mut plate = String::with_capacity(PLATE_LETTERS + PLATE_DIGITS);
        for _ in 0..PLATE_LETTERS {
            plate.push((b'A' + self.pick(26) as u8) as char);
        }
        for _ in 0..PLATE_DIGITS {
            plate.push((b'0' + self.pick(10) as u8) as char);
        }

        Car::new(car_type, plate)
    }
}
