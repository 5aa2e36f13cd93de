//! Exact fraction arithmetic for event probabilities.
//!
//! Probabilities in the simulator are never floating point. Every value is a
//! reduced fraction with a positive denominator, so two equal probabilities
//! always compare equal and a draw against them gives the same answer on
//! every platform.

use crate::error::LotError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// An immutable fraction in lowest terms.
///
/// Invariants: `denominator > 0` and `gcd(|numerator|, denominator) == 1`
/// (zero is stored as `0/1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Rational {
    pub const ZERO: Rational = Rational {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Rational = Rational {
        numerator: 1,
        denominator: 1,
    };

    /// Creates `numerator / denominator` reduced to lowest terms.
    ///
    /// Fails with [`LotError::ZeroDenominator`] when `denominator == 0`.
    /// The sign is moved onto the numerator.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, LotError> {
        if denominator == 0 {
            return Err(LotError::ZeroDenominator);
        }
        Self::normalize(numerator as i128, denominator as i128)
    }

    /// Reduces a fraction whose denominator is known to be positive.
    ///
    /// Infallible: dividing by the gcd only shrinks both terms.
    pub(crate) fn reduced(numerator: i64, denominator: i64) -> Self {
        debug_assert!(denominator > 0);
        let g = gcd(
            numerator.unsigned_abs() as u128,
            denominator.unsigned_abs() as u128,
        ) as i64;
        Self {
            numerator: numerator / g,
            denominator: denominator / g,
        }
    }

    fn normalize(numerator: i128, denominator: i128) -> Result<Self, LotError> {
        let g = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i128;
        let (mut n, mut d) = (numerator / g, denominator / g);
        if d < 0 {
            n = -n;
            d = -d;
        }
        Ok(Self {
            numerator: i64::try_from(n).map_err(|_| LotError::Overflow)?,
            denominator: i64::try_from(d).map_err(|_| LotError::Overflow)?,
        })
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Exact sum of two fractions.
    ///
    /// Intermediate products are taken in 128 bits; the result fails with
    /// [`LotError::Overflow`] only if the reduced sum does not fit in `i64`.
    pub fn plus(&self, other: &Rational) -> Result<Rational, LotError> {
        let lhs = (self.numerator as i128)
            .checked_mul(other.denominator as i128)
            .ok_or(LotError::Overflow)?;
        let rhs = (other.numerator as i128)
            .checked_mul(self.denominator as i128)
            .ok_or(LotError::Overflow)?;
        let numerator = lhs.checked_add(rhs).ok_or(LotError::Overflow)?;
        let denominator = (self.denominator as i128)
            .checked_mul(other.denominator as i128)
            .ok_or(LotError::Overflow)?;
        Self::normalize(numerator, denominator)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// True when the fraction is strictly between 0 and 1.
    pub fn is_proper(&self) -> bool {
        self.numerator > 0 && self.numerator < self.denominator
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying preserves order.
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reduces_on_construction() {
        let r = Rational::new(6, 8).unwrap();
        assert_eq!(r.numerator(), 3);
        assert_eq!(r.denominator(), 4);
        assert_eq!(r, Rational::new(9, 12).unwrap());
    }

    #[test]
    fn test_canonical_sign() {
        let r = Rational::new(3, -6).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (-1, 2));

        let r = Rational::new(-3, -6).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (1, 2));
    }

    #[test]
    fn test_zero_is_canonical() {
        assert_eq!(Rational::new(0, -17).unwrap(), Rational::ZERO);
        assert!(Rational::new(0, 5).unwrap().is_zero());
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(Rational::new(1, 0), Err(LotError::ZeroDenominator));
    }

    #[test]
    fn test_plus() {
        let half = Rational::new(1, 2).unwrap();
        let third = Rational::new(1, 3).unwrap();
        assert_eq!(half.plus(&third).unwrap(), Rational::new(5, 6).unwrap());
        assert_eq!(half.plus(&half).unwrap(), Rational::ONE);
    }

    #[test]
    fn test_plus_overflow_is_reported() {
        let big = Rational::new(i64::MAX, 1).unwrap();
        assert_eq!(big.plus(&big), Err(LotError::Overflow));
    }

    #[test]
    fn test_extreme_values_normalize() {
        let r = Rational::new(i64::MIN, i64::MIN).unwrap();
        assert_eq!(r, Rational::ONE);
        assert_eq!(Rational::new(i64::MIN, -1), Err(LotError::Overflow));
    }

    #[test]
    fn test_ordering() {
        let a = Rational::new(11, 3600).unwrap();
        let b = Rational::new(1, 300).unwrap();
        assert!(a < b);
        assert!(Rational::new(-1, 2).unwrap() < Rational::ZERO);
        assert_eq!(
            Rational::new(2, 4).unwrap().cmp(&Rational::new(1, 2).unwrap()),
            Ordering::Equal
        );
    }

    #[test]
    fn test_is_proper() {
        assert!(Rational::new(1, 3600).unwrap().is_proper());
        assert!(!Rational::ZERO.is_proper());
        assert!(!Rational::ONE.is_proper());
        assert!(!Rational::new(7, 3).unwrap().is_proper());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::new(2, 10).unwrap().to_string(), "1/5");
        assert_eq!(Rational::new(4, 2).unwrap().to_string(), "2");
        assert_eq!(Rational::ZERO.to_string(), "0");
    }

    proptest! {
        #[test]
        fn prop_always_lowest_terms(n in -1_000_000i64..1_000_000, d in -1_000_000i64..1_000_000) {
            prop_assume!(d != 0);
            let r = Rational::new(n, d).unwrap();
            prop_assert!(r.denominator() > 0);
            prop_assert_eq!(
                gcd(r.numerator().unsigned_abs() as u128, r.denominator() as u128),
                1
            );
        }

        #[test]
        fn prop_scaling_preserves_equality(n in -10_000i64..10_000, d in 1i64..10_000, k in 1i64..1_000) {
            prop_assert_eq!(Rational::new(n, d).unwrap(), Rational::new(n * k, d * k).unwrap());
        }

        #[test]
        fn prop_plus_commutes(a in -10_000i64..10_000, b in 1i64..10_000, c in -10_000i64..10_000, d in 1i64..10_000) {
            let x = Rational::new(a, b).unwrap();
            let y = Rational::new(c, d).unwrap();
            prop_assert_eq!(x.plus(&y).unwrap(), y.plus(&x).unwrap());
        }
    }
}
