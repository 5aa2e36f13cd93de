//! Triangular departure model.
//!
//! The probability that a parked car leaves during a given second depends on
//! how long it has already been parked. That likelihood is modelled as a
//! triangular density over `[a, b]` peaking at the mode `c`:
//!
//! ```text
//!            2 / (b-a)
//!               /\
//!              /  \
//!             /    \
//!   ---------+------+--------
//!            a  c   b
//! ```
//!
//! Densities are returned as exact [`Rational`]s.

use crate::error::LotError;
use crate::rational::Rational;
use serde::Serialize;

/// Triangular density with lower limit `a`, mode `c` and upper limit `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriangularDistribution {
    a: i64,
    c: i64,
    b: i64,
}

impl TriangularDistribution {
    /// Creates the distribution, requiring `a < c < b`.
    ///
    /// The width is also bounded so that every density term
    /// (`(b-a)(c-a)`, `(b-a)(b-c)`, `2(b-a)`) fits in an `i64`.
    pub fn new(a: i64, c: i64, b: i64) -> Result<Self, LotError> {
        if !(a < c && c < b) {
            return Err(LotError::InvalidDistribution { a, c, b });
        }
        let width = b.checked_sub(a).ok_or(LotError::Overflow)?;
        width.checked_mul(width).ok_or(LotError::Overflow)?;
        width.checked_mul(2).ok_or(LotError::Overflow)?;
        Ok(Self { a, c, b })
    }

    pub fn lower(&self) -> i64 {
        self.a
    }

    pub fn mode(&self) -> i64 {
        self.c
    }

    pub fn upper(&self) -> i64 {
        self.b
    }

    /// Probability density at `x`.
    ///
    /// Branches are evaluated in this order: outside the support, rising edge,
    /// peak, falling edge.
    pub fn pdf(&self, x: i64) -> Rational {
        let (a, c, b) = (self.a, self.c, self.b);
        if x < a || x > b {
            Rational::ZERO
        } else if x < c {
            Rational::reduced(2 * (x - a), (b - a) * (c - a))
        } else if x == c {
            Rational::reduced(2, b - a)
        } else {
            Rational::reduced(2 * (b - x), (b - a) * (b - c))
        }
    }

    /// Exact sum of `pdf(x)` over every integer `x` in `[a, b]`.
    ///
    /// A discrete sampling of the continuous density, so it only
    /// approximates 1 in general.
    pub fn discrete_mass(&self) -> Result<Rational, LotError> {
        (self.a..=self.b).try_fold(Rational::ZERO, |sum, x| sum.plus(&self.pdf(x)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn test_rejects_bad_ordering() {
        assert_eq!(
            TriangularDistribution::new(0, 0, 10),
            Err(LotError::InvalidDistribution { a: 0, c: 0, b: 10 })
        );
        assert!(TriangularDistribution::new(0, 10, 10).is_err());
        assert!(TriangularDistribution::new(5, 3, 10).is_err());
        assert!(TriangularDistribution::new(10, 5, 0).is_err());
    }

    #[test]
    fn test_rejects_overflowing_width() {
        assert_eq!(
            TriangularDistribution::new(i64::MIN, 0, i64::MAX),
            Err(LotError::Overflow)
        );
        assert_eq!(
            TriangularDistribution::new(0, 1, i64::MAX / 2),
            Err(LotError::Overflow)
        );
    }

    #[test]
    fn test_pdf_small_example() {
        let dist = TriangularDistribution::new(0, 5, 10).unwrap();
        assert_eq!(dist.pdf(0), Rational::ZERO);
        assert_eq!(dist.pdf(1), r(1, 25));
        assert_eq!(dist.pdf(4), r(4, 25));
        assert_eq!(dist.pdf(5), r(1, 5));
        assert_eq!(dist.pdf(6), r(4, 25));
        assert_eq!(dist.pdf(10), Rational::ZERO);
    }

    #[test]
    fn test_pdf_zero_outside_support() {
        let dist = TriangularDistribution::new(10, 20, 40).unwrap();
        assert_eq!(dist.pdf(9), Rational::ZERO);
        assert_eq!(dist.pdf(-100), Rational::ZERO);
        assert_eq!(dist.pdf(41), Rational::ZERO);
        assert_eq!(dist.pdf(i64::MAX), Rational::ZERO);
    }

    #[test]
    fn test_peak_matches_continuous_density() {
        let dist = TriangularDistribution::new(0, 4 * 3600, 8 * 3600).unwrap();
        assert_eq!(dist.pdf(4 * 3600), r(2, 8 * 3600));
        // Both edges meet the peak.
        assert!(dist.pdf(4 * 3600 - 1) < dist.pdf(4 * 3600));
        assert!(dist.pdf(4 * 3600 + 1) < dist.pdf(4 * 3600));
    }

    #[test]
    fn test_asymmetric_edges() {
        let dist = TriangularDistribution::new(0, 10, 50).unwrap();
        assert_eq!(dist.pdf(5), r(10, 500));
        assert_eq!(dist.pdf(10), r(2, 50));
        assert_eq!(dist.pdf(30), r(40, 2000));
    }

    #[test]
    fn test_discrete_mass_examples() {
        // Regression values for the reference distributions.
        let small = TriangularDistribution::new(0, 5, 10).unwrap();
        assert_eq!(small.discrete_mass().unwrap(), Rational::ONE);

        let wide = TriangularDistribution::new(0, 50, 100).unwrap();
        assert_eq!(wide.discrete_mass().unwrap(), Rational::ONE);

        let skewed = TriangularDistribution::new(0, 10, 50).unwrap();
        assert_eq!(skewed.discrete_mass().unwrap(), Rational::ONE);
    }

    #[test]
    fn test_discrete_mass_is_reproducible() {
        let dist = TriangularDistribution::new(3, 7, 20).unwrap();
        let first = dist.discrete_mass().unwrap();
        let second = dist.discrete_mass().unwrap();
        assert_eq!(first, second);
        assert!(first > Rational::ZERO);
    }

    proptest! {
        #[test]
        fn prop_density_non_negative(a in -1_000i64..1_000, dc in 1i64..500, db in 1i64..500, x in -3_000i64..3_000) {
            let dist = TriangularDistribution::new(a, a + dc, a + dc + db).unwrap();
            prop_assert!(dist.pdf(x) >= Rational::ZERO);
        }

        #[test]
        fn prop_peak_is_two_over_width(a in -1_000i64..1_000, dc in 1i64..500, db in 1i64..500) {
            let dist = TriangularDistribution::new(a, a + dc, a + dc + db).unwrap();
            prop_assert_eq!(dist.pdf(a + dc), Rational::new(2, dc + db).unwrap());
        }

        #[test]
        fn prop_peak_is_maximum(a in -100i64..100, dc in 1i64..50, db in 1i64..50, x in -300i64..300) {
            let dist = TriangularDistribution::new(a, a + dc, a + dc + db).unwrap();
            prop_assert!(dist.pdf(x) <= dist.pdf(a + dc));
        }
    }
}
