//! Minkowski (p-norm) distance between two motion samples.

use std::fmt;

use crate::error::DtwError;

/// A validated Minkowski exponent. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PNorm(f64);

impl PNorm {
    /// Manhattan distance, `p = 1`.
    pub const MANHATTAN: Self = Self(1.0);

    /// Euclidean distance, `p = 2`.
    pub const EUCLIDEAN: Self = Self(2.0);

    /// Create a new exponent.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidNorm`] | `p <= 0`, NaN, or infinite |
    pub fn new(p: f64) -> Result<Self, DtwError> {
        if !p.is_finite() || p <= 0.0 {
            return Err(DtwError::InvalidNorm { p });
        }
        Ok(Self(p))
    }

    /// Return the raw exponent.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Distance between two samples of equal length. Length is not checked.
    #[inline]
    pub(crate) fn eval_unchecked(self, a: &[f64], b: &[f64]) -> f64 {
        let pairs = a.iter().zip(b);
        if self.0 == 2.0 {
            pairs.map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
        } else if self.0 == 1.0 {
            pairs.map(|(x, y)| (x - y).abs()).sum()
        } else {
            let p = self.0;
            pairs
                .map(|(x, y)| (x - y).abs().powf(p))
                .sum::<f64>()
                .powf(p.recip())
        }
    }
}

impl Default for PNorm {
    fn default() -> Self {
        Self::EUCLIDEAN
    }
}

impl TryFrom<f64> for PNorm {
    type Error = DtwError;

    fn try_from(p: f64) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

impl fmt::Display for PNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Compute `(sum |a_i - b_i|^p)^(1/p)`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::DimensionMismatch`] | `a.len() != b.len()` |
pub fn minkowski(a: &[f64], b: &[f64], p: PNorm) -> Result<f64, DtwError> {
    if a.len() != b.len() {
        return Err(DtwError::DimensionMismatch {
            key: a.len(),
            candidate: b.len(),
        });
    }
    Ok(p.eval_unchecked(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_exponent() {
        assert_eq!(PNorm::new(0.0), Err(DtwError::InvalidNorm { p: 0.0 }));
        assert_eq!(PNorm::new(-1.5), Err(DtwError::InvalidNorm { p: -1.5 }));
        assert!(PNorm::new(f64::NAN).is_err());
        assert!(PNorm::new(f64::INFINITY).is_err());
    }

    #[test]
    fn euclidean_3_4_5() {
        let d = minkowski(&[0.0, 0.0, 0.0], &[3.0, 4.0, 0.0], PNorm::EUCLIDEAN).unwrap();
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn manhattan_sums_absolute_differences() {
        let d = minkowski(&[1.0, -2.0, 3.0], &[0.0, 2.0, 1.0], PNorm::MANHATTAN).unwrap();
        assert!((d - 7.0).abs() < 1e-12);
    }

    #[test]
    fn general_exponent_matches_fast_paths() {
        let a = [0.5, -1.25, 3.0];
        let b = [2.0, 0.75, -1.0];
        let p2 = minkowski(&a, &b, PNorm::new(2.0 + 1e-15).unwrap()).unwrap();
        let fast = minkowski(&a, &b, PNorm::EUCLIDEAN).unwrap();
        assert!((p2 - fast).abs() < 1e-9);
    }

    #[test]
    fn cubic_norm() {
        let d = minkowski(&[0.0, 0.0], &[1.0, 1.0], PNorm::new(3.0).unwrap()).unwrap();
        assert!((d - 2.0_f64.powf(1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_for_identical_samples() {
        let a = [0.3, -7.1, 2.2];
        for p in [0.5, 1.0, 2.0, 3.5] {
            let d = minkowski(&a, &a, PNorm::new(p).unwrap()).unwrap();
            assert_eq!(d, 0.0, "p = {p}");
        }
    }

    #[test]
    fn symmetric() {
        let a = [0.1, 0.2, 0.7];
        let b = [-3.0, 1.9, 0.0];
        for p in [0.5, 1.0, 2.0, 4.0] {
            let p = PNorm::new(p).unwrap();
            assert_eq!(minkowski(&a, &b, p).unwrap(), minkowski(&b, &a, p).unwrap());
        }
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = minkowski(&[1.0, 2.0, 3.0], &[1.0, 2.0], PNorm::EUCLIDEAN);
        assert_eq!(
            result,
            Err(DtwError::DimensionMismatch {
                key: 3,
                candidate: 2
            })
        );
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", PNorm::EUCLIDEAN), "L2");
        assert_eq!(PNorm::default(), PNorm::EUCLIDEAN);
    }
}
