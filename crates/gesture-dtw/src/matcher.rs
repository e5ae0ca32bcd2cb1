//! Alignment scores and the accept/reject decision taken on them.

use std::fmt;

use tracing::warn;

use crate::error::DtwError;

/// Cumulative DTW cost between the enrolled key and a candidate.
///
/// Never negative. Only the alignment engine creates scores, so a score in
/// hand always comes from a completed alignment.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GestureDistance(f64);

impl GestureDistance {
    /// Score of a gesture aligned against itself.
    pub const ZERO: Self = Self(0.0);

    pub(crate) fn new(value: f64) -> Self {
        debug_assert!(value >= 0.0, "alignment cost must be non-negative, got {value}");
        Self(value)
    }

    /// Return the raw cost.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Return true if this score is accepted under `tolerance`.
    #[must_use]
    pub fn within(self, tolerance: Tolerance) -> bool {
        self.0 <= tolerance.0
    }

    /// Headroom left under `tolerance`: positive or zero for an accepted
    /// score, negative by the amount a rejected score overshoots.
    #[must_use]
    pub fn margin(self, tolerance: Tolerance) -> f64 {
        tolerance.0 - self.0
    }
}

/// Maximum alignment cost accepted as a match. Always non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tolerance(pub(crate) f64);

impl Tolerance {
    /// Create a new tolerance.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidTolerance`] | `value` is negative, NaN, or infinite |
    pub fn new(value: f64) -> Result<Self, DtwError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DtwError::InvalidTolerance { tolerance: value });
        }
        Ok(Self(value))
    }

    /// Return the raw threshold.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Outcome of comparing a candidate gesture against the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Score within tolerance.
    Match,
    /// Score above tolerance, or the alignment failed.
    NoMatch,
}

impl Verdict {
    /// Return true for [`Verdict::Match`].
    #[must_use]
    pub fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Match => "match",
            Self::NoMatch => "no-match",
        })
    }
}

/// Return true if `score <= tolerance`.
#[must_use]
pub fn matches(score: GestureDistance, tolerance: Tolerance) -> bool {
    score.within(tolerance)
}

/// Stateless threshold matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    tolerance: Tolerance,
}

impl Matcher {
    /// Create a matcher accepting scores up to `tolerance`.
    #[must_use]
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Return the configured tolerance.
    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Decide on a score.
    #[must_use]
    pub fn verdict(&self, score: GestureDistance) -> Verdict {
        if matches(score, self.tolerance) {
            Verdict::Match
        } else {
            Verdict::NoMatch
        }
    }

    /// Decide on an alignment outcome. Any alignment failure is a non-match.
    #[must_use]
    pub fn decide(&self, outcome: Result<GestureDistance, &DtwError>) -> Verdict {
        match outcome {
            Ok(score) => self.verdict(score),
            Err(e) => {
                warn!(error = %e, "alignment failed, treating as non-match");
                Verdict::NoMatch
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol(v: f64) -> Tolerance {
        Tolerance::new(v).unwrap()
    }

    #[test]
    fn rejects_invalid_tolerance() {
        assert!(Tolerance::new(-0.1).is_err());
        assert!(Tolerance::new(f64::NAN).is_err());
        assert!(Tolerance::new(f64::INFINITY).is_err());
        assert!(Tolerance::new(0.0).is_ok());
    }

    #[test]
    fn boundary_is_inclusive() {
        assert!(matches(GestureDistance::new(80.0), tol(80.0)));
        assert!(!matches(GestureDistance::new(80.000001), tol(80.0)));
        assert!(matches(GestureDistance::ZERO, tol(0.0)));
    }

    #[test]
    fn margin_is_signed_headroom() {
        let t = tol(80.0);
        assert_eq!(GestureDistance::new(50.0).margin(t), 30.0);
        assert_eq!(GestureDistance::new(80.0).margin(t), 0.0);
        assert_eq!(GestureDistance::new(95.5).margin(t), -15.5);
        assert!(GestureDistance::new(80.0).within(t));
        assert!(!GestureDistance::new(95.5).within(t));
    }

    #[test]
    fn verdict_follows_threshold() {
        let m = Matcher::new(tol(10.0));
        assert_eq!(m.verdict(GestureDistance::new(3.0)), Verdict::Match);
        assert_eq!(m.verdict(GestureDistance::new(30.0)), Verdict::NoMatch);
    }

    #[test]
    fn alignment_failure_is_no_match() {
        let m = Matcher::new(tol(f64::MAX));
        let failure = DtwError::DimensionMismatch {
            key: 3,
            candidate: 2,
        };
        assert_eq!(m.decide(Err(&failure)), Verdict::NoMatch);
        assert_eq!(m.decide(Ok(GestureDistance::ZERO)), Verdict::Match);
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::Match.to_string(), "match");
        assert_eq!(Verdict::NoMatch.to_string(), "no-match");
        assert!(Verdict::Match.is_match());
    }
}
