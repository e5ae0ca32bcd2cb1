//! Enrollment and verification session around a single key gesture.

use tracing::{info, instrument};

use crate::config::GestureConfig;
use crate::dtw::Dtw;
use crate::error::{DtwError, LockError};
use crate::matcher::{GestureDistance, Matcher, Verdict};
use crate::matrix::CostMatrix;
use crate::normalize::{ScalerStats, standard_scale};
use crate::path::WarpingPath;
use crate::sequence::Sequence;

/// Result of one verification attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// Accept/reject decision.
    pub verdict: Verdict,
    /// Alignment cost, absent when the alignment failed.
    pub score: Option<GestureDistance>,
    /// Sample correspondence behind `score`, absent when the alignment failed.
    pub path: Option<WarpingPath>,
    /// Why the alignment failed, if it did.
    pub failure: Option<DtwError>,
    /// Scaling statistics of the candidate capture.
    pub candidate_stats: ScalerStats,
}

/// Gesture lock holding at most one enrolled key.
///
/// Owns the alignment buffer, sized once to `max_len x max_len`. Every
/// operation takes `&mut self`, so enrollment and verification never overlap
/// and the buffer always has a single user.
#[derive(Debug, Clone)]
pub struct GestureLock {
    config: GestureConfig,
    dtw: Dtw,
    matcher: Matcher,
    buffer: CostMatrix,
    key: Option<Sequence>,
}

impl GestureLock {
    /// Create an empty lock. No key is enrolled.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            dtw: Dtw::new(config.p_norm),
            matcher: Matcher::new(config.tolerance),
            // max_len is bounded by GestureConfig::with_max_len
            buffer: CostMatrix::allocate(config.max_len),
            key: None,
            config,
        }
    }

    /// Return the configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Return true once a key has been enrolled.
    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        self.key.is_some()
    }

    /// Return the normalized key, if enrolled.
    #[must_use]
    pub fn key(&self) -> Option<&Sequence> {
        self.key.as_ref()
    }

    /// Drop the enrolled key.
    pub fn forget(&mut self) {
        self.key = None;
    }

    /// Normalize `capture` and store it as the key, replacing any previous key.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::DimensionMismatch`] | `capture.dim()` differs from the configured dimensionality |
    /// | [`DtwError::EmptySequence`] | `capture` has no samples |
    /// | [`DtwError::CapacityExceeded`] | `capture` is longer than `max_len` |
    ///
    /// On error the previous key, if any, is kept.
    #[instrument(skip(self, capture), fields(n = capture.len()))]
    pub fn enroll(&mut self, mut capture: Sequence) -> Result<ScalerStats, LockError> {
        if capture.dim() != self.config.dim {
            return Err(DtwError::DimensionMismatch {
                key: self.config.dim,
                candidate: capture.dim(),
            }
            .into());
        }
        if capture.is_empty() {
            return Err(DtwError::EmptySequence.into());
        }
        if capture.len() > self.config.max_len {
            return Err(DtwError::CapacityExceeded {
                capacity: self.config.max_len,
            }
            .into());
        }

        let stats = standard_scale(&mut capture);
        info!(
            n = capture.len(),
            degenerate = stats.degenerate.len(),
            replaced = self.key.is_some(),
            "key gesture enrolled"
        );
        self.key = Some(capture);
        Ok(stats)
    }

    /// Normalize `capture` and compare it against the enrolled key.
    ///
    /// Alignment failures (dimension mismatch, empty or oversized capture)
    /// produce a [`Verdict::NoMatch`] attempt with [`Attempt::failure`] set.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`LockError::NoKeyEnrolled`] | No key has been enrolled |
    #[instrument(skip(self, capture), fields(n = capture.len()))]
    pub fn verify(&mut self, mut capture: Sequence) -> Result<Attempt, LockError> {
        let key = self.key.as_ref().ok_or(LockError::NoKeyEnrolled)?;

        let candidate_stats = standard_scale(&mut capture);
        let outcome = self.dtw.distance_and_path(key, &capture, &mut self.buffer);
        let verdict = self.matcher.decide(outcome.as_ref().map(|(score, _)| *score));

        let (score, path, failure) = match outcome {
            Ok((score, path)) => (Some(score), Some(path), None),
            Err(e) => (None, None, Some(e)),
        };
        info!(
            %verdict,
            score = ?score.map(GestureDistance::value),
            tolerance = self.matcher.tolerance().value(),
            tempo = ?path.as_ref().map(WarpingPath::tempo),
            "verification attempt"
        );

        Ok(Attempt {
            verdict,
            score,
            path,
            failure,
            candidate_stats,
        })
    }
}
