//! Serializable summary of one enrollment + verification run.

use gesture_dtw::{Attempt, GestureConfig, ScalerStats, Verdict, WarpingPath};
use serde::{Deserialize, Serialize};

/// JSON artifact describing a verification attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Serialized as `"match"` or `"no-match"`.
    pub verdict: Verdict,
    /// DTW alignment cost, absent when the alignment failed.
    pub score: Option<f64>,
    /// `tolerance - score`; negative when the candidate was rejected on cost.
    pub margin: Option<f64>,
    /// Candidate samples per key sample along the alignment.
    pub tempo: Option<f64>,
    /// Largest drift, in candidate samples, from a uniform replay of the key.
    pub max_drift: Option<f64>,
    /// Highest cost accepted as a match.
    pub tolerance: f64,
    /// Minkowski exponent of the local cost.
    pub p_norm: f64,
    /// Samples in the key capture.
    pub key_len: usize,
    /// Samples in the candidate capture.
    pub candidate_len: usize,
    /// Key axes left unscaled for lack of motion.
    pub key_degenerate: Vec<usize>,
    /// Candidate axes left unscaled for lack of motion.
    pub candidate_degenerate: Vec<usize>,
    /// Alignment failure message, if any.
    pub failure: Option<String>,
}

impl VerificationReport {
    /// Assemble a report from the session configuration and the attempt outcome.
    #[must_use]
    pub fn new(
        config: &GestureConfig,
        key_len: usize,
        key_stats: &ScalerStats,
        candidate_len: usize,
        attempt: &Attempt,
    ) -> Self {
        let tolerance = config.tolerance();
        let path = attempt.path.as_ref();
        Self {
            verdict: attempt.verdict,
            score: attempt.score.map(|s| s.value()),
            margin: attempt.score.map(|s| s.margin(tolerance)),
            tempo: path.map(WarpingPath::tempo),
            max_drift: path.map(WarpingPath::max_drift),
            tolerance: tolerance.value(),
            p_norm: config.p_norm().value(),
            key_len,
            candidate_len,
            key_degenerate: key_stats.degenerate.clone(),
            candidate_degenerate: attempt.candidate_stats.degenerate.clone(),
            failure: attempt.failure.as_ref().map(ToString::to_string),
        }
    }

    /// Return true if the attempt was accepted.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.verdict.is_match()
    }
}
