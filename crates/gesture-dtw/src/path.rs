//! Sample-to-sample correspondence found by DTW traceback, and the timing
//! summary the lock reports from it.

/// Key sample `key` aligned with candidate sample `candidate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpingStep {
    pub key: usize,
    pub candidate: usize,
}

/// Monotone chain of aligned pairs from the first samples of both gestures
/// to their last samples.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpingPath {
    steps: Vec<WarpingStep>,
}

impl WarpingPath {
    /// Build from steps collected while walking back from the last cell.
    pub(crate) fn from_traceback(mut steps: Vec<WarpingStep>) -> Self {
        steps.reverse();
        Self { steps }
    }

    /// Aligned pairs in capture order.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Candidate samples per key sample.
    ///
    /// Above 1 the candidate was performed more slowly than the key, below 1
    /// more quickly.
    #[must_use]
    pub fn tempo(&self) -> f64 {
        match self.steps.last() {
            Some(end) => (end.candidate + 1) as f64 / (end.key + 1) as f64,
            None => 1.0,
        }
    }

    /// Largest timing drift, in candidate samples, between the alignment and
    /// a uniform replay of the key at [`tempo`](Self::tempo).
    ///
    /// Zero when the candidate keeps the key's rhythm throughout; large when
    /// part of the gesture was rushed and another part dragged.
    #[must_use]
    pub fn max_drift(&self) -> f64 {
        let tempo = self.tempo();
        self.steps
            .iter()
            .map(|s| (s.candidate as f64 + 0.5 - (s.key as f64 + 0.5) * tempo).abs())
            .fold(0.0, f64::max)
    }
}
