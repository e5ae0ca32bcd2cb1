//! DTW alignment cost between a key gesture and a candidate gesture.

use tracing::{debug, instrument};

use crate::error::DtwError;
use crate::matcher::GestureDistance;
use crate::matrix::CostMatrix;
use crate::metric::PNorm;
use crate::path::{WarpingPath, WarpingStep};
use crate::sequence::Sequence;

/// Immutable DTW configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dtw {
    p: PNorm,
}

impl Dtw {
    /// Create a DTW calculator using the given Minkowski exponent as local cost.
    #[must_use]
    pub fn new(p: PNorm) -> Self {
        Self { p }
    }

    /// Create a DTW calculator with Euclidean local cost.
    #[must_use]
    pub fn euclidean() -> Self {
        Self::new(PNorm::EUCLIDEAN)
    }

    /// Return the local cost exponent.
    #[must_use]
    pub fn p_norm(&self) -> PNorm {
        self.p
    }

    /// Compute the minimum cumulative alignment cost between two sequences.
    ///
    /// Uses a rolling two-row buffer along the shorter sequence rather than the
    /// full cost matrix: O(n * o * m) time, O(min(n, o)) space. The recurrence
    /// is symmetric, so transposing it to keep the rows short gives the same
    /// value.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::DimensionMismatch`] | `key.dim() != candidate.dim()` |
    /// | [`DtwError::EmptySequence`] | Either sequence has no samples |
    #[instrument(skip(key, candidate), fields(n = key.len(), o = candidate.len()))]
    pub fn distance(
        &self,
        key: &Sequence,
        candidate: &Sequence,
    ) -> Result<GestureDistance, DtwError> {
        check_pair(key, candidate)?;
        let (outer, inner) = if candidate.len() > key.len() {
            (candidate, key)
        } else {
            (key, candidate)
        };
        Ok(GestureDistance::new(self.dtw_rolling(outer, inner)))
    }

    /// Compute the alignment cost using a caller-owned cost matrix.
    ///
    /// Fills the `n x o` corner of `matrix` and performs no allocation. After
    /// the call, [`CostMatrix::get`] exposes every cumulative cost.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::DimensionMismatch`] | `key.dim() != candidate.dim()` |
    /// | [`DtwError::EmptySequence`] | Either sequence has no samples |
    /// | [`DtwError::BufferTooSmall`] | Either length exceeds `matrix.capacity()` |
    #[instrument(skip(key, candidate, matrix), fields(n = key.len(), o = candidate.len()))]
    pub fn distance_in(
        &self,
        key: &Sequence,
        candidate: &Sequence,
        matrix: &mut CostMatrix,
    ) -> Result<GestureDistance, DtwError> {
        check_pair(key, candidate)?;
        matrix.reset(key.len(), candidate.len())?;
        self.fill(key, candidate, matrix);
        Ok(GestureDistance::new(
            matrix.at(key.len() - 1, candidate.len() - 1),
        ))
    }

    /// Compute the alignment cost and the optimal warping path.
    ///
    /// Fills `matrix` as in [`distance_in`](Self::distance_in), then walks back
    /// from `(n-1, o-1)`. On ties the diagonal predecessor is preferred, then
    /// the one advancing the key only, then the one advancing the candidate only.
    ///
    /// # Errors
    ///
    /// Same as [`distance_in`](Self::distance_in).
    #[instrument(skip(key, candidate, matrix), fields(n = key.len(), o = candidate.len()))]
    pub fn distance_and_path(
        &self,
        key: &Sequence,
        candidate: &Sequence,
        matrix: &mut CostMatrix,
    ) -> Result<(GestureDistance, WarpingPath), DtwError> {
        let dist = self.distance_in(key, candidate, matrix)?;

        let mut steps = Vec::with_capacity(key.len() + candidate.len());
        let (mut i, mut j) = (key.len() - 1, candidate.len() - 1);
        loop {
            steps.push(WarpingStep {
                key: i,
                candidate: j,
            });
            match (i, j) {
                (0, 0) => break,
                (0, _) => j -= 1,
                (_, 0) => i -= 1,
                _ => {
                    let diag = matrix.at(i - 1, j - 1);
                    let above = matrix.at(i - 1, j);
                    let left = matrix.at(i, j - 1);
                    if diag <= above && diag <= left {
                        i -= 1;
                        j -= 1;
                    } else if above <= left {
                        i -= 1;
                    } else {
                        j -= 1;
                    }
                }
            }
        }
        let path = WarpingPath::from_traceback(steps);
        debug!(
            path_len = path.len(),
            tempo = path.tempo(),
            "warping path traced"
        );

        Ok((dist, path))
    }

    /// Full recurrence over the `n x o` corner of `matrix`.
    fn fill(&self, key: &Sequence, candidate: &Sequence, matrix: &mut CostMatrix) {
        let n = key.len();
        let o = candidate.len();
        let first_key = key.sample(0);
        let first_cand = candidate.sample(0);

        matrix.set(0, 0, self.p.eval_unchecked(first_key, first_cand));
        for i in 1..n {
            let cost = self.p.eval_unchecked(key.sample(i), first_cand);
            matrix.set(i, 0, matrix.at(i - 1, 0) + cost);
        }
        for j in 1..o {
            let cost = self.p.eval_unchecked(first_key, candidate.sample(j));
            matrix.set(0, j, matrix.at(0, j - 1) + cost);
        }
        for i in 1..n {
            let a = key.sample(i);
            for j in 1..o {
                let cost = self.p.eval_unchecked(a, candidate.sample(j));
                let best = matrix
                    .at(i - 1, j)
                    .min(matrix.at(i, j - 1))
                    .min(matrix.at(i - 1, j - 1));
                matrix.set(i, j, cost + best);
            }
        }
    }

    /// Rolling two-row recurrence; rows run along `inner`.
    fn dtw_rolling(&self, outer: &Sequence, inner: &Sequence) -> f64 {
        let o = inner.len();
        let mut prev = vec![0.0; o];
        let mut curr = vec![0.0; o];

        let first = outer.sample(0);
        curr[0] = self.p.eval_unchecked(first, inner.sample(0));
        for j in 1..o {
            curr[j] = curr[j - 1] + self.p.eval_unchecked(first, inner.sample(j));
        }

        for a in outer.samples().skip(1) {
            std::mem::swap(&mut prev, &mut curr);
            curr[0] = prev[0] + self.p.eval_unchecked(a, inner.sample(0));
            for j in 1..o {
                let cost = self.p.eval_unchecked(a, inner.sample(j));
                curr[j] = cost + prev[j].min(curr[j - 1]).min(prev[j - 1]);
            }
        }

        curr[o - 1]
    }
}

fn check_pair(key: &Sequence, candidate: &Sequence) -> Result<(), DtwError> {
    if key.dim() != candidate.dim() {
        return Err(DtwError::DimensionMismatch {
            key: key.dim(),
            candidate: candidate.dim(),
        });
    }
    if key.is_empty() || candidate.is_empty() {
        return Err(DtwError::EmptySequence);
    }
    Ok(())
}
