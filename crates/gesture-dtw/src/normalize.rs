//! Per-dimension standard scaling (z-score) of motion sequences.

use tracing::{debug, instrument};

use crate::sequence::Sequence;

/// Relative threshold under which a dimension's standard deviation counts as zero.
const DEGENERATE_STD: f64 = 1e-12;

/// Magnitude above which squared deviations could overflow `f64`.
const LARGE_MAGNITUDE: f64 = 1e100;

/// Per-dimension statistics gathered by [`standard_scale`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerStats {
    /// Mean of each dimension before scaling.
    pub means: Vec<f64>,
    /// Population standard deviation of each dimension before scaling.
    pub stds: Vec<f64>,
    /// Dimensions that were centered but not scaled because their spread was zero.
    pub degenerate: Vec<usize>,
}

impl ScalerStats {
    /// Return true if any dimension was left unscaled.
    #[must_use]
    pub fn has_degenerate(&self) -> bool {
        !self.degenerate.is_empty()
    }
}

/// Rescale every dimension of `seq` in place to zero mean and unit variance.
///
/// Uses the population standard deviation (divides by n, not n-1).
///
/// A dimension whose standard deviation is at most `1e-12 * max(1, |mean|)`
/// (a motionless axis) is centered only, which leaves it all zeros. It is
/// listed in [`ScalerStats::degenerate`] and is not an error. An empty
/// sequence is left untouched and reports zero means and stds.
///
/// Output components and reported statistics are always finite, including
/// for inputs close to `f64::MAX`.
#[instrument(skip(seq), fields(n = seq.len(), dim = seq.dim()))]
pub fn standard_scale(seq: &mut Sequence) -> ScalerStats {
    let dim = seq.dim();
    let n = seq.len();
    let mut means = vec![0.0; dim];
    let mut stds = vec![0.0; dim];
    let mut degenerate = Vec::new();

    if n == 0 {
        return ScalerStats {
            means,
            stds,
            degenerate,
        };
    }

    // Axes with a peak above LARGE_MAGNITUDE are summed in units of that
    // peak so the moments stay finite; every other axis keeps unit 1.
    let mut units = vec![1.0_f64; dim];
    for sample in seq.samples() {
        for (unit, &v) in units.iter_mut().zip(sample) {
            if v.abs() > LARGE_MAGNITUDE {
                *unit = unit.max(v.abs());
            }
        }
    }

    let count = n as f64;
    let mut unit_means = vec![0.0; dim];
    for sample in seq.samples() {
        for ((acc, &v), &unit) in unit_means.iter_mut().zip(sample).zip(&units) {
            *acc += v / unit;
        }
    }
    for m in &mut unit_means {
        *m /= count;
    }

    let mut unit_stds = vec![0.0; dim];
    for sample in seq.samples() {
        for (((acc, &v), &unit), &mean) in unit_stds
            .iter_mut()
            .zip(sample)
            .zip(&units)
            .zip(&unit_means)
        {
            *acc += (v / unit - mean).powi(2);
        }
    }
    for s in &mut unit_stds {
        *s = (*s / count).sqrt();
    }

    for d in 0..dim {
        means[d] = unit_means[d] * units[d];
        stds[d] = unit_stds[d] * units[d];
        if stds[d] <= DEGENERATE_STD * means[d].abs().max(1.0) {
            degenerate.push(d);
        }
    }
    if !degenerate.is_empty() {
        debug!(?degenerate, "zero-variance dimensions centered without scaling");
    }

    for sample in seq.as_flat_mut().chunks_exact_mut(dim) {
        for (d, v) in sample.iter_mut().enumerate() {
            let centered = *v / units[d] - unit_means[d];
            *v = if degenerate.contains(&d) {
                centered * units[d]
            } else {
                centered / unit_stds[d]
            };
        }
    }

    ScalerStats {
        means,
        stds,
        degenerate,
    }
}

/// Return a standard-scaled copy of `seq`, leaving the original unchanged.
#[must_use = "returns a new normalized sequence; the original is unchanged"]
pub fn standard_scaled(seq: &Sequence) -> (Sequence, ScalerStats) {
    let mut out = seq.clone();
    let stats = standard_scale(&mut out);
    (out, stats)
}
