//! Deployment configuration for gesture capture and comparison.

use crate::error::DtwError;
use crate::matcher::Tolerance;
use crate::matrix::check_capacity;
use crate::metric::PNorm;

/// Samples per capture: 2 s at 50 Hz.
pub const DEFAULT_MAX_LEN: usize = 100;

/// Motion axes per sample.
pub const DEFAULT_DIM: usize = 3;

/// Highest alignment cost accepted as a match.
pub const DEFAULT_TOLERANCE: f64 = 80.0;

/// Configuration for a [`GestureLock`](crate::GestureLock).
///
/// Construct via [`GestureConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter   | Default              |
/// |-------------|----------------------|
/// | `max_len`   | 100                  |
/// | `dim`       | 3                    |
/// | `p_norm`    | `PNorm::EUCLIDEAN`   |
/// | `tolerance` | 80.0                 |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub(crate) max_len: usize,
    pub(crate) dim: usize,
    pub(crate) p_norm: PNorm,
    pub(crate) tolerance: Tolerance,
}

impl GestureConfig {
    /// Create a configuration with the deployment defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            dim: DEFAULT_DIM,
            p_norm: PNorm::EUCLIDEAN,
            tolerance: Tolerance(DEFAULT_TOLERANCE),
        }
    }

    /// Set the per-capture sample capacity.
    ///
    /// The lock allocates a `max_len x max_len` alignment buffer, so the value
    /// is bounded by [`MAX_ALIGNMENT_LEN`](crate::MAX_ALIGNMENT_LEN).
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidCapacity`] | `max_len` is zero or above the limit |
    pub fn with_max_len(mut self, max_len: usize) -> Result<Self, DtwError> {
        check_capacity(max_len)?;
        self.max_len = max_len;
        Ok(self)
    }

    /// Set the number of components per sample.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ZeroDimension`] | `dim` is zero |
    pub fn with_dim(mut self, dim: usize) -> Result<Self, DtwError> {
        if dim == 0 {
            return Err(DtwError::ZeroDimension);
        }
        self.dim = dim;
        Ok(self)
    }

    /// Set the Minkowski exponent used as local cost.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidNorm`] | `p <= 0` or not finite |
    pub fn with_p_norm(mut self, p: f64) -> Result<Self, DtwError> {
        self.p_norm = PNorm::new(p)?;
        Ok(self)
    }

    /// Set the match tolerance.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidTolerance`] | `tolerance` is negative or not finite |
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, DtwError> {
        self.tolerance = Tolerance::new(tolerance)?;
        Ok(self)
    }

    /// Per-capture sample capacity.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Components per sample.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Local cost exponent.
    #[must_use]
    pub fn p_norm(&self) -> PNorm {
        self.p_norm
    }

    /// Match tolerance.
    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::new()
    }
}
