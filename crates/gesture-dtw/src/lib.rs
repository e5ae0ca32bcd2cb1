//! Gesture comparison engine: normalization, p-norm distance, DTW alignment, matching.
//!
//! Pure math library — zero I/O. A key gesture captured at enrollment is
//! compared against a freshly captured candidate: both are standard-scaled
//! per axis, aligned by Dynamic Time Warping under a Minkowski local cost,
//! and the cumulative cost is checked against a fixed tolerance.

mod config;
mod dtw;
mod error;
mod lock;
mod matcher;
mod matrix;
mod metric;
mod normalize;
mod path;
mod sequence;

pub use config::{DEFAULT_DIM, DEFAULT_MAX_LEN, DEFAULT_TOLERANCE, GestureConfig};
pub use dtw::Dtw;
pub use error::{DtwError, LockError};
pub use lock::{Attempt, GestureLock};
pub use matcher::{GestureDistance, Matcher, Tolerance, Verdict, matches};
pub use matrix::{CostMatrix, MAX_ALIGNMENT_LEN};
pub use metric::{PNorm, minkowski};
pub use normalize::{ScalerStats, standard_scale, standard_scaled};
pub use path::{WarpingPath, WarpingStep};
pub use sequence::Sequence;
