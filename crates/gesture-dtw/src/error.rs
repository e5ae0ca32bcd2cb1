//! Error types for sequence construction, DTW alignment, and the lock session.

/// Errors from sequence validation, distance computation, and DTW alignment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// Returned when a sequence is created with zero components per sample.
    #[error("sample dimensionality must be at least 1")]
    ZeroDimension,

    /// Returned when an empty sequence is passed to the alignment engine.
    #[error("sequence must be non-empty")]
    EmptySequence,

    /// Returned when a pushed sample does not have the sequence's dimensionality.
    #[error("sample {index} has {got} components, expected {expected}")]
    SampleDimension {
        /// Position the sample would have occupied in the sequence.
        index: usize,
        /// Dimensionality of the sequence.
        expected: usize,
        /// Dimensionality of the rejected sample.
        got: usize,
    },

    /// Returned when a sample contains NaN, infinity, or negative infinity.
    #[error("sample {index} has non-finite component {component}")]
    NonFiniteValue {
        /// Position of the offending sample.
        index: usize,
        /// Component (axis) of the first non-finite value found.
        component: usize,
    },

    /// Returned when pushing into a sequence that already holds `capacity` samples.
    #[error("sequence capacity of {capacity} samples exceeded")]
    CapacityExceeded {
        /// Maximum number of samples the sequence can hold.
        capacity: usize,
    },

    /// Returned when `dim * capacity` components cannot be reserved up front.
    #[error("cannot reserve {capacity} samples of {dim} components")]
    CapacityOverflow {
        /// Components per sample.
        dim: usize,
        /// Requested sample capacity.
        capacity: usize,
    },

    /// Returned when an alignment capacity is zero or above the supported limit.
    #[error("alignment capacity must be between 1 and {limit} samples, got {capacity}")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
        /// Largest supported capacity.
        limit: usize,
    },

    /// Returned when key and candidate samples have different dimensionality.
    #[error("dimension mismatch: key has {key} components per sample, candidate has {candidate}")]
    DimensionMismatch {
        /// Dimensionality of the key (or first) operand.
        key: usize,
        /// Dimensionality of the candidate (or second) operand.
        candidate: usize,
    },

    /// Returned when the Minkowski exponent is not a positive finite number.
    #[error("p-norm exponent must be positive and finite, got {p}")]
    InvalidNorm {
        /// The rejected exponent.
        p: f64,
    },

    /// Returned when a match tolerance is negative or not finite.
    #[error("tolerance must be non-negative and finite, got {tolerance}")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },

    /// Returned when the caller-owned cost matrix cannot hold an `rows x cols` alignment.
    #[error("cost matrix of capacity {capacity}x{capacity} cannot hold a {rows}x{cols} alignment")]
    BufferTooSmall {
        /// Key sequence length.
        rows: usize,
        /// Candidate sequence length.
        cols: usize,
        /// Side length of the square buffer.
        capacity: usize,
    },
}

/// Errors from the enrollment/verification session.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// Returned when `verify()` is called before any key has been enrolled.
    #[error("no key gesture has been enrolled")]
    NoKeyEnrolled,

    /// Wraps a validation error on the captured sequence.
    #[error("invalid capture: {0}")]
    Dtw(#[from] DtwError),
}
