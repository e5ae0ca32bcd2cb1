//! Caller-owned cumulative cost buffer for DTW alignment.

use crate::error::DtwError;

/// Longest sequence a [`CostMatrix`] can be sized for. At 4096 samples the
/// buffer already takes 128 MiB.
pub const MAX_ALIGNMENT_LEN: usize = 4096;

/// Square `capacity x capacity` working buffer for [`Dtw::distance_in`](crate::Dtw::distance_in)
/// and [`Dtw::distance_and_path`](crate::Dtw::distance_and_path).
///
/// Allocated once and reused across alignments. Each alignment borrows it
/// mutably, so two alignments can never write into the same buffer at once.
/// Cell `(i, j)` of an `rows x cols` alignment lives at `i * capacity + j`.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    capacity: usize,
    cells: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl CostMatrix {
    /// Allocate a buffer able to align sequences of up to `capacity` samples each.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidCapacity`] | `capacity` is zero or above [`MAX_ALIGNMENT_LEN`] |
    pub fn new(capacity: usize) -> Result<Self, DtwError> {
        check_capacity(capacity)?;
        Ok(Self::allocate(capacity))
    }

    /// Allocate without validation. `capacity` must already have passed
    /// [`check_capacity`].
    pub(crate) fn allocate(capacity: usize) -> Self {
        Self {
            capacity,
            cells: vec![0.0; capacity * capacity],
            rows: 0,
            cols: 0,
        }
    }

    /// Maximum sequence length on either axis.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shape `(rows, cols)` of the most recent alignment, `(0, 0)` before the first.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cumulative cost at `(i, j)` of the most recent alignment.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside [`shape`](Self::shape).
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.rows && j < self.cols,
            "cell ({i}, {j}) outside {}x{} alignment",
            self.rows,
            self.cols
        );
        self.cells[i * self.capacity + j]
    }

    /// Prepare the buffer for a `rows x cols` alignment.
    pub(crate) fn reset(&mut self, rows: usize, cols: usize) -> Result<(), DtwError> {
        if rows > self.capacity || cols > self.capacity {
            return Err(DtwError::BufferTooSmall {
                rows,
                cols,
                capacity: self.capacity,
            });
        }
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    #[inline]
    pub(crate) fn at(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.capacity + j]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        self.cells[i * self.capacity + j] = value;
    }
}

/// Reject capacities the square buffer cannot be sized for.
pub(crate) fn check_capacity(capacity: usize) -> Result<(), DtwError> {
    if capacity == 0 || capacity > MAX_ALIGNMENT_LEN {
        return Err(DtwError::InvalidCapacity {
            capacity,
            limit: MAX_ALIGNMENT_LEN,
        });
    }
    Ok(())
}
