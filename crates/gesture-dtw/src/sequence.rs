//! Bounded-capacity motion sequences with validation guarantees.

use std::slice::ChunksExact;

use crate::error::DtwError;

/// Ordered, fixed-capacity list of motion samples sharing one dimensionality.
///
/// Samples are stored row-major in a single buffer reserved up front, so
/// pushing never reallocates. Every stored component is finite and every
/// sample has exactly [`dim`](Sequence::dim) components; both are checked
/// once, on [`push`](Sequence::push).
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    dim: usize,
    capacity: usize,
    values: Vec<f64>,
}

impl Sequence {
    /// Create an empty sequence holding at most `capacity` samples of `dim` components.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ZeroDimension`] | `dim` is zero |
    /// | [`DtwError::CapacityOverflow`] | `dim * capacity` components cannot be allocated |
    pub fn with_capacity(dim: usize, capacity: usize) -> Result<Self, DtwError> {
        if dim == 0 {
            return Err(DtwError::ZeroDimension);
        }
        let overflow = || DtwError::CapacityOverflow { dim, capacity };
        let components = dim.checked_mul(capacity).ok_or_else(overflow)?;
        let mut values = Vec::new();
        values
            .try_reserve_exact(components)
            .map_err(|_| overflow())?;
        Ok(Self {
            dim,
            capacity,
            values,
        })
    }

    /// Build a sequence from rows, inferring dimensionality from the first row.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySequence`] | `rows` is empty |
    /// | [`DtwError::ZeroDimension`] | The first row is empty |
    /// | [`DtwError::SampleDimension`] | A later row has a different length |
    /// | [`DtwError::NonFiniteValue`] | Any component is NaN or infinite |
    /// | [`DtwError::CapacityExceeded`] | More than `capacity` rows |
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], capacity: usize) -> Result<Self, DtwError> {
        let first = rows.first().ok_or(DtwError::EmptySequence)?;
        let mut seq = Self::with_capacity(first.as_ref().len(), capacity)?;
        for row in rows {
            seq.push(row.as_ref())?;
        }
        Ok(seq)
    }

    /// Append one sample.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::CapacityExceeded`] | The sequence is full |
    /// | [`DtwError::SampleDimension`] | `sample.len() != self.dim()` |
    /// | [`DtwError::NonFiniteValue`] | Any component is NaN or infinite |
    pub fn push(&mut self, sample: &[f64]) -> Result<(), DtwError> {
        let index = self.len();
        if index >= self.capacity {
            return Err(DtwError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if sample.len() != self.dim {
            return Err(DtwError::SampleDimension {
                index,
                expected: self.dim,
                got: sample.len(),
            });
        }
        if let Some(component) = sample.iter().position(|v| !v.is_finite()) {
            return Err(DtwError::NonFiniteValue { index, component });
        }
        self.values.extend_from_slice(sample);
        Ok(())
    }

    /// Number of components per sample.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Maximum number of samples.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() / self.dim
    }

    /// Return true if no samples have been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return true if the sequence holds `capacity` samples.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Borrow sample `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn sample(&self, index: usize) -> &[f64] {
        let start = index * self.dim;
        &self.values[start..start + self.dim]
    }

    /// Iterate over samples in capture order.
    pub fn samples(&self) -> ChunksExact<'_, f64> {
        self.values.chunks_exact(self.dim)
    }

    /// Drop all samples, keeping dimensionality and capacity.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Row-major component buffer, `len() * dim()` values long.
    #[must_use]
    pub fn as_flat(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access for in-place transforms that keep values finite.
    pub(crate) fn as_flat_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a [f64];
    type IntoIter = ChunksExact<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples()
    }
}
