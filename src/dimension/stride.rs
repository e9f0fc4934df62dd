//! Stride handling for owning containers.
//!
//! Strides are the number of elements to skip in storage to move to the next
//! element along each dimension. For row-major order the last dimension has a
//! stride of 1; for column-major order the first does.

use std::ops::Index;

use super::Layout;
use crate::error::{BroadviewError, Result};

/// The per-dimension element strides of a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stride {
    strides: Vec<usize>,
}

impl Stride {
    /// Creates a stride from explicit per-dimension values.
    pub fn new(strides: Vec<usize>) -> Self {
        Self { strides }
    }

    /// Computes the default strides of `shape` in the given traversal order.
    pub fn for_layout(shape: &[usize], layout: Layout) -> Self {
        let ndim = shape.len();
        let mut strides = vec![0; ndim];
        let mut acc: usize = 1;
        for axis in layout.axes_fastest_first(ndim) {
            strides[axis] = acc;
            acc = acc.wrapping_mul(shape[axis]);
        }
        Self { strides }
    }

    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.strides.len()
    }

    /// Returns the stride values as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.strides
    }

    /// Computes the storage offset for the given full-rank index.
    pub fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.strides.len() {
            return Err(BroadviewError::UnderspecifiedIndex(
                index.to_vec(),
                self.strides.len(),
            ));
        }
        let mut offset = 0;
        for (&stride, &i) in self.strides.iter().zip(index) {
            offset += stride * i;
        }
        Ok(offset)
    }
}

impl Index<usize> for Stride {
    type Output = usize;

    fn index(&self, axis: usize) -> &Self::Output {
        &self.strides[axis]
    }
}

impl AsRef<[usize]> for Stride {
    fn as_ref(&self) -> &[usize] {
        &self.strides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_strides() {
        let strides = Stride::for_layout(&[2, 3, 4], Layout::RowMajor);
        assert_eq!(strides.as_slice(), &[12, 4, 1]);
    }

    #[test]
    fn test_column_major_strides() {
        let strides = Stride::for_layout(&[2, 3, 4], Layout::ColumnMajor);
        assert_eq!(strides.as_slice(), &[1, 2, 6]);
    }

    #[test]
    fn test_offset() {
        let strides = Stride::new(vec![12, 4, 1]);
        assert_eq!(strides.offset(&[0, 0, 0]).unwrap(), 0);
        assert_eq!(strides.offset(&[1, 2, 3]).unwrap(), 23);
        assert!(strides.offset(&[1, 2]).is_err());
    }
}
