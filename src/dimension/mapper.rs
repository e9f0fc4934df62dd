//! Mapping of broadcast-shape indices down to a narrower native shape.
//!
//! A position in a broadcast shape is turned into a position in the wrapped
//! expression's own shape in three steps: extra leading entries are dropped
//! (right-alignment), dimensions of native size 1 collapse to index 0, and
//! every other entry passes through unchanged after a bounds check.
//!
//! Supplying more index entries than the native rank is defined truncation,
//! not an error; supplying fewer is an error.

use crate::error::{BroadviewError, Result};

/// Maps `index` onto `native`, writing the native-rank index into `out`.
///
/// `out` is cleared first; iterators pass a reused scratch buffer so the
/// mapping allocates nothing per step.
pub fn map_index_into(index: &[usize], native: &[usize], out: &mut Vec<usize>) -> Result<()> {
    let ndim = native.len();
    if index.len() < ndim {
        return Err(BroadviewError::UnderspecifiedIndex(index.to_vec(), ndim));
    }
    // Only the last `ndim` entries participate.
    let aligned = &index[index.len() - ndim..];

    out.clear();
    for (axis, (&i, &dim)) in aligned.iter().zip(native.iter()).enumerate() {
        if dim == 1 {
            out.push(0);
        } else if i < dim {
            out.push(i);
        } else {
            return Err(BroadviewError::IndexOutOfBounds(i, dim, axis));
        }
    }
    Ok(())
}

/// Convenience form of [`map_index_into`] returning a fresh index vector.
pub fn map_index(index: &[usize], native: &[usize]) -> Result<Vec<usize>> {
    let mut out = Vec::with_capacity(native.len());
    map_index_into(index, native, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_and_passthrough() {
        assert_eq!(map_index(&[0, 1, 2], &[1, 2, 3]).unwrap(), vec![0, 1, 2]);
        assert_eq!(map_index(&[5, 1, 2], &[1, 2, 3]).unwrap(), vec![0, 1, 2]);
        assert_eq!(map_index(&[3, 0], &[1, 1]).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_leading_truncation() {
        // Extra leading entries are dropped, per the element-access contract.
        assert_eq!(map_index(&[4, 0, 1, 1], &[2, 3]).unwrap(), vec![1, 1]);
        assert_eq!(map_index(&[9, 9, 2], &[3]).unwrap(), vec![2]);
    }

    #[test]
    fn test_scalar_native() {
        assert_eq!(map_index(&[3, 1, 4], &[]).unwrap(), Vec::<usize>::new());
        assert_eq!(map_index(&[], &[]).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_underspecified() {
        assert!(matches!(
            map_index(&[1], &[2, 3]),
            Err(BroadviewError::UnderspecifiedIndex(_, 2))
        ));
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(matches!(
            map_index(&[0, 3], &[2, 3]),
            Err(BroadviewError::IndexOutOfBounds(3, 3, 1))
        ));
    }
}
