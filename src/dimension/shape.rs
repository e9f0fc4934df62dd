//! Broadcast compatibility rules for shapes.
//!
//! Shapes follow the NumPy broadcasting rules: two shapes are compared after
//! right-alignment, a dimension of size 1 stretches to any size, and missing
//! leading dimensions are treated as size 1.

use crate::error::{BroadviewError, Result};

/// Checks whether `native` can be broadcast to `target`.
///
/// The shapes are right-aligned; each paired dimension is compatible iff the
/// native size equals the target size or the native size is 1. Extra leading
/// target dimensions are always compatible. A native shape with more
/// dimensions than the target never broadcasts.
pub fn broadcastable(native: &[usize], target: &[usize]) -> bool {
    if native.len() > target.len() {
        return false;
    }
    let offset = target.len() - native.len();
    native
        .iter()
        .zip(&target[offset..])
        .all(|(&n, &t)| n == t || n == 1)
}

/// Returns `true` if `shape` broadcasts to any shape at all, i.e. every
/// dimension is 1 (a rank-0 shape trivially qualifies).
pub fn trivial_broadcast(shape: &[usize]) -> bool {
    shape.iter().all(|&d| d == 1)
}

/// Computes the common broadcast shape of several shapes.
///
/// The result has the rank of the longest input; after right-alignment each
/// output dimension is the elementwise maximum, with missing leading
/// dimensions contributing size 1. Two inputs that disagree on a dimension
/// where neither is 1 are incompatible.
pub fn broadcast_shape(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1; ndim];

    for shape in shapes {
        let offset = ndim - shape.len();
        for (o, &d) in out[offset..].iter_mut().zip(shape.iter()) {
            if *o == d || d == 1 {
                continue;
            }
            if *o == 1 {
                *o = d;
            } else {
                return Err(BroadviewError::ShapeIncompatible(
                    shape.to_vec(),
                    out.clone(),
                ));
            }
        }
    }

    Ok(out)
}
