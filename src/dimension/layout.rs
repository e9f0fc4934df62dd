//! Traversal-order tags for multi-dimensional shapes.
//!
//! The layout of an expression decides which dimension varies fastest when
//! elements are visited linearly: row-major layouts iterate the trailing
//! dimension first, column-major layouts the leading dimension.

/// The traversal/storage order of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// C order: the last dimension is contiguous and varies fastest.
    #[default]
    RowMajor,
    /// Fortran order: the first dimension is contiguous and varies fastest.
    ColumnMajor,
}

impl Layout {
    /// Returns the axes of `shape` from fastest-varying to slowest-varying.
    ///
    /// Row-major shapes yield `ndim-1, ndim-2, .., 0`; column-major shapes
    /// yield `0, 1, .., ndim-1`.
    pub fn axes_fastest_first(self, ndim: usize) -> impl Iterator<Item = usize> {
        let (forward, backward) = match self {
            Layout::RowMajor => (None, Some((0..ndim).rev())),
            Layout::ColumnMajor => (Some(0..ndim), None),
        };
        forward.into_iter().flatten().chain(backward.into_iter().flatten())
    }

    /// Converts a flat position over `shape` into a multi-index, writing the
    /// digits into `out`.
    ///
    /// The flat position counts elements in this layout's traversal order, so
    /// `unravel_into(0, ..)` is the all-zeros index and consecutive flat
    /// positions differ in the fastest-varying dimension first.
    pub fn unravel_into(self, flat: usize, shape: &[usize], out: &mut Vec<usize>) {
        out.clear();
        out.resize(shape.len(), 0);
        let mut rest = flat;
        for axis in self.axes_fastest_first(shape.len()) {
            let dim = shape[axis];
            if dim > 0 {
                out[axis] = rest % dim;
                rest /= dim;
            }
        }
    }

}
