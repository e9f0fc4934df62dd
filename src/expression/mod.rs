//! The array-like capability seam.
//!
//! Everything the view engine can wrap — owning containers, scalars, lazy
//! element-wise nodes, and broadcast views themselves — implements
//! [`Expression`]: a shape, a traversal-order tag, and element access by
//! multi-index. Elements are returned by value so storage-backed sources and
//! computed nodes share one contract; mutation is the separate
//! [`ExpressionMut`] path and only storage-backed sources provide it.

use crate::dimension::{size_of_shape, Layout};
use crate::error::Result;

pub mod nodes;

pub use nodes::{BinaryExpr, Scalar, UnaryExpr};

/// An array-like expression: the capability interface consumed by the view
/// engine.
pub trait Expression {
    /// The element type produced by access.
    type Elem: Clone;

    /// Returns the expression's own shape.
    fn shape(&self) -> &[usize];

    /// Returns the traversal order of the expression.
    fn layout(&self) -> Layout;

    /// Returns the element at `index`.
    ///
    /// Implementations accept an index of arity greater than or equal to
    /// their rank, using only the trailing entries; fewer entries than the
    /// rank is an error.
    fn element(&self, index: &[usize]) -> Result<Self::Elem>;

    /// Returns the number of dimensions.
    fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Returns the total number of elements.
    fn size(&self) -> usize {
        size_of_shape(self.shape())
    }
}

/// An expression whose elements can be written through.
pub trait ExpressionMut: Expression {
    /// Returns a mutable reference to the element at `index`, with the same
    /// index-arity contract as [`Expression::element`].
    fn element_mut(&mut self, index: &[usize]) -> Result<&mut Self::Elem>;
}

impl<E: Expression + ?Sized> Expression for &E {
    type Elem = E::Elem;

    fn shape(&self) -> &[usize] {
        (**self).shape()
    }

    fn layout(&self) -> Layout {
        (**self).layout()
    }

    fn element(&self, index: &[usize]) -> Result<Self::Elem> {
        (**self).element(index)
    }
}

impl<E: Expression + ?Sized> Expression for &mut E {
    type Elem = E::Elem;

    fn shape(&self) -> &[usize] {
        (**self).shape()
    }

    fn layout(&self) -> Layout {
        (**self).layout()
    }

    fn element(&self, index: &[usize]) -> Result<Self::Elem> {
        (**self).element(index)
    }
}

impl<E: ExpressionMut + ?Sized> ExpressionMut for &mut E {
    fn element_mut(&mut self, index: &[usize]) -> Result<&mut Self::Elem> {
        (**self).element_mut(index)
    }
}
