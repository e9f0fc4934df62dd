//! The broadcast view.

use super::iter::{BroadcastIter, RevBroadcastIter};
use super::ExprHandle;
use crate::array::Array;
use crate::dimension::{broadcastable, map_index, size_of_shape, Layout};
use crate::error::{BroadviewError, Result};
use crate::expression::{Expression, ExpressionMut};

/// A lazily broadcast expression.
///
/// The view reports the target shape while deferring every element access to
/// the wrapped expression through the index mapper. It owns no element
/// storage of its own, only the target shape and the expression handle.
#[derive(Debug)]
pub struct BroadcastView<'a, E: Expression> {
    expr: ExprHandle<'a, E>,
    shape: Vec<usize>,
}

/// Broadcasts an owned expression to `shape`.
///
/// Fails with [`BroadviewError::ShapeIncompatible`] when the expression's
/// shape does not broadcast to the target.
pub fn broadcast<'a, E, S>(expr: E, shape: S) -> Result<BroadcastView<'a, E>>
where
    E: Expression,
    S: Into<Vec<usize>>,
{
    BroadcastView::from_handle(ExprHandle::Owned(expr), shape.into())
}

/// Broadcasts a borrowed expression to `shape`.
pub fn broadcast_ref<'a, E, S>(expr: &'a E, shape: S) -> Result<BroadcastView<'a, E>>
where
    E: Expression,
    S: Into<Vec<usize>>,
{
    BroadcastView::from_handle(ExprHandle::Borrowed(expr), shape.into())
}

/// Broadcasts an exclusively borrowed expression to `shape`, enabling
/// write-through access.
pub fn broadcast_mut<'a, E, S>(expr: &'a mut E, shape: S) -> Result<BroadcastView<'a, E>>
where
    E: Expression,
    S: Into<Vec<usize>>,
{
    BroadcastView::from_handle(ExprHandle::BorrowedMut(expr), shape.into())
}

impl<'a, E: Expression> BroadcastView<'a, E> {
    fn from_handle(expr: ExprHandle<'a, E>, shape: Vec<usize>) -> Result<Self> {
        let native = expr.get().shape();
        if !broadcastable(native, &shape) {
            return Err(BroadviewError::ShapeIncompatible(native.to_vec(), shape));
        }
        Ok(Self { expr, shape })
    }

    /// Returns the target shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the traversal order, inherited from the wrapped expression.
    pub fn layout(&self) -> Layout {
        self.expr.get().layout()
    }

    /// Returns the number of dimensions of the target shape.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements the view spans.
    pub fn size(&self) -> usize {
        size_of_shape(&self.shape)
    }

    /// Returns the element at `index`.
    ///
    /// The index must carry at least as many entries as the view's rank;
    /// extra leading entries are ignored. Entries over broadcast-collapsed
    /// dimensions are accepted unchecked, since they all reach the same
    /// underlying element.
    pub fn element(&self, index: &[usize]) -> Result<E::Elem> {
        if index.len() < self.shape.len() {
            return Err(BroadviewError::UnderspecifiedIndex(
                index.to_vec(),
                self.shape.len(),
            ));
        }
        let expr = self.expr.get();
        let native = map_index(index, expr.shape())?;
        expr.element(&native)
    }

    /// Returns the element at flat position `at` in the view's traversal
    /// order.
    pub fn element_at(&self, at: usize) -> Result<E::Elem> {
        let size = self.size();
        if at >= size {
            return Err(BroadviewError::LinearIndexOutOfBounds(at, size));
        }
        let mut index = Vec::with_capacity(self.shape.len());
        self.layout().unravel_into(at, &self.shape, &mut index);
        self.element(&index)
    }

    /// Iterates the view's own shape in forward traversal order.
    pub fn iter(&self) -> BroadcastIter<'_, 'a, E> {
        BroadcastIter::new(self, self.shape.clone())
    }

    /// Iterates the view's own shape in reverse traversal order.
    pub fn rev_iter(&self) -> RevBroadcastIter<'_, 'a, E> {
        RevBroadcastIter::new(self, self.shape.clone())
    }

    /// Iterates an externally supplied shape that the view broadcasts into.
    ///
    /// Each visited position of `shape` is mapped down through the view, so
    /// a further broadcast needs no second view object. A shape equal to the
    /// view's own behaves exactly like [`BroadcastView::iter`].
    pub fn iter_shaped<S>(&self, shape: S) -> Result<BroadcastIter<'_, 'a, E>>
    where
        S: Into<Vec<usize>>,
    {
        let shape = shape.into();
        if !broadcastable(&self.shape, &shape) {
            return Err(BroadviewError::ShapeIncompatible(self.shape.clone(), shape));
        }
        Ok(BroadcastIter::new(self, shape))
    }

    /// Reverse counterpart of [`BroadcastView::iter_shaped`].
    pub fn rev_iter_shaped<S>(&self, shape: S) -> Result<RevBroadcastIter<'_, 'a, E>>
    where
        S: Into<Vec<usize>>,
    {
        let shape = shape.into();
        if !broadcastable(&self.shape, &shape) {
            return Err(BroadviewError::ShapeIncompatible(self.shape.clone(), shape));
        }
        Ok(RevBroadcastIter::new(self, shape))
    }
}

impl<'a, E: ExpressionMut> BroadcastView<'a, E> {
    /// Returns a mutable reference to the underlying element at `index`.
    ///
    /// Positions that differ only in broadcast-collapsed dimensions alias
    /// one element, so a write here is visible at every such position. Fails
    /// when the view holds its expression through a shared borrow.
    pub fn element_mut(&mut self, index: &[usize]) -> Result<&mut E::Elem> {
        if index.len() < self.shape.len() {
            return Err(BroadviewError::UnderspecifiedIndex(
                index.to_vec(),
                self.shape.len(),
            ));
        }
        let native = map_index(index, self.expr.get().shape())?;
        let expr = self.expr.get_mut().ok_or_else(|| {
            BroadviewError::InvalidOperation(
                "cannot write through a view over a shared borrow".to_string(),
            )
        })?;
        expr.element_mut(&native)
    }
}

impl<'a, E: Expression> Expression for BroadcastView<'a, E> {
    type Elem = E::Elem;

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn layout(&self) -> Layout {
        BroadcastView::layout(self)
    }

    fn element(&self, index: &[usize]) -> Result<Self::Elem> {
        BroadcastView::element(self, index)
    }
}

impl<'a, E, T> From<BroadcastView<'a, E>> for Array<T>
where
    E: Expression<Elem = T>,
    T: Clone,
{
    fn from(view: BroadcastView<'a, E>) -> Self {
        Array::from_expr(&view).expect("every position of a valid view is accessible")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Scalar;

    fn matrix() -> Array<f64> {
        Array::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap()
    }

    #[test]
    fn test_construction() {
        let m = matrix();
        let view = broadcast_ref(&m, [1, 2, 3]).unwrap();
        assert_eq!(view.shape(), &[1, 2, 3]);
        assert_eq!(view.layout(), m.layout());
        assert_eq!(view.size(), 6);
    }

    #[test]
    fn test_construction_incompatible() {
        let m = matrix();
        assert!(matches!(
            broadcast_ref(&m, [3, 2]),
            Err(BroadviewError::ShapeIncompatible(_, _))
        ));
        assert!(broadcast_ref(&m, [3]).is_err());
    }

    #[test]
    fn test_element_access() {
        let m = matrix();
        let view = broadcast_ref(&m, [1, 2, 3]).unwrap();
        assert_eq!(view.element(&[0, 0, 0]).unwrap(), 1.0);
        assert_eq!(view.element(&[0, 1, 0]).unwrap(), 4.0);
        assert_eq!(view.element(&[0, 1, 1]).unwrap(), 5.0);
    }

    #[test]
    fn test_element_arity() {
        let m = matrix();
        let view = broadcast_ref(&m, [4, 2, 3]).unwrap();
        // Exact arity and over-long index with truncated leading entries.
        assert_eq!(view.element(&[0, 1, 1]).unwrap(), 5.0);
        assert_eq!(view.element(&[4, 0, 1, 1]).unwrap(), 5.0);
        // Fewer entries than the view's rank is an error.
        assert!(matches!(
            view.element(&[1, 1]),
            Err(BroadviewError::UnderspecifiedIndex(_, 3))
        ));
    }

    #[test]
    fn test_linear_access_matches_multi_index() {
        let m = matrix();
        let view = broadcast_ref(&m, [2, 2, 3]).unwrap();
        for at in 0..view.size() {
            let mut index = Vec::new();
            view.layout().unravel_into(at, view.shape(), &mut index);
            assert_eq!(view.element_at(at).unwrap(), view.element(&index).unwrap());
        }
        assert!(view.element_at(12).is_err());
    }

    #[test]
    fn test_owned_expression() {
        let view = broadcast(matrix(), [4, 2, 3]).unwrap();
        assert_eq!(view.element(&[3, 1, 2]).unwrap(), 6.0);
    }

    #[test]
    fn test_scalar_broadcast() {
        let view = broadcast(Scalar(123), [2, 2]).unwrap();
        assert_eq!(view.size(), 4);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(view.element(&[i, j]).unwrap(), 123);
            }
        }
    }

    #[test]
    fn test_write_through_aliases() {
        let mut m = Array::from_vec(vec![1, 2, 3], vec![3]).unwrap();
        {
            let mut view = broadcast_mut(&mut m, [2, 3]).unwrap();
            *view.element_mut(&[0, 1]).unwrap() = 20;
            // The collapsed leading dimension aliases the same element.
            assert_eq!(view.element(&[1, 1]).unwrap(), 20);
        }
        assert_eq!(*m.get(&[1]).unwrap(), 20);
    }

    #[test]
    fn test_write_through_shared_borrow_fails() {
        let m = matrix();
        let mut view = broadcast_ref(&m, [2, 2, 3]).unwrap();
        assert!(matches!(
            view.element_mut(&[0, 0, 0]),
            Err(BroadviewError::InvalidOperation(_))
        ));
        // An owned copy accepts writes.
        let mut owned = broadcast(matrix(), [2, 2, 3]).unwrap();
        assert!(owned.element_mut(&[0, 0, 0]).is_ok());
    }

    #[test]
    fn test_materialization() {
        let m = matrix();
        let view = broadcast_ref(&m, [1, 2, 3]).unwrap();
        let materialized: Array<f64> = view.into();
        assert_eq!(materialized.shape(), &[1, 2, 3]);
        assert_eq!(materialized.element(&[0, 1, 1]).unwrap(), 5.0);
    }

    #[test]
    fn test_view_of_view_composes() {
        let m = matrix();
        let inner = broadcast_ref(&m, [1, 2, 3]).unwrap();
        let outer = broadcast_ref(&inner, [4, 1, 2, 3]).unwrap();
        assert_eq!(outer.element(&[3, 0, 1, 2]).unwrap(), 6.0);
    }
}
