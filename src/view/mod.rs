//! Broadcast views and their iterators.
//!
//! A [`BroadcastView`] wraps an expression together with a larger,
//! broadcast-compatible target shape. It copies nothing: element access maps
//! each position down to the wrapped expression, so every broadcast position
//! of a size-1 dimension aliases the same underlying element.
//!
//! The view holds its expression in one of three ownership modes, fixed at
//! construction: it owns a value, borrows shared, or borrows exclusively.
//! Writing through the view requires an owned or exclusively borrowed
//! expression.

mod broadcast;
mod iter;

pub use broadcast::{broadcast, broadcast_mut, broadcast_ref, BroadcastView};
pub use iter::{BroadcastIter, RevBroadcastIter};

/// How a view holds its wrapped expression.
///
/// The mode is chosen by the construction entry point and never changes:
/// [`broadcast`] closes over a value, [`broadcast_ref`] over a shared
/// borrow, [`broadcast_mut`] over an exclusive borrow.
#[derive(Debug)]
pub enum ExprHandle<'a, E> {
    /// The view owns a copy of the expression.
    Owned(E),
    /// The view borrows the expression; the caller guarantees its lifetime.
    Borrowed(&'a E),
    /// The view borrows the expression exclusively, enabling write-through.
    BorrowedMut(&'a mut E),
}

impl<'a, E> ExprHandle<'a, E> {
    /// Returns the wrapped expression.
    pub fn get(&self) -> &E {
        match self {
            ExprHandle::Owned(e) => e,
            ExprHandle::Borrowed(e) => e,
            ExprHandle::BorrowedMut(e) => e,
        }
    }

    /// Returns the wrapped expression mutably, or `None` for a shared
    /// borrow.
    pub fn get_mut(&mut self) -> Option<&mut E> {
        match self {
            ExprHandle::Owned(e) => Some(e),
            ExprHandle::BorrowedMut(e) => Some(e),
            ExprHandle::Borrowed(_) => None,
        }
    }
}
