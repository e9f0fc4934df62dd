//! Odometer iteration over broadcast views.
//!
//! Both iterator families keep a mixed-radix position counter with one digit
//! per dimension of the shape being walked. Each step carries from the
//! fastest-varying dimension of the active layout outward; the iterator is
//! exhausted once the slowest dimension overflows (forward) or underflows
//! (reverse). Shapes with a zero-size dimension span no positions and are
//! exhausted from the start.

use super::broadcast::BroadcastView;
use crate::dimension::size_of_shape;
use crate::expression::Expression;

/// Forward iterator over a broadcast view.
///
/// Walks either the view's own shape or an externally supplied shape the
/// view broadcasts into; every visited position is mapped down to an
/// underlying element. Cloning an iterator duplicates only its position.
pub struct BroadcastIter<'v, 'a, E: Expression> {
    view: &'v BroadcastView<'a, E>,
    shape: Vec<usize>,
    index: Vec<usize>,
    remaining: usize,
}

impl<'v, 'a, E: Expression> BroadcastIter<'v, 'a, E> {
    pub(super) fn new(view: &'v BroadcastView<'a, E>, shape: Vec<usize>) -> Self {
        let index = vec![0; shape.len()];
        let remaining = size_of_shape(&shape);
        Self {
            view,
            shape,
            index,
            remaining,
        }
    }

    /// Advances the position counter by one step, carrying outward from the
    /// fastest-varying dimension.
    fn step(&mut self) {
        for axis in self.view.layout().axes_fastest_first(self.shape.len()) {
            self.index[axis] += 1;
            if self.index[axis] < self.shape[axis] {
                return;
            }
            self.index[axis] = 0;
        }
    }
}

impl<'v, 'a, E: Expression> Iterator for BroadcastIter<'v, 'a, E> {
    type Item = E::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self
            .view
            .element(&self.index)
            .expect("iterator positions stay in range");
        self.step();
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'v, 'a, E: Expression> ExactSizeIterator for BroadcastIter<'v, 'a, E> {}

impl<'v, 'a, E: Expression> std::iter::FusedIterator for BroadcastIter<'v, 'a, E> {}

// Derived Clone would demand E: Clone; only the position is duplicated.
impl<'v, 'a, E: Expression> Clone for BroadcastIter<'v, 'a, E> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            shape: self.shape.clone(),
            index: self.index.clone(),
            remaining: self.remaining,
        }
    }
}

/// Reverse iterator over a broadcast view.
///
/// Starts at the last valid position of the shape being walked and borrows
/// backward through the fastest-varying dimension, visiting exactly the
/// positions of the forward iterator in reverse order.
pub struct RevBroadcastIter<'v, 'a, E: Expression> {
    view: &'v BroadcastView<'a, E>,
    shape: Vec<usize>,
    index: Vec<usize>,
    remaining: usize,
}

impl<'v, 'a, E: Expression> RevBroadcastIter<'v, 'a, E> {
    pub(super) fn new(view: &'v BroadcastView<'a, E>, shape: Vec<usize>) -> Self {
        let remaining = size_of_shape(&shape);
        let index = if remaining == 0 {
            vec![0; shape.len()]
        } else {
            shape.iter().map(|&d| d - 1).collect()
        };
        Self {
            view,
            shape,
            index,
            remaining,
        }
    }

    /// Retreats the position counter by one step, borrowing outward from the
    /// fastest-varying dimension.
    fn step(&mut self) {
        for axis in self.view.layout().axes_fastest_first(self.shape.len()) {
            if self.index[axis] > 0 {
                self.index[axis] -= 1;
                return;
            }
            self.index[axis] = self.shape[axis] - 1;
        }
    }
}

impl<'v, 'a, E: Expression> Iterator for RevBroadcastIter<'v, 'a, E> {
    type Item = E::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self
            .view
            .element(&self.index)
            .expect("iterator positions stay in range");
        self.step();
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'v, 'a, E: Expression> ExactSizeIterator for RevBroadcastIter<'v, 'a, E> {}

impl<'v, 'a, E: Expression> std::iter::FusedIterator for RevBroadcastIter<'v, 'a, E> {}

impl<'v, 'a, E: Expression> Clone for RevBroadcastIter<'v, 'a, E> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            shape: self.shape.clone(),
            index: self.index.clone(),
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::dimension::Layout;
    use crate::view::{broadcast, broadcast_ref};

    #[test]
    fn test_natural_forward() {
        let v = Array::from_vec(vec![1, 2, 3], vec![3]).unwrap();
        let view = broadcast_ref(&v, [2, 3]).unwrap();
        let values: Vec<i32> = view.iter().collect();
        assert_eq!(values, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_natural_reverse() {
        let v = Array::from_vec(vec![1, 2, 3], vec![3]).unwrap();
        let view = broadcast_ref(&v, [2, 3]).unwrap();
        let values: Vec<i32> = view.rev_iter().collect();
        assert_eq!(values, vec![3, 2, 1, 3, 2, 1]);

        let forward: Vec<i32> = view.iter().collect();
        let mut reversed = values;
        reversed.reverse();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_shaped_forward() {
        let v = Array::from_vec(vec![1, 2, 3], vec![3]).unwrap();
        let view = broadcast_ref(&v, [2, 3]).unwrap();
        let values: Vec<i32> = view.iter_shaped([2, 2, 3]).unwrap().collect();
        assert_eq!(values.len(), 12);
        assert_eq!(values, vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_shaped_reverse() {
        let v = Array::from_vec(vec![1, 2, 3], vec![3]).unwrap();
        let view = broadcast_ref(&v, [2, 3]).unwrap();
        let mut iter = view.rev_iter_shaped([2, 2, 3]).unwrap();
        for _ in 0..6 {
            iter.next();
        }
        assert_eq!(iter.next(), Some(3));
        // 5 more elements remain after this one.
        assert_eq!(iter.count(), 5);
    }

    #[test]
    fn test_shaped_restriction_reproduces_natural() {
        let m = Array::from_vec(vec![1, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
        let view = broadcast_ref(&m, [2, 3]).unwrap();
        let natural: Vec<i32> = view.iter().collect();
        let shaped: Vec<i32> = view.iter_shaped([3, 2, 3]).unwrap().collect();
        assert_eq!(shaped.len(), 18);
        for block in shaped.chunks(6) {
            assert_eq!(block, natural.as_slice());
        }
    }

    #[test]
    fn test_shaped_same_shape_equals_natural() {
        let m = Array::from_vec(vec![1, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
        let view = broadcast_ref(&m, [2, 2, 3]).unwrap();
        let natural: Vec<i32> = view.iter().collect();
        let shaped: Vec<i32> = view.iter_shaped([2, 2, 3]).unwrap().collect();
        assert_eq!(natural, shaped);
    }

    #[test]
    fn test_shaped_incompatible() {
        let v = Array::from_vec(vec![1, 2, 3], vec![3]).unwrap();
        let view = broadcast_ref(&v, [2, 3]).unwrap();
        assert!(view.iter_shaped([2, 4]).is_err());
        assert!(view.rev_iter_shaped([3]).is_err());
    }

    #[test]
    fn test_zero_volume() {
        let e: Array<i32> = Array::from_vec(vec![], vec![1, 0]).unwrap();
        let view = broadcast_ref(&e, [3, 1, 0]).unwrap();
        assert_eq!(view.iter().next(), None);
        assert_eq!(view.rev_iter().next(), None);
        assert_eq!(view.iter().len(), 0);
    }

    #[test]
    fn test_scalar_iteration() {
        let view = broadcast(Array::scalar(9), Vec::<usize>::new()).unwrap();
        let values: Vec<i32> = view.iter().collect();
        assert_eq!(values, vec![9]);
        let values: Vec<i32> = view.rev_iter().collect();
        assert_eq!(values, vec![9]);
    }

    #[test]
    fn test_column_major_order() {
        // Column-major storage of [[1,2,3],[4,5,6]]; iteration varies the
        // leading dimension fastest.
        let m =
            Array::from_vec_with_layout(vec![1, 4, 2, 5, 3, 6], vec![2, 3], Layout::ColumnMajor)
                .unwrap();
        let view = broadcast_ref(&m, [2, 3]).unwrap();
        let values: Vec<i32> = view.iter().collect();
        assert_eq!(values, vec![1, 4, 2, 5, 3, 6]);
        let reversed: Vec<i32> = view.rev_iter().collect();
        assert_eq!(reversed, vec![6, 3, 5, 2, 4, 1]);
    }

    #[test]
    fn test_visit_count_matches_volume() {
        let m = Array::from_vec((0..6).collect(), vec![2, 3]).unwrap();
        let view = broadcast_ref(&m, [4, 2, 3]).unwrap();
        assert_eq!(view.iter().count(), 24);
        assert_eq!(view.rev_iter().count(), 24);
    }

    #[test]
    fn test_clone_duplicates_position() {
        let v = Array::from_vec(vec![1, 2, 3], vec![3]).unwrap();
        let view = broadcast_ref(&v, [2, 3]).unwrap();
        let mut a = view.iter();
        a.next();
        a.next();
        let mut b = a.clone();
        assert_eq!(a.next(), b.next());
        assert_eq!(a.len(), b.len());
    }
}
