//! Lazy NumPy-style broadcasting views over array-like expressions.
//!
//! `broadview` lets an n-dimensional expression be logically reshaped to a
//! larger, broadcast-compatible shape without copying. Element access maps
//! each position of the target shape down to the wrapped expression, and the
//! iterators walk the view in forward, reverse, and further-broadcast order.
//!
//! # Example
//!
//! ```
//! use broadview::{broadcast_ref, Array};
//!
//! let m = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
//! let view = broadcast_ref(&m, [4, 2, 3]).unwrap();
//!
//! assert_eq!(view.shape(), &[4, 2, 3]);
//! assert_eq!(view.element(&[3, 1, 1]).unwrap(), 5.0);
//! assert_eq!(view.iter().count(), 24);
//! ```

pub mod array;
pub mod dimension;
pub mod error;
pub mod expression;
pub mod random;
pub mod view;

pub use array::Array;
pub use dimension::{broadcast_shape, broadcastable, trivial_broadcast, Layout};
pub use error::{BroadviewError, Result};
pub use expression::{BinaryExpr, Expression, ExpressionMut, Scalar, UnaryExpr};
pub use view::{broadcast, broadcast_mut, broadcast_ref, BroadcastView};
