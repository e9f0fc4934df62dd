//! The closed set of lazy expression nodes.
//!
//! Besides the owning container and the broadcast view, expressions compose
//! from three node kinds: a rank-0 scalar source, a unary element-wise
//! operation, and a binary element-wise operation whose shape is the common
//! broadcast shape of its operands. Nothing is evaluated until an element is
//! accessed.

use super::Expression;
use crate::dimension::{broadcast_shape, map_index, Layout};
use crate::error::Result;

/// A rank-0 expression producing a single value at every position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar<T>(pub T);

impl<T: Clone> Expression for Scalar<T> {
    type Elem = T;

    fn shape(&self) -> &[usize] {
        &[]
    }

    fn layout(&self) -> Layout {
        Layout::default()
    }

    fn element(&self, _index: &[usize]) -> Result<T> {
        Ok(self.0.clone())
    }
}

/// A lazy unary element-wise operation over one operand.
pub struct UnaryExpr<E, F> {
    input: E,
    op: F,
}

impl<E, F, T> UnaryExpr<E, F>
where
    E: Expression<Elem = T>,
    T: Clone,
    F: Fn(T) -> T,
{
    pub fn new(input: E, op: F) -> Self {
        Self { input, op }
    }
}

impl<E, F, T> Expression for UnaryExpr<E, F>
where
    E: Expression<Elem = T>,
    T: Clone,
    F: Fn(T) -> T,
{
    type Elem = T;

    fn shape(&self) -> &[usize] {
        self.input.shape()
    }

    fn layout(&self) -> Layout {
        self.input.layout()
    }

    fn element(&self, index: &[usize]) -> Result<T> {
        let mapped = map_index(index, self.input.shape())?;
        Ok((self.op)(self.input.element(&mapped)?))
    }
}

/// A lazy binary element-wise operation.
///
/// The node's shape is the common broadcast shape of the operands, computed
/// at construction; element access maps the position down into each operand
/// separately, so neither operand is ever materialized at the wider shape.
pub struct BinaryExpr<L, R, F> {
    lhs: L,
    rhs: R,
    op: F,
    shape: Vec<usize>,
}

impl<L, R, F, T> BinaryExpr<L, R, F>
where
    L: Expression<Elem = T>,
    R: Expression<Elem = T>,
    T: Clone,
    F: Fn(T, T) -> T,
{
    /// Creates the node, failing when the operand shapes do not share a
    /// common broadcast shape.
    pub fn new(lhs: L, rhs: R, op: F) -> Result<Self> {
        let shape = broadcast_shape(&[lhs.shape(), rhs.shape()])?;
        Ok(Self {
            lhs,
            rhs,
            op,
            shape,
        })
    }
}

impl<L, R, F, T> Expression for BinaryExpr<L, R, F>
where
    L: Expression<Elem = T>,
    R: Expression<Elem = T>,
    T: Clone,
    F: Fn(T, T) -> T,
{
    type Elem = T;

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    // The left operand's order wins when the two disagree.
    fn layout(&self) -> Layout {
        self.lhs.layout()
    }

    fn element(&self, index: &[usize]) -> Result<T> {
        let li = map_index(index, self.lhs.shape())?;
        let ri = map_index(index, self.rhs.shape())?;
        let a = self.lhs.element(&li)?;
        let b = self.rhs.element(&ri)?;
        Ok((self.op)(a, b))
    }
}

/// Lazy element-wise addition of two expressions.
pub fn add<L, R, T>(lhs: L, rhs: R) -> Result<BinaryExpr<L, R, impl Fn(T, T) -> T>>
where
    L: Expression<Elem = T>,
    R: Expression<Elem = T>,
    T: Clone + std::ops::Add<Output = T>,
{
    BinaryExpr::new(lhs, rhs, |a, b| a + b)
}

/// Lazy element-wise subtraction of two expressions.
pub fn sub<L, R, T>(lhs: L, rhs: R) -> Result<BinaryExpr<L, R, impl Fn(T, T) -> T>>
where
    L: Expression<Elem = T>,
    R: Expression<Elem = T>,
    T: Clone + std::ops::Sub<Output = T>,
{
    BinaryExpr::new(lhs, rhs, |a, b| a - b)
}

/// Lazy element-wise multiplication of two expressions.
pub fn mul<L, R, T>(lhs: L, rhs: R) -> Result<BinaryExpr<L, R, impl Fn(T, T) -> T>>
where
    L: Expression<Elem = T>,
    R: Expression<Elem = T>,
    T: Clone + std::ops::Mul<Output = T>,
{
    BinaryExpr::new(lhs, rhs, |a, b| a * b)
}

/// Lazy element-wise division of two expressions.
pub fn div<L, R, T>(lhs: L, rhs: R) -> Result<BinaryExpr<L, R, impl Fn(T, T) -> T>>
where
    L: Expression<Elem = T>,
    R: Expression<Elem = T>,
    T: Clone + std::ops::Div<Output = T>,
{
    BinaryExpr::new(lhs, rhs, |a, b| a / b)
}
