//! A minimal owning n-dimensional container.
//!
//! `Array<T>` is the concrete source and materialization target of the view
//! engine: contiguous `Vec<T>` storage in a declared traversal order, with
//! multi-index and linear element access. It implements [`Expression`] (and
//! [`ExpressionMut`]) so it can be wrapped, composed, and written through
//! like any other node.

use std::ops::Index;

use num_traits::{One, Zero};

use crate::dimension::{size_of_shape, Layout, Stride};
use crate::error::{BroadviewError, Result};
use crate::expression::{Expression, ExpressionMut};

/// An owning n-dimensional array with contiguous storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Stride,
    layout: Layout,
}

impl<T> Array<T> {
    /// Creates an array over row-major `data`.
    ///
    /// Fails when the data length does not match the shape's volume.
    pub fn from_vec(data: Vec<T>, shape: Vec<usize>) -> Result<Self> {
        Self::from_vec_with_layout(data, shape, Layout::RowMajor)
    }

    /// Creates an array over `data` stored in the given traversal order.
    pub fn from_vec_with_layout(data: Vec<T>, shape: Vec<usize>, layout: Layout) -> Result<Self> {
        if data.len() != size_of_shape(&shape) {
            return Err(BroadviewError::ShapeMismatch {
                expected: vec![size_of_shape(&shape)],
                actual: vec![data.len()],
            });
        }
        let strides = Stride::for_layout(&shape, layout);
        Ok(Self {
            data,
            shape,
            strides,
            layout,
        })
    }

    /// Creates a rank-0 array holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            data: vec![value],
            shape: Vec::new(),
            strides: Stride::new(Vec::new()),
            layout: Layout::RowMajor,
        }
    }

    /// Returns the shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the strides.
    pub fn strides(&self) -> &Stride {
        &self.strides
    }

    /// Returns the traversal order of the storage.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the storage in traversal order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Computes the storage offset of `index`.
    ///
    /// The index may carry extra leading entries, which are ignored; fewer
    /// entries than the rank is an error, as is any out-of-range entry.
    fn offset_of(&self, index: &[usize]) -> Result<usize> {
        let ndim = self.shape.len();
        if index.len() < ndim {
            return Err(BroadviewError::UnderspecifiedIndex(index.to_vec(), ndim));
        }
        let aligned = &index[index.len() - ndim..];
        for (axis, (&i, &dim)) in aligned.iter().zip(self.shape.iter()).enumerate() {
            if i >= dim {
                return Err(BroadviewError::IndexOutOfBounds(i, dim, axis));
            }
        }
        self.strides.offset(aligned)
    }

    /// Returns a reference to the element at `index`.
    pub fn get(&self, index: &[usize]) -> Result<&T> {
        let offset = self.offset_of(index)?;
        Ok(&self.data[offset])
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        let offset = self.offset_of(index)?;
        Ok(&mut self.data[offset])
    }

    /// Returns a reference to the element at flat position `at` in the
    /// array's own traversal order.
    pub fn get_linear(&self, at: usize) -> Result<&T> {
        self.data
            .get(at)
            .ok_or(BroadviewError::LinearIndexOutOfBounds(at, self.data.len()))
    }
}

impl<T: Clone> Array<T> {
    /// Creates an array of the given shape filled with one value.
    pub fn from_elem(shape: Vec<usize>, elem: T) -> Self {
        let data = vec![elem; size_of_shape(&shape)];
        let strides = Stride::for_layout(&shape, Layout::RowMajor);
        Self {
            data,
            shape,
            strides,
            layout: Layout::RowMajor,
        }
    }

    /// Creates an array by calling `f` at every position of `shape`, visiting
    /// positions in `layout` order.
    pub fn from_shape_fn<F>(shape: Vec<usize>, layout: Layout, mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let size = size_of_shape(&shape);
        let mut data = Vec::with_capacity(size);
        let mut index = Vec::with_capacity(shape.len());
        for flat in 0..size {
            layout.unravel_into(flat, &shape, &mut index);
            data.push(f(&index));
        }
        let strides = Stride::for_layout(&shape, layout);
        Self {
            data,
            shape,
            strides,
            layout,
        }
    }

    /// Materializes any expression into an owning array of the same shape and
    /// traversal order.
    ///
    /// This is a single element-wise pass; an access error mid-pass
    /// propagates and the partial result is discarded.
    pub fn from_expr<E>(expr: &E) -> Result<Self>
    where
        E: Expression<Elem = T>,
    {
        let shape = expr.shape().to_vec();
        let layout = expr.layout();
        let size = size_of_shape(&shape);
        let mut data = Vec::with_capacity(size);
        let mut index = Vec::with_capacity(shape.len());
        for flat in 0..size {
            layout.unravel_into(flat, &shape, &mut index);
            data.push(expr.element(&index)?);
        }
        let strides = Stride::for_layout(&shape, layout);
        Ok(Self {
            data,
            shape,
            strides,
            layout,
        })
    }
}

impl<T: Zero + Clone> Array<T> {
    /// Creates an array of the given shape filled with zeros.
    pub fn zeros(shape: Vec<usize>) -> Self {
        Self::from_elem(shape, T::zero())
    }
}

impl<T: One + Clone> Array<T> {
    /// Creates an array of the given shape filled with ones.
    pub fn ones(shape: Vec<usize>) -> Self {
        Self::from_elem(shape, T::one())
    }
}

impl<T: Clone> Expression for Array<T> {
    type Elem = T;

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn layout(&self) -> Layout {
        self.layout
    }

    fn element(&self, index: &[usize]) -> Result<T> {
        self.get(index).cloned()
    }
}

impl<T: Clone> ExpressionMut for Array<T> {
    fn element_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        self.get_mut(index)
    }
}

impl<T> Index<&[usize]> for Array<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        self.get(index).expect("Index out of bounds")
    }
}
