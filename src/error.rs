use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BroadviewError {
    #[error("Broadcast error: cannot broadcast shape {0:?} to {1:?}")]
    ShapeIncompatible(Vec<usize>, Vec<usize>),
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("Invalid shape: {0}")]
    InvalidShape(String),
    #[error("Underspecified index: {0:?} has fewer entries than rank {1}")]
    UnderspecifiedIndex(Vec<usize>, usize),
    #[error("Index out of bounds: {0} for dimension of size {1} at axis {2}")]
    IndexOutOfBounds(usize, usize, usize),
    #[error("Linear index out of bounds: {0} for {1} elements")]
    LinearIndexOutOfBounds(usize, usize),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, BroadviewError>;
