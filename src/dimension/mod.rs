//! Shape, stride and layout machinery.
//!
//! This module holds the pure pieces the view engine is built from: the
//! broadcast compatibility rules, the index mapper that narrows a
//! broadcast-shape position down to a wrapped expression's own shape, stride
//! computation for owning containers, and the traversal-order tag.

pub mod layout;
pub mod mapper;
pub mod shape;
pub mod stride;

pub use layout::Layout;
pub use mapper::{map_index, map_index_into};
pub use shape::{broadcast_shape, broadcastable, trivial_broadcast};
pub use stride::Stride;

/// Returns the number of elements a shape spans; a rank-0 shape holds one.
pub fn size_of_shape(shape: &[usize]) -> usize {
    shape.iter().product()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_of_shape() {
        assert_eq!(size_of_shape(&[]), 1);
        assert_eq!(size_of_shape(&[2, 3, 4]), 24);
        assert_eq!(size_of_shape(&[2, 0, 4]), 0);
    }
}
