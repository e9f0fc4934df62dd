//! Random array constructors.
//!
//! Plain uniform and normal fills for [`Array`], useful for seeding
//! expressions in examples and tests.

use num_traits::Float;
use rand::distributions::{Distribution, Uniform};
use rand_distr::StandardNormal;

use crate::array::Array;
use crate::error::{BroadviewError, Result};

/// Creates an array of the given shape filled with values drawn uniformly
/// from `[low, high)`.
pub fn uniform<T>(shape: Vec<usize>, low: T, high: T) -> Result<Array<T>>
where
    T: rand::distributions::uniform::SampleUniform + PartialOrd + Clone,
{
    if low >= high {
        return Err(BroadviewError::InvalidOperation(
            "uniform: low must be less than high".to_string(),
        ));
    }
    let mut rng = rand::thread_rng();
    let dist = Uniform::new(low, high);
    let size: usize = shape.iter().product();
    let data: Vec<T> = (0..size).map(|_| dist.sample(&mut rng)).collect();
    Array::from_vec(data, shape)
}

/// Creates an array of the given shape filled with values drawn from a
/// normal distribution with the given mean and standard deviation.
pub fn normal<T>(shape: Vec<usize>, mean: T, std_dev: T) -> Result<Array<T>>
where
    T: Float,
    StandardNormal: Distribution<T>,
{
    if !std_dev.is_finite() || std_dev < T::zero() {
        return Err(BroadviewError::InvalidOperation(
            "normal: standard deviation must be finite and non-negative".to_string(),
        ));
    }
    let mut rng = rand::thread_rng();
    let size: usize = shape.iter().product();
    let data: Vec<T> = (0..size)
        .map(|_| {
            let z: T = StandardNormal.sample(&mut rng);
            mean + std_dev * z
        })
        .collect();
    Array::from_vec(data, shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_range() {
        let a = uniform(vec![4, 5], -1.0, 1.0).unwrap();
        assert_eq!(a.shape(), &[4, 5]);
        assert!(a.data().iter().all(|&x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn test_uniform_bad_range() {
        assert!(uniform(vec![2], 1.0, 1.0).is_err());
    }

    #[test]
    fn test_normal_shape() {
        let a = normal(vec![3, 3], 0.0f64, 1.0).unwrap();
        assert_eq!(a.size(), 9);
        assert!(a.data().iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_normal_bad_std() {
        assert!(normal(vec![2], 0.0f32, -1.0).is_err());
    }
}
