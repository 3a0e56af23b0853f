use crate::{memory::*, DistanceFunction, EuclideanDistance, KMeans, Result};

/// Iterative refinement of already initialized centroids.
///
/// Given the initial centroids [row-major], the samples, **k**, an iteration limit and a convergence
/// threshold **epsilon**, an implementation returns the final **k** centroids [row-major], each with the
/// dimensionality of the samples.
///
/// [`crate::Lloyd`] is the implementation shipped with this crate.
pub trait Fit<T: Primitive, D: DistanceFunction<T> = EuclideanDistance> {
    fn fit(&self, centroids: &[T], samples: &KMeans<T, D>, k: usize, max_iter: usize, epsilon: T) -> Result<Vec<T>>;
}
