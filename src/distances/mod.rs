mod euclideandistance;

pub use euclideandistance::EuclideanDistance;

use crate::memory::Primitive;

/// Measure used to compare a sample to a centroid.
///
/// All k-means computations in this crate (k-means++ weighting, cluster assignment, inertia) use the
/// value returned by this trait directly, so implementations are expected to return the *squared*
/// distance where a squared metric is the conventional choice.
pub trait DistanceFunction<T: Primitive>: Sync + Send {
    fn distance(&self, a: &[T], b: &[T]) -> T;
}
