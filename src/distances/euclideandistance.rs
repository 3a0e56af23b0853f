use crate::{DistanceFunction, Primitive};

/// Squared euclidean distance. No square root is taken.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        a.iter().cloned()
            .zip(b.iter().cloned())
            .map(|(sv, cv)| sv - cv)   // <sample> - <centroid>
            .map(|v| v * v)            // <vec_components> ^2
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance() {
        let d: f64 = EuclideanDistance.distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert_eq!(d, 25.0);
        let d: f32 = EuclideanDistance.distance(&[1.5, -2.0, 0.0], &[1.5, -2.0, 0.0]);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn symmetric() {
        let (a, b) = ([1.0f64, 7.0, -3.0], [-2.0f64, 0.5, 4.0]);
        assert_eq!(EuclideanDistance.distance(&a, &b), EuclideanDistance.distance(&b, &a));
    }
}
