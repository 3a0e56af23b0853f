use crate::memory::*;
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Result};

#[inline(always)]
pub fn calculate<T, D>(
    kmean: &KMeans<T, D>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: Vec<T>,
) -> Result<()>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    if computed.len() != state.k * kmean.sample_dims {
        return Err(KMeansError::InvalidArgument(format!(
            "expected {} precomputed centroids of {} dimensions, got {} values",
            state.k, kmean.sample_dims, computed.len()
        )));
    }
    computed.chunks_exact(kmean.sample_dims).enumerate().for_each(|(ci, c)| {
        state.set_centroid_from_iter(ci, c.iter().cloned());
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AbortStrategy, EuclideanDistance};

    #[test]
    fn train_with_precomputed_centroids() {
        let samples = vec![0.0, 1.0, 10.0, 11.0, 20.0, 21.0];
        let centroids = vec![0.0, 21.0];
        let (sample_cnt, sample_dims) = (samples.len(), 1);

        let kmean: KMeans<f32> = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().abort_strategy(AbortStrategy::CentroidShift { epsilon: 0.0001 }).build();
        let result = kmean.kmeans_lloyd(2, 200, KMeans::<f32>::init_precomputed(centroids), &conf).unwrap();

        // 10 is closer to 0 than to 21, 11 closer to 21 than to 0; the split never changes afterwards
        assert_eq!(result.centroids, vec![11.0f32 / 3.0, 52.0 / 3.0]);
        assert_eq!(result.centroid_frequency, vec![3, 3]);
        assert_eq!(result.assignments, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn wrong_centroid_count_is_rejected() {
        let kmean: KMeans<f64> = KMeans::new(vec![0.0, 1.0, 2.0, 3.0], 2, 2, EuclideanDistance).unwrap();
        let conf = KMeansConfig::default();
        let err = kmean.initialize(2, KMeans::<f64>::init_precomputed(vec![0.0, 1.0, 2.0]), &conf).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
