//! Inertia per cluster count, for picking `k` with the elbow heuristic.

use crate::{memory::Primitive, DistanceFunction, KMeans, KMeansConfig, KMeansError, Result};

/// Cluster counts the `elbow` tool sweeps by default.
pub const DEFAULT_KS: std::ops::RangeInclusive<usize> = 1..=10;

/// Runs k-means (k-means++ seeding followed by Lloyd's iteration) for every `k` of **ks** and
/// returns `(k, inertia)` pairs in the order of **ks**.
///
/// Each `k` is computed **runs** times and the lowest inertia is kept. All runs draw from the
/// random generator of **config**, so a seeded generator makes the whole sweep repeatable.
pub fn sweep<T, D>(
    kmean: &KMeans<T, D>,
    ks: impl IntoIterator<Item = usize>,
    max_iter: usize,
    runs: usize,
    config: &KMeansConfig<'_, T>,
) -> Result<Vec<(usize, T)>>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    if runs == 0 {
        return Err(KMeansError::InvalidArgument("at least one run per k is needed".into()));
    }
    let span = tracing::info_span!("elbow", runs, max_iter);
    let _enter = span.enter();

    ks.into_iter()
        .map(|k| {
            let mut best = T::infinity();
            for _ in 0..runs {
                let state = kmean.kmeans_lloyd(k, max_iter, KMeans::init_kmeanplusplus, config)?;
                if state.distsum < best {
                    best = state.distsum;
                }
            }
            tracing::info!(k, inertia = ?best);
            Ok((k, best))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> KMeansConfig<'static, f64> {
        KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build()
    }

    fn total_deviation(kmean: &KMeans<f64>) -> f64 {
        let n = kmean.sample_cnt() as f64;
        let mean: Vec<f64> = (0..kmean.sample_dims())
            .map(|d| (0..kmean.sample_cnt()).map(|i| kmean.sample(i)[d]).sum::<f64>() / n)
            .collect();
        (0..kmean.sample_cnt())
            .map(|i| kmean.sample(i).iter().zip(&mean).map(|(s, m)| (s - m) * (s - m)).sum::<f64>())
            .sum()
    }

    #[test]
    fn single_cluster_inertia_is_total_deviation() {
        let kmean = datasets::iris_petals().unwrap();
        let inertias = sweep(&kmean, 1..=1, 300, 1, &seeded(0)).unwrap();
        assert_eq!(inertias.len(), 1);
        assert_eq!(inertias[0].0, 1);
        assert_approx_eq!(inertias[0].1, total_deviation(&kmean), 1e-9);
    }

    #[test]
    fn single_cluster_inertia_on_all_four_iris_features() {
        let kmean = datasets::iris().unwrap();
        let deviation = total_deviation(&kmean);
        assert_approx_eq!(deviation, 681.3706, 1e-6);

        let inertias = sweep(&kmean, 1..=1, 300, 1, &seeded(0)).unwrap();
        assert_eq!(inertias.len(), 1);
        assert_approx_eq!(inertias[0].1, deviation, 1e-6);
    }

    #[test]
    fn inertia_drops_towards_the_elbow() {
        let kmean = datasets::iris().unwrap();
        let inertias = sweep(&kmean, DEFAULT_KS, 300, 5, &seeded(0)).unwrap();
        assert_eq!(inertias.iter().map(|&(k, _)| k).collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());
        assert!(inertias[0].1 > inertias[1].1);
        assert!(inertias[1].1 > inertias[2].1);
        // the best 3-clustering of iris has an inertia of about 78.85
        assert!(inertias[2].1 < 80.0, "{:?}", inertias);
        assert!(inertias[2].1 > 78.0, "{:?}", inertias);
    }

    #[test]
    fn same_seed_same_sweep() {
        let kmean = datasets::iris().unwrap();
        let first = sweep(&kmean, 2..=4, 100, 2, &seeded(9)).unwrap();
        let second = sweep(&kmean, 2..=4, 100, 2, &seeded(9)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_unusable_parameters() {
        let kmean = datasets::iris_petals().unwrap();
        assert!(sweep(&kmean, 1..=2, 10, 0, &seeded(0)).unwrap_err().is_invalid_argument());
        assert!(sweep(&kmean, 151..=151, 10, 1, &seeded(0)).unwrap_err().is_invalid_argument());
    }
}
