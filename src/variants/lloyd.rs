use crate::{memory::*, AbortStrategy, DistanceFunction, Fit, KMeans, KMeansConfig, KMeansState, Result};
use std::cmp::Ordering;

/// Lloyd's k-means iteration: assign every sample to its nearest centroid, move every centroid into
/// the mean of its samples, repeat.
///
/// As a [`Fit`], it stops once no centroid moved by `epsilon` or more ([`AbortStrategy::CentroidShift`]),
/// or after `max_iter` iterations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lloyd;

impl Lloyd {
    /// Returns the distance sum of the assignments the centroids were updated from, and the largest
    /// distance a centroid moved.
    fn update_centroids<T, D>(data: &KMeans<T, D>, state: &mut KMeansState<T>) -> (T, T)
    where
        T: Primitive,
        D: DistanceFunction<T>,
    {
        let dims = data.sample_dims;
        // per-cluster coordinate sums, divided by the frequencies at the end
        let mut used_centroids_cnt = 0;
        let mut new_centroids = vec![T::zero(); state.centroids.len()];
        let mut new_distsum = T::zero();

        let (centroid_frequency, assignments, centroid_distances) = (&mut state.centroid_frequency, &state.assignments, &state.centroid_distances);
        rayon::scope(|s| {
            s.spawn(|_| {
                used_centroids_cnt = data.update_cluster_frequencies(assignments, centroid_frequency);
            });
            s.spawn(|_| {
                data.samples.chunks_exact(dims)
                    .zip(assignments.iter().cloned())
                    .for_each(|(s, centroid_id)| {
                        row_mut(&mut new_centroids, dims, centroid_id).iter_mut()
                            .zip(s.iter())
                            .for_each(|(cv, sv)| *cv += sv);
                    });
            });
            s.spawn(|_| {
                new_distsum = centroid_distances.iter().cloned().sum();
            });
        });

        if used_centroids_cnt != state.k {
            let mut distance_sorted_samples: Vec<usize> = (0..data.sample_cnt).collect();
            distance_sorted_samples.sort_by(
                |&i1, &i2| state.centroid_distances[i1].partial_cmp(&state.centroid_distances[i2]).unwrap_or(Ordering::Equal));

            for i in 0..state.k {
                if state.centroid_frequency[i] != 0 {
                    continue;
                }
                // farthest sample whose cluster keeps at least one member
                let donor = distance_sorted_samples.iter().rev().cloned()
                    .map(|sample_id| (sample_id, state.assignments[sample_id]))
                    .find(|&(_, prev_centroid_id)| state.centroid_frequency[prev_centroid_id] > 1);
                let (sample_id, prev_centroid_id) = match donor {
                    Some(donor) => donor,
                    None => continue,
                };
                tracing::debug!(centroid = i, sample = sample_id, "re-seeding empty cluster");

                state.centroid_frequency[prev_centroid_id] -= 1;
                state.centroid_frequency[i] += 1;
                new_distsum -= state.centroid_distances[sample_id];
                state.centroid_distances[sample_id] = T::zero();
                // move the sample's coordinates from its old cluster's sum into the empty one
                row_mut(&mut new_centroids, dims, prev_centroid_id).iter_mut()
                    .zip(data.sample(sample_id).iter().cloned())
                    .for_each(|(cv,sv)| { *cv -= sv; });
                row_mut(&mut new_centroids, dims, i).copy_from_slice(data.sample(sample_id));
                state.assignments[sample_id] = i;
            }
        }

        // Calculate new centroids from updated cluster_assignments, tracking how far they move
        let mut max_shift = T::zero();
        state.centroids.chunks_exact_mut(dims)
            .zip(new_centroids.chunks_exact(dims))
            .zip(state.centroid_frequency.iter().cloned())
            .filter(|(_, cfreq)| *cfreq != 0)
            .for_each(|((c, nc), cfreq)| {
                let cfreq = T::from(cfreq).unwrap_or_else(T::one);
                let mut shift = T::zero();
                c.iter_mut().zip(nc.iter().cloned()).for_each(|(cv, ncv)| {
                    let moved = ncv / cfreq;
                    shift += (moved - *cv) * (moved - *cv);
                    *cv = moved;
                });
                max_shift = max_shift.max(shift.sqrt());
            });
        (new_distsum, max_shift)
    }

    #[inline(always)]
    pub(crate) fn calculate<'a, T, D, F>(data: &KMeans<T, D>, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
    where
        T: Primitive,
        D: DistanceFunction<T>,
        for<'c> F: FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()>,
    {
        let span = tracing::info_span!("lloyd", k, max_iter);
        let _enter = span.enter();

        let mut state = data.initialize(k, init, config)?;
        let mut abort_strategy = config.abort_strategy.create_logic();

        for i in 1..=max_iter {
            data.update_cluster_assignments(&mut state, None);
            let (new_distsum, max_shift) = Self::update_centroids(data, &mut state);
            tracing::debug!(iteration = i, distsum = ?new_distsum, shift = ?max_shift);

            (config.iteration_done)(&state, i, new_distsum);
            if !abort_strategy.next(new_distsum, max_shift) {
                tracing::info!(iterations = i, "converged");
                break;
            }
            state.distsum = new_distsum;
        }

        data.update_cluster_assignments(&mut state, None);
        data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        Ok(state)
    }
}

impl<T: Primitive, D: DistanceFunction<T>> Fit<T, D> for Lloyd {
    fn fit(&self, centroids: &[T], samples: &KMeans<T, D>, k: usize, max_iter: usize, epsilon: T) -> Result<Vec<T>> {
        let config = KMeansConfig::build()
            .abort_strategy(AbortStrategy::CentroidShift { epsilon })
            .build();
        let state = samples.kmeans_lloyd(k, max_iter, KMeans::<T, D>::init_precomputed(centroids.to_vec()), &config)?;
        Ok(state.centroids)
    }
}
