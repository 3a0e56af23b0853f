use crate::memory::*;
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansError, KMeansState, Result};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T, D>(kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<()>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    let span = tracing::debug_span!("kmeans++", k = state.k, samples = kmean.sample_cnt);
    let _enter = span.enter();

    let mut chosen = vec![false; kmean.sample_cnt];
    {
        // Randomly select first centroid
        let first_idx = config.rnd.borrow_mut().gen_range(0..kmean.sample_cnt);
        push_centroid(kmean, state, &mut chosen, 0, first_idx);
    }
    for k in 1..state.k {
        // For each following centroid...
        // Fold the previously chosen centroid into each sample's distance to its nearest centroid
        kmean.update_nearest_distances(state, k - 1);

        // Chosen samples get no weight, even if duplicates or rounding left them a non-zero distance
        let weights: Vec<T> = state.centroid_distances.iter().cloned()
            .zip(chosen.iter().cloned())
            .map(|(d, c)| if c { T::zero() } else { d })
            .collect();
        let distsum: T = weights.iter().cloned().sum();

        // NaN weights are left to WeightedIndex, which rejects them
        let sampled_centroid_id = if !(distsum <= T::zero()) {
            // Calculate probabilities for each of the samples, to be the new centroid
            let centroid_probabilities: Vec<T> = weights.into_iter().map(|d| d / distsum).collect();
            // Use rand's WeightedIndex to randomly draw a centroid, while respecting their probabilities
            let centroid_index = WeightedIndex::new(centroid_probabilities)?;
            centroid_index.sample(config.rnd.borrow_mut().deref_mut())
        } else {
            // Every remaining sample coincides with a centroid: draw uniformly among them
            let remaining: Vec<usize> = (0..kmean.sample_cnt).filter(|&i| !chosen[i]).collect();
            *remaining.choose(config.rnd.borrow_mut().deref_mut())
                .ok_or_else(|| KMeansError::InvalidArgument("not enough samples left to choose from".into()))?
        };
        push_centroid(kmean, state, &mut chosen, k, sampled_centroid_id);
    }
    Ok(())
}

fn push_centroid<T, D>(kmean: &KMeans<T, D>, state: &mut KMeansState<T>, chosen: &mut [bool], k: usize, sample_id: usize)
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    tracing::debug!(centroid = k, sample = sample_id, "picked centroid");
    chosen[sample_id] = true;
    state.centroid_indices.push(sample_id);
    state.set_centroid_from_iter(k, kmean.sample(sample_id).iter().cloned());
}
