#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use std::collections::HashMap;

	use crate::{KMeansState, Primitive};

	/// Expected outcome of a k-means run. Cluster ids may be numbered differently than in the actual result.
	pub struct KMeansShouldResult<T: Primitive> {
		pub distsum: T,
		pub sample_dims: usize,
		pub assignments: Vec<usize>,
		pub centroids: Vec<T>,
		pub centroid_frequency: Vec<usize>,
	}

	pub fn assert_kmeans_result_eq<T: Primitive>(should: KMeansShouldResult<T>, actual: KMeansState<T>) {
		let tol = T::from(0.01).unwrap();
		assert_approx_eq!(should.distsum, actual.distsum, tol);
		assert_eq!(should.sample_dims, actual.sample_dims());
		assert_eq!(should.assignments.len(), actual.assignments.len());

		// expected cluster id -> actual cluster id, which has to be a bijection
		let mut relabel: HashMap<usize, usize> = HashMap::new();
		for (idx, (&s, &a)) in should.assignments.iter().zip(actual.assignments.iter()).enumerate() {
			let mapped = *relabel.entry(s).or_insert(a);
			assert_eq!(mapped, a, "sample {}: expected cluster {} maps to {}, got {}\nactual: {:?}\nshould: {:?}",
				idx, s, mapped, a, actual.assignments, should.assignments);
		}
		let mut targets: Vec<usize> = relabel.values().cloned().collect();
		targets.sort_unstable();
		targets.dedup();
		assert_eq!(targets.len(), relabel.len(), "two expected clusters merged into one: {:?}", relabel);

		for (&s, &a) in relabel.iter() {
			assert_eq!(should.centroid_frequency[s], actual.centroid_frequency[a]);
			assert_eq!(actual.assignments.iter().filter(|&&c| c == a).count(), actual.centroid_frequency[a]);
			let expected = &should.centroids[s * should.sample_dims..(s + 1) * should.sample_dims];
			for (&e, &c) in expected.iter().zip(actual.centroid(a)) {
				assert_approx_eq!(e, c, tol);
			}
		}
	}
}
