use crate::{memory::*, AbortStrategy, DistanceFunction, EuclideanDistance, KMeansError, Result};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// Options of a k-means run: the random generator the seeding draws from, the abort strategy of the
/// iteration, and two progress callbacks.
///
/// Created through [`KMeansConfig::build`], see [`KMeansConfigBuilder`] for the single options.
pub struct KMeansConfig<'a, T: Primitive> {
    /// Called once the centroids are seeded and every sample is assigned, with the seeded state.
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Called after every iteration with the state, the 1-based iteration number and the distance sum
    /// of that iteration. `state.distsum` still holds the previous iteration's sum at that point.
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    pub(crate) abort_strategy: AbortStrategy<T>
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            abort_strategy: AbortStrategy::<T>::NoImprovement{
                threshold: T::from(0.0005).unwrap_or_else(T::zero)
            }
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("abort_strategy", &self.abort_strategy)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Progress callback for the end of the seeding phase.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Progress callback for the end of every iteration.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Random generator for the seeding. Defaults to `thread_rng`; pass a seeded generator to get
    /// the same centroid indices on every run.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// When to stop iterating.
    /// ## Default
    /// [`AbortStrategy::NoImprovement`] `{ threshold: 0.0005 }`
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// State of one k-means run, and its result once the run returned.
///
/// [`KMeans`] itself is never mutated, so several runs may share one sample set.
///
/// ## Fields
/// - **k**: Amount of clusters
/// - **distsum**: Sum of the squared distances of all samples to their centroid (inertia)
/// - **centroids**: Cluster centers [row-major]
/// - **centroid_indices**: Samples the seeding copied into the centroids, in the order they were
///   picked. Empty when the centroids were not picked from the samples.
/// - **centroid_frequency**: Amount of samples per cluster
/// - **assignments**: Cluster of every sample
/// - **centroid_distances**: Squared distance of every sample to its centroid
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub centroid_indices: Vec<usize>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,

    pub(crate) sample_dims: usize
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![T::zero(); sample_dims * k],
            centroid_indices: Vec::with_capacity(k),
            centroid_frequency: vec![0; k],
            assignments: vec![0; sample_cnt],
            centroid_distances: vec![T::infinity(); sample_cnt],
            sample_dims
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        row_mut(&mut self.centroids, self.sample_dims, idx).iter_mut()
            .zip(src)
            .for_each(|(c, s)| *c = s);
    }

    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// The **idx**-th centroid.
    pub fn centroid(&self, idx: usize) -> &[T] {
        row(&self.centroids, self.sample_dims, idx)
    }
}


/// A sample set to cluster.
///
/// The samples are kept in one row-major vector, in the primitive type all calculations of a run and
/// its [`KMeansState`] use.
///
/// ## Runs
/// - Seeding only: [`KMeans::initialize`]
/// - Lloyd's iteration: [`KMeans::kmeans_lloyd`], or [`crate::Lloyd`] as a [`crate::Fit`]
///
/// ## Seeding methods
/// - k-means++ [`KMeans::init_kmeanplusplus`]
/// - Precomputed centroids [`KMeans::init_precomputed`]
pub struct KMeans<T: Primitive, D: DistanceFunction<T> = EuclideanDistance> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>,
    pub(crate) distance: D
}
impl<T: Primitive, D: DistanceFunction<T>> KMeans<T, D> {
    /// Takes over **samples** [row-major], **sample_cnt** rows of **sample_dims** values each.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidData`] if the length of **samples** does not match, or if the samples have no
    /// dimensions.
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize, distance: D) -> Result<Self> {
        if samples.len() != sample_cnt * sample_dims {
            return Err(KMeansError::InvalidData(format!(
                "expected {} values for {} samples of {} dimensions, got {}",
                sample_cnt * sample_dims, sample_cnt, sample_dims, samples.len()
            )));
        }
        if sample_dims == 0 && sample_cnt != 0 {
            return Err(KMeansError::InvalidData("samples have no dimensions".into()));
        }
        Ok(Self { sample_cnt, sample_dims, samples, distance })
    }

    /// Amount of samples.
    pub fn sample_cnt(&self) -> usize { self.sample_cnt }

    /// Amount of dimensions per sample.
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// The **idx**-th sample.
    pub fn sample(&self, idx: usize) -> &[T] {
        row(&self.samples, self.sample_dims, idx)
    }

    pub(crate) fn validate_k(&self, k: usize) -> Result<()> {
        if k == 0 {
            return Err(KMeansError::InvalidArgument("k has to be at least 1".into()));
        }
        if k > self.sample_cnt {
            return Err(KMeansError::InvalidArgument(format!(
                "k ({}) exceeds the number of samples ({})", k, self.sample_cnt
            )));
        }
        Ok(())
    }

    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>, limit_k: Option<usize>) {
        let centroids = &state.centroids;
        let k = limit_k.unwrap_or(state.k);
        let dims = self.sample_dims;

        self.samples.par_chunks_exact(dims)
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = centroids.chunks_exact(dims).take(k)
                    .map(|c| self.distance.distance(s, c))
                    .enumerate()
                    // ties go to the lower centroid index
                    .fold((0, T::infinity()), |(bi, bd), (ci, cd)| if cd < bd { (ci, cd) } else { (bi, bd) });
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    /// Fold centroid **centroid_id** into every sample's nearest-centroid distance, without revisiting
    /// the centroids before it.
    pub(crate) fn update_nearest_distances(&self, state: &mut KMeansState<T>, centroid_id: usize) {
        let dims = self.sample_dims;
        let centroid = row(&state.centroids, dims, centroid_id);

        self.samples.par_chunks_exact(dims)
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let dist = self.distance.distance(s, centroid);
                if dist < *centroid_dist {
                    *assignment = centroid_id;
                    *centroid_dist = dist;
                }
            });
    }

    /// Counts the samples of every cluster and returns the amount of non-empty clusters.
    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut [usize]) -> usize {
        centroid_frequency.fill(0);
        for &centroid_id in assignments {
            centroid_frequency[centroid_id] += 1;
        }
        centroid_frequency.iter().filter(|&&f| f != 0).count()
    }

    /// Run only the initialization phase.
    ///
    /// Validates **k**, lets **init** choose the centroids, assigns every sample to its nearest
    /// centroid and notifies the `init_done` subscriber. The returned state's `distsum` is the
    /// inertia of the initial centroids.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidArgument`] if `k == 0` or `k` exceeds the amount of samples, as well as
    /// any error returned by **init**.
    pub fn initialize<'a, F>(&self, k: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        self.validate_k(k)?;

        let mut state = KMeansState::new(self.sample_cnt, self.sample_dims, k);
        init(self, &mut state, config)?;

        self.update_cluster_assignments(&mut state, None);
        self.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        (config.init_done)(&state);
        Ok(state)
    }

    /// Seeds **k** centroids with **init**, then runs Lloyd's iteration until the abort strategy of
    /// **config** fires or **max_iter** iterations are done.
    ///
    /// The returned state holds the final centroids, with assignments, frequencies and inertia
    /// recomputed against them.
    ///
    /// ## Example
    /// ```rust
    /// use kmeanspp::*;
    /// use rand::SeedableRng;
    ///
    /// let (sample_cnt, sample_dims, k, max_iter) = (2000, 20, 4, 100);
    ///
    /// let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    /// samples.iter_mut().for_each(|v| *v = rand::random());
    ///
    /// let kmean = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance).unwrap();
    /// let conf = KMeansConfig::build().random_generator(rand::rngs::StdRng::seed_from_u64(7)).build();
    /// let result = kmean.kmeans_lloyd(k, max_iter, KMeans::init_kmeanplusplus, &conf).unwrap();
    ///
    /// println!("Centroids: {:?}", result.centroids);
    /// println!("Cluster-Assignments: {:?}", result.assignments);
    /// println!("Error: {}", result.distsum);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        crate::variants::Lloyd::calculate(self, k, max_iter, init, config)
    }

    /// k-means++ seeding.
    ///
    /// The first centroid is a uniformly drawn sample. Every further centroid is drawn with a probability
    /// proportional to the squared distance of a sample to its nearest centroid so far. Samples that
    /// already are a centroid are never drawn again, and the picked indices end up in
    /// [`KMeansState::centroid_indices`].
    ///
    /// Pass it to [`KMeans::initialize`] or [`KMeans::kmeans_lloyd`] instead of calling it.
    pub fn init_kmeanplusplus<'a>(kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) -> Result<()> {
        crate::inits::kmeanplusplus::calculate(kmean, state, config)
    }

    /// Seeding with the given **centroids** [row-major]. Fails with [`KMeansError::InvalidArgument`]
    /// unless they hold exactly `k` centroids.
    pub fn init_precomputed(centroids: Vec<T>) -> impl FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'_, T>) -> Result<()> {
        move |kmean, state, config| crate::inits::precomputed::calculate(kmean, state, config, centroids)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test] fn cluster_assignments_f64() { cluster_assignments::<f64>(1e-10); }
    #[test] fn cluster_assignments_f32() { cluster_assignments::<f32>(1e-5); }

    /// Parallel assignment against a brute-force nearest-centroid search.
    fn cluster_assignments<T: Primitive>(tol: T) {
        let (sample_cnt, k) = (1000, 5);
        for sample_dims in [1, 2, 3, 17] {
            let mut rnd = StdRng::seed_from_u64(1337);
            let samples: Vec<T> = (0..sample_cnt * sample_dims).map(|_| rnd.gen_range(T::zero()..T::one())).collect();
            let kmean = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance).unwrap();

            let mut state = KMeansState::new(sample_cnt, sample_dims, k);
            for c in 0..k {
                state.set_centroid_from_iter(c, kmean.sample(c).iter().cloned());
            }
            kmean.update_cluster_assignments(&mut state, None);

            for i in 0..sample_cnt {
                let dists: Vec<T> = (0..k)
                    .map(|c| kmean.sample(i).iter().zip(state.centroid(c)).map(|(&a, &b)| (a - b) * (a - b)).sum())
                    .collect();
                let nearest = (0..k).fold(0, |best, c| if dists[c] < dists[best] { c } else { best });
                assert_eq!(state.assignments[i], nearest, "sample {} with {} dims", i, sample_dims);
                assert_approx_eq!(state.centroid_distances[i], dists[nearest], tol);
            }
        }
    }

    #[test]
    fn incremental_distances_match_full_recomputation() {
        let mut rnd = StdRng::seed_from_u64(42);
        let (sample_cnt, sample_dims, k) = (300, 3, 6);
        let samples: Vec<f64> = (0..sample_cnt * sample_dims).map(|_| rnd.gen_range(-5.0..5.0)).collect();
        let kmean = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance).unwrap();

        let mut incremental = KMeansState::new(sample_cnt, sample_dims, k);
        for c in 0..k {
            incremental.set_centroid_from_iter(c, kmean.sample(c * 40).iter().cloned());
        }
        let mut full = incremental.clone();

        for c in 0..k {
            kmean.update_nearest_distances(&mut incremental, c);
            kmean.update_cluster_assignments(&mut full, Some(c + 1));
            assert_eq!(incremental.centroid_distances, full.centroid_distances);
            assert_eq!(incremental.assignments, full.assignments);
        }
    }

    #[test]
    fn new_rejects_inconsistent_shapes() {
        assert!(matches!(
            KMeans::new(vec![1.0f64, 2.0, 3.0], 2, 2, EuclideanDistance),
            Err(KMeansError::InvalidData(_))
        ));
        assert!(matches!(
            KMeans::<f64>::new(vec![], 3, 0, EuclideanDistance),
            Err(KMeansError::InvalidData(_))
        ));
        assert!(KMeans::<f64>::new(vec![], 0, 0, EuclideanDistance).is_ok());
    }

    #[test]
    fn k_out_of_range_is_invalid_argument() {
        let kmean = KMeans::new(vec![0.0f64, 1.0, 2.0], 3, 1, EuclideanDistance).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(1)).build();

        let err = kmean.initialize(0, KMeans::init_kmeanplusplus, &conf).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = kmean.initialize(4, KMeans::init_kmeanplusplus, &conf).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = kmean.kmeans_lloyd(4, 10, KMeans::init_kmeanplusplus, &conf).unwrap_err();
        assert!(err.is_invalid_argument());

        let empty = KMeans::<f64>::new(vec![], 0, 0, EuclideanDistance).unwrap();
        assert!(empty.initialize(1, KMeans::init_kmeanplusplus, &conf).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn initialize_reports_seed_inertia() {
        let kmean = KMeans::new(vec![0.0f64, 1.0, 10.0, 12.0], 4, 1, EuclideanDistance).unwrap();
        let init_calls = std::cell::Cell::new(0);
        let on_init = |s: &KMeansState<f64>| { init_calls.set(init_calls.get() + 1); assert_eq!(s.k, 2); };
        let conf = KMeansConfig::build().init_done(&on_init).build();

        let state = kmean.initialize(2, KMeans::<f64>::init_precomputed(vec![0.0, 10.0]), &conf).unwrap();
        assert_eq!(init_calls.get(), 1);
        assert_eq!(state.assignments, vec![0, 0, 1, 1]);
        assert_eq!(state.centroid_frequency, vec![2, 2]);
        assert_eq!(state.distsum, 5.0);
        assert!(state.centroid_indices.is_empty());
    }
}
