//! # kmeanspp - API documentation
//!
//! kmeanspp clusters points with k-means, seeding the centroids with the k-means++ heuristic.
//! It ships the library behind two command-line tools: `kmeans-pp`, which joins two keyed CSV
//! tables into one point set and clusters it, and `elbow`, which reports the inertia of every
//! cluster count from 1 to 10.
//!
//! ## Design target
//! Samples are given as one raw, row-major vector instead of any matrix crate, and every
//! calculation is generic over the primitive type used for the samples.
//! Per-sample work (distances, assignments) runs in parallel using rayon. Everything that feeds
//! random sampling is reduced sequentially, so a seeded random generator always yields the
//! same result.
//!
//! ## Supported centroid initializations
//! - K-Means++ [`KMeans::init_kmeanplusplus`]
//! - Precomputed centroids [`KMeans::init_precomputed`]
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeanspp::*;
//! use rand::SeedableRng;
//!
//! fn main() -> Result<()> {
//!     let (sample_cnt, sample_dims, k, max_iter) = (2000, 8, 4, 100);
//!
//!     // Generate some random data
//!     let mut samples = vec![0.0f64;sample_cnt * sample_dims];
//!     samples.iter_mut().for_each(|v| *v = rand::random());
//!
//!     let kmean = KMeans::new(samples, sample_cnt, sample_dims, EuclideanDistance)?;
//!     let conf = KMeansConfig::build()
//!         .random_generator(rand_pcg::Pcg64::seed_from_u64(0))
//!         .build();
//!
//!     // Seed with k-means++, then refine the seeds until no centroid moves by 1e-4 or more
//!     let seeds = kmean.initialize(k, KMeans::init_kmeanplusplus, &conf)?;
//!     let centroids = Lloyd.fit(&seeds.centroids, &kmean, k, max_iter, 1e-4)?;
//!
//!     println!("Seed indices: {:?}", seeds.centroid_indices);
//!     println!("Centroids: {:?}", centroids);
//!     Ok(())
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeanspp::*;
//!
//! fn main() -> Result<()> {
//!     let kmean = datasets::iris()?;
//!
//!     let conf = KMeansConfig::<f64>::build()
//!         .init_done(&|_| println!("Initialization completed."))
//!         .iteration_done(&|s, nr, new_distsum|
//!             println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!                 nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!         .build();
//!
//!     let result = kmean.kmeans_lloyd(3, 300, KMeans::init_kmeanplusplus, &conf)?;
//!
//!     println!("Centroids: {:?}", result.centroids);
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Error: {}", result.distsum);
//!     Ok(())
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It takes over the sample data into its
//! ownership and is never mutated by a calculation, so multiple runs can share it. The state (and
//! finally the result) of a calculation is stored in a new [`KMeansState`].
//!
//! Point sets are usually built from CSV tables with [`dataset::KeyedTable`] and
//! [`dataset::inner_join`]. [`Fit`] is the refinement step that takes seeded centroids; [`Lloyd`]
//! implements it.

#[macro_use] mod helpers;
mod memory;
mod api;
mod variants;
mod inits;
mod distances;
mod abort_strategy;
mod error;
mod fit;

pub mod args;
pub mod dataset;
pub mod datasets;
pub mod elbow;
pub mod output;

pub use abort_strategy::AbortStrategy;
pub use api::{KMeansState, KMeansConfig, KMeansConfigBuilder, KMeans};
pub use distances::{DistanceFunction, EuclideanDistance};
pub use error::{KMeansError, Result};
pub use fit::Fit;
pub use memory::Primitive;
pub use variants::Lloyd;
