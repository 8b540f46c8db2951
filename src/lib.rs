//! # kmeans-engine - API documentation
//!
//! kmeans-engine is a small rust library implementing Lloyd's algorithm
//! (k-means clustering) with pluggable centroid initialization.
//!
//! ## Design target
//! The engine is meant to sit behind thin I/O glue (an HTTP handler, a CLI, a
//! notebook binding) that hands it a dataset, a cluster count and an
//! initialization choice, and gets back final centroids plus point-to-cluster
//! assignments. Its API-surface is therefore rather plain: samples are given
//! as a raw row-major slice instead of any high-level matrix crate, and the
//! dataset is borrowed, never copied. Each engine instance owns exactly one
//! assignment vector, sized once at construction; construct one instance per
//! clustering request and concurrent requests stay fully independent.
//!
//! ## Supported operations
//! - A single Lloyd round-trip (one assignment pass, one centroid
//!   recomputation): [`KMeans::lloyd_step`]
//! - Run to convergence, i.e. until the centroids stop moving:
//!   [`KMeans::lloyd_converge`]
//!
//! ## Supported centroid initializations
//! The outcome of each k-means run depends on the initialization of its
//! clusters. Four strategies are implemented, selectable programmatically or
//! by their external names via [`InitMethod`]: uniform random sampling,
//! farthest-first, k-means++, and manually supplied centroids (validated
//! against k). All randomness flows through the injectable, seedable
//! generator in [`KMeansConfig`] — there is no hidden global state.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_engine::*;
//! use rand::prelude::*;
//!
//! fn main() -> Result<(), KMeansError> {
//!     let (sample_cnt, sample_dims, k) = (100, 2, 3);
//!
//!     // Generate some random data
//!     let mut rnd = StdRng::seed_from_u64(42);
//!     let samples = datagen::uniform_points(&mut rnd, sample_cnt, sample_dims, -3.0f64, 3.0);
//!
//!     // Calculate kmeans, using kmeans++ as initialization-method
//!     let mut kmean = KMeans::new(&samples, sample_cnt, sample_dims, k)?;
//!     let conf = KMeansConfig::build().random_generator(rnd).build();
//!     let result = kmean.lloyd_converge_with(InitMethod::KMeansPlusPlus, None, &conf)?;
//!
//!     println!("Centroids: {:?}", result.centroids);
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Error: {}", result.distsum);
//!     Ok(())
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans_engine::*;
//! use rand::prelude::*;
//!
//! fn main() -> Result<(), KMeansError> {
//!     let (sample_cnt, sample_dims, k) = (100, 2, 3);
//!
//!     let mut rnd = StdRng::seed_from_u64(42);
//!     let samples = datagen::uniform_points(&mut rnd, sample_cnt, sample_dims, -3.0f64, 3.0);
//!
//!     let init_done = |_: &[f64]| println!("Initialization completed.");
//!     let iteration_done =
//!         |nr: usize, _: &[f64], distsum: f64| println!("Iteration {} - Error: {:.2}", nr, distsum);
//!     let conf = KMeansConfig::build()
//!         .init_done(&init_done)
//!         .iteration_done(&iteration_done)
//!         .random_generator(rnd)
//!         .build();
//!
//!     let mut kmean = KMeans::new(&samples, sample_cnt, sample_dims, k)?;
//!     let result = kmean.lloyd_converge_with(InitMethod::FarthestFirst, None, &conf)?;
//!
//!     println!("Error: {}", result.distsum);
//!     Ok(())
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct, generic over the
//! underlying primitive type. An instance is created per clustering request,
//! borrowing the sample data. Its instance-methods are the supported
//! operations; both take optional starting centroids (validated the same way
//! as manual initialization) and a [`KMeansConfig`], which carries the random
//! generator, the convergence tolerance (defaulting to exact equality) and an
//! optional iteration bound (defaulting to unbounded). Results are returned
//! as [`KMeansState`].

#[macro_use] mod helpers;
mod api;
pub mod datagen;
mod error;
mod inits;
mod primitive;
mod variants;

pub use api::{
    InitDoneCallbackFn, InitMethod, IterationDoneCallbackFn, KMeans, KMeansConfig,
    KMeansConfigBuilder, KMeansState, UNASSIGNED,
};
pub use error::KMeansError;
pub use primitive::Primitive;
