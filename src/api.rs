use crate::{error::KMeansError, helpers, inits, variants::Lloyd, Primitive};
use rand::prelude::*;
use std::cell::RefCell;
use std::str::FromStr;

/// Sentinel marking a dataset point that has not been assigned to any cluster
/// yet. Every assignment pass replaces it with a cluster index in `[0, k)`.
pub const UNASSIGNED: usize = usize::MAX;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&[T]);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(usize, &[T], T);

/// Configuration options for a k-means calculation: the random number
/// generator to use, the convergence criterion, and a couple of callbacks that
/// can be set to get status information out of a running calculation.
///
/// For details on all options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called when the initialization phase finished.
    /// ## Arguments
    /// - **centroids**: The initial centroid set [row-major]
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration.
    /// ## Arguments
    /// - **iteration_id**: Number of the finished iteration (starting at 1)
    /// - **centroids**: The recomputed centroid set [row-major]
    /// - **distsum**: Sum of all point-to-assigned-centroid distances
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Maximum centroid movement (per pair, Euclidean) still counted as
    /// "unchanged" between two rounds. Zero means exact equality.
    pub(crate) tolerance: T,
    /// Optional hard bound on the number of Assign/Aggregate rounds.
    pub(crate) max_iter: Option<usize>,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            tolerance: T::zero(),
            max_iter: None,
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { Ok(()) }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after centroid initialization,
    /// before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration of a
    /// running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means
    /// calculation. Use a seeded generator for deterministically repeatable
    /// results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the convergence tolerance: two consecutive centroid sets count as
    /// equal when every index-matched pair lies within this Euclidean
    /// distance.
    ///
    /// ## Default
    /// `0` — exact equality, at the documented risk of non-termination under
    /// floating-point oscillation (pair with
    /// [`KMeansConfigBuilder::max_iter`] if that is a concern).
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.config.tolerance = tolerance; self
    }
    /// Bound the number of Assign/Aggregate rounds a convergence run may take.
    ///
    /// ## Default
    /// `None` — loop until the centroids stop moving, however long that takes.
    pub fn max_iter(mut self, max_iter: Option<usize>) -> Self {
        self.config.max_iter = max_iter; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}

/// The available centroid-initialization strategies, by their external names.
///
/// Parses from the method-name strings used by callers: `"random"`,
/// `"farthest_first"`, `"kmeans++"` and `"manual"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitMethod {
    /// k distinct dataset points, chosen uniformly without replacement
    Random,
    /// deterministic max-min-distance picking after a random first point
    FarthestFirst,
    /// weighted random picking, biased towards far-away points
    KMeansPlusPlus,
    /// caller-supplied centroids, validated against k
    Manual,
}
impl FromStr for InitMethod {
    type Err = KMeansError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(InitMethod::Random),
            "farthest_first" => Ok(InitMethod::FarthestFirst),
            "kmeans++" => Ok(InitMethod::KMeansPlusPlus),
            "manual" => Ok(InitMethod::Manual),
            other => Err(KMeansError::UnknownInitMethod(other.to_string())),
        }
    }
}

/// Result of a k-means operation, as returned by the API.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **distsum**: Sum of each sample's Euclidean distance to its centroid
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,...]
/// - **centroid_frequency**: Amount of samples assigned to each centroid
/// - **assignments**: Vector mapping each sample to its nearest cluster
/// - **iterations**: Amount of Assign/Aggregate rounds that were performed
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub iterations: usize,
}

/// Entrypoint of this crate's API-surface: the clustering engine.
///
/// An engine instance borrows one dataset (it is referenced, never copied),
/// holds the requested cluster count k and owns the point-to-cluster
/// assignment vector, which is sized once at construction and mutated in
/// place by the assignment passes. Construct one instance per clustering
/// request; instances are fully independent of each other.
///
/// ## Supported operations
/// - Single Lloyd step [`KMeans::lloyd_step`]
/// - Run to convergence [`KMeans::lloyd_converge`]
///
/// ## Supported initialization methods
/// - Random-Sample [`KMeans::init_random_sample`]
/// - Farthest-First [`KMeans::init_farthest_first`]
/// - K-Means++ [`KMeans::init_kmeanplusplus`]
/// - Precomputed / manual [`KMeans::init_precomputed`]
pub struct KMeans<'a, T: Primitive> {
    pub(crate) data: &'a [T],
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) k: usize,
    pub(crate) assignments: Vec<usize>,
    pub(crate) centroid_distances: Vec<T>,
}
impl<'a, T: Primitive> KMeans<'a, T> {
    /// Create a new engine instance over a borrowed dataset.
    ///
    /// ## Arguments
    /// - **data**: Samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples contained in **data**
    /// - **sample_dims**: Amount of dimensions each sample has
    /// - **k**: Amount of clusters to calculate
    pub fn new(data: &'a [T], sample_cnt: usize, sample_dims: usize, k: usize) -> Result<Self, KMeansError> {
        if k == 0 {
            return Err(KMeansError::InvalidK(k));
        }
        if k > sample_cnt {
            return Err(KMeansError::InsufficientData { k, sample_cnt });
        }
        if sample_dims == 0 || data.len() != sample_cnt * sample_dims {
            return Err(KMeansError::InvalidDimensions(format!(
                "expected {} samples of {} dimensions, got a buffer of length {}",
                sample_cnt, sample_dims, data.len()
            )));
        }
        Ok(Self {
            data,
            sample_cnt,
            sample_dims,
            k,
            assignments: vec![UNASSIGNED; sample_cnt],
            centroid_distances: vec![T::infinity(); sample_cnt],
        })
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn sample_dims(&self) -> usize { self.sample_dims }
    pub fn k(&self) -> usize { self.k }
    /// Current point-to-cluster assignments; entries are [`UNASSIGNED`] until
    /// the first assignment pass ran.
    pub fn assignments(&self) -> &[usize] { &self.assignments }

    pub(crate) fn sample(&self, idx: usize) -> &[T] {
        &self.data[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    pub(crate) fn reset_assignments(&mut self) {
        self.assignments.iter_mut().for_each(|a| *a = UNASSIGNED);
    }

    /// Assignment pass: assign every sample to its nearest centroid.
    ///
    /// Centroids are scanned in increasing index order and only a strictly
    /// smaller distance replaces the best seen, so ties resolve to the lowest
    /// centroid index. Every assignment entry is overwritten, whether or not
    /// it held the sentinel before; `centroid_distances` receives each
    /// sample's distance to its new centroid.
    pub(crate) fn update_cluster_assignments(&mut self, centroids: &[T]) {
        let dims = self.sample_dims;
        self.data.chunks_exact(dims)
            .zip(self.assignments.iter_mut())
            .zip(self.centroid_distances.iter_mut())
            .for_each(|((sample, assignment), centroid_dist)| {
                let mut best_idx = 0;
                let mut best_dist = helpers::euclidean(sample, &centroids[..dims]);
                for (ci, centroid) in centroids.chunks_exact(dims).enumerate().skip(1) {
                    let dist = helpers::euclidean(sample, centroid);
                    if dist < best_dist {
                        best_idx = ci;
                        best_dist = dist;
                    }
                }
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    /// Recompute each sample's distance against the given centroid set under
    /// the current assignments, returning the distance sum.
    pub(crate) fn update_centroid_distances(&mut self, centroids: &[T]) -> T {
        let dims = self.sample_dims;
        self.data.chunks_exact(dims)
            .zip(self.assignments.iter().cloned())
            .zip(self.centroid_distances.iter_mut())
            .for_each(|((sample, assignment), centroid_dist)| {
                *centroid_dist = helpers::euclidean(sample, &centroids[assignment * dims..][..dims]);
            });
        self.centroid_distances.iter().cloned().sum()
    }

    pub(crate) fn distsum(&self) -> T {
        self.centroid_distances.iter().cloned().sum()
    }

    /// Random-Sample initialization method (a.k.a. Forgy).
    ///
    /// Selects k distinct samples, uniformly at random without replacement, as
    /// the initial centroids.
    pub fn init_random_sample(&self, config: &KMeansConfig<'_, T>) -> Vec<T> {
        inits::randomsample::calculate(self, config)
    }

    /// Farthest-First initialization method.
    ///
    /// Selects one sample uniformly at random as the first centroid; each
    /// following centroid is the sample with the largest distance to its
    /// nearest already-chosen centroid. Deterministic given the first pick.
    pub fn init_farthest_first(&self, config: &KMeansConfig<'_, T>) -> Vec<T> {
        inits::farthestfirst::calculate(self, config)
    }

    /// K-Means++ initialization method.
    ///
    /// Same iterative structure as Farthest-First, but each following centroid
    /// is drawn randomly, with every sample weighted by its distance to the
    /// nearest already-chosen centroid. Far-away samples are therefore likely,
    /// but not certain, to become centroids.
    pub fn init_kmeanplusplus(&self, config: &KMeansConfig<'_, T>) -> Vec<T> {
        inits::kmeanplusplus::calculate(self, config)
    }

    /// Precomputed (manual) initialization: returns the supplied centroids
    /// verbatim after validating them against k and the sample
    /// dimensionality.
    pub fn init_precomputed(&self, centroids: Option<&[T]>) -> Result<Vec<T>, KMeansError> {
        inits::precomputed::calculate(self, centroids)
    }

    /// Produce an initial centroid set with the given strategy.
    /// `manual` is only consulted (and required) for [`InitMethod::Manual`].
    pub fn initialize(
        &self, method: InitMethod, manual: Option<&[T]>, config: &KMeansConfig<'_, T>,
    ) -> Result<Vec<T>, KMeansError> {
        match method {
            InitMethod::Random => Ok(self.init_random_sample(config)),
            InitMethod::FarthestFirst => Ok(self.init_farthest_first(config)),
            InitMethod::KMeansPlusPlus => Ok(self.init_kmeanplusplus(config)),
            InitMethod::Manual => self.init_precomputed(manual),
        }
    }

    /// Perform exactly one Lloyd round-trip: one assignment pass followed by
    /// one centroid recomputation. Does not loop, even when the starting
    /// centroids already are a fixed point.
    ///
    /// ## Arguments
    /// - **start**: Starting centroids [row-major]; when `None`, a uniform
    ///   random initialization is used
    /// - **config**: [`KMeansConfig`] instance for this calculation
    ///
    /// ## Returns
    /// [`KMeansState`] holding the recomputed centroids and the assignments
    /// produced by the single assignment pass.
    pub fn lloyd_step(
        &mut self, start: Option<&[T]>, config: &KMeansConfig<'_, T>,
    ) -> Result<KMeansState<T>, KMeansError> {
        Lloyd::step(self, start, config)
    }

    /// Run Lloyd's algorithm to convergence: alternate assignment passes and
    /// centroid recomputations, resetting all assignments before each pass,
    /// until two consecutive centroid sets compare equal (see
    /// [`KMeansConfigBuilder::tolerance`]).
    ///
    /// Without a configured [`KMeansConfigBuilder::max_iter`] bound the loop
    /// runs for as many rounds as it takes.
    ///
    /// ## Arguments
    /// - **start**: Starting centroids [row-major]; when `None`, a uniform
    ///   random initialization is used
    /// - **config**: [`KMeansConfig`] instance for this calculation
    ///
    /// ## Returns
    /// [`KMeansState`] holding the final centroids and assignments.
    pub fn lloyd_converge(
        &mut self, start: Option<&[T]>, config: &KMeansConfig<'_, T>,
    ) -> Result<KMeansState<T>, KMeansError> {
        Lloyd::converge(self, start, config)
    }

    /// [`KMeans::lloyd_step`] with the starting centroids produced by the
    /// given initialization strategy.
    pub fn lloyd_step_with(
        &mut self, method: InitMethod, manual: Option<&[T]>, config: &KMeansConfig<'_, T>,
    ) -> Result<KMeansState<T>, KMeansError> {
        let centroids = self.initialize(method, manual, config)?;
        Lloyd::step(self, Some(&centroids), config)
    }

    /// [`KMeans::lloyd_converge`] with the starting centroids produced by the
    /// given initialization strategy.
    pub fn lloyd_converge_with(
        &mut self, method: InitMethod, manual: Option<&[T]>, config: &KMeansConfig<'_, T>,
    ) -> Result<KMeansState<T>, KMeansError> {
        let centroids = self.initialize(method, manual, config)?;
        Lloyd::converge(self, Some(&centroids), config)
    }
}
