//! Random dataset generation for demos and tests.
//!
//! Deliberately independent of the clustering engine: it only produces a flat
//! row-major sample buffer a caller may then hand to [`crate::KMeans::new`].

use crate::Primitive;
use rand::Rng;

/// Generate `n_points` uniformly random points of `dims` dimensions, each
/// coordinate drawn from `[low, high)`.
///
/// ## Returns
/// Samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
pub fn uniform_points<T: Primitive, R: Rng + ?Sized>(
    rnd: &mut R, n_points: usize, dims: usize, low: T, high: T,
) -> Vec<T> {
    (0..n_points * dims).map(|_| rnd.gen_range(low..high)).collect()
}
