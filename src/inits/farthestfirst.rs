use crate::{helpers, KMeans, KMeansConfig, Primitive};
use rand::prelude::*;

pub(crate) fn calculate<T: Primitive>(kmean: &KMeans<'_, T>, config: &KMeansConfig<'_, T>) -> Vec<T> {
    let dims = kmean.sample_dims;
    let mut centroids = Vec::with_capacity(kmean.k * dims);

    // Randomly select first centroid
    let first_idx = config.rnd.borrow_mut().gen_range(0..kmean.sample_cnt);
    centroids.extend_from_slice(kmean.sample(first_idx));

    // Each following centroid is the sample farthest away from its nearest
    // already-chosen centroid; ties go to the earlier sample.
    while centroids.len() < kmean.k * dims {
        let mut best_idx = 0;
        let mut best_dist = T::zero();
        for idx in 0..kmean.sample_cnt {
            let dist = helpers::min_centroid_distance(kmean.sample(idx), &centroids, dims);
            if dist > best_dist {
                best_idx = idx;
                best_dist = dist;
            }
        }
        centroids.extend_from_slice(kmean.sample(best_idx));
    }
    centroids
}
