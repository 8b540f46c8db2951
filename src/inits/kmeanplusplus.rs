use crate::{helpers, KMeans, KMeansConfig, Primitive};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::ops::DerefMut;

pub(crate) fn calculate<T: Primitive>(kmean: &KMeans<'_, T>, config: &KMeansConfig<'_, T>) -> Vec<T> {
    let dims = kmean.sample_dims;
    let mut centroids = Vec::with_capacity(kmean.k * dims);

    // Randomly select first centroid
    let first_idx = config.rnd.borrow_mut().gen_range(0..kmean.sample_cnt);
    centroids.extend_from_slice(kmean.sample(first_idx));

    for _ in 1..kmean.k {
        // Weight each sample by its distance to the nearest chosen centroid.
        // NOTE: the raw distance is used, not the squared distance of the
        // textbook k-means++ definition.
        let weights: Vec<T> = (0..kmean.sample_cnt)
            .map(|idx| helpers::min_centroid_distance(kmean.sample(idx), &centroids, dims))
            .collect();

        let sampled_idx = match WeightedIndex::new(&weights) {
            Ok(weighted) => weighted.sample(config.rnd.borrow_mut().deref_mut()),
            // Every remaining sample coincides with a chosen centroid, so any
            // pick is as good as another.
            Err(_) => config.rnd.borrow_mut().gen_range(0..kmean.sample_cnt),
        };
        centroids.extend_from_slice(kmean.sample(sampled_idx));
    }
    centroids
}

#[cfg(test)]
mod tests {
    use crate::*;
    use rand::prelude::*;

    #[test]
    fn picks_k_distinct_samples() {
        // Chosen samples carry weight zero, so they can never be drawn again
        // as long as positively-weighted samples remain.
        let data: Vec<f64> = (0..24).map(|v| v as f64).collect();
        let kmean = KMeans::new(&data, 12, 2, 5).unwrap();

        for seed in 0..16 {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
            let centroids = kmean.init_kmeanplusplus(&conf);
            assert_eq!(centroids.len(), 5 * 2);

            let mut chosen: Vec<&[f64]> = centroids.chunks_exact(2).collect();
            chosen.sort_by(|a, b| a.partial_cmp(b).unwrap());
            chosen.dedup();
            assert_eq!(chosen.len(), 5);
            for c in chosen {
                assert!(data.chunks_exact(2).any(|s| s == c));
            }
        }
    }

    #[test]
    fn identical_samples_still_yield_k_centroids() {
        let data = vec![2.0f64; 8];
        let kmean = KMeans::new(&data, 4, 2, 3).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(5)).build();

        let centroids = kmean.init_kmeanplusplus(&conf);
        assert_eq!(centroids, vec![2.0; 6]);
    }
}
