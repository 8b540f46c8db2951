use crate::{helpers, KMeans, KMeansConfig, KMeansError, KMeansState, Primitive};
use log::{debug, warn};

pub(crate) struct Lloyd<T: Primitive> {
    _p: std::marker::PhantomData<T>,
}
impl<T: Primitive> Lloyd<T> {
    /// Aggregation pass: recompute every centroid as the component-wise mean
    /// of its assigned samples. A cluster without any samples gets the
    /// all-zero vector as its new centroid (it is neither skipped nor
    /// re-seeded).
    ///
    /// Expects a completed assignment pass; panics on sentinel entries.
    fn update_centroids(kmean: &KMeans<'_, T>) -> (Vec<T>, Vec<usize>) {
        let dims = kmean.sample_dims;
        let mut new_centroids = vec![T::zero(); kmean.k * dims];
        let mut centroid_frequency = vec![0usize; kmean.k];

        kmean.data.chunks_exact(dims)
            .zip(kmean.assignments.iter().cloned())
            .for_each(|(sample, centroid_id)| {
                centroid_frequency[centroid_id] += 1;
                new_centroids[centroid_id * dims..][..dims]
                    .iter_mut()
                    .zip(sample.iter().cloned())
                    .for_each(|(cv, sv)| *cv += sv);
            });
        new_centroids.chunks_exact_mut(dims)
            .zip(centroid_frequency.iter().cloned())
            .filter(|(_, cfreq)| *cfreq > 0)
            .for_each(|(centroid, cfreq)| {
                let cfreq = T::from(cfreq).unwrap();
                centroid.iter_mut().for_each(|cv| *cv = *cv / cfreq);
            });
        (new_centroids, centroid_frequency)
    }

    /// Two centroid sets count as equal when every index-matched pair lies
    /// within `tolerance` Euclidean distance. The default tolerance of zero
    /// demands exact equality.
    fn centroids_differ(old: &[T], new: &[T], dims: usize, tolerance: T) -> bool {
        old.chunks_exact(dims)
            .zip(new.chunks_exact(dims))
            .any(|(o, n)| helpers::euclidean(o, n) > tolerance)
    }

    /// Resolve the starting centroid set: validate a provided one, or fall
    /// back to uniform random initialization.
    fn starting_centroids(
        kmean: &KMeans<'_, T>, start: Option<&[T]>, config: &KMeansConfig<'_, T>,
    ) -> Result<Vec<T>, KMeansError> {
        match start {
            Some(centroids) => crate::inits::precomputed::calculate(kmean, Some(centroids)),
            None => Ok(kmean.init_random_sample(config)),
        }
    }

    fn into_state(kmean: &mut KMeans<'_, T>, centroids: Vec<T>, centroid_frequency: Vec<usize>, iterations: usize) -> KMeansState<T> {
        let distsum = kmean.update_centroid_distances(&centroids);
        KMeansState {
            k: kmean.k,
            distsum,
            centroids,
            centroid_frequency,
            assignments: kmean.assignments.clone(),
            iterations,
        }
    }

    pub fn step(
        kmean: &mut KMeans<'_, T>, start: Option<&[T]>, config: &KMeansConfig<'_, T>,
    ) -> Result<KMeansState<T>, KMeansError> {
        let centroids = Self::starting_centroids(kmean, start, config)?;
        (config.init_done)(&centroids);

        kmean.reset_assignments();
        kmean.update_cluster_assignments(&centroids);
        let (new_centroids, centroid_frequency) = Self::update_centroids(kmean);
        (config.iteration_done)(1, &new_centroids, kmean.distsum());

        Ok(Self::into_state(kmean, new_centroids, centroid_frequency, 1))
    }

    pub fn converge(
        kmean: &mut KMeans<'_, T>, start: Option<&[T]>, config: &KMeansConfig<'_, T>,
    ) -> Result<KMeansState<T>, KMeansError> {
        let mut centroids = Self::starting_centroids(kmean, start, config)?;
        (config.init_done)(&centroids);

        kmean.reset_assignments();
        kmean.update_cluster_assignments(&centroids);
        let (mut new_centroids, mut centroid_frequency) = Self::update_centroids(kmean);
        let mut iterations = 1;
        (config.iteration_done)(iterations, &new_centroids, kmean.distsum());

        while Self::centroids_differ(&centroids, &new_centroids, kmean.sample_dims, config.tolerance) {
            if let Some(cap) = config.max_iter {
                if iterations >= cap {
                    warn!("centroids still moving after {} iterations, aborting at the configured bound", iterations);
                    break;
                }
            }
            centroids = new_centroids;

            kmean.reset_assignments();
            kmean.update_cluster_assignments(&centroids);
            let (nc, cf) = Self::update_centroids(kmean);
            new_centroids = nc;
            centroid_frequency = cf;
            iterations += 1;
            debug!("iteration {} - distance sum {}", iterations, kmean.distsum());
            (config.iteration_done)(iterations, &new_centroids, kmean.distsum());
        }

        Ok(Self::into_state(kmean, new_centroids, centroid_frequency, iterations))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use rand::prelude::*;

    /// Three tight groups around (0,0), (10,10) and (-10,10), interleaved so
    /// cluster membership does not follow sample order.
    fn separated_dataset() -> (Vec<f64>, Vec<[f64; 2]>) {
        let anchors = [[0.0, 0.0], [10.0, 10.0], [-10.0, 10.0]];
        let offsets = [
            [0.0, 0.0], [0.2, 0.0], [-0.2, 0.0], [0.0, 0.2], [0.0, -0.2],
            [0.2, 0.2], [-0.2, -0.2], [0.1, -0.1],
        ];
        let mut data = Vec::new();
        for off in &offsets {
            for anchor in &anchors {
                data.push(anchor[0] + off[0]);
                data.push(anchor[1] + off[1]);
            }
        }
        (data, anchors.to_vec())
    }

    #[test]
    fn single_step_performs_one_round_trip() {
        let data = vec![0.0f64, 2.0, 10.0];
        let mut kmean = KMeans::new(&data, 3, 1, 2).unwrap();
        let conf = KMeansConfig::default();

        let state = kmean.lloyd_step(Some(&[0.0, 10.0]), &conf).unwrap();
        assert_eq!(state.assignments, vec![0, 0, 1]);
        assert_eq!(state.centroids, vec![1.0, 10.0]);
        assert_eq!(state.centroid_frequency, vec![2, 1]);
        assert_eq!(state.iterations, 1);
        // distances against the *returned* centroids: |0-1| + |2-1| + |10-10|
        assert_eq!(state.distsum, 2.0);
    }

    #[test]
    fn single_step_at_fixed_point_returns_input_centroids() {
        let data = vec![0.0f64, 0.0, 0.0, 2.0, 10.0, 0.0, 10.0, 2.0];
        let mut kmean = KMeans::new(&data, 4, 2, 2).unwrap();
        let conf = KMeansConfig::default();

        let state = kmean.lloyd_step(Some(&[0.0, 1.0, 10.0, 1.0]), &conf).unwrap();
        assert_eq!(state.centroids, vec![0.0, 1.0, 10.0, 1.0]);
        assert_eq!(state.assignments, vec![0, 0, 1, 1]);
    }

    #[test]
    fn convergence_stops_at_exact_fixed_point() {
        let data = vec![0.0f64, 2.0, 10.0];
        let mut kmean = KMeans::new(&data, 3, 1, 2).unwrap();
        let conf = KMeansConfig::default();

        let state = kmean.lloyd_converge(Some(&[0.0, 10.0]), &conf).unwrap();
        assert_eq!(state.centroids, vec![1.0, 10.0]);
        assert_eq!(state.assignments, vec![0, 0, 1]);
        // round 1 moves centroid 0 to the mean, round 2 confirms the fixed point
        assert_eq!(state.iterations, 2);
    }

    #[test]
    fn convergence_starting_at_fixed_point_takes_one_iteration() {
        let data = vec![0.0f64, 0.0, 0.0, 2.0, 10.0, 0.0, 10.0, 2.0];
        let mut kmean = KMeans::new(&data, 4, 2, 2).unwrap();
        let conf = KMeansConfig::default();

        let state = kmean.lloyd_converge(Some(&[0.0, 1.0, 10.0, 1.0]), &conf).unwrap();
        assert_eq!(state.centroids, vec![0.0, 1.0, 10.0, 1.0]);
        assert_eq!(state.iterations, 1);
    }

    #[test]
    fn convergence_recovers_separated_clusters() {
        let (data, anchors) = separated_dataset();
        let sample_cnt = data.len() / 2;
        let mut kmean = KMeans::new(&data, sample_cnt, 2, 3).unwrap();
        // farthest-first spreads the start over the groups for any seed
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(7)).build();

        let state = kmean.lloyd_converge_with(InitMethod::FarthestFirst, None, &conf).unwrap();
        assert_eq!(state.centroid_frequency, vec![8, 8, 8]);

        // every recovered centroid sits close to exactly one generating anchor
        let mut matched = vec![false; anchors.len()];
        for c in state.centroids.chunks_exact(2) {
            let (ai, anchor) = anchors.iter().enumerate()
                .min_by(|(_, a), (_, b)| {
                    crate::helpers::euclidean(c, &a[..]).partial_cmp(&crate::helpers::euclidean(c, &b[..])).unwrap()
                })
                .map(|(i, a)| (i, a)).unwrap();
            assert!(crate::helpers::euclidean(c, &anchor[..]) < 0.5);
            assert!(!matched[ai]);
            matched[ai] = true;
        }

        // partition matches the generating groups: all samples around one
        // anchor share one cluster id
        for (i, sample) in data.chunks_exact(2).enumerate() {
            for (j, other) in data.chunks_exact(2).enumerate() {
                let same_group = (i % 3) == (j % 3);
                let same_cluster = state.assignments[i] == state.assignments[j];
                assert_eq!(same_group, same_cluster, "samples {:?} and {:?}", sample, other);
            }
        }
    }

    #[test]
    fn empty_cluster_centroid_becomes_zero_vector() {
        // all samples identical: the far-away second centroid ends up empty
        let data = vec![1.0f64, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let mut kmean = KMeans::new(&data, 4, 2, 2).unwrap();
        let conf = KMeansConfig::default();

        let state = kmean.lloyd_step(Some(&[1.0, 1.0, 5.0, 5.0]), &conf).unwrap();
        assert_eq!(state.assignments, vec![0, 0, 0, 0]);
        assert_eq!(state.centroid_frequency, vec![4, 0]);
        assert_eq!(state.centroids, vec![1.0, 1.0, 0.0, 0.0]);

        // the degenerate state also is a fixed point, so convergence terminates
        let state = kmean.lloyd_converge(Some(&[1.0, 1.0, 5.0, 5.0]), &conf).unwrap();
        assert_eq!(state.centroids, vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(state.iterations, 2);
    }

    #[test]
    fn aggregate_idempotence_at_cluster_means() {
        let data = vec![0.0f64, 0.0, 0.0, 2.0, 10.0, 0.0, 10.0, 2.0];
        let mut kmean = KMeans::new(&data, 4, 2, 2).unwrap();
        let conf = KMeansConfig::default();

        // centroids already equal the cluster means: one more round-trip must
        // reproduce them exactly
        let first = kmean.lloyd_step(Some(&[0.0, 1.0, 10.0, 1.0]), &conf).unwrap();
        let second = kmean.lloyd_step(Some(&first.centroids), &conf).unwrap();
        assert_eq!(second.centroids, first.centroids);
        assert_eq!(second.assignments, first.assignments);
    }

    #[test]
    fn max_iter_bound_cuts_the_run_short() {
        let data = vec![0.0f64, 2.0, 10.0];
        let mut kmean = KMeans::new(&data, 3, 1, 2).unwrap();
        let conf = KMeansConfig::build().max_iter(Some(1)).build();

        let state = kmean.lloyd_converge(Some(&[2.0, 10.0]), &conf).unwrap();
        assert_eq!(state.iterations, 1);
        assert_eq!(state.centroids, vec![1.0, 10.0]);
    }

    #[test]
    fn tolerance_accepts_small_centroid_movement() {
        let data = vec![0.0f64, 2.0, 10.0];
        let mut kmean = KMeans::new(&data, 3, 1, 2).unwrap();
        let conf = KMeansConfig::build().tolerance(2.0).build();

        // centroid 0 moves from 2.0 to 1.0, within tolerance -> one iteration
        let state = kmean.lloyd_converge(Some(&[2.0, 10.0]), &conf).unwrap();
        assert_eq!(state.iterations, 1);
    }

    #[test]
    fn invalid_starting_centroids_are_rejected() {
        let data = vec![0.0f64, 2.0, 10.0];
        let mut kmean = KMeans::new(&data, 3, 1, 2).unwrap();
        let conf = KMeansConfig::default();

        assert_eq!(
            kmean.lloyd_converge(Some(&[0.0, 5.0, 10.0]), &conf).err(),
            Some(KMeansError::InvalidCentroidCount { expected: 2, got: 3 })
        );
        assert_eq!(
            kmean.lloyd_step_with(InitMethod::Manual, None, &conf).err(),
            Some(KMeansError::MissingCentroids)
        );
        // failed runs leave the assignment vector unassigned
        assert!(kmean.assignments().iter().all(|&a| a == UNASSIGNED));
    }

    #[test]
    fn engine_instances_can_be_reused() {
        let (data, _) = separated_dataset();
        let sample_cnt = data.len() / 2;
        let mut kmean = KMeans::new(&data, sample_cnt, 2, 3).unwrap();

        let conf_a = KMeansConfig::build().random_generator(StdRng::seed_from_u64(21)).build();
        let first = kmean.lloyd_converge_with(InitMethod::FarthestFirst, None, &conf_a).unwrap();
        let conf_b = KMeansConfig::build().random_generator(StdRng::seed_from_u64(21)).build();
        let second = kmean.lloyd_converge_with(InitMethod::FarthestFirst, None, &conf_b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn status_callbacks_fire_per_iteration() {
        use std::cell::Cell;

        let data = vec![0.0f64, 2.0, 10.0];
        let mut kmean = KMeans::new(&data, 3, 1, 2).unwrap();

        let init_seen = Cell::new(false);
        let iterations_seen = Cell::new(0usize);
        let init_done = |_: &[f64]| init_seen.set(true);
        let iteration_done = |nr: usize, _: &[f64], _: f64| iterations_seen.set(nr);
        let conf = KMeansConfig::build()
            .init_done(&init_done)
            .iteration_done(&iteration_done)
            .build();

        let state = kmean.lloyd_converge(Some(&[0.0, 10.0]), &conf).unwrap();
        assert!(init_seen.get());
        assert_eq!(iterations_seen.get(), state.iterations);
    }
}
