use crate::{KMeans, KMeansConfig, Primitive};
use rand::seq::IteratorRandom;
use std::ops::DerefMut;

pub(crate) fn calculate<T: Primitive>(kmean: &KMeans<'_, T>, config: &KMeansConfig<'_, T>) -> Vec<T> {
    let dims = kmean.sample_dims;
    let mut centroids = vec![T::zero(); kmean.k * dims];
    kmean.data.chunks_exact(dims)
        .choose_multiple(config.rnd.borrow_mut().deref_mut(), kmean.k)
        .iter()
        .enumerate()
        .for_each(|(ci, c)| centroids[ci * dims..][..dims].copy_from_slice(c));
    centroids
}
