use crate::Primitive;

/// Euclidean distance between two points of equal dimensionality.
pub(crate) fn euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(&av, &bv)| (av - bv) * (av - bv))
        .sum::<T>()
        .sqrt()
}

/// Distance from `sample` to the nearest of the centroids stored (row-major)
/// in `centroids`. The centroid buffer may hold fewer than k entries while an
/// initialization strategy is still picking them.
pub(crate) fn min_centroid_distance<T: Primitive>(sample: &[T], centroids: &[T], dims: usize) -> T {
    centroids
        .chunks_exact(dims)
        .map(|c| euclidean(sample, c))
        .fold(T::infinity(), |best, d| if d < best { d } else { best })
}

#[cfg(test)]
macro_rules! assert_approx_eq {
    ($left: expr, $right: expr, $tol: expr) => ({
        match ($left, $right, $tol) {
            (left_val, right_val, tol_val) => {
                let delta = (left_val - right_val).abs();
                if !(delta < tol_val) {
                    panic!(
                        "assertion failed: `(left ≈ right)` \
                        (left: `{}`, right: `{}`) \
                        with ∆={:1.1e} (allowed ∆={:e})",
                        left_val, right_val, delta, tol_val
                    )
                }
            }
        }
    });
    ($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}
