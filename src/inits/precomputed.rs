use crate::{KMeans, KMeansError, Primitive};

pub(crate) fn calculate<T: Primitive>(
    kmean: &KMeans<'_, T>, centroids: Option<&[T]>,
) -> Result<Vec<T>, KMeansError> {
    let centroids = match centroids {
        Some(c) if !c.is_empty() => c,
        _ => return Err(KMeansError::MissingCentroids),
    };
    if centroids.len() % kmean.sample_dims != 0 {
        return Err(KMeansError::InvalidDimensions(format!(
            "centroid buffer of length {} is not a multiple of {} dimensions",
            centroids.len(),
            kmean.sample_dims
        )));
    }
    let got = centroids.len() / kmean.sample_dims;
    if got != kmean.k {
        return Err(KMeansError::InvalidCentroidCount { expected: kmean.k, got });
    }
    Ok(centroids.to_vec())
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn passes_valid_centroids_through_verbatim() {
        let data = vec![0.0f64, 1.0, 10.0, 11.0, 20.0, 21.0];
        let kmean = KMeans::new(&data, 3, 2, 2).unwrap();

        let centroids = kmean.init_precomputed(Some(&[0.0, 21.0, 5.0, -3.0])).unwrap();
        assert_eq!(centroids, vec![0.0, 21.0, 5.0, -3.0]);
    }

    #[test]
    fn rejects_wrong_centroid_count() {
        let data = vec![0.0f64, 1.0, 10.0, 11.0, 20.0, 21.0];
        let kmean = KMeans::new(&data, 3, 2, 3).unwrap();

        assert_eq!(
            kmean.init_precomputed(Some(&[0.0, 0.0, 1.0, 1.0])).err(),
            Some(KMeansError::InvalidCentroidCount { expected: 3, got: 2 })
        );
    }

    #[test]
    fn rejects_missing_centroids() {
        let data = vec![0.0f64, 1.0, 10.0, 11.0, 20.0, 21.0];
        let kmean = KMeans::new(&data, 3, 2, 2).unwrap();

        assert_eq!(kmean.init_precomputed(None).err(), Some(KMeansError::MissingCentroids));
        assert_eq!(kmean.init_precomputed(Some(&[])).err(), Some(KMeansError::MissingCentroids));
    }

    #[test]
    fn rejects_truncated_centroid_buffer() {
        let data = vec![0.0f64, 1.0, 10.0, 11.0, 20.0, 21.0];
        let kmean = KMeans::new(&data, 3, 2, 2).unwrap();

        assert!(matches!(
            kmean.init_precomputed(Some(&[0.0, 0.0, 1.0])).err(),
            Some(KMeansError::InvalidDimensions(_))
        ));
    }
}
