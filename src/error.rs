use thiserror::Error;

/// Errors surfaced by the clustering engine.
///
/// All of these are reported synchronously to the caller of the failing
/// operation, before the first assignment pass runs. The engine never retries
/// internally and never returns partial results: on error, the assignment
/// vector is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KMeansError {
    /// The requested cluster count is zero.
    #[error("invalid cluster count: {0}")]
    InvalidK(usize),

    /// More clusters requested than there are samples.
    #[error("insufficient data: k = {k} exceeds sample count {sample_cnt}")]
    InsufficientData { k: usize, sample_cnt: usize },

    /// Manually supplied centroid set whose length does not equal k.
    #[error("invalid centroid count: expected {expected}, got {got}")]
    InvalidCentroidCount { expected: usize, got: usize },

    /// Manual initialization was requested without supplying any centroids.
    #[error("manual initialization requested, but no centroids were supplied")]
    MissingCentroids,

    /// Buffer length does not match the engine's sample dimensionality.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Initialization method name outside the supported set.
    #[error("unknown initialization method: {0:?}")]
    UnknownInitMethod(String),
}
