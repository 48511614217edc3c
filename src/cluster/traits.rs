use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model and return one cluster label per input point.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    ///
    /// Labels actually present after fitting may number fewer than this
    /// when clusters end up empty.
    fn n_clusters(&self) -> usize;
}
