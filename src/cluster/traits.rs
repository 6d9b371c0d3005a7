use crate::data::Dataset;
use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per instance).
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input instance.
    fn fit_predict(&self, data: &Dataset) -> Result<Vec<usize>>;

    /// The configured number of clusters (if applicable).
    ///
    /// For algorithms that discover the number of clusters dynamically (e.g. Cobweb),
    /// this returns 0.
    fn n_clusters(&self) -> usize;

    /// Cluster `data` into a partition: one fresh [`Dataset`] per cluster.
    ///
    /// The partition has `max(n_clusters(), max_label + 1)` entries, so fixed-k
    /// algorithms always return exactly `k` datasets (some possibly empty).
    fn cluster(&self, data: &Dataset) -> Result<Vec<Dataset>> {
        let labels = self.fit_predict(data)?;
        let k = labels
            .iter()
            .map(|&l| l + 1)
            .max()
            .unwrap_or(0)
            .max(self.n_clusters());
        data.partition(&labels, k)
    }
}
