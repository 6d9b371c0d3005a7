use super::{check_partition, ClusterEvaluation};
use crate::data::Dataset;
use crate::distance::Metric;
use crate::error::Result;

/// Sum over clusters of the average pairwise similarity within each cluster.
///
/// Similarity is `1 / (1 + d)` for the configured distance `d`, so it lies in
/// `(0, 1]` and equals 1 for identical instances. A cluster's average runs over
/// its unordered distinct pairs; a singleton cluster averages its
/// self-similarity (1) and an empty cluster contributes 0.
///
/// Higher is better.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumOfAveragePairwiseSimilarities {
    metric: Metric,
}

impl SumOfAveragePairwiseSimilarities {
    /// Scorer using Euclidean distance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distance underlying the similarity kernel.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    fn average_similarity(&self, cluster: &Dataset) -> f64 {
        let n = cluster.len();
        match n {
            0 => 0.0,
            1 => 1.0,
            _ => {
                let mut sum = 0.0;
                for i in 0..n {
                    for j in (i + 1)..n {
                        let d = self
                            .metric
                            .distance_unchecked(cluster[i].values(), cluster[j].values());
                        sum += 1.0 / (1.0 + d);
                    }
                }
                sum / (n * (n - 1) / 2) as f64
            }
        }
    }
}

impl ClusterEvaluation for SumOfAveragePairwiseSimilarities {
    fn score(&self, partition: &[Dataset]) -> Result<f64> {
        check_partition(partition)?;
        Ok(partition.iter().map(|c| self.average_similarity(c)).sum())
    }

    fn compare(&self, a: f64, b: f64) -> bool {
        a > b
    }
}
