use super::{check_partition, ClusterEvaluation};
use crate::data::Dataset;
use crate::distance::squared_euclidean;
use crate::error::Result;

/// Within-cluster sum of squared errors.
///
/// ```text
/// SSE = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
/// ```
///
/// Lower is better. Empty clusters contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumOfSquaredErrors;

impl ClusterEvaluation for SumOfSquaredErrors {
    fn score(&self, partition: &[Dataset]) -> Result<f64> {
        check_partition(partition)?;
        let mut total = 0.0;
        for cluster in partition {
            let Some(centroid) = cluster.centroid() else {
                continue;
            };
            total += cluster
                .iter()
                .map(|x| squared_euclidean(x.values(), &centroid))
                .sum::<f64>();
        }
        Ok(total)
    }

    fn compare(&self, a: f64, b: f64) -> bool {
        a < b
    }
}
