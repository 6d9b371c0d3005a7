//! Partition quality scores.
//!
//! Every scorer implements [`ClusterEvaluation`]: it takes a finished partition
//! (one [`Dataset`] per cluster) and returns a single number. Scorers are pure
//! functions of the partition, so the same partition can be fed to all of them
//! to compare clustering strategies side by side.
//!
//! | Scorer | Better | Measures |
//! |---|---|---|
//! | [`SumOfSquaredErrors`] | lower | squared distance to cluster centroids |
//! | [`SumOfAveragePairwiseSimilarities`] | higher | mean `1 / (1 + d)` within clusters |
//! | [`AicScore`] | lower | `2p − 2 ln L` |
//! | [`BicScore`] | lower | `ln(n)·p − 2 ln L` |
//!
//! AIC and BIC share one likelihood model, see [`log_likelihood`].
//!
//! ```rust
//! use clusterscore::{ClusterEvaluation, Dataset, SumOfSquaredErrors};
//!
//! let a = Dataset::from_rows(vec![vec![0.0], vec![2.0]]).unwrap();
//! let b = Dataset::from_rows(vec![vec![10.0]]).unwrap();
//! let sse = SumOfSquaredErrors.score(&[a, b]).unwrap();
//! assert_eq!(sse, 2.0);
//! ```

mod likelihood;
mod pairwise;
mod sse;

pub use likelihood::{free_parameters, log_likelihood, AicScore, BicScore, VARIANCE_FLOOR};
pub use pairwise::SumOfAveragePairwiseSimilarities;
pub use sse::SumOfSquaredErrors;

use crate::data::Dataset;
use crate::error::{Error, Result};

/// Common interface for partition scorers.
pub trait ClusterEvaluation {
    /// Score a partition.
    fn score(&self, partition: &[Dataset]) -> Result<f64>;

    /// `true` when score `a` is better than score `b` for this measure.
    fn compare(&self, a: f64, b: f64) -> bool;
}

/// Validate a partition and return `(total instances, attribute count)`.
///
/// Empty clusters are allowed and ignored; a partition with no instances at
/// all is [`Error::EmptyInput`].
pub(crate) fn check_partition(partition: &[Dataset]) -> Result<(usize, usize)> {
    let mut dim: Option<usize> = None;
    let mut n = 0;
    for cluster in partition.iter().filter(|c| !c.is_empty()) {
        let d = cluster.num_attributes();
        match dim {
            None => dim = Some(d),
            Some(expected) if expected != d => {
                return Err(Error::DimensionMismatch { expected, found: d });
            }
            Some(_) => {}
        }
        n += cluster.len();
    }
    match dim {
        Some(d) => Ok((n, d)),
        None => Err(Error::EmptyInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_partitions_are_rejected() {
        assert!(matches!(check_partition(&[]), Err(Error::EmptyInput)));
        assert!(matches!(
            check_partition(&[Dataset::empty(2), Dataset::empty(2)]),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn mixed_dimensions_are_rejected() {
        let a = Dataset::from_rows(vec![vec![0.0, 1.0]]).unwrap();
        let b = Dataset::from_rows(vec![vec![0.0]]).unwrap();
        assert!(matches!(
            check_partition(&[a, b]),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn empty_clusters_are_ignored() {
        let a = Dataset::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(check_partition(&[Dataset::empty(5), a]).unwrap(), (2, 2));
    }
}
