//! Information criteria over a hard-assignment Gaussian mixture.
//!
//! Each non-empty cluster `j` is modeled as a diagonal Gaussian with the
//! cluster's empirical mean `μ_j` and population variance `σ²_j` per attribute,
//! weighted by its share of the data `n_j / n`:
//!
//! ```text
//! ln L = Σ_j Σ_{x ∈ C_j} [ ln(n_j / n) + Σ_a ln N(x_a; μ_ja, σ²_ja) ]
//! ```
//!
//! Variances below [`VARIANCE_FLOOR`] (singletons, constant attributes) are
//! raised to it, so the likelihood stays finite.
//!
//! The model has `p = 2·k·d + (k − 1)` free parameters for `k` non-empty
//! clusters over `d` attributes: a mean and a variance per attribute per
//! cluster, plus the mixing weights.

use std::f64::consts::PI;

use super::{check_partition, ClusterEvaluation};
use crate::data::Dataset;
use crate::error::Result;

/// Smallest variance used in the Gaussian likelihood.
pub const VARIANCE_FLOOR: f64 = 1e-6;

/// Log-likelihood of `partition` under the hard-assignment Gaussian mixture.
pub fn log_likelihood(partition: &[Dataset]) -> Result<f64> {
    let (n, _) = check_partition(partition)?;
    let n = n as f64;

    let mut total = 0.0;
    for cluster in partition {
        let Some(mean) = cluster.centroid() else {
            continue;
        };
        let nj = cluster.len() as f64;
        total += nj * (nj / n).ln();

        for (a, &mu) in mean.iter().enumerate() {
            let ss: f64 = cluster
                .iter()
                .map(|x| {
                    let d = x.values()[a] - mu;
                    d * d
                })
                .sum();
            let var = (ss / nj).max(VARIANCE_FLOOR);
            // Σ_x ln N(x; μ, σ²) = -n/2 ln(2πσ²) - SS / (2σ²)
            total += -0.5 * nj * (2.0 * PI * var).ln() - ss / (2.0 * var);
        }
    }
    Ok(total)
}

/// Number of free parameters for `k` non-empty clusters over `d` attributes.
pub fn free_parameters(k: usize, d: usize) -> f64 {
    (2 * k * d + k.saturating_sub(1)) as f64
}

fn parameters_of(partition: &[Dataset]) -> Result<(f64, f64)> {
    let (n, d) = check_partition(partition)?;
    let k = partition.iter().filter(|c| !c.is_empty()).count();
    Ok((n as f64, free_parameters(k, d)))
}

/// Akaike information criterion, `2p − 2 ln L`. Lower is better.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AicScore;

impl ClusterEvaluation for AicScore {
    fn score(&self, partition: &[Dataset]) -> Result<f64> {
        let (_, p) = parameters_of(partition)?;
        Ok(2.0 * p - 2.0 * log_likelihood(partition)?)
    }

    fn compare(&self, a: f64, b: f64) -> bool {
        a < b
    }
}

/// Bayesian information criterion, `ln(n)·p − 2 ln L`. Lower is better.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BicScore;

impl ClusterEvaluation for BicScore {
    fn score(&self, partition: &[Dataset]) -> Result<f64> {
        let (n, p) = parameters_of(partition)?;
        Ok(n.ln() * p - 2.0 * log_likelihood(partition)?)
    }

    fn compare(&self, a: f64, b: f64) -> bool {
        a < b
    }
}
