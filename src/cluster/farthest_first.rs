//! Farthest-first traversal (Hochbaum & Shmoys, 1985).
//!
//! Picks a first center, then repeatedly promotes the instance farthest from
//! its nearest center until `k` centers exist, and finally assigns every
//! instance to its nearest center. One pass, no convergence loop. The
//! resulting centers are a 2-approximation of the optimal k-center radius.
//!
//! Ties go to the lowest index, both when picking the next center and when
//! assigning instances, so the output depends only on the input and the
//! configured first center.

use log::debug;

use super::traits::Clustering;
use super::util;
use crate::data::Dataset;
use crate::distance::{self, Metric};
use crate::error::{Error, Result};

/// Farthest-first clustering algorithm.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FarthestFirst {
    k: usize,
    first_center: usize,
    metric: Metric,
}

impl FarthestFirst {
    /// Create a farthest-first clusterer for `k` clusters, starting from instance 0.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            first_center: 0,
            metric: Metric::default(),
        }
    }

    /// Use instance `index` as the first center.
    pub fn with_first_center(mut self, index: usize) -> Self {
        self.first_center = index;
        self
    }

    /// Set the distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Indices of the chosen centers, in the order they were picked.
    pub fn centers(&self, data: &Dataset) -> Result<Vec<usize>> {
        util::check_cluster_count(data, self.k)?;
        if self.first_center >= data.len() {
            return Err(Error::InvalidParameter {
                name: "first_center",
                message: "must index an instance of the dataset",
            });
        }

        let n = data.len();
        let mut centers = Vec::with_capacity(self.k);
        let mut is_center = vec![false; n];
        centers.push(self.first_center);
        is_center[self.first_center] = true;

        // Distance from each instance to its nearest center so far.
        let first = data[self.first_center].values();
        let mut nearest: Vec<f64> = data
            .iter()
            .map(|x| self.metric.distance_unchecked(x.values(), first))
            .collect();

        while centers.len() < self.k {
            let mut pick: Option<(usize, f64)> = None;
            for i in (0..n).filter(|&i| !is_center[i]) {
                match pick {
                    Some((_, d)) if nearest[i] <= d => {}
                    _ => pick = Some((i, nearest[i])),
                }
            }
            // k <= n guarantees a non-center instance remains.
            let Some((next, _)) = pick else { break };

            centers.push(next);
            is_center[next] = true;
            let center = data[next].values();
            for (d, x) in nearest.iter_mut().zip(data) {
                *d = d.min(self.metric.distance_unchecked(x.values(), center));
            }
        }

        Ok(centers)
    }
}

impl Default for FarthestFirst {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Clustering for FarthestFirst {
    fn fit_predict(&self, data: &Dataset) -> Result<Vec<usize>> {
        let centers = self.centers(data)?;
        let labels: Vec<usize> = data
            .iter()
            .map(|x| {
                distance::nearest(
                    self.metric,
                    x.values(),
                    centers.iter().map(|&c| data[c].values()),
                )
                .map_or(0, |(c, _)| c)
            })
            .collect();

        debug!(
            "farthest-first: k={} n={} centers={:?}",
            self.k,
            data.len(),
            centers
        );
        Ok(labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_groups() -> Dataset {
        Dataset::from_rows(vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
            vec![11.0, 10.0],
        ])
        .unwrap()
    }

    #[test]
    fn separates_two_groups_from_any_first_center() {
        let data = two_groups();
        for first in 0..data.len() {
            let labels = FarthestFirst::new(2)
                .with_first_center(first)
                .fit_predict(&data)
                .unwrap();
            assert_eq!(labels[0], labels[1]);
            assert_eq!(labels[1], labels[2]);
            assert_eq!(labels[3], labels[4]);
            assert_eq!(labels[4], labels[5]);
            assert_ne!(labels[0], labels[3]);
        }
    }

    #[test]
    fn picks_farthest_point_second() {
        let data =
            Dataset::from_rows(vec![vec![0.0], vec![1.0], vec![9.0], vec![4.0]]).unwrap();
        let centers = FarthestFirst::new(3).centers(&data).unwrap();
        // 9 is farthest from 0; then 4 (distance 4) beats 1 (distance 1).
        assert_eq!(centers, vec![0, 2, 3]);
    }

    #[test]
    fn duplicate_points_yield_empty_cluster() {
        let data = Dataset::from_rows(vec![vec![2.0, 2.0]; 3]).unwrap();
        let parts = FarthestFirst::new(2).cluster(&data).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 3);
        assert!(parts[1].is_empty());
    }

    #[test]
    fn invalid_parameters() {
        let data = two_groups();
        assert!(FarthestFirst::new(0).fit_predict(&data).is_err());
        assert!(matches!(
            FarthestFirst::new(10).fit_predict(&data),
            Err(Error::InvalidClusterCount { .. })
        ));
        assert!(FarthestFirst::new(2)
            .with_first_center(6)
            .fit_predict(&data)
            .is_err());
        assert!(matches!(
            FarthestFirst::new(1).fit_predict(&Dataset::empty(2)),
            Err(Error::EmptyInput)
        ));
    }
}
