//! K-means (Lloyd iterations).
//!
//! Each iteration assigns every instance to its nearest centroid, then moves
//! each centroid to the mean of its assigned instances. Iteration stops when no
//! assignment changes or after `max_iter` assignment passes; hitting the limit
//! is not an error, the last assignment is returned.
//!
//! ## Initialization
//!
//! Initial centroids are copies of `k` distinct instances, chosen by [`Init`]:
//!
//! - [`Init::First`]: the first `k` instances;
//! - [`Init::Random`]: a uniform sample of `k` distinct indices;
//! - [`Init::PlusPlus`]: k-means++ (Arthur & Vassilvitskii, 2007), sampling
//!   each next seed with probability proportional to its squared distance from
//!   the nearest seed already chosen.
//!
//! Randomness comes only from a `StdRng` seeded with [`Kmeans::with_seed`], so a
//! given dataset, `k`, policy and seed always produce the same partition.
//!
//! ## Conventions
//!
//! - Ties in assignment go to the lowest centroid index.
//! - A centroid whose cluster empties keeps its previous position.

use log::{debug, trace};
use rand::prelude::*;

use super::traits::Clustering;
use super::util;
use crate::data::Dataset;
use crate::distance::{self, Metric};
use crate::error::{Error, Result};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Centroid initialization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Init {
    /// The first `k` instances of the dataset.
    First,
    /// `k` distinct instances drawn uniformly at random.
    #[default]
    Random,
    /// k-means++ seeding.
    PlusPlus,
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kmeans {
    k: usize,
    max_iter: usize,
    init: Init,
    seed: u64,
    metric: Metric,
}

/// Result of [`Kmeans::fit`].
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Final centroids, one per cluster.
    pub centroids: Vec<Vec<f64>>,
    /// Cluster label per instance.
    pub labels: Vec<usize>,
    /// Number of assignment passes run.
    pub iterations: usize,
    /// `true` when the last pass changed no assignment.
    pub converged: bool,
}

impl Kmeans {
    /// Create a k-means clusterer for `k` clusters.
    ///
    /// Defaults: `max_iter = 100`, [`Init::Random`], seed [`DEFAULT_SEED`],
    /// Euclidean distance.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            init: Init::default(),
            seed: DEFAULT_SEED,
            metric: Metric::default(),
        }
    }

    /// Set the maximum number of assignment passes.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the initialization policy.
    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    /// Set the RNG seed used by [`Init::Random`] and [`Init::PlusPlus`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the distance metric used for assignment.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Run k-means and return centroids, labels and convergence information.
    pub fn fit(&self, data: &Dataset) -> Result<KmeansFit> {
        util::check_cluster_count(data, self.k)?;
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        let n = data.len();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids: Vec<Vec<f64>> = self
            .initial_indices(data, &mut rng)
            .into_iter()
            .map(|i| data[i].values().to_vec())
            .collect();

        let mut labels = vec![usize::MAX; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            iterations += 1;

            let mut changed = 0usize;
            for (label, instance) in labels.iter_mut().zip(data) {
                let nearest = distance::nearest(
                    self.metric,
                    instance.values(),
                    centroids.iter().map(Vec::as_slice),
                );
                let c = nearest.map_or(0, |(c, _)| c);
                if *label != c {
                    *label = c;
                    changed += 1;
                }
            }
            trace!("kmeans pass {iterations}: {changed} reassignments");

            if changed == 0 {
                converged = true;
                break;
            }

            update_centroids(data, &labels, &mut centroids);
        }

        debug!(
            "kmeans: k={} n={} iterations={} converged={}",
            self.k, n, iterations, converged
        );

        Ok(KmeansFit {
            centroids,
            labels,
            iterations,
            converged,
        })
    }

    fn initial_indices(&self, data: &Dataset, rng: &mut StdRng) -> Vec<usize> {
        let n = data.len();
        match self.init {
            Init::First => (0..self.k).collect(),
            Init::Random => rand::seq::index::sample(rng, n, self.k).into_vec(),
            Init::PlusPlus => self.plus_plus(data, rng),
        }
    }

    fn plus_plus(&self, data: &Dataset, rng: &mut StdRng) -> Vec<usize> {
        let n = data.len();
        let mut chosen = Vec::with_capacity(self.k);
        let mut is_chosen = vec![false; n];

        let first = rng.random_range(0..n);
        chosen.push(first);
        is_chosen[first] = true;

        // Squared distance to the nearest chosen seed.
        let mut d2: Vec<f64> = data
            .iter()
            .map(|x| {
                let d = self.metric.distance_unchecked(x.values(), data[first].values());
                d * d
            })
            .collect();

        while chosen.len() < self.k {
            let total: f64 = (0..n).filter(|&i| !is_chosen[i]).map(|i| d2[i]).sum();

            let next = if total > 0.0 {
                let target = rng.random::<f64>() * total;
                let mut acc = 0.0;
                let mut pick = None;
                for i in (0..n).filter(|&i| !is_chosen[i]) {
                    acc += d2[i];
                    pick = Some(i);
                    if acc > target {
                        break;
                    }
                }
                pick
            } else {
                // Every remaining instance duplicates a seed.
                (0..n).find(|&i| !is_chosen[i])
            };

            let Some(next) = next else { break };
            chosen.push(next);
            is_chosen[next] = true;

            for (i, x) in data.iter().enumerate() {
                let d = self.metric.distance_unchecked(x.values(), data[next].values());
                d2[i] = d2[i].min(d * d);
            }
        }

        chosen
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &Dataset) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

fn update_centroids(data: &Dataset, labels: &[usize], centroids: &mut [Vec<f64>]) {
    let d = data.num_attributes();
    let mut means = vec![vec![0.0; d]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (instance, &label) in data.iter().zip(labels) {
        counts[label] += 1;
        let n = counts[label] as f64;
        for (m, v) in means[label].iter_mut().zip(instance.values()) {
            *m += (v - *m) / n;
        }
    }

    for ((centroid, mean), &count) in centroids.iter_mut().zip(means).zip(&counts) {
        if count > 0 {
            *centroid = mean;
        }
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

    fn assert_two_groups(labels: &[usize]) {
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[3], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn separates_two_groups_with_every_init() {
        let data = two_groups();
        for init in [Init::First, Init::Random, Init::PlusPlus] {
            let fit = Kmeans::new(2).with_init(init).fit(&data).unwrap();
            assert_two_groups(&fit.labels);
            assert!(fit.converged);
        }
    }

    #[test]
    fn first_init_converges_to_group_means() {
        let fit = Kmeans::new(2)
            .with_init(Init::First)
            .fit(&two_groups())
            .unwrap();
        let c0 = &fit.centroids[fit.labels[0]];
        let c1 = &fit.centroids[fit.labels[3]];
        assert!((c0[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((c1[1] - 31.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn same_seed_same_labels() {
        let data = two_groups();
        let a = Kmeans::new(3).with_seed(7).fit_predict(&data).unwrap();
        let b = Kmeans::new(3).with_seed(7).fit_predict(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn partition_has_exactly_k_entries() {
        let data = Dataset::from_rows(vec![vec![3.0, 3.0]; 4]).unwrap();
        let parts = Kmeans::new(2)
            .with_init(Init::First)
            .cluster(&data)
            .unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 4);
        assert!(parts[1].is_empty());
    }

    #[test]
    fn identical_points_single_cluster() {
        let data = Dataset::from_rows(vec![vec![1.5, -2.0]; 5]).unwrap();
        let parts = Kmeans::new(1).cluster(&data).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 5);
    }

    #[test]
    fn max_iter_limit_is_not_an_error() {
        let fit = Kmeans::new(2)
            .with_init(Init::First)
            .with_max_iter(1)
            .fit(&two_groups())
            .unwrap();
        assert_eq!(fit.iterations, 1);
        assert!(!fit.converged);
        assert_eq!(fit.labels.len(), 6);
    }

    #[test]
    fn invalid_cluster_counts() {
        let data = two_groups();
        assert!(matches!(
            Kmeans::new(0).fit(&data),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
        assert!(matches!(
            Kmeans::new(7).fit(&data),
            Err(Error::InvalidClusterCount {
                requested: 7,
                n_items: 6
            })
        ));
        assert!(Kmeans::new(2).with_max_iter(0).fit(&data).is_err());
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            Kmeans::new(1).fit(&Dataset::empty(2)),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn plus_plus_with_duplicates_still_picks_distinct_indices() {
        let data = Dataset::from_rows(vec![vec![0.0]; 3]).unwrap();
        let km = Kmeans::new(3).with_init(Init::PlusPlus);
        let mut rng = StdRng::seed_from_u64(1);
        let mut idx = km.initial_indices(&data, &mut rng);
        idx.sort_unstable();
        assert_eq!(idx, vec![0, 1, 2]);
    }
}
