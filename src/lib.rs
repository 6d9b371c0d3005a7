//! Dense clustering and partition scoring.
//!
//! `clusterscore` clusters a [`Dataset`] with several unsupervised algorithms
//! and scores the resulting partitions so the strategies can be compared on
//! the same data.
//!
//! - [`cluster`]: k-means, Cobweb and farthest-first, behind [`Clustering`]
//! - [`evaluation`]: AIC, BIC, sum of squared errors and sum of average
//!   pairwise similarities, behind [`ClusterEvaluation`]
//! - [`distance`]: the [`Metric`] shared by both
//! - [`io`]: a delimited-text loader
//!
//! Every operation is a pure, synchronous computation over borrowed input.
//! Diagnostics go through the [`log`](https://docs.rs/log) facade; install a
//! logger (e.g. `env_logger`) to see them.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod data;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;

pub use cluster::{Clustering, Cobweb, ConceptTree, FarthestFirst, Init, Kmeans, KmeansFit};
pub use data::{Dataset, Instance};
pub use distance::{euclidean, Metric};
pub use error::{Error, Result};
pub use evaluation::{
    AicScore, BicScore, ClusterEvaluation, SumOfAveragePairwiseSimilarities, SumOfSquaredErrors,
};
