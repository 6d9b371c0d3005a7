//! Clustering algorithms for grouping similar instances.
//!
//! All three algorithms are hard clusterers: each instance lands in exactly one
//! cluster. They implement [`Clustering`], so they can be swapped freely and
//! their partitions fed to the same scorers.
//!
//! ## Algorithms
//!
//! ### K-means
//!
//! The classic algorithm: assign each instance to the nearest centroid, then
//! update centroids to the mean of their instances. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**: roughly spherical clusters of similar size, `k` known in
//! advance.
//!
//! ### Cobweb
//!
//! Incremental concept formation: instances are sorted one at a time into a
//! hierarchy of concepts, restructuring it (new leaf, merge, split) wherever
//! that raises category utility. The number of clusters is discovered, and the
//! partition is read off the tree at a chosen level.
//!
//! ### Farthest-first
//!
//! One pass of greedy k-center seeding: each new center is the instance
//! farthest from all previous centers. Cheap, deterministic, and sensitive to
//! outliers (they tend to become centers).
//!
//! ## Usage
//!
//! ```rust
//! use clusterscore::cluster::{Clustering, Cobweb, FarthestFirst, Kmeans};
//! use clusterscore::Dataset;
//!
//! let data = Dataset::from_rows(vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ])
//! .unwrap();
//!
//! let labels = Kmeans::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! let clusters = FarthestFirst::new(2).cluster(&data).unwrap();
//! assert_eq!(clusters.len(), 2);
//!
//! let clusters = Cobweb::new().with_cutoff_level(1).cluster(&data).unwrap();
//! assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 4);
//! ```

mod cobweb;
mod farthest_first;
mod kmeans;
mod traits;
mod util;

pub use cobweb::{Cobweb, ConceptNode, ConceptTree, DEFAULT_ACUITY, DEFAULT_CUTOFF, NORMAL};
pub use farthest_first::FarthestFirst;
pub use kmeans::{Init, Kmeans, KmeansFit, DEFAULT_SEED};
pub use traits::Clustering;
