//! Cobweb: incremental hierarchical concept formation.
//!
//! # The Algorithm (Fisher, 1987; numeric form from Gennari et al., 1989)
//!
//! Instances are inserted one at a time into a concept tree. Every node
//! summarizes the instances classified under it with a count and, per
//! attribute, a running mean and variance. Inserting an instance at an internal
//! node scores four restructurings of that node's children by **category
//! utility** and commits the best one:
//!
//! 1. **Host**: add the instance to an existing child.
//! 2. **New leaf**: add a singleton child holding only the instance.
//! 3. **Merge**: fuse the two best hosts into one node (whose children are the
//!    two fused nodes) and host the instance there. Only considered when the
//!    node has more than two children.
//! 4. **Split**: replace the best host by its own children, then re-evaluate.
//!
//! Insertion then recurses into the chosen child until the instance lands in a
//! leaf. A leaf receiving an instance becomes internal with two children: a
//! copy of its previous contents and a singleton for the new instance.
//!
//! ## Category utility (numeric attributes)
//!
//! For a parent `P` with children `C_1..C_K`:
//!
//! ```text
//! CU = (1/K) Σ_k P(C_k) Σ_a (1/σ_ka − 1/σ_Pa) / (2√π)
//! ```
//!
//! where `σ` is the sample standard deviation, floored at `acuity`. The floor
//! keeps singleton concepts from having infinite utility. When the best
//! restructuring scores below `cutoff`, the node's subtree is pruned and the
//! instance stays at that node.
//!
//! ## Partition extraction
//!
//! The tree is cut at `cutoff_level` (the root is level 0): every node at that
//! depth, and every leaf ending above it, becomes one cluster, in left-to-right
//! pre-order. Levels deeper than the tree yield the leaf partition.
//!
//! ## Representation
//!
//! Nodes live in an arena (`Vec<ConceptNode>`) and refer to their children by
//! index. Merge and split only rewrite child lists, so detached nodes simply
//! become unreachable.
//!
//! ## References
//!
//! Fisher, D. H. (1987). "Knowledge Acquisition Via Incremental Conceptual
//! Clustering." Machine Learning 2.
//!
//! Gennari, J. H., Langley, P., Fisher, D. (1989). "Models of Incremental
//! Concept Formation." Artificial Intelligence 40.

use log::{debug, trace};

use super::traits::Clustering;
use crate::data::Dataset;
use crate::error::{Error, Result};

/// `1 / (2√π)`, the normal-density constant of numeric category utility.
pub const NORMAL: f64 = 0.282_094_791_773_878_14;

/// Default acuity (minimum standard deviation).
pub const DEFAULT_ACUITY: f64 = 1.0;

/// Default category-utility cutoff.
pub const DEFAULT_CUTOFF: f64 = 0.01 * NORMAL;

/// Cobweb clustering algorithm.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cobweb {
    acuity: f64,
    cutoff: f64,
    cutoff_level: usize,
}

impl Cobweb {
    /// Create a Cobweb clusterer.
    ///
    /// Defaults: acuity [`DEFAULT_ACUITY`], cutoff [`DEFAULT_CUTOFF`],
    /// `cutoff_level = 1` (the root's children).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum standard deviation used in category utility.
    pub fn with_acuity(mut self, acuity: f64) -> Self {
        self.acuity = acuity;
        self
    }

    /// Set the category-utility threshold below which subtrees are pruned.
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Set the tree level at which the partition is extracted.
    pub fn with_cutoff_level(mut self, level: usize) -> Self {
        self.cutoff_level = level;
        self
    }

    /// Build the concept tree for `data`.
    pub fn fit(&self, data: &Dataset) -> Result<ConceptTree> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if !(self.acuity.is_finite() && self.acuity > 0.0) {
            return Err(Error::InvalidParameter {
                name: "acuity",
                message: "must be positive and finite",
            });
        }
        if !self.cutoff.is_finite() {
            return Err(Error::InvalidParameter {
                name: "cutoff",
                message: "must be finite",
            });
        }

        let mut tree = ConceptTree::new(data.num_attributes(), self.acuity, self.cutoff);
        for (idx, instance) in data.iter().enumerate() {
            tree.insert(idx, instance.values());
        }

        debug!(
            "cobweb: n={} nodes={} depth={}",
            data.len(),
            tree.num_nodes(),
            tree.depth()
        );
        Ok(tree)
    }
}

impl Default for Cobweb {
    fn default() -> Self {
        Self {
            acuity: DEFAULT_ACUITY,
            cutoff: DEFAULT_CUTOFF,
            cutoff_level: 1,
        }
    }
}

impl Clustering for Cobweb {
    fn fit_predict(&self, data: &Dataset) -> Result<Vec<usize>> {
        check_level(self.cutoff_level)?;
        self.fit(data)?.labels_at(self.cutoff_level)
    }

    /// Cobweb discovers the number of clusters, so this returns 0.
    fn n_clusters(&self) -> usize {
        0
    }
}

fn check_level(level: usize) -> Result<()> {
    if level == 0 {
        return Err(Error::InvalidParameter {
            name: "cutoff_level",
            message: "must be at least 1",
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Running statistics
// ---------------------------------------------------------------------------

/// Count, mean and sum of squared deviations per attribute (Welford form).
#[derive(Debug, Clone)]
struct Stats {
    count: usize,
    mean: Vec<f64>,
    m2: Vec<f64>,
}

impl Stats {
    fn new(dim: usize) -> Self {
        Self {
            count: 0,
            mean: vec![0.0; dim],
            m2: vec![0.0; dim],
        }
    }

    fn singleton(x: &[f64]) -> Self {
        Self {
            count: 1,
            mean: x.to_vec(),
            m2: vec![0.0; x.len()],
        }
    }

    fn add(&mut self, x: &[f64]) {
        self.count += 1;
        let n = self.count as f64;
        for ((mean, m2), &v) in self.mean.iter_mut().zip(&mut self.m2).zip(x) {
            let delta = v - *mean;
            *mean += delta / n;
            *m2 += delta * (v - *mean);
        }
    }

    fn with(&self, x: &[f64]) -> Self {
        let mut out = self.clone();
        out.add(x);
        out
    }

    /// Pooled statistics of two disjoint groups (Chan et al.).
    fn merged(a: &Stats, b: &Stats) -> Self {
        if a.count == 0 {
            return b.clone();
        }
        if b.count == 0 {
            return a.clone();
        }
        let na = a.count as f64;
        let nb = b.count as f64;
        let n = na + nb;
        let mut mean = Vec::with_capacity(a.mean.len());
        let mut m2 = Vec::with_capacity(a.mean.len());
        for i in 0..a.mean.len() {
            let delta = b.mean[i] - a.mean[i];
            mean.push(a.mean[i] + delta * nb / n);
            m2.push(a.m2[i] + b.m2[i] + delta * delta * na * nb / n);
        }
        Self {
            count: a.count + b.count,
            mean,
            m2,
        }
    }

    /// Sample variance of attribute `a`, clamped at zero; 0 below two instances.
    fn variance(&self, a: usize) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2[a] / (self.count - 1) as f64).max(0.0)
    }

    fn std_dev(&self, a: usize, acuity: f64) -> f64 {
        if self.count < 2 {
            return acuity;
        }
        self.variance(a).sqrt().max(acuity)
    }
}

/// Category utility of partitioning `parent` into `children`.
fn category_utility(parent: &Stats, children: &[&Stats], acuity: f64) -> f64 {
    if children.is_empty() || parent.count == 0 {
        return 0.0;
    }
    let n = parent.count as f64;
    let dim = parent.mean.len();
    let parent_inv: Vec<f64> = (0..dim).map(|a| 1.0 / parent.std_dev(a, acuity)).collect();

    let total: f64 = children
        .iter()
        .map(|child| {
            let gain: f64 = (0..dim)
                .map(|a| 1.0 / child.std_dev(a, acuity) - parent_inv[a])
                .sum();
            (child.count as f64 / n) * gain
        })
        .sum();

    total * NORMAL / children.len() as f64
}

// ---------------------------------------------------------------------------
// Concept tree
// ---------------------------------------------------------------------------

/// A node of the concept tree.
#[derive(Debug, Clone)]
pub struct ConceptNode {
    stats: Stats,
    children: Vec<usize>,
    members: Vec<usize>,
}

impl ConceptNode {
    fn leaf(stats: Stats, members: Vec<usize>) -> Self {
        Self {
            stats,
            children: Vec::new(),
            members,
        }
    }

    /// Number of instances classified under this node.
    pub fn count(&self) -> usize {
        self.stats.count
    }

    /// Per-attribute mean of the instances under this node.
    pub fn mean(&self) -> &[f64] {
        &self.stats.mean
    }

    /// Sample variance of attribute `attribute` (never negative).
    pub fn variance(&self, attribute: usize) -> f64 {
        self.stats.variance(attribute)
    }

    /// Child node ids, left to right.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Dataset indices of the instances under this node, in insertion order
    /// of their subtrees (not necessarily sorted).
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// `true` for nodes without children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Restructuring chosen at an internal node, by child position.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operation {
    NewLeaf,
    Host(usize),
    Merge(usize, usize),
    Split(usize),
}

/// The concept hierarchy built by [`Cobweb::fit`].
#[derive(Debug, Clone)]
pub struct ConceptTree {
    nodes: Vec<ConceptNode>,
    root: usize,
    acuity: f64,
    cutoff: f64,
}

impl ConceptTree {
    fn new(dim: usize, acuity: f64, cutoff: f64) -> Self {
        Self {
            nodes: vec![ConceptNode::leaf(Stats::new(dim), Vec::new())],
            root: 0,
            acuity,
            cutoff,
        }
    }

    fn push(&mut self, node: ConceptNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn insert(&mut self, idx: usize, x: &[f64]) {
        let mut node = self.root;
        // After a split the node's statistics already include `x`.
        let mut absorbed = false;

        loop {
            if self.nodes[node].stats.count == 0 {
                let n = &mut self.nodes[node];
                n.stats.add(x);
                n.members.push(idx);
                return;
            }
            if self.nodes[node].is_leaf() {
                self.fork_leaf(node, idx, x);
                return;
            }

            if !absorbed {
                let n = &mut self.nodes[node];
                n.stats.add(x);
                n.members.push(idx);
            }
            absorbed = false;

            let (best_cu, op) = self.best_operation(node, x);
            trace!("cobweb: instance {idx} at node {node}: {op:?} (cu={best_cu:.6})");

            if best_cu < self.cutoff {
                // Prune: the instance stays here and the node becomes a leaf.
                self.nodes[node].children.clear();
                return;
            }

            match op {
                Operation::NewLeaf => {
                    let leaf = self.push(ConceptNode::leaf(Stats::singleton(x), vec![idx]));
                    self.nodes[node].children.push(leaf);
                    return;
                }
                Operation::Host(pos) => {
                    node = self.nodes[node].children[pos];
                }
                Operation::Merge(a, b) => {
                    node = self.merge_children(node, a, b);
                }
                Operation::Split(pos) => {
                    let split = self.nodes[node].children[pos];
                    let grandchildren = self.nodes[split].children.clone();
                    self.nodes[node].children.splice(pos..=pos, grandchildren);
                    absorbed = true;
                }
            }
        }
    }

    /// Turn leaf `node` into an internal node with two children: its previous
    /// contents and a singleton for `x`.
    fn fork_leaf(&mut self, node: usize, idx: usize, x: &[f64]) {
        let previous = ConceptNode::leaf(
            self.nodes[node].stats.clone(),
            self.nodes[node].members.clone(),
        );
        let old = self.push(previous);
        let new = self.push(ConceptNode::leaf(Stats::singleton(x), vec![idx]));

        let n = &mut self.nodes[node];
        n.stats.add(x);
        n.members.push(idx);
        n.children = vec![old, new];

        let cu = category_utility(
            &self.nodes[node].stats,
            &[&self.nodes[old].stats, &self.nodes[new].stats],
            self.acuity,
        );
        if cu < self.cutoff {
            self.nodes[node].children.clear();
        }
    }

    /// Replace children at positions `a` and `b` of `node` by one merged node
    /// and return its id.
    fn merge_children(&mut self, node: usize, a: usize, b: usize) -> usize {
        let ha = self.nodes[node].children[a];
        let hb = self.nodes[node].children[b];

        let stats = Stats::merged(&self.nodes[ha].stats, &self.nodes[hb].stats);
        let mut members = self.nodes[ha].members.clone();
        members.extend_from_slice(&self.nodes[hb].members);
        let merged = self.push(ConceptNode {
            stats,
            children: vec![ha, hb],
            members,
        });

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let children = &mut self.nodes[node].children;
        children.remove(hi);
        children[lo] = merged;
        merged
    }

    /// Score every restructuring of `node`'s children for `x` and return the
    /// best. `node`'s own statistics must already include `x`.
    fn best_operation(&self, node: usize, x: &[f64]) -> (f64, Operation) {
        let parent = &self.nodes[node].stats;
        let children = &self.nodes[node].children;
        let current: Vec<&Stats> = children.iter().map(|&c| &self.nodes[c].stats).collect();
        let k = current.len();

        let singleton = Stats::singleton(x);
        let mut candidate = current.clone();
        candidate.push(&singleton);
        let mut best = (
            category_utility(parent, &candidate, self.acuity),
            Operation::NewLeaf,
        );

        let hosted: Vec<Stats> = current.iter().map(|s| s.with(x)).collect();
        let host_cu: Vec<f64> = (0..k)
            .map(|i| {
                let mut candidate = current.clone();
                candidate[i] = &hosted[i];
                category_utility(parent, &candidate, self.acuity)
            })
            .collect();

        let mut order: Vec<usize> = (0..k).collect();
        order.sort_by(|&i, &j| host_cu[j].total_cmp(&host_cu[i]).then(i.cmp(&j)));
        let Some(&first) = order.first() else {
            return best;
        };

        if host_cu[first] > best.0 {
            best = (host_cu[first], Operation::Host(first));
        }

        // Merging the only two children would just copy this node one level down.
        if let Some(&second) = order.get(1).filter(|_| k > 2) {
            let merged = Stats::merged(current[first], current[second]).with(x);
            let mut candidate: Vec<&Stats> = current
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != first && i != second)
                .map(|(_, s)| *s)
                .collect();
            candidate.push(&merged);
            let cu = category_utility(parent, &candidate, self.acuity);
            if cu > best.0 {
                best = (cu, Operation::Merge(first, second));
            }
        }

        let split = &self.nodes[children[first]];
        if !split.is_leaf() {
            let mut candidate: Vec<&Stats> = current
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != first)
                .map(|(_, s)| *s)
                .collect();
            candidate.extend(split.children.iter().map(|&c| &self.nodes[c].stats));
            candidate.push(&singleton);
            let cu = category_utility(parent, &candidate, self.acuity);
            if cu > best.0 {
                best = (cu, Operation::Split(first));
            }
        }

        best
    }

    /// Root node id.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Node by id.
    ///
    /// Ids of nodes detached by merges, splits or pruning remain valid but are
    /// no longer reachable from the root.
    pub fn node(&self, id: usize) -> Option<&ConceptNode> {
        self.nodes.get(id)
    }

    /// Number of nodes reachable from the root.
    pub fn num_nodes(&self) -> usize {
        self.preorder().len()
    }

    /// Depth of the deepest leaf (a lone root has depth 0).
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &c in &self.nodes[node].children {
                stack.push((c, depth + 1));
            }
        }
        max_depth
    }

    /// Leaf ids in left-to-right order.
    pub fn leaves(&self) -> Vec<usize> {
        self.preorder()
            .into_iter()
            .filter(|&n| self.nodes[n].is_leaf())
            .collect()
    }

    /// Node ids forming the cut at `level`, in left-to-right order.
    pub fn nodes_at(&self, level: usize) -> Result<Vec<usize>> {
        check_level(level)?;
        let mut out = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let n = &self.nodes[node];
            if depth == level || n.is_leaf() {
                out.push(node);
            } else {
                for &c in n.children.iter().rev() {
                    stack.push((c, depth + 1));
                }
            }
        }
        Ok(out)
    }

    /// Cluster label per instance for the cut at `level`.
    pub fn labels_at(&self, level: usize) -> Result<Vec<usize>> {
        let cut = self.nodes_at(level)?;
        let mut labels = vec![0usize; self.nodes[self.root].count()];
        for (cluster, &node) in cut.iter().enumerate() {
            for &m in &self.nodes[node].members {
                labels[m] = cluster;
            }
        }
        Ok(labels)
    }

    /// Partition of `data` (the dataset the tree was built from) at `level`.
    pub fn partition_at(&self, data: &Dataset, level: usize) -> Result<Vec<Dataset>> {
        let k = self.nodes_at(level)?.len();
        data.partition(&self.labels_at(level)?, k)
    }

    fn preorder(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node].children.iter().rev());
        }
        out
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

    /// Deterministic pseudo-random blobs (xorshift), no RNG dependency needed.
    fn blobs(per_blob: usize) -> Dataset {
        let centers = [[0.0, 0.0], [8.0, 8.0], [-8.0, 8.0]];
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
        };
        let mut rows = Vec::new();
        for i in 0..per_blob * centers.len() {
            let c = centers[i % centers.len()];
            rows.push(vec![c[0] + 3.0 * next(), c[1] + 3.0 * next()]);
        }
        Dataset::from_rows(rows).unwrap()
    }

    fn check_invariants(tree: &ConceptTree, node: usize) {
        let n = tree.node(node).unwrap();
        assert_eq!(n.count(), n.members().len());
        for a in 0..n.mean().len() {
            assert!(n.variance(a) >= 0.0);
        }
        if n.is_leaf() {
            return;
        }
        let mut from_children: Vec<usize> = n
            .children()
            .iter()
            .flat_map(|&c| tree.node(c).unwrap().members().iter().copied())
            .collect();
        let mut own = n.members().to_vec();
        from_children.sort_unstable();
        own.sort_unstable();
        assert_eq!(own, from_children);
        for &c in n.children() {
            check_invariants(tree, c);
        }
    }

    #[test]
    fn separates_two_groups_at_level_one() {
        let data = two_groups();
        let tree = Cobweb::new().fit(&data).unwrap();
        assert_eq!(tree.nodes_at(1).unwrap().len(), 2);

        let labels = Cobweb::new().fit_predict(&data).unwrap();
        assert_eq!(labels, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn tight_groups_collapse_into_leaves() {
        // Within-group spread is below the acuity, so each group is one leaf.
        let tree = Cobweb::new().fit(&two_groups()).unwrap();
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaves().len(), 2);
        assert_eq!(tree.num_nodes(), 3);
    }

    #[test]
    fn identical_points_form_one_cluster() {
        let data = Dataset::from_rows(vec![vec![4.0, 4.0]; 6]).unwrap();
        let parts = Cobweb::new().cluster(&data).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 6);
    }

    #[test]
    fn tree_members_are_consistent() {
        let data = blobs(20);
        let tree = Cobweb::new().with_acuity(0.5).fit(&data).unwrap();
        assert_eq!(tree.node(tree.root()).unwrap().count(), data.len());
        check_invariants(&tree, tree.root());
    }

    #[test]
    fn negative_cutoff_never_prunes() {
        let data = blobs(10);
        let tree = Cobweb::new()
            .with_acuity(0.5)
            .with_cutoff(-10.0)
            .fit(&data)
            .unwrap();
        check_invariants(&tree, tree.root());
        // Without pruning every instance ends up alone in a leaf.
        assert_eq!(tree.leaves().len(), data.len());
    }

    #[test]
    fn every_level_is_a_partition() {
        let data = blobs(15);
        let tree = Cobweb::new().with_acuity(0.5).fit(&data).unwrap();
        for level in 1..=tree.depth() + 2 {
            let parts = tree.partition_at(&data, level).unwrap();
            assert_eq!(parts.iter().map(Dataset::len).sum::<usize>(), data.len());
            assert!(parts.iter().all(|p| !p.is_empty()));
        }
    }

    #[test]
    fn deep_levels_clamp_to_leaves() {
        let data = blobs(10);
        let tree = Cobweb::new().with_acuity(0.5).fit(&data).unwrap();
        let deepest = tree.nodes_at(tree.depth() + 5).unwrap();
        assert_eq!(deepest, tree.leaves());
    }

    #[test]
    fn level_zero_is_rejected() {
        let data = two_groups();
        assert!(matches!(
            Cobweb::new().with_cutoff_level(0).fit_predict(&data),
            Err(Error::InvalidParameter {
                name: "cutoff_level",
                ..
            })
        ));
    }

    #[test]
    fn invalid_parameters() {
        let data = two_groups();
        assert!(Cobweb::new().with_acuity(0.0).fit(&data).is_err());
        assert!(Cobweb::new().with_cutoff(f64::NAN).fit(&data).is_err());
        assert!(matches!(
            Cobweb::new().fit(&Dataset::empty(2)),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn merged_stats_match_sequential() {
        let xs = [[1.0, 2.0], [3.0, -1.0], [0.5, 0.5], [7.0, 2.0], [2.0, 2.0]];
        let mut all = Stats::new(2);
        for x in &xs {
            all.add(x);
        }
        let mut left = Stats::new(2);
        let mut right = Stats::new(2);
        for x in &xs[..2] {
            left.add(x);
        }
        for x in &xs[2..] {
            right.add(x);
        }
        let merged = Stats::merged(&left, &right);
        assert_eq!(merged.count, all.count);
        for a in 0..2 {
            assert!((merged.mean[a] - all.mean[a]).abs() < 1e-12);
            assert!((merged.variance(a) - all.variance(a)).abs() < 1e-12);
        }
    }

    #[test]
    fn category_utility_rewards_separation() {
        let mut parent = Stats::new(1);
        let mut low = Stats::new(1);
        let mut high = Stats::new(1);
        for v in [0.0, 0.1, 0.2] {
            parent.add(&[v]);
            low.add(&[v]);
        }
        for v in [10.0, 10.1, 10.2] {
            parent.add(&[v]);
            high.add(&[v]);
        }
        let separated = category_utility(&parent, &[&low, &high], 1.0);
        assert!(separated > 0.0);
        // A single child identical to the parent carries no information.
        assert!(category_utility(&parent, &[&parent], 1.0).abs() < 1e-12);
    }

    fn stats_of(values: &[f64]) -> Stats {
        let mut stats = Stats::new(1);
        for &v in values {
            stats.add(&[v]);
        }
        stats
    }

    /// Root over the given children, with members `0..n` in order.
    fn rooted(children: Vec<(Stats, Vec<usize>)>) -> (ConceptTree, Vec<usize>) {
        let mut tree = ConceptTree::new(1, DEFAULT_ACUITY, DEFAULT_CUTOFF);
        let mut root_stats = Stats::new(1);
        let mut ids = Vec::new();
        for (stats, members) in children {
            root_stats = Stats::merged(&root_stats, &stats);
            ids.push(tree.push(ConceptNode::leaf(stats, members)));
        }
        let n = root_stats.count;
        tree.nodes[0] = ConceptNode {
            stats: root_stats,
            children: ids.clone(),
            members: (0..n).collect(),
        };
        (tree, ids)
    }

    fn chosen_operation(tree: &ConceptTree, x: &[f64]) -> Operation {
        let mut scored = tree.clone();
        scored.nodes[scored.root].stats.add(x);
        scored.best_operation(scored.root, x).1
    }

    #[test]
    fn merge_joins_the_two_best_hosts() {
        // Two children at 0 and one far away: a third 0 belongs with both.
        let (mut tree, ids) = rooted(vec![
            (stats_of(&[0.0, 0.0]), vec![0, 1]),
            (stats_of(&[0.0, 0.0]), vec![2, 3]),
            (stats_of(&[100.0, 100.0]), vec![4, 5]),
        ]);
        assert_eq!(chosen_operation(&tree, &[0.0]), Operation::Merge(0, 1));

        tree.insert(6, &[0.0]);
        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.count(), 7);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[1], ids[2]);

        let merged_id = root.children()[0];
        assert!(!ids.contains(&merged_id));
        let merged = tree.node(merged_id).unwrap();
        assert_eq!(merged.members(), &[0, 1, 2, 3, 6]);
        assert_eq!(merged.count(), 5);
        // Five identical values below it carry no structure worth keeping.
        assert!(merged.is_leaf());
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn split_promotes_grandchildren() {
        // Child 0 lumps {0, 0} with {100, 100}; child 1 is {200, 200}.
        let (mut tree, ids) = rooted(vec![
            (stats_of(&[0.0, 0.0, 100.0, 100.0]), vec![0, 1, 2, 3]),
            (stats_of(&[200.0, 200.0]), vec![4, 5]),
        ]);
        let low = tree.push(ConceptNode::leaf(stats_of(&[0.0, 0.0]), vec![0, 1]));
        let high = tree.push(ConceptNode::leaf(stats_of(&[100.0, 100.0]), vec![2, 3]));
        tree.nodes[ids[0]].children = vec![low, high];
        assert_eq!(tree.depth(), 2);
        assert_eq!(chosen_operation(&tree, &[0.0]), Operation::Split(0));

        tree.insert(6, &[0.0]);
        let root = tree.node(tree.root()).unwrap();
        assert_eq!(root.count(), 7);
        assert_eq!(root.children(), &[low, high, ids[1]]);
        assert_eq!(tree.node(low).unwrap().members(), &[0, 1, 6]);
        assert_eq!(tree.node(high).unwrap().members(), &[2, 3]);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.labels_at(1).unwrap(), vec![0, 0, 1, 1, 2, 2, 0]);
    }
}
