//! Instances and datasets.
//!
//! An [`Instance`] is a fixed-length `f64` vector with an optional class label.
//! A [`Dataset`] is an ordered collection of instances that all share the same
//! attribute count. Clusterers never mutate their input: a partition is a fresh
//! `Vec<Dataset>` holding clones of the input instances.

use std::fmt;
use std::ops::Index;

use crate::error::{Error, Result};

/// One data point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    values: Vec<f64>,
    label: Option<String>,
}

impl Instance {
    /// Create an unlabeled instance.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            label: None,
        }
    }

    /// Create an instance tagged with a class label.
    ///
    /// The label is carried through clustering for reporting only.
    pub fn with_label(values: Vec<f64>, label: impl Into<String>) -> Self {
        Self {
            values,
            label: Some(label.into()),
        }
    }

    /// Attribute values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Class label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the instance has no attributes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for Instance {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")?;
        if let Some(label) = &self.label {
            write!(f, ";{label}")?;
        }
        write!(f, "}}")
    }
}

/// An ordered collection of instances with a common attribute count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    instances: Vec<Instance>,
    num_attributes: usize,
}

impl Dataset {
    /// Build a dataset, checking that every instance has the same attribute count.
    ///
    /// The attribute count is taken from the first instance; an empty vector
    /// yields an empty dataset with zero attributes.
    pub fn new(instances: Vec<Instance>) -> Result<Self> {
        let num_attributes = instances.first().map_or(0, Instance::len);
        for instance in instances.iter().skip(1) {
            if instance.len() != num_attributes {
                return Err(Error::DimensionMismatch {
                    expected: num_attributes,
                    found: instance.len(),
                });
            }
        }
        Ok(Self {
            instances,
            num_attributes,
        })
    }

    /// An empty dataset that will accept instances with `num_attributes` values.
    pub fn empty(num_attributes: usize) -> Self {
        Self {
            instances: Vec::new(),
            num_attributes,
        }
    }

    /// Build an unlabeled dataset from raw rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows.into_iter().map(Instance::new).collect())
    }

    /// Append an instance.
    ///
    /// The first instance pushed into a zero-attribute empty dataset fixes its
    /// attribute count.
    pub fn push(&mut self, instance: Instance) -> Result<()> {
        if self.instances.is_empty() && self.num_attributes == 0 {
            self.num_attributes = instance.len();
        } else if instance.len() != self.num_attributes {
            return Err(Error::DimensionMismatch {
                expected: self.num_attributes,
                found: instance.len(),
            });
        }
        self.instances.push(instance);
        Ok(())
    }

    /// Number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// `true` when the dataset holds no instances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Number of attributes per instance.
    #[inline]
    pub fn num_attributes(&self) -> usize {
        self.num_attributes
    }

    /// Instance at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index)
    }

    /// Iterate over instances in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    /// All instances as a slice.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Elementwise mean of all instances, or `None` when empty.
    pub fn centroid(&self) -> Option<Vec<f64>> {
        if self.is_empty() {
            return None;
        }
        // Running mean: a repeated value leaves the mean exactly on it.
        let mut mean = vec![0.0; self.num_attributes];
        for (i, instance) in self.instances.iter().enumerate() {
            let n = (i + 1) as f64;
            for (m, v) in mean.iter_mut().zip(instance.values()) {
                *m += (v - *m) / n;
            }
        }
        Some(mean)
    }

    /// Split this dataset into `k` clusters according to `labels`.
    ///
    /// `labels[i]` is the cluster of instance `i`. Instances keep their dataset
    /// order within each cluster. Clusters nobody maps to stay empty.
    pub fn partition(&self, labels: &[usize], k: usize) -> Result<Vec<Dataset>> {
        if labels.len() != self.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                found: labels.len(),
            });
        }
        let mut clusters: Vec<Dataset> =
            (0..k).map(|_| Dataset::empty(self.num_attributes)).collect();
        for (instance, &label) in self.instances.iter().zip(labels) {
            let cluster = clusters.get_mut(label).ok_or(Error::InvalidParameter {
                name: "labels",
                message: "label out of range for cluster count",
            })?;
            cluster.instances.push(instance.clone());
        }
        Ok(clusters)
    }
}

impl Index<usize> for Dataset {
    type Output = Instance;

    fn index(&self, index: usize) -> &Instance {
        &self.instances[index]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
