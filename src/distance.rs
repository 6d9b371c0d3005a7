//! Pairwise distances between vectors.
//!
//! Every clusterer and the pairwise-similarity scorer measure distance through
//! [`Metric`]. Comparing vectors of different lengths is an error, never a
//! silent truncation.

use crate::error::{Error, Result};

/// Distance metric between two equal-length vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// `sqrt(Σ (a_i - b_i)²)`.
    #[default]
    Euclidean,
    /// `Σ |a_i - b_i|`.
    Manhattan,
    /// `max |a_i - b_i|`.
    Chebyshev,
}

impl Metric {
    /// Distance between `a` and `b`.
    ///
    /// Fails with [`Error::DimensionMismatch`] when the lengths differ.
    pub fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_dims(a, b)?;
        Ok(self.distance_unchecked(a, b))
    }

    /// Distance without the length check.
    ///
    /// Callers must have validated dimensions (e.g. at dataset construction).
    #[inline]
    pub(crate) fn distance_unchecked(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        match self {
            Metric::Euclidean => squared_euclidean(a, b).sqrt(),
            Metric::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            Metric::Chebyshev => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
        }
    }
}

/// Euclidean distance between `a` and `b`.
pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64> {
    Metric::Euclidean.distance(a, b)
}

#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn check_dims(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(())
}

/// Index of the vector in `centers` closest to `point` (ties → lowest index).
///
/// Returns `None` only when `centers` is empty.
pub(crate) fn nearest<'a, I>(metric: Metric, point: &[f64], centers: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, center) in centers.into_iter().enumerate() {
        let d = metric.distance_unchecked(point, center);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((idx, d)),
        }
    }
    best
}
