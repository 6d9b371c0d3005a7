use crate::data::Dataset;
use crate::error::{Error, Result};

/// Validate a fixed cluster count against a dataset.
pub(crate) fn check_cluster_count(data: &Dataset, k: usize) -> Result<()> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }
    if k == 0 {
        return Err(Error::InvalidParameter {
            name: "k",
            message: "must be at least 1",
        });
    }
    if k > data.len() {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: data.len(),
        });
    }
    Ok(())
}
