//! Loading datasets from delimited text.
//!
//! One instance per line. The column at `class_index` (when given) becomes the
//! instance label; every other column must parse as `f64`. Blank lines are
//! skipped, and fields are trimmed before parsing.
//!
//! ```rust
//! use clusterscore::io::read_delimited;
//!
//! let text = "5.1,3.5,Iris-setosa\n6.2,2.9,Iris-versicolor\n";
//! let data = read_delimited(text.as_bytes(), Some(2), ',').unwrap();
//! assert_eq!(data.len(), 2);
//! assert_eq!(data.num_attributes(), 2);
//! assert_eq!(data[1].label(), Some("Iris-versicolor"));
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::data::{Dataset, Instance};
use crate::error::{Error, Result};

/// Read a dataset from `reader`.
pub fn read_delimited<R: Read>(
    reader: R,
    class_index: Option<usize>,
    separator: char,
) -> Result<Dataset> {
    let mut data = Dataset::empty(0);
    for (line_no, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let instance = parse_line(&line, line_no + 1, class_index, separator)?;
        data.push(instance)?;
    }
    Ok(data)
}

/// Read a dataset from the file at `path`.
pub fn load_delimited(
    path: impl AsRef<Path>,
    class_index: Option<usize>,
    separator: char,
) -> Result<Dataset> {
    let path = path.as_ref();
    let data = read_delimited(File::open(path)?, class_index, separator)?;
    debug!(
        "loaded {} instances with {} attributes from {}",
        data.len(),
        data.num_attributes(),
        path.display()
    );
    Ok(data)
}

fn parse_line(
    line: &str,
    line_no: usize,
    class_index: Option<usize>,
    separator: char,
) -> Result<Instance> {
    let mut values = Vec::new();
    let mut label = None;
    for (col, field) in line.split(separator).enumerate() {
        let field = field.trim();
        if Some(col) == class_index {
            label = Some(field.to_string());
            continue;
        }
        let value = field.parse::<f64>().map_err(|e| Error::Parse {
            line: line_no,
            message: format!("column {col}: {field:?}: {e}"),
        })?;
        values.push(value);
    }
    Ok(match label {
        Some(label) => Instance::with_label(values, label),
        None => Instance::new(values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_column_anywhere() {
        let text = "a, 1.0, 2.0\n\nb, 3.0, 4.0\n";
        let data = read_delimited(text.as_bytes(), Some(0), ',').unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].values(), &[1.0, 2.0]);
        assert_eq!(data[0].label(), Some("a"));
    }

    #[test]
    fn no_label_column() {
        let data = read_delimited("1\t2\n3\t4\n".as_bytes(), None, '\t').unwrap();
        assert_eq!(data.num_attributes(), 2);
        assert_eq!(data[1].label(), None);
    }

    #[test]
    fn bad_number_reports_line() {
        let err = read_delimited("1,2\n1,x\n".as_bytes(), None, ',').unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn ragged_rows_fail() {
        let err = read_delimited("1,2\n1,2,3\n".as_bytes(), None, ',').unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_delimited("/definitely/not/here.csv", None, ',').unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
