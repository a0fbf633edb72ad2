use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised while resolving a reference against a table
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceError {
    /// A column label contains something other than ASCII letters
    #[error("Malformed column label: {label:?}")]
    MalformedLabel { label: String },

    /// The reference does not match the grammar or one of the four shapes
    #[error("Incorrect index format: {reference:?}")]
    InvalidReferenceFormat { reference: String },

    /// A decoded column index is past the last column
    #[error("Column index out of bounds: {label} (index {index}, table has {n_cols} columns)")]
    ColumnOutOfBounds {
        label: String,
        index: usize,
        n_cols: usize,
    },

    /// A row number is zero or past the last row
    #[error("Row index out of bounds: {row} (table has {n_rows} rows)")]
    RowOutOfBounds { row: usize, n_rows: usize },
}

impl ReferenceError {
    pub(crate) fn invalid_format(reference: &str) -> Self {
        ReferenceError::InvalidReferenceFormat {
            reference: reference.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failing_bound() {
        let col = ReferenceError::ColumnOutOfBounds {
            label: "F".to_string(),
            index: 5,
            n_cols: 5,
        };
        assert!(col.to_string().starts_with("Column index out of bounds"));

        let row = ReferenceError::RowOutOfBounds { row: 11, n_rows: 10 };
        assert!(row.to_string().starts_with("Row index out of bounds"));

        let format = ReferenceError::invalid_format("1A");
        assert_eq!(format.to_string(), "Incorrect index format: \"1A\"");
    }
}
