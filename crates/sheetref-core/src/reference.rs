//! Reference parsing and resolution.
//!
//! A reference is `START_COL [START_ROW] [":" END_COL [END_ROW]]`, for example
//! `A1`, `B2:D9`, `C` or `A:B`. Parsing classifies the text into one of four
//! [`Reference`] shapes; resolving additionally checks every bound against
//! the table's current shape and yields a [`SelectionDescriptor`].
//!
//! ```
//! use sheetref_core::{resolve, SelectionDescriptor};
//!
//! let descriptor = resolve("B2:C4", (10, 5)).unwrap();
//! assert_eq!(
//!     descriptor,
//!     SelectionDescriptor {
//!         start_col: Some(1),
//!         start_row: Some(2),
//!         end_col: Some(2),
//!         end_row: Some(4),
//!     }
//! );
//! ```

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::column::{col_from_label, col_to_label};
use crate::error::{ReferenceError, Result};

fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(
            r"^(?<start_col>[A-Za-z]+)(?<start_row>[0-9]+)?(?::(?<end_col>[A-Za-z]+)(?<end_row>[0-9]+)?)?$",
        )
        .expect("reference regex must compile")
    })
}

/// A parsed reference, classified by shape.
///
/// Columns are 0-indexed; rows are the 1-based numbers written in the
/// reference.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reference {
    /// `B3`
    Cell { col: usize, row: usize },
    /// `A1:B3`
    CellRange {
        start_col: usize,
        start_row: usize,
        end_col: usize,
        end_row: usize,
    },
    /// `B`
    Column { col: usize },
    /// `A:B`
    ColumnRange { start_col: usize, end_col: usize },
}

impl Reference {
    /// Parse a reference without checking it against any table.
    pub fn parse(reference: &str) -> Result<Self> {
        let caps = reference_re()
            .captures(reference)
            .ok_or_else(|| ReferenceError::invalid_format(reference))?;

        let start_col = col_from_label(&caps["start_col"])?;
        let start_row = row_group(&caps, "start_row");
        let end_col = caps
            .name("end_col")
            .map(|m| col_from_label(m.as_str()))
            .transpose()?;
        let end_row = row_group(&caps, "end_row");

        let parsed = match (start_row, end_col, end_row) {
            (Some(row), None, None) => Reference::Cell {
                col: start_col,
                row,
            },
            (Some(start_row), Some(end_col), Some(end_row)) => Reference::CellRange {
                start_col,
                start_row,
                end_col,
                end_row,
            },
            (None, None, None) => Reference::Column { col: start_col },
            (None, Some(end_col), None) => Reference::ColumnRange { start_col, end_col },
            // Row given on one side of the colon only, e.g. `A1:B` or `A:B5`
            _ => return Err(ReferenceError::invalid_format(reference)),
        };

        tracing::trace!(reference, ?parsed, "parsed reference");
        Ok(parsed)
    }

    /// Check every bound against a table of shape `(n_rows, n_cols)`.
    ///
    /// Columns are checked before rows, start before end.
    pub fn validate(&self, shape: (usize, usize)) -> Result<SelectionDescriptor> {
        let descriptor = SelectionDescriptor::from(*self);
        let (n_rows, n_cols) = shape;

        for col in [descriptor.start_col, descriptor.end_col].into_iter().flatten() {
            check_col(col, n_cols)?;
        }
        for row in [descriptor.start_row, descriptor.end_row].into_iter().flatten() {
            check_row(row, n_rows)?;
        }

        Ok(descriptor)
    }
}

fn row_group(caps: &Captures<'_>, name: &str) -> Option<usize> {
    // Digits only, so the sole failure is overflow; saturate so the bounds
    // check reports it.
    caps.name(name)
        .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX))
}

fn check_col(col: usize, n_cols: usize) -> Result<()> {
    if col >= n_cols {
        return Err(ReferenceError::ColumnOutOfBounds {
            label: col_to_label(col),
            index: col,
            n_cols,
        });
    }
    Ok(())
}

fn check_row(row: usize, n_rows: usize) -> Result<()> {
    if row == 0 || row > n_rows {
        return Err(ReferenceError::RowOutOfBounds { row, n_rows });
    }
    Ok(())
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self> {
        Reference::parse(s)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Reference::Cell { col, row } => write!(f, "{}{}", col_to_label(col), row),
            Reference::CellRange {
                start_col,
                start_row,
                end_col,
                end_row,
            } => write!(
                f,
                "{}{}:{}{}",
                col_to_label(start_col),
                start_row,
                col_to_label(end_col),
                end_row
            ),
            Reference::Column { col } => write!(f, "{}", col_to_label(col)),
            Reference::ColumnRange { start_col, end_col } => {
                write!(f, "{}:{}", col_to_label(start_col), col_to_label(end_col))
            }
        }
    }
}

/// Normalized, validated bounds of a selection.
///
/// Columns are 0-indexed, rows are 1-based as written in the reference.
/// Absent fields mean "not given"; which fields are present decides the
/// selection shape.
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectionDescriptor {
    pub start_col: Option<usize>,
    pub start_row: Option<usize>,
    pub end_col: Option<usize>,
    pub end_row: Option<usize>,
}

impl From<Reference> for SelectionDescriptor {
    fn from(reference: Reference) -> Self {
        match reference {
            Reference::Cell { col, row } => SelectionDescriptor {
                start_col: Some(col),
                start_row: Some(row),
                ..Default::default()
            },
            Reference::CellRange {
                start_col,
                start_row,
                end_col,
                end_row,
            } => SelectionDescriptor {
                start_col: Some(start_col),
                start_row: Some(start_row),
                end_col: Some(end_col),
                end_row: Some(end_row),
            },
            Reference::Column { col } => SelectionDescriptor {
                start_col: Some(col),
                ..Default::default()
            },
            Reference::ColumnRange { start_col, end_col } => SelectionDescriptor {
                start_col: Some(start_col),
                end_col: Some(end_col),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for SelectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(
            f,
            "({}, {}, {}, {})",
            field(self.start_col),
            field(self.start_row),
            field(self.end_col),
            field(self.end_row)
        )
    }
}

/// Parse `reference` and validate it against a table of shape `(n_rows, n_cols)`.
pub fn resolve(reference: &str, shape: (usize, usize)) -> Result<SelectionDescriptor> {
    let descriptor = Reference::parse(reference)?.validate(shape)?;
    tracing::debug!(
        reference,
        n_rows = shape.0,
        n_cols = shape.1,
        %descriptor,
        "resolved reference"
    );
    Ok(descriptor)
}
