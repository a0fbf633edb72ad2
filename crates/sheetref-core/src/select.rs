use serde::{Deserialize, Serialize};

use crate::column::col_to_label;
use crate::error::{ReferenceError, Result};
use crate::reference::{resolve, SelectionDescriptor};
use crate::table::Table;

/// Result of selecting a reference: one value, or a sub-table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Selection<V, T> {
    Scalar(V),
    Table(T),
}

impl<V, T> Selection<V, T> {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Selection::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&V> {
        match self {
            Selection::Scalar(v) => Some(v),
            Selection::Table(_) => None,
        }
    }

    pub fn into_table(self) -> Option<T> {
        match self {
            Selection::Table(t) => Some(t),
            Selection::Scalar(_) => None,
        }
    }
}

/// Extract the part of `table` described by `descriptor`.
///
/// Dispatch depends only on which fields are present:
///
/// 1. all four: rows `start_row..=end_row` (1-based), columns `start_col..=end_col`
/// 2. `start_col` and `start_row`: the single value at that cell
/// 3. `start_col` and `end_col`: every row, columns `start_col..=end_col`
/// 4. `start_col` only: every row of that one column
///
/// Every present field is bounds-checked against the table's current shape,
/// columns first. A reversed range selects nothing along that axis.
pub fn select<T: Table>(
    table: &T,
    descriptor: &SelectionDescriptor,
) -> Result<Selection<T::Value, T>> {
    let (n_rows, n_cols) = table.shape();
    check_bounds(descriptor, n_rows, n_cols)?;

    let selection = match *descriptor {
        SelectionDescriptor {
            start_col: Some(start_col),
            start_row: Some(start_row),
            end_col: Some(end_col),
            end_row: Some(end_row),
        } => Selection::Table(table.slice(
            start_row - 1..end_row,
            start_col..end_col.saturating_add(1),
        )),
        SelectionDescriptor {
            start_col: Some(col),
            start_row: Some(row),
            end_col: None,
            end_row: None,
        } => Selection::Scalar(cell_value(table, row, col)?),
        SelectionDescriptor {
            start_col: Some(start_col),
            start_row: None,
            end_col: Some(end_col),
            end_row: None,
        } => Selection::Table(table.slice(0..n_rows, start_col..end_col.saturating_add(1))),
        SelectionDescriptor {
            start_col: Some(col),
            start_row: None,
            end_col: None,
            end_row: None,
        } => Selection::Table(table.slice(0..n_rows, col..col.saturating_add(1))),
        _ => {
            return Err(ReferenceError::InvalidReferenceFormat {
                reference: descriptor.to_string(),
            })
        }
    };

    Ok(selection)
}

fn check_bounds(descriptor: &SelectionDescriptor, n_rows: usize, n_cols: usize) -> Result<()> {
    for col in [descriptor.start_col, descriptor.end_col].into_iter().flatten() {
        if col >= n_cols {
            return Err(column_out_of_bounds(col, n_cols));
        }
    }
    for row in [descriptor.start_row, descriptor.end_row].into_iter().flatten() {
        if row == 0 || row > n_rows {
            return Err(ReferenceError::RowOutOfBounds { row, n_rows });
        }
    }
    Ok(())
}

fn column_out_of_bounds(col: usize, n_cols: usize) -> ReferenceError {
    ReferenceError::ColumnOutOfBounds {
        label: col_to_label(col),
        index: col,
        n_cols,
    }
}

fn cell_value<T: Table>(table: &T, row: usize, col: usize) -> Result<T::Value> {
    table
        .value(row - 1, col)
        .ok_or_else(|| column_out_of_bounds(col, table.n_cols()))
}

/// Resolve `reference` against the table's current shape and select it.
pub fn locate<T: Table>(table: &T, reference: &str) -> Result<Selection<T::Value, T>> {
    let descriptor = resolve(reference, table.shape())?;
    select(table, &descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::reference::Reference;
    use crate::sheet::Sheet;
    use pretty_assertions::assert_eq;

    /// 5 rows x 3 columns, value at (r, c) is `r * 10 + c`
    fn grid() -> Sheet {
        Sheet::from_rows(
            "Grid",
            (0..5).map(|r| (0..3).map(move |c| CellValue::Number((r * 10 + c) as f64))),
        )
    }

    fn numbers(sheet: &Sheet) -> Vec<Vec<f64>> {
        sheet
            .rows()
            .map(|r| r.iter().map(|v| v.as_number().unwrap()).collect())
            .collect()
    }

    #[test]
    fn test_single_cell() {
        let sheet = grid();
        assert_eq!(locate(&sheet, "A1"), Ok(Selection::Scalar(CellValue::Number(0.0))));
        assert_eq!(locate(&sheet, "C5"), Ok(Selection::Scalar(CellValue::Number(42.0))));
    }

    #[test]
    fn test_cell_range() {
        let sheet = grid();
        let sub = locate(&sheet, "A1:B3").unwrap().into_table().unwrap();
        assert_eq!(sub.shape(), (3, 2));
        assert_eq!(
            numbers(&sub),
            vec![vec![0.0, 1.0], vec![10.0, 11.0], vec![20.0, 21.0]]
        );
    }

    #[test]
    fn test_single_column() {
        let sheet = grid();
        let col = locate(&sheet, "B").unwrap().into_table().unwrap();
        assert_eq!(col.shape(), (5, 1));
        assert_eq!(
            numbers(&col),
            vec![vec![1.0], vec![11.0], vec![21.0], vec![31.0], vec![41.0]]
        );
    }

    #[test]
    fn test_column_range() {
        let sheet = grid();
        let sub = locate(&sheet, "A:B").unwrap().into_table().unwrap();
        assert_eq!(sub.shape(), (5, 2));
        assert_eq!(numbers(&sub)[4], vec![40.0, 41.0]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let sheet = grid();
        let sub = locate(&sheet, "B3:A1").unwrap().into_table().unwrap();
        assert_eq!(sub.shape(), (0, 0));

        let sub = locate(&sheet, "C:A").unwrap().into_table().unwrap();
        assert_eq!(sub.shape(), (5, 0));
    }

    #[test]
    fn test_idempotent() {
        let sheet = grid();
        for reference in ["A1", "A1:B3", "B", "A:C"] {
            assert_eq!(locate(&sheet, reference), locate(&sheet, reference));
        }
        assert_eq!(sheet, grid());
    }

    #[test]
    fn test_errors_propagate() {
        let sheet = grid();
        assert!(matches!(
            locate(&sheet, "D1"),
            Err(ReferenceError::ColumnOutOfBounds { index: 3, n_cols: 3, .. })
        ));
        assert!(matches!(
            locate(&sheet, "A6"),
            Err(ReferenceError::RowOutOfBounds { row: 6, n_rows: 5 })
        ));
        assert!(matches!(
            locate(&sheet, "A1:"),
            Err(ReferenceError::InvalidReferenceFormat { .. })
        ));
    }

    #[test]
    fn test_unrecognized_descriptor_is_rejected() {
        let sheet = grid();
        let descriptor = SelectionDescriptor {
            start_col: Some(0),
            start_row: Some(1),
            end_col: Some(1),
            end_row: None,
        };
        assert_eq!(
            select(&sheet, &descriptor),
            Err(ReferenceError::InvalidReferenceFormat {
                reference: "(0, 1, 1, -)".to_string()
            })
        );
        assert!(select(&sheet, &SelectionDescriptor::default()).is_err());
    }

    #[test]
    fn test_hand_built_descriptor_is_checked() {
        let sheet = grid();
        let descriptor = SelectionDescriptor::from(Reference::Cell { col: 0, row: 0 });
        assert!(matches!(
            select(&sheet, &descriptor),
            Err(ReferenceError::RowOutOfBounds { row: 0, .. })
        ));
        let descriptor = SelectionDescriptor::from(Reference::Cell { col: 7, row: 1 });
        assert!(matches!(
            select(&sheet, &descriptor),
            Err(ReferenceError::ColumnOutOfBounds { index: 7, .. })
        ));
    }

    #[test]
    fn test_hand_built_ranges_are_checked_like_cells() {
        let sheet = grid();
        let zero_row = SelectionDescriptor::from(Reference::CellRange {
            start_col: 0,
            start_row: 0,
            end_col: 1,
            end_row: 2,
        });
        assert_eq!(
            select(&sheet, &zero_row),
            Err(ReferenceError::RowOutOfBounds { row: 0, n_rows: 5 })
        );

        let past_end = SelectionDescriptor::from(Reference::CellRange {
            start_col: 0,
            start_row: 1,
            end_col: 1,
            end_row: 9,
        });
        assert_eq!(
            select(&sheet, &past_end),
            Err(ReferenceError::RowOutOfBounds { row: 9, n_rows: 5 })
        );

        let wide = SelectionDescriptor::from(Reference::ColumnRange {
            start_col: 0,
            end_col: 4,
        });
        assert!(matches!(
            select(&sheet, &wide),
            Err(ReferenceError::ColumnOutOfBounds { index: 4, n_cols: 3, .. })
        ));
    }

    #[test]
    fn test_shape_is_read_per_call() {
        let mut sheet = grid();
        assert!(locate(&sheet, "A6").is_err());
        sheet.push_row(vec![CellValue::from("new")]);
        assert_eq!(
            locate(&sheet, "A6"),
            Ok(Selection::Scalar(CellValue::Text("new".to_string())))
        );
    }
}
