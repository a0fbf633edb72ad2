use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::cell::{parse_cell_input, CellValue};
use crate::column::col_to_label;
use crate::table::{clamp_range, Table};

/// A dense, row-major in-memory table of cell values
///
/// Rows are padded with [`CellValue::Empty`] so every row has the same width.
/// Deserialized sheets are re-padded the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSheet")]
pub struct Sheet {
    /// Sheet name (e.g. the source file stem)
    pub name: String,
    /// Optional column headers, one per column
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<Vec<String>>,
    rows: Vec<Vec<CellValue>>,
    n_cols: usize,
}

/// Serialized form of a [`Sheet`]; padding is rebuilt on conversion
#[derive(Deserialize)]
struct RawSheet {
    #[serde(default)]
    name: String,
    #[serde(default)]
    headers: Option<Vec<String>>,
    #[serde(default)]
    rows: Vec<Vec<CellValue>>,
    #[serde(default)]
    n_cols: usize,
}

impl From<RawSheet> for Sheet {
    fn from(raw: RawSheet) -> Self {
        let mut sheet = Sheet::new(raw.name);
        sheet.widen(raw.n_cols);
        for row in raw.rows {
            sheet.push_row(row);
        }
        match raw.headers {
            Some(headers) => sheet.with_headers(headers),
            None => sheet,
        }
    }
}

impl Sheet {
    /// Create a new empty sheet with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a sheet from rows of values, padding short rows
    pub fn from_rows<R, V>(name: impl Into<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut sheet = Sheet::new(name);
        for row in rows {
            sheet.push_row(row.into_iter().map(Into::into).collect());
        }
        sheet
    }

    /// Build a sheet from raw text fields, classifying each one
    pub fn from_text_rows<R, S>(name: impl Into<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sheet = Sheet::new(name);
        for row in rows {
            sheet.push_row(row.into_iter().map(|s| parse_cell_input(s.as_ref())).collect());
        }
        sheet
    }

    /// Attach column headers, widening the sheet if there are more headers than columns
    pub fn with_headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        let mut headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if headers.len() > self.n_cols {
            self.widen(headers.len());
        }
        headers.resize_with(self.n_cols, String::new);
        self.headers = Some(headers);
        self
    }

    /// Append a row, padding it (or every existing row) to a common width
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        if row.len() > self.n_cols {
            self.widen(row.len());
        }
        row.resize(self.n_cols, CellValue::Empty);
        self.rows.push(row);
    }

    fn widen(&mut self, n_cols: usize) {
        self.n_cols = n_cols;
        for row in &mut self.rows {
            row.resize(n_cols, CellValue::Empty);
        }
        if let Some(headers) = &mut self.headers {
            headers.resize_with(n_cols, String::new);
        }
    }

    /// Column headers, if the sheet has them
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Display name of a column: its header when present, else its label
    pub fn column_name(&self, col: usize) -> String {
        match self.headers.as_ref().and_then(|h| h.get(col)) {
            Some(header) if !header.is_empty() => header.clone(),
            _ => col_to_label(col),
        }
    }

    /// Get a reference to the value at a 0-indexed position
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Get one row (0-indexed)
    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl Table for Sheet {
    type Value = CellValue;

    fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.n_cols)
    }

    fn value(&self, row: usize, col: usize) -> Option<CellValue> {
        self.get(row, col).cloned()
    }

    fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        let rows = clamp_range(rows, self.rows.len());
        let cols = clamp_range(cols, self.n_cols);

        Sheet {
            name: self.name.clone(),
            headers: self.headers.as_ref().map(|h| h[cols.clone()].to_vec()),
            rows: self.rows[rows]
                .iter()
                .map(|r| r[cols.clone()].to_vec())
                .collect(),
            n_cols: cols.len(),
        }
    }
}
