use crate::error::Result;
use crate::select::{locate, Selection};
use crate::table::Table;

/// Reference-based accessor over a borrowed table
///
/// ```
/// use sheetref_core::{CellValue, SheetRefExt, Sheet};
///
/// let sheet = Sheet::from_rows("Demo", [[1.0, 2.0], [3.0, 4.0]]);
/// let value = sheet.excel().get("B2").unwrap();
/// assert_eq!(value.as_scalar(), Some(&CellValue::Number(4.0)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Indexer<'a, T> {
    table: &'a T,
}

impl<'a, T: Table> Indexer<'a, T> {
    pub fn new(table: &'a T) -> Self {
        Self { table }
    }

    /// Select `reference` from the table as it is now
    pub fn get(&self, reference: &str) -> Result<Selection<T::Value, T>> {
        locate(self.table, reference)
    }

    /// The underlying table
    pub fn table(&self) -> &'a T {
        self.table
    }
}

/// Adds [`excel`](SheetRefExt::excel) to every [`Table`]
pub trait SheetRefExt: Table + Sized {
    fn excel(&self) -> Indexer<'_, Self> {
        Indexer::new(self)
    }
}

impl<T: Table> SheetRefExt for T {}
