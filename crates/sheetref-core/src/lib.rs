pub mod cell;
pub mod column;
pub mod error;
pub mod indexer;
pub mod reference;
pub mod select;
pub mod sheet;
pub mod table;

pub use cell::{parse_cell_input, CellValue};
pub use column::{col_from_label, col_to_label};
pub use error::{ReferenceError, Result};
pub use indexer::{Indexer, SheetRefExt};
pub use reference::{resolve, Reference, SelectionDescriptor};
pub use select::{locate, select, Selection};
pub use sheet::Sheet;
pub use table::Table;

/// Selection produced from a [`Sheet`]
pub type SheetSelection = Selection<CellValue, Sheet>;
