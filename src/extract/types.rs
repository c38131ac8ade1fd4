use indexmap::IndexMap;

use crate::excel::CellValue;

/// One data row: column name to cell value, in column order.
pub type RowMap = IndexMap<String, CellValue>;

/// The rows of one sheet, keyed by the column names found in its header row.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<RowMap>,
}

impl SheetTable {
    pub fn first_row(&self) -> Option<&RowMap> {
        self.rows.first()
    }
}
