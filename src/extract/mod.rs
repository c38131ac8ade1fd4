mod extractors;
mod types;

pub use extractors::{extract_columns, extract_rows, extract_sheet, extract_workbook};
pub use types::{RowMap, SheetTable};
