mod cell;
mod sheet;
mod workbook;

pub use cell::CellValue;
pub use sheet::Sheet;
pub use workbook::{Workbook, open_workbook};
