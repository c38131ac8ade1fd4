use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

use crate::excel::{CellValue, Sheet};

pub struct Workbook {
    sheets: Vec<Sheet>,
    file_path: String,
}

pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path_str = path.as_ref().to_string_lossy().to_string();

    let mut workbook = open_workbook_auto(&path)
        .with_context(|| format!("Unable to parse Excel file: {}", path_str))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .with_context(|| format!("Unable to read worksheet: {}", name))?;

        sheets.push(create_sheet_from_range(name, &range));
    }

    if sheets.is_empty() {
        anyhow::bail!("No worksheets found in file");
    }

    log::debug!("Read {} worksheet(s) from {}", sheets.len(), path_str);

    Ok(Workbook {
        sheets,
        file_path: path_str,
    })
}

fn create_sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    // Used ranges need not start at A1; cells() yields positions relative to start().
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    let (height, width) = range.get_size();

    let max_rows = if height == 0 { 0 } else { start_row + height };
    let max_cols = if width == 0 { 0 } else { start_col + width };

    let mut data = vec![vec![CellValue::Empty; max_cols + 1]; max_rows + 1];

    for (row_idx, col_idx, cell) in range.used_cells() {
        data[start_row + row_idx + 1][start_col + col_idx + 1] = CellValue::from(cell);
    }

    Sheet {
        name: name.to_string(),
        data,
        max_rows,
        max_cols,
    }
}

impl Workbook {
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn get_sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn get_file_path(&self) -> &str {
        &self.file_path
    }
}
