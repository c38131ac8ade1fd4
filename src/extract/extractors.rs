use anyhow::Result;

use crate::error::ImportError;
use crate::excel::{Sheet, Workbook};
use crate::extract::{RowMap, SheetTable};
use crate::utils::{cell_reference, index_to_col_name, lower_camel_case};

pub fn extract_columns(sheet: &Sheet) -> Result<Vec<String>, ImportError> {
    let mut columns = Vec::new();
    let mut col_idx = 1;

    while col_idx <= sheet.max_cols && !sheet.cell(1, col_idx).is_blank() {
        let text = sheet.cell(1, col_idx).text();
        let mut name = lower_camel_case(&text);
        if name.is_empty() {
            name = format!("column{}", index_to_col_name(col_idx));
        }
        log::debug!("{}!{}: {:?} -> {}", sheet.name, cell_reference((1, col_idx)), text, name);

        columns.push(name);
        col_idx += 1;
    }

    if columns.is_empty() {
        return Err(ImportError::NoColumns {
            sheet: sheet.name.clone(),
        });
    }

    Ok(columns)
}

// Stops at the first row whose first cell is empty; rows below it are never read.
pub fn extract_rows(sheet: &Sheet, columns: &[String]) -> Vec<RowMap> {
    let mut rows = Vec::new();
    let mut row_idx = 2;

    while row_idx <= sheet.max_rows && !sheet.cell(row_idx, 1).is_blank() {
        let mut row = RowMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            // Duplicate column names: the right-most cell wins.
            row.insert(column.clone(), sheet.cell(row_idx, i + 1).clone());
        }
        rows.push(row);
        row_idx += 1;
    }

    if row_idx <= sheet.max_rows {
        log::debug!(
            "{}: data ends at {}, {} row(s) below it are ignored",
            sheet.name,
            cell_reference((row_idx, 1)),
            sheet.max_rows - row_idx
        );
    }

    rows
}

pub fn extract_sheet(sheet: &Sheet) -> Result<SheetTable, ImportError> {
    let columns = extract_columns(sheet)?;
    let rows = extract_rows(sheet, &columns);

    Ok(SheetTable {
        name: sheet.name.clone(),
        columns,
        rows,
    })
}

pub fn extract_workbook(workbook: &Workbook) -> Result<Vec<SheetTable>> {
    let mut tables = Vec::with_capacity(workbook.sheets().len());

    for sheet in workbook.sheets() {
        let table = extract_sheet(sheet)?;
        log::info!(
            "Sheet '{}': {} column(s), {} row(s)",
            table.name,
            table.columns.len(),
            table.rows.len()
        );
        tables.push(table);
    }

    Ok(tables)
}
