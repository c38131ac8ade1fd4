//! Schema preview: one row type per sheet, with a primitive type per column
//! sampled from the first data row.

use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;

use crate::excel::CellValue;
use crate::extract::SheetTable;
use crate::utils::camel_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Boolean,
    Number,
    Date,
}

impl ColumnType {
    pub fn of(value: &CellValue) -> Self {
        match value {
            CellValue::Bool(_) => ColumnType::Boolean,
            CellValue::Int(_) | CellValue::Float(_) => ColumnType::Number,
            CellValue::DateTime(_) => ColumnType::Date,
            CellValue::Text(_) | CellValue::Empty => ColumnType::String,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Boolean => "boolean",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

pub fn row_type_name(sheet_name: &str) -> String {
    format!("{}Row", camel_case(sheet_name))
}

/// Column types taken from the first data row; all `string` when the sheet has no rows.
pub fn infer_columns(table: &SheetTable) -> Vec<Column> {
    let first_row = table.first_row();

    table
        .columns
        .iter()
        .map(|name| Column {
            name: name.clone(),
            column_type: first_row
                .and_then(|row| row.get(name))
                .map(ColumnType::of)
                .unwrap_or(ColumnType::String),
        })
        .collect()
}

fn row_type_line(table: &SheetTable) -> String {
    let fields = infer_columns(table)
        .iter()
        .map(|c| format!("{}: {}", c.name, c.column_type))
        .collect::<Vec<_>>()
        .join(" ");

    format!("{}: Row {{ {} }}", row_type_name(&table.name), fields)
}

pub fn print_metamodel<W: Write>(tables: &[SheetTable], out: &mut W) -> Result<()> {
    let mut text = String::from(
        "Spreadsheet {\n\
         \x20 Workbook {\n\
         \x20   enamespace: string\n\
         \x20   sheets: Sheet[]\n\
         \x20 }\n\
         \x20 Sheet {\n\
         \x20   enamespace: string\n\
         \x20   name: string\n\
         \x20   rows: Row[]\n\
         \x20 }\n\
         \x20 Row {\n\
         \x20   enamespace: string\n\
         \x20 }\n",
    );

    for table in tables {
        text.push_str("  ");
        text.push_str(&row_type_line(table));
        text.push('\n');
    }
    text.push_str("}\n");

    out.write_all(text.as_bytes())
        .context("Failed to write metamodel")?;
    out.flush().context("Failed to write metamodel")
}
