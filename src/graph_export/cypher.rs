use indexmap::IndexSet;
use std::borrow::Cow;

use crate::extract::SheetTable;
use crate::graph_export::types::{Param, Statement};
use crate::metamodel::row_type_name;

pub const BASE_LABEL: &str = "NeoCore__Object";
pub const ROW_LABEL: &str = "Spreadsheet__Row";
pub const SHEET_LABEL: &str = "Spreadsheet__Sheet";
pub const WORKBOOK_LABEL: &str = "Spreadsheet__Workbook";
pub const LABEL_PREFIX: &str = "Spreadsheet__";

pub const NAMESPACE_PROPERTY: &str = "enamespace";
pub const NAMESPACE_PARAM: &str = "modelName";
pub const ROWS_RELATIONSHIP: &str = "rows";
pub const SHEETS_RELATIONSHIP: &str = "sheets";

// e.g. Spreadsheet__TasksRow
pub fn row_type_label(sheet_name: &str) -> String {
    format!("{}{}", LABEL_PREFIX, row_type_name(sheet_name))
}

pub fn quote_identifier(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let plain = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("`{}`", name.replace('`', "``")))
    }
}

fn label_list(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|l| quote_identifier(l))
        .collect::<Vec<_>>()
        .join(":")
}

pub fn create_rows(table: &SheetTable, namespace: &str) -> Statement {
    let row_type = row_type_label(&table.name);
    let labels = label_list(&[BASE_LABEL, ROW_LABEL, row_type.as_str()]);

    let mut cypher = format!(
        "UNWIND $objects AS object\nCREATE (n:{} {{{}: ${}}})",
        labels, NAMESPACE_PROPERTY, NAMESPACE_PARAM
    );

    let columns: IndexSet<&str> = table.columns.iter().map(String::as_str).collect();
    if !columns.is_empty() {
        let assignments = columns
            .iter()
            .map(|c| {
                let key = quote_identifier(c);
                format!("n.{} = object.{}", key, key)
            })
            .collect::<Vec<_>>()
            .join(", ");
        cypher.push_str("\nSET ");
        cypher.push_str(&assignments);
    }

    Statement::new(cypher)
        .param(NAMESPACE_PARAM, Param::Text(namespace.to_string()))
        .param("objects", Param::Rows(table.rows.clone()))
}

pub fn create_sheet(sheet_name: &str, namespace: &str) -> Statement {
    let cypher = format!(
        "CREATE (s:{} {{{ns}: ${param}, name: $sheet}})\n\
         WITH s\n\
         MATCH (r:{} {{{ns}: ${param}}})\n\
         CREATE (s)-[:{}]->(r)",
        label_list(&[BASE_LABEL, SHEET_LABEL]),
        quote_identifier(&row_type_label(sheet_name)),
        ROWS_RELATIONSHIP,
        ns = NAMESPACE_PROPERTY,
        param = NAMESPACE_PARAM,
    );

    Statement::new(cypher)
        .param(NAMESPACE_PARAM, Param::Text(namespace.to_string()))
        .param("sheet", Param::Text(sheet_name.to_string()))
}

pub fn create_workbook(namespace: &str) -> Statement {
    let cypher = format!(
        "CREATE (w:{} {{{ns}: ${param}}})\n\
         WITH w\n\
         MATCH (s:{} {{{ns}: ${param}}})\n\
         CREATE (w)-[:{}]->(s)",
        label_list(&[BASE_LABEL, WORKBOOK_LABEL]),
        SHEET_LABEL,
        SHEETS_RELATIONSHIP,
        ns = NAMESPACE_PROPERTY,
        param = NAMESPACE_PARAM,
    );

    Statement::new(cypher).param(NAMESPACE_PARAM, Param::Text(namespace.to_string()))
}
