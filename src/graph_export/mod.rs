mod cypher;
mod exporters;
mod sink;
mod types;

pub use cypher::{
    BASE_LABEL, NAMESPACE_PROPERTY, ROW_LABEL, SHEET_LABEL, WORKBOOK_LABEL, create_rows,
    create_sheet, create_workbook, quote_identifier, row_type_label,
};
pub use exporters::{write_workbook, write_workbook_atomic};
pub use sink::{GraphSink, GraphTransaction, Neo4jSink, Neo4jTransaction, TransactionalSink};
pub use types::{ExportSummary, Param, Statement};
