use anyhow::Result;

use crate::error::ImportError;
use crate::extract::SheetTable;
use crate::graph_export::cypher::{create_rows, create_sheet, create_workbook};
use crate::graph_export::sink::{GraphSink, GraphTransaction, TransactionalSink};
use crate::graph_export::types::ExportSummary;

/// Write all sheets and the workbook node into the store.
///
/// Per sheet, rows are created in one bulk statement and then linked from
/// a new sheet node; the workbook node comes last. Each statement stands on
/// its own, so a failure part way leaves what was already written.
pub async fn write_workbook<S: GraphSink>(
    sink: &mut S,
    tables: &[SheetTable],
    namespace: &str,
) -> Result<ExportSummary> {
    if namespace.trim().is_empty() {
        return Err(ImportError::InvalidNamespace(namespace.to_string()).into());
    }

    let mut summary = ExportSummary::default();

    for table in tables {
        sink.run(create_rows(table, namespace)).await?;
        sink.run(create_sheet(&table.name, namespace)).await?;

        log::info!("Wrote sheet '{}' ({} rows)", table.name, table.rows.len());
        summary.sheets += 1;
        summary.rows += table.rows.len();
        summary.statements += 2;
    }

    sink.run(create_workbook(namespace)).await?;
    summary.statements += 1;

    Ok(summary)
}

/// Same as [`write_workbook`], but all statements share one transaction that
/// is rolled back on the first failure.
pub async fn write_workbook_atomic<S: TransactionalSink>(
    sink: &S,
    tables: &[SheetTable],
    namespace: &str,
) -> Result<ExportSummary> {
    let mut txn = sink.begin().await?;

    match write_workbook(&mut txn, tables, namespace).await {
        Ok(summary) => {
            txn.commit().await?;
            Ok(summary)
        }
        Err(e) => {
            log::warn!("Import failed, rolling back: {:#}", e);
            if let Err(rollback_err) = txn.rollback().await {
                log::error!("{:#}", rollback_err);
            }
            Err(e)
        }
    }
}
