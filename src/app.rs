use anyhow::Result;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{ConnectionConfig, ConnectionOverrides};
use crate::excel;
use crate::extract;
use crate::graph_export::{self, ExportSummary, GraphSink, TransactionalSink};
use crate::metamodel;

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub file: PathBuf,
    pub name: Option<String>,
    pub metamodel: bool,
    pub transaction: bool,
    pub connection: ConnectionOverrides,
    pub config: Option<PathBuf>,
}

impl ImportOptions {
    // Falls back to the file name without extension.
    pub fn namespace(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.file
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Metamodel { sheets: usize },
    Imported(ExportSummary),
}

// `connect` runs only after every sheet has been extracted, and never in metamodel mode.
pub async fn run<S, F, Fut, W>(
    options: &ImportOptions,
    connect: F,
    out: &mut W,
) -> Result<RunOutcome>
where
    S: GraphSink + TransactionalSink,
    F: FnOnce(ConnectionConfig) -> Fut,
    Fut: Future<Output = Result<S>>,
    W: Write,
{
    let workbook = excel::open_workbook(&options.file)?;
    let tables = extract::extract_workbook(&workbook)?;

    if options.metamodel {
        metamodel::print_metamodel(&tables, out)?;
        return Ok(RunOutcome::Metamodel {
            sheets: tables.len(),
        });
    }

    let namespace = options.namespace();
    let config = ConnectionConfig::load(options.connection.clone(), options.config.as_deref())?;

    let mut sink = connect(config).await?;

    let summary = if options.transaction {
        graph_export::write_workbook_atomic(&sink, &tables, &namespace).await?
    } else {
        graph_export::write_workbook(&mut sink, &tables, &namespace).await?
    };

    log::info!(
        "Imported {} ({}): {} sheet(s), {} row(s), {} statement(s)",
        workbook.get_file_path(),
        namespace,
        summary.sheets,
        summary.rows,
        summary.statements
    );

    Ok(RunOutcome::Imported(summary))
}
