//! End-to-end tests: real .xlsx files written with rust_xlsxwriter, read back
//! through the importer, with the graph store replaced by a recorder.

use anyhow::Result;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tempfile::NamedTempFile;

use sheet_graph::app::{self, ImportOptions, RunOutcome};
use sheet_graph::error::ImportError;
use sheet_graph::excel::{CellValue, open_workbook};
use sheet_graph::extract::extract_workbook;
use sheet_graph::graph_export::{
    GraphSink, GraphTransaction, Neo4jSink, Param, Statement, TransactionalSink, write_workbook,
};
use sheet_graph::metamodel::print_metamodel;

mod fixtures {
    use super::*;

    pub fn write<F>(build: F) -> NamedTempFile
    where
        F: FnOnce(&mut Workbook) -> Result<(), XlsxError>,
    {
        let file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .expect("create temp file");
        let mut workbook = Workbook::new();
        build(&mut workbook).expect("build workbook");
        workbook.save(file.path()).expect("save workbook");
        file
    }

    /// Sheet "Tasks" with header ["Task Name", "Done"] and one row.
    pub fn tasks() -> NamedTempFile {
        write(|workbook| {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Tasks")?;
            sheet.write_string(0, 0, "Task Name")?;
            sheet.write_string(0, 1, "Done")?;
            sheet.write_string(1, 0, "Wash dishes")?;
            sheet.write_boolean(1, 1, true)?;
            Ok(())
        })
    }
}

#[derive(Default)]
struct Recorder {
    statements: Vec<Statement>,
}

impl GraphSink for Recorder {
    async fn run(&mut self, statement: Statement) -> Result<()> {
        self.statements.push(statement);
        Ok(())
    }
}

#[tokio::test]
async fn tasks_sheet_becomes_one_bulk_create() {
    let file = fixtures::tasks();
    let workbook = open_workbook(file.path()).unwrap();
    let tables = extract_workbook(&workbook).unwrap();

    let mut sink = Recorder::default();
    let summary = write_workbook(&mut sink, &tables, "ns").await.unwrap();

    assert_eq!(summary.rows, 1);
    assert_eq!(sink.statements.len(), 3);

    let creates: Vec<&Statement> = sink
        .statements
        .iter()
        .filter(|s| s.cypher.starts_with("UNWIND"))
        .collect();
    assert_eq!(creates.len(), 1);

    let create = creates[0];
    assert!(create.cypher.contains(
        "(n:NeoCore__Object:Spreadsheet__Row:Spreadsheet__TasksRow {enamespace: $modelName})"
    ));
    assert!(create.cypher.contains("n.taskName = object.taskName"));
    assert!(create.cypher.contains("n.done = object.done"));
    assert_eq!(create.get("modelName"), Some(&Param::Text("ns".to_string())));

    let Some(Param::Rows(rows)) = create.get("objects") else {
        panic!("objects parameter missing");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["taskName"], CellValue::Text("Wash dishes".to_string()));
    assert_eq!(rows[0]["done"], CellValue::Bool(true));
}

#[test]
fn metamodel_preview_for_tasks() {
    let file = fixtures::tasks();
    let workbook = open_workbook(file.path()).unwrap();
    let tables = extract_workbook(&workbook).unwrap();

    let mut out = Vec::new();
    print_metamodel(&tables, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("TasksRow: Row { taskName: string done: boolean }"));
}

#[test]
fn empty_header_row_fails_before_any_write() {
    let file = fixtures::write(|workbook| {
        let sheet = workbook.add_worksheet();
        sheet.set_name("NoHeader")?;
        sheet.write_string(1, 0, "orphan")?;
        Ok(())
    });

    let workbook = open_workbook(file.path()).unwrap();
    let err = extract_workbook(&workbook).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ImportError>(),
        Some(&ImportError::NoColumns {
            sheet: "NoHeader".to_string()
        })
    );
}

#[test]
fn extraction_stops_at_first_blank_row() {
    let file = fixtures::write(|workbook| {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Items")?;
        sheet.write_string(0, 0, "Item")?;
        sheet.write_string(0, 1, "Qty")?;
        sheet.write_string(1, 0, "apple")?;
        sheet.write_number(1, 1, 3.0)?;
        sheet.write_string(2, 0, "pear")?;
        sheet.write_number(2, 1, 1.5)?;
        // Row 4 left blank in column A.
        sheet.write_number(3, 1, 9.0)?;
        sheet.write_string(4, 0, "lost")?;
        Ok(())
    });

    let workbook = open_workbook(file.path()).unwrap();
    let tables = extract_workbook(&workbook).unwrap();

    assert_eq!(tables[0].columns, vec!["item", "qty"]);
    assert_eq!(tables[0].rows.len(), 2);
    assert_eq!(tables[0].rows[0]["qty"], CellValue::Float(3.0));
    assert_eq!(tables[0].rows[1]["item"], CellValue::Text("pear".to_string()));
}

#[test]
fn sheets_keep_file_order_and_header_only_sheets_are_strings() {
    let file = fixtures::write(|workbook| {
        let first = workbook.add_worksheet();
        first.set_name("Open Items")?;
        first.write_string(0, 0, "Title")?;
        first.write_string(0, 1, "Estimate")?;

        let second = workbook.add_worksheet();
        second.set_name("Budget")?;
        second.write_string(0, 0, "Line")?;
        second.write_string(1, 0, "rent")?;
        Ok(())
    });

    let workbook = open_workbook(file.path()).unwrap();
    assert_eq!(workbook.get_sheet_names(), vec!["Open Items", "Budget"]);

    let tables = extract_workbook(&workbook).unwrap();
    let mut out = Vec::new();
    print_metamodel(&tables, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let open = text.find("OpenItemsRow: Row { title: string estimate: string }");
    let budget = text.find("BudgetRow: Row { line: string }");
    assert!(open.is_some());
    assert!(budget.is_some());
    assert!(open < budget);
}

#[tokio::test]
async fn every_sheet_is_linked_by_namespace() {
    let file = fixtures::write(|workbook| {
        for name in ["One", "Two"] {
            let sheet = workbook.add_worksheet();
            sheet.set_name(name)?;
            sheet.write_string(0, 0, "Key")?;
            sheet.write_string(1, 0, name)?;
        }
        Ok(())
    });

    let workbook = open_workbook(file.path()).unwrap();
    let tables = extract_workbook(&workbook).unwrap();
    let mut sink = Recorder::default();
    write_workbook(&mut sink, &tables, "model-1").await.unwrap();

    let sheet_names: Vec<&Param> = sink
        .statements
        .iter()
        .filter_map(|s| s.get("sheet"))
        .collect();
    assert_eq!(
        sheet_names,
        vec![&Param::Text("One".into()), &Param::Text("Two".into())]
    );
    assert!(
        sink.statements
            .iter()
            .all(|s| s.get("modelName") == Some(&Param::Text("model-1".into())))
    );
    assert!(
        sink.statements
            .last()
            .is_some_and(|s| s.cypher.contains("[:sheets]"))
    );
}

#[test]
fn unreadable_file_reports_path() {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let err = open_workbook(file.path()).err().expect("empty file must not parse");
    assert!(format!("{:#}", err).contains("Unable to parse Excel file"));
}

// Shared log so statements stay visible after the sink is moved into `app::run`.
#[derive(Default)]
struct StoreLog {
    statements: Vec<Statement>,
    commits: usize,
}

struct SharedStore {
    log: Rc<RefCell<StoreLog>>,
}

impl GraphSink for SharedStore {
    async fn run(&mut self, statement: Statement) -> Result<()> {
        self.log.borrow_mut().statements.push(statement);
        Ok(())
    }
}

impl GraphTransaction for SharedStore {
    async fn commit(self) -> Result<()> {
        self.log.borrow_mut().commits += 1;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        Ok(())
    }
}

impl TransactionalSink for SharedStore {
    type Txn = SharedStore;

    async fn begin(&self) -> Result<SharedStore> {
        Ok(SharedStore {
            log: Rc::clone(&self.log),
        })
    }
}

fn options_for(file: &NamedTempFile) -> ImportOptions {
    ImportOptions {
        file: file.path().to_path_buf(),
        name: Some("ns".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn metamodel_mode_never_connects() {
    let file = fixtures::tasks();
    let options = ImportOptions {
        metamodel: true,
        ..options_for(&file)
    };
    let connects = Cell::new(0);
    let mut out = Vec::new();

    let outcome = app::run(
        &options,
        |_config| {
            connects.set(connects.get() + 1);
            async { Err::<Neo4jSink, _>(anyhow::anyhow!("no store in tests")) }
        },
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(outcome, RunOutcome::Metamodel { sheets: 1 });
    assert_eq!(connects.get(), 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("TasksRow: Row { taskName: string done: boolean }"));
}

#[tokio::test]
async fn missing_header_fails_before_connecting() {
    let file = fixtures::write(|workbook| {
        let sheet = workbook.add_worksheet();
        sheet.set_name("NoHeader")?;
        sheet.write_string(2, 0, "orphan")?;
        Ok(())
    });
    let connects = Cell::new(0);
    let mut out = Vec::new();

    let err = app::run(
        &options_for(&file),
        |_config| {
            connects.set(connects.get() + 1);
            async { Err::<Neo4jSink, _>(anyhow::anyhow!("no store in tests")) }
        },
        &mut out,
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ImportError>(),
        Some(&ImportError::NoColumns {
            sheet: "NoHeader".to_string()
        })
    );
    assert_eq!(connects.get(), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn import_connects_once_and_writes_all_phases() {
    let file = fixtures::tasks();
    let log = Rc::new(RefCell::new(StoreLog::default()));
    let connects = Cell::new(0);
    let mut out = Vec::new();

    let outcome = app::run(
        &options_for(&file),
        |_config| {
            connects.set(connects.get() + 1);
            let store = SharedStore {
                log: Rc::clone(&log),
            };
            async move { Ok(store) }
        },
        &mut out,
    )
    .await
    .unwrap();

    let RunOutcome::Imported(summary) = outcome else {
        panic!("expected an import, got {:?}", outcome);
    };
    assert_eq!(summary.rows, 1);
    assert_eq!(connects.get(), 1);
    assert_eq!(log.borrow().statements.len(), 3);
    assert_eq!(log.borrow().commits, 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn transaction_flag_commits_the_whole_import() {
    let file = fixtures::tasks();
    let options = ImportOptions {
        transaction: true,
        ..options_for(&file)
    };
    let log = Rc::new(RefCell::new(StoreLog::default()));

    app::run(
        &options,
        |_config| {
            let store = SharedStore {
                log: Rc::clone(&log),
            };
            async move { Ok(store) }
        },
        &mut Vec::<u8>::new(),
    )
    .await
    .unwrap();

    assert_eq!(log.borrow().statements.len(), 3);
    assert_eq!(log.borrow().commits, 1);
}
