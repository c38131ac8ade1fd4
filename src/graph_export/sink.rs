use anyhow::{Context, Result};
use neo4rs::{BoltNull, BoltType, ConfigBuilder, Graph, Query, Txn, query};
use std::collections::HashMap;

use crate::config::ConnectionConfig;
use crate::excel::CellValue;
use crate::graph_export::types::{Param, Statement};

/// Something that executes Cypher statements, one at a time, in order.
#[allow(async_fn_in_trait)]
pub trait GraphSink {
    async fn run(&mut self, statement: Statement) -> Result<()>;
}

#[allow(async_fn_in_trait)]
pub trait GraphTransaction: GraphSink + Sized {
    async fn commit(self) -> Result<()>;
    async fn rollback(self) -> Result<()>;
}

/// A sink that can open a transaction; statements run through it stay invisible until commit.
#[allow(async_fn_in_trait)]
pub trait TransactionalSink {
    type Txn: GraphTransaction;

    async fn begin(&self) -> Result<Self::Txn>;
}

fn cell_to_bolt(value: &CellValue) -> BoltType {
    match value {
        CellValue::Empty => BoltType::Null(BoltNull),
        CellValue::Text(s) => s.clone().into(),
        CellValue::Bool(b) => (*b).into(),
        CellValue::Int(i) => (*i).into(),
        CellValue::Float(f) => (*f).into(),
        CellValue::DateTime(dt) => (*dt).into(),
    }
}

fn param_to_bolt(param: Param) -> BoltType {
    match param {
        Param::Text(s) => s.into(),
        Param::Rows(rows) => {
            let objects: Vec<HashMap<String, BoltType>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|(column, value)| (column.clone(), cell_to_bolt(value)))
                        .collect()
                })
                .collect();
            objects.into()
        }
    }
}

fn to_query(statement: Statement) -> Query {
    let mut q = query(&statement.cypher);
    for (key, param) in statement.params {
        q = q.param(&key, param_to_bolt(param));
    }
    q
}

// Each statement is committed on its own.
pub struct Neo4jSink {
    graph: Graph,
}

impl Neo4jSink {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(config.connection_uri.value.as_str())
            .user(config.username.value.as_str())
            .password(config.password.value.as_str())
            .build()
            .context("Failed to build neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .with_context(|| {
                format!("Failed to connect to neo4j at {}", config.connection_uri.value)
            })?;

        log::info!("Connected to {}", config.connection_uri.value);
        Ok(Self { graph })
    }
}

impl TransactionalSink for Neo4jSink {
    type Txn = Neo4jTransaction;

    async fn begin(&self) -> Result<Neo4jTransaction> {
        let txn = self
            .graph
            .start_txn()
            .await
            .context("Failed to start transaction")?;
        Ok(Neo4jTransaction { txn })
    }
}

impl GraphSink for Neo4jSink {
    async fn run(&mut self, statement: Statement) -> Result<()> {
        log::debug!("{}", statement.cypher);
        self.graph
            .run(to_query(statement))
            .await
            .context("Graph statement failed")
    }
}

pub struct Neo4jTransaction {
    txn: Txn,
}

impl GraphTransaction for Neo4jTransaction {
    async fn commit(self) -> Result<()> {
        self.txn.commit().await.context("Failed to commit transaction")
    }

    async fn rollback(self) -> Result<()> {
        self.txn
            .rollback()
            .await
            .context("Failed to roll back transaction")
    }
}

impl GraphSink for Neo4jTransaction {
    async fn run(&mut self, statement: Statement) -> Result<()> {
        log::debug!("{}", statement.cypher);
        self.txn
            .run(to_query(statement))
            .await
            .context("Graph statement failed")
    }
}
