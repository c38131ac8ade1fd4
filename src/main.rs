use anyhow::{Context, Result};
use clap::Parser;
use serde::{Serialize, Serializer};
use std::io::Write;
use std::path::PathBuf;

use sheet_graph::app::{self, ImportOptions};
use sheet_graph::config::ConnectionOverrides;
use sheet_graph::graph_export::Neo4jSink;

#[derive(Parser, Serialize)]
#[command(author, version, about, long_about = None)]
#[serde(rename_all = "camelCase")]
struct Cli {
    /// Excel file path
    #[arg(long, short = 'f')]
    file: PathBuf,

    /// Namespace tagging every node of this import (defaults to the file name)
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Graph store URI, e.g. neo4j://localhost:7687
    #[arg(long = "connectionUri", short = 'c')]
    connection_uri: Option<String>,

    /// Graph store user
    #[arg(long, short = 'u')]
    username: Option<String>,

    /// Graph store password
    #[arg(long, short = 'p')]
    #[serde(serialize_with = "mask")]
    password: Option<String>,

    /// Print the inferred schema instead of writing to the graph store
    #[arg(long, short = 'm')]
    metamodel: bool,

    /// Run all writes in one transaction, rolled back on failure
    #[arg(long, short = 't')]
    transaction: bool,

    /// TOML file with a [neo4j] section (connection_uri, username, password)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn mask<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_some("********"),
        None => serializer.serialize_none(),
    }
}

impl From<Cli> for ImportOptions {
    fn from(cli: Cli) -> Self {
        ImportOptions {
            file: cli.file,
            name: cli.name,
            metamodel: cli.metamodel,
            transaction: cli.transaction,
            connection: ConnectionOverrides {
                connection_uri: cli.connection_uri,
                username: cli.username,
                password: cli.password,
            },
            config: cli.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    println!(
        "{}",
        serde_json::to_string_pretty(&cli).context("Failed to serialize options")?
    );

    let options = ImportOptions::from(cli);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    app::run(
        &options,
        |config| async move { Neo4jSink::connect(&config).await },
        &mut out,
    )
    .await?;

    out.flush().context("Failed to flush stdout")
}
