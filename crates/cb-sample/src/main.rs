//! cb-sample: command-line harness around the blockchain connector.

use anyhow::{Context, Result};
use cb_connector::logging::init_tracing;
use cb_connector::{Connector, ConnectorContext, ConnectorOptions, DefinitionUid, Record};
use cb_core::record::{into_record, into_records};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cb-sample", version, about)]
struct Args {
    /// JSON options file; defaults plus CB_* environment overrides otherwise
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every definition with its credential fields
    Definitions,
    /// Probe the connection a definition + config would make
    Test {
        #[arg(long)]
        uid: DefinitionUid,
        /// Connection config (JSON object file)
        #[arg(long)]
        config: PathBuf,
    },
    /// Run a batch of input records through a connection
    Execute {
        #[arg(long)]
        uid: DefinitionUid,
        /// Connection config (JSON object file)
        #[arg(long)]
        config: PathBuf,
        /// Input records (JSON array file)
        #[arg(long)]
        inputs: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => ConnectorOptions::from_file(path)?,
        None => ConnectorOptions::from_env(),
    };
    tracing::debug!("Request timeout {:?}", options.request_timeout());
    let context = ConnectorContext::new();
    let connector = context.try_init(&options)?;

    match args.command {
        Command::Definitions => {
            for definition in connector.list_definitions() {
                let fields = connector.list_credential_fields(definition.id())?;
                println!(
                    "# {} ({}, {} / {})",
                    definition.title(),
                    definition.id(),
                    definition.vendor(),
                    definition.connector_type()
                );
                let entry = json!({
                    "definition": definition.spec(),
                    "credential_fields": fields,
                });
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
        }
        Command::Test { uid, config } => {
            let config = read_record(&config)?;
            let state = connector.test(uid, &config).await;
            println!("{state}");
            anyhow::ensure!(state.is_connected(), "connection test for {uid} failed");
        }
        Command::Execute {
            uid,
            config,
            inputs,
        } => {
            let config = read_record(&config)?;
            let inputs = into_records(read_json(&inputs)?)?;
            let execution = connector.create_execution(uid, &config)?;
            tracing::info!(
                "Executing {} record(s) with {} ({})",
                inputs.len(),
                execution.definition_uid(),
                execution.task()
            );

            let outputs = execution.execute(inputs).await?;
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn read_record(path: &Path) -> Result<Record> {
    Ok(into_record(read_json(path)?)?)
}
