//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `query <SQL>` | Run a query through the cache and print the result |
//! | `domain <NAME>` | Select from the analytics table mapped to a domain |
//! | `info <TABLE>` | Print catalog metadata of a table |
//! | `check` | Check the connection and locate the analytics dataset |
//! | `providers` | List registered warehouse providers and notifiers |

pub mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use wql_application::ports::registry::{list_notifier_providers, list_warehouse_providers};
use wql_application::use_cases::{ConnectionDiagnostics, DiagnosticsOptions};
use wql_domain::value_objects::QuerySpec;
use wql_infrastructure::config::ConfigLoader;
use wql_infrastructure::logging::{init_logging, log_config_loaded};
use wql_infrastructure::build_executor;

/// Command line interface for the Warehouse Query Layer
#[derive(Parser, Debug)]
#[command(name = "wql")]
#[command(about = "Warehouse Query Layer - cache-aware analytical queries")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output format of result tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text columns
    #[default]
    Table,
    /// JSON document
    Json,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a query and print the result
    Query {
        /// SQL text
        sql: String,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u64>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Select from the analytics table of a domain
    Domain {
        /// Domain name, e.g. revenue
        name: String,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u64>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print catalog metadata of a table
    Info {
        /// Table name, `dataset.table` or `project.dataset.table`
        table: String,
    },
    /// Check the connection and locate the analytics dataset
    Check {
        /// Candidate dataset; repeat to try several (defaults to the configured one)
        #[arg(long = "dataset")]
        datasets: Vec<String>,
        /// List datasets containing this text when no candidate matches
        #[arg(long)]
        pattern: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List registered providers
    Providers,
}

fn config_loader(path: Option<&Path>) -> ConfigLoader {
    match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    }
}

/// Run a parsed command line
///
/// Errors only when configuration cannot be loaded or wired.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Command::Providers) {
        print!(
            "{}",
            render::render_providers(&list_warehouse_providers(), &list_notifier_providers())
        );
        return Ok(());
    }

    let loader = config_loader(cli.config.as_deref());
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;
    log_config_loaded(loader.source_path().as_deref());
    let executor = build_executor(&config).context("Failed to build query executor")?;
    debug!(endpoint = %executor.endpoint(), "Executor ready");

    match cli.command {
        Command::Query { sql, limit, format } => {
            let spec = match limit {
                Some(limit) => QuerySpec::new(sql).with_limit(limit),
                None => QuerySpec::new(sql),
            };
            let table = executor.execute(&spec).await;
            print!("{}", render::render_result(&table, format)?);
        }
        Command::Domain {
            name,
            limit,
            format,
        } => {
            let table = executor.query_domain_table(&name, limit).await;
            print!("{}", render::render_result(&table, format)?);
        }
        Command::Info { table } => {
            let metadata = executor.get_table_metadata(&table).await;
            print!("{}", render::render_metadata(&table, metadata.as_ref()));
        }
        Command::Check {
            datasets,
            pattern,
            format,
        } => {
            let candidates = if datasets.is_empty() {
                vec![config.warehouse.dataset_id.clone()]
            } else {
                datasets
            };
            let mut options = DiagnosticsOptions::new(candidates);
            if let Some(pattern) = pattern {
                options = options.with_dataset_pattern(pattern);
            }
            let report = ConnectionDiagnostics::new(executor).run(&options).await;
            print!("{}", render::render_report(&report, format)?);
        }
        Command::Providers => {}
    }

    Ok(())
}
