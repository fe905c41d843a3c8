//! Warehouse Query Layer - Entry Point
//!
//! Exits non-zero only when configuration cannot be loaded or wired; query
//! failures print the empty table.

// Force-link wql-providers to ensure linkme registrations are included
extern crate wql_providers;

use clap::Parser;
use wql::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
