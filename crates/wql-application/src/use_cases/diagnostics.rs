//! Connection Diagnostics
//!
//! Operator-facing check of a warehouse endpoint: can we connect, which
//! dataset actually holds the analytics tables, and how many rows each
//! configured table has.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use wql_domain::error::QueryFailure;
use wql_domain::value_objects::{EndpointIdentity, QuerySpec, ResultTable};

use crate::use_cases::query_executor::QueryExecutor;

/// Suffix shared by the analytics tables
pub const DEFAULT_TABLE_SUFFIX: &str = "analytics_obt";

/// Tables listed per discovered dataset
const DISCOVERY_LIMIT: u64 = 5;

/// What to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsOptions {
    /// Datasets tried in order; the first with analytics tables wins
    pub candidate_datasets: Vec<String>,
    /// Table name suffix that marks an analytics table
    pub table_suffix: String,
    /// Substring used to list datasets when discovery finds nothing
    pub dataset_pattern: Option<String>,
}

impl DiagnosticsOptions {
    /// Check the given datasets with the default table suffix
    pub fn new<I, S>(candidate_datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidate_datasets: candidate_datasets.into_iter().map(Into::into).collect(),
            table_suffix: DEFAULT_TABLE_SUFFIX.to_string(),
            dataset_pattern: None,
        }
    }

    /// Override the table suffix
    pub fn with_table_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.table_suffix = suffix.into();
        self
    }

    /// List matching datasets when discovery finds nothing
    pub fn with_dataset_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.dataset_pattern = Some(pattern.into());
        self
    }
}

/// Row count check of one configured analytics table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCheck {
    /// Logical domain
    pub domain: String,
    /// Physical table name
    pub table: String,
    /// Row count, when the table could be read
    pub row_count: Option<i64>,
    /// Failure detail otherwise
    pub error: Option<String>,
}

/// Outcome of a diagnostics run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsReport {
    /// Configured endpoint
    pub endpoint: EndpointIdentity,
    /// Whether a connection handle could be built
    pub connected: bool,
    /// Connection failure detail
    pub connection_error: Option<String>,
    /// First candidate dataset holding analytics tables
    pub discovered_dataset: Option<String>,
    /// Analytics tables seen in the discovered dataset
    pub discovered_tables: Vec<String>,
    /// Per-table row counts in the discovered dataset
    pub table_checks: Vec<TableCheck>,
    /// Datasets matching the pattern, listed when discovery found nothing
    pub matching_datasets: Vec<String>,
}

impl DiagnosticsReport {
    fn disconnected(endpoint: EndpointIdentity, detail: String) -> Self {
        Self {
            endpoint,
            connected: false,
            connection_error: Some(detail),
            discovered_dataset: None,
            discovered_tables: Vec::new(),
            table_checks: Vec::new(),
            matching_datasets: Vec::new(),
        }
    }

    /// Whether the discovered dataset differs from the configured one
    pub fn dataset_mismatch(&self) -> bool {
        self.discovered_dataset
            .as_deref()
            .is_some_and(|dataset| dataset != self.endpoint.dataset_id)
    }

    /// Whether every configured table answered with a row count
    pub fn all_tables_readable(&self) -> bool {
        !self.table_checks.is_empty() && self.table_checks.iter().all(|c| c.row_count.is_some())
    }
}

/// Runs diagnostics through an executor
pub struct ConnectionDiagnostics {
    executor: Arc<QueryExecutor>,
}

impl ConnectionDiagnostics {
    /// Create diagnostics over an executor
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Check the endpoint
    pub async fn run(&self, options: &DiagnosticsOptions) -> DiagnosticsReport {
        let endpoint = self.executor.endpoint().clone();
        if self.executor.get_connection().await.is_none() {
            return DiagnosticsReport::disconnected(
                endpoint,
                format!("Failed to connect to {}", self.executor.provider_name()),
            );
        }

        let mut report = DiagnosticsReport {
            endpoint,
            connected: true,
            connection_error: None,
            discovered_dataset: None,
            discovered_tables: Vec::new(),
            table_checks: Vec::new(),
            matching_datasets: Vec::new(),
        };

        for dataset in &options.candidate_datasets {
            match self
                .executor
                .try_execute_unreported(&analytics_tables_query(
                    &report.endpoint.project_id,
                    dataset,
                    &options.table_suffix,
                ))
                .await
            {
                Ok(table) if !table.is_empty() => {
                    info!(dataset = %dataset, tables = table.row_count(), "Analytics tables found");
                    report.discovered_tables = string_column(&table, "table_name");
                    report.discovered_dataset = Some(dataset.clone());
                    break;
                }
                Ok(_) => debug!(dataset = %dataset, "Dataset has no analytics tables"),
                Err(failure) => debug!(dataset = %dataset, error = %failure, "Dataset not accessible"),
            }
        }

        match report.discovered_dataset.clone() {
            Some(dataset) => {
                report.table_checks = self.check_tables(&report.endpoint, &dataset).await;
            }
            None => {
                if let Some(pattern) = &options.dataset_pattern {
                    let spec = matching_datasets_query(&report.endpoint.project_id, pattern);
                    let table = self.executor.execute(&spec).await;
                    report.matching_datasets = string_column(&table, "dataset_name");
                }
            }
        }

        report
    }

    async fn check_tables(&self, endpoint: &EndpointIdentity, dataset: &str) -> Vec<TableCheck> {
        let mut checks = Vec::with_capacity(self.executor.tables().len());
        for (domain, table) in self.executor.tables().iter() {
            let spec = QuerySpec::new(format!(
                "SELECT COUNT(*) AS row_count FROM `{}.{}.{}`",
                endpoint.project_id, dataset, table
            ));
            let check = match self.executor.try_execute(&spec).await {
                Ok(result) => match result.value(0, "row_count").and_then(|c| c.as_i64()) {
                    Some(count) => TableCheck {
                        domain: domain.to_string(),
                        table: table.to_string(),
                        row_count: Some(count),
                        error: None,
                    },
                    None => TableCheck {
                        domain: domain.to_string(),
                        table: table.to_string(),
                        row_count: None,
                        error: Some("No data returned".to_string()),
                    },
                },
                Err(failure) => TableCheck {
                    domain: domain.to_string(),
                    table: table.to_string(),
                    row_count: None,
                    error: Some(failure_detail(&failure)),
                },
            };
            checks.push(check);
        }
        checks
    }
}

fn failure_detail(failure: &QueryFailure) -> String {
    failure.detail().to_string()
}

/// Escape a value for a single-quoted SQL string literal
fn quote_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Query listing the analytics tables of a dataset
pub fn analytics_tables_query(project_id: &str, dataset: &str, suffix: &str) -> QuerySpec {
    QuerySpec::new(format!(
        "SELECT table_name FROM `{project_id}.{dataset}.INFORMATION_SCHEMA.TABLES` \
         WHERE table_name LIKE '%{}'",
        quote_literal(suffix)
    ))
    .with_limit(DISCOVERY_LIMIT)
}

/// Query listing datasets whose name contains `pattern`
pub fn matching_datasets_query(project_id: &str, pattern: &str) -> QuerySpec {
    QuerySpec::new(format!(
        "SELECT schema_name AS dataset_name FROM `{project_id}.INFORMATION_SCHEMA.SCHEMATA` \
         WHERE schema_name LIKE '%{}%' ORDER BY schema_name",
        quote_literal(pattern)
    ))
}

fn string_column(table: &ResultTable, column: &str) -> Vec<String> {
    table
        .column_values(column)
        .map(|values| {
            values
                .into_iter()
                .filter(|cell| !cell.is_null())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
