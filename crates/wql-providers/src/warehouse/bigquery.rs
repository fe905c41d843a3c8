//! BigQuery Warehouse Provider
//!
//! Implements the warehouse ports over the BigQuery REST v2 API.
//!
//! Queries go through `jobs.query`; an incomplete job is polled with
//! `jobs.getQueryResults` and every result page is followed until the
//! row cap (if any) is reached. Catalog statistics come from `tables.get`.
//!
//! Authentication is a bearer OAuth access token taken from configuration
//! or from `GOOGLE_OAUTH_ACCESS_TOKEN`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, trace};

use wql_application::ports::registry::{
    WAREHOUSE_PROVIDERS, WarehouseProviderConfig, WarehouseProviderEntry,
};
use wql_domain::error::{Error, Result};
use wql_domain::ports::providers::{WarehouseConnection, WarehouseConnector};
use wql_domain::value_objects::{
    BackendRequest, Cell, Column, ColumnType, EndpointIdentity, ResultTable, TableRef, TableStats,
};

use crate::constants::{
    BIGQUERY_DEFAULT_BASE_URL, BIGQUERY_DEFAULT_PAGE_SIZE, BIGQUERY_DEFAULT_TIMEOUT_SECS,
    BIGQUERY_JOB_WAIT_MS, BIGQUERY_POLL_INTERVAL_MS, BIGQUERY_TOKEN_ENV_VAR, CONTENT_TYPE_JSON,
};
use crate::utils::HttpResponseUtils;

const PROVIDER: &str = "BigQuery";

// ============================================================================
// Wire types
// ============================================================================

/// `jobs.query` / `jobs.getQueryResults` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Whether the job has finished
    #[serde(default)]
    pub job_complete: bool,
    /// Job handle for polling and paging
    pub job_reference: Option<JobReference>,
    /// Result schema, present once the job is complete
    pub schema: Option<TableSchema>,
    /// Rows of this page
    #[serde(default)]
    pub rows: Vec<RowData>,
    /// Token of the next page
    pub page_token: Option<String>,
}

/// Job handle
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    /// Job id
    pub job_id: String,
    /// Job location
    pub location: Option<String>,
}

/// Result schema
#[derive(Debug, Default, Deserialize)]
pub struct TableSchema {
    /// Top-level fields
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// One schema field
#[derive(Debug, Deserialize)]
pub struct FieldSchema {
    /// Column name
    pub name: String,
    /// Legacy or standard SQL type name
    #[serde(rename = "type")]
    pub field_type: String,
    /// NULLABLE, REQUIRED or REPEATED
    pub mode: Option<String>,
}

/// One result row
#[derive(Debug, Deserialize)]
pub struct RowData {
    /// Cells in schema order
    #[serde(default)]
    pub f: Vec<CellData>,
}

/// One result cell
#[derive(Debug, Deserialize)]
pub struct CellData {
    /// Raw value; strings for scalars, nested objects for records
    #[serde(default)]
    pub v: Value,
}

/// `tables.get` response, reduced to the statistics we read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResource {
    /// Row count as a decimal string
    pub num_rows: Option<String>,
    /// Size in bytes as a decimal string
    pub num_bytes: Option<String>,
    /// Creation time, epoch milliseconds as a decimal string
    pub creation_time: Option<String>,
    /// Last modification time, epoch milliseconds as a decimal string
    pub last_modified_time: Option<String>,
    /// Table description
    pub description: Option<String>,
}

// ============================================================================
// Decoding
// ============================================================================

/// Column type of a schema field
pub fn column_type(field: &FieldSchema) -> ColumnType {
    if field.mode.as_deref() == Some("REPEATED") {
        return ColumnType::Record;
    }
    match field.field_type.as_str() {
        "INTEGER" | "INT64" => ColumnType::Integer,
        "FLOAT" | "FLOAT64" | "NUMERIC" | "BIGNUMERIC" => ColumnType::Float,
        "BOOLEAN" | "BOOL" => ColumnType::Boolean,
        "TIMESTAMP" => ColumnType::Timestamp,
        "RECORD" | "STRUCT" => ColumnType::Record,
        _ => ColumnType::String,
    }
}

/// Columns of a result schema
pub fn decode_schema(schema: &TableSchema) -> Vec<Column> {
    schema
        .fields
        .iter()
        .map(|field| Column::new(field.name.clone(), column_type(field)))
        .collect()
}

fn decode_error(column: &Column, raw: &Value) -> Error {
    Error::warehouse(format!(
        "{PROVIDER} returned {raw} for {:?} column '{}'",
        column.column_type, column.name
    ))
}

/// Parse a TIMESTAMP value (epoch seconds, possibly fractional or in E notation)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let seconds: f64 = raw.parse().ok()?;
    #[allow(clippy::cast_possible_truncation)]
    let micros = (seconds * 1_000_000.0).round() as i64;
    DateTime::from_timestamp_micros(micros)
}

/// Decode one cell against its column
pub fn decode_cell(column: &Column, raw: &Value) -> Result<Cell> {
    if raw.is_null() {
        return Ok(Cell::Null);
    }
    let text = raw.as_str();
    let cell = match column.column_type {
        ColumnType::Integer => text
            .and_then(|s| s.parse::<i64>().ok())
            .map(Cell::Int)
            .ok_or_else(|| decode_error(column, raw))?,
        ColumnType::Float => text
            .and_then(|s| s.parse::<f64>().ok())
            .map(Cell::Float)
            .ok_or_else(|| decode_error(column, raw))?,
        ColumnType::Boolean => match text {
            Some("true") => Cell::Bool(true),
            Some("false") => Cell::Bool(false),
            _ => return Err(decode_error(column, raw)),
        },
        ColumnType::Timestamp => text
            .and_then(parse_timestamp)
            .map(Cell::Timestamp)
            .ok_or_else(|| decode_error(column, raw))?,
        ColumnType::Record => Cell::Json(raw.clone()),
        ColumnType::String => match text {
            Some(s) => Cell::String(s.to_string()),
            None => Cell::Json(raw.clone()),
        },
    };
    Ok(cell)
}

/// Decode a page of rows
pub fn decode_rows(columns: &[Column], rows: &[RowData]) -> Result<Vec<Vec<Cell>>> {
    rows.iter()
        .map(|row| {
            if row.f.len() != columns.len() {
                return Err(Error::warehouse(format!(
                    "{PROVIDER} row has {} cells, schema has {} columns",
                    row.f.len(),
                    columns.len()
                )));
            }
            columns
                .iter()
                .zip(&row.f)
                .map(|(column, cell)| decode_cell(column, &cell.v))
                .collect()
        })
        .collect()
}

fn parse_count(field: &str, raw: Option<&str>) -> Result<u64> {
    match raw {
        None => Ok(0),
        Some(s) => s
            .parse()
            .map_err(|_| Error::warehouse(format!("{PROVIDER} returned invalid {field}: {s}"))),
    }
}

fn parse_millis(field: &str, raw: Option<&str>) -> Result<DateTime<Utc>> {
    let millis: i64 = match raw {
        None => 0,
        Some(s) => s
            .parse()
            .map_err(|_| Error::warehouse(format!("{PROVIDER} returned invalid {field}: {s}")))?,
    };
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| Error::warehouse(format!("{PROVIDER} {field} out of range: {millis}")))
}

/// Catalog statistics of a `tables.get` resource
pub fn decode_table_stats(resource: &TableResource) -> Result<TableStats> {
    Ok(TableStats {
        num_rows: parse_count("numRows", resource.num_rows.as_deref())?,
        num_bytes: parse_count("numBytes", resource.num_bytes.as_deref())?,
        created: parse_millis("creationTime", resource.creation_time.as_deref())?,
        modified: parse_millis("lastModifiedTime", resource.last_modified_time.as_deref())?,
        description: resource.description.clone(),
    })
}

// ============================================================================
// Connection
// ============================================================================

/// Live BigQuery handle bound to one endpoint
pub struct BigQueryConnection {
    http_client: Client,
    access_token: String,
    base_url: String,
    endpoint: EndpointIdentity,
    page_size: u32,
}

impl BigQueryConnection {
    fn project_url(&self) -> String {
        format!("{}/projects/{}", self.base_url, self.endpoint.project_id)
    }

    fn location(&self, job: &JobReference) -> String {
        job.location
            .clone()
            .unwrap_or_else(|| self.endpoint.location.clone())
    }

    async fn send(&self, request: reqwest::RequestBuilder, resource: &str) -> Result<Value> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(format!("{PROVIDER} request timed out: {e}"))
                } else {
                    Error::network_with_source(format!("{PROVIDER} request failed"), e)
                }
            })?;
        HttpResponseUtils::check_and_parse(response, PROVIDER, resource).await
    }

    async fn start_query(&self, request: &BackendRequest) -> Result<QueryResponse> {
        let mut payload = json!({
            "query": request.query,
            "useLegacySql": false,
            "location": self.endpoint.location,
            "timeoutMs": BIGQUERY_JOB_WAIT_MS,
            "maxResults": self.page_size,
        });
        if !self.endpoint.dataset_id.is_empty() {
            payload["defaultDataset"] = json!({
                "projectId": self.endpoint.project_id,
                "datasetId": self.endpoint.dataset_id,
            });
        }

        let builder = self
            .http_client
            .post(format!("{}/queries", self.project_url()))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .json(&payload);
        let value = self.send(builder, "query").await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn query_results(
        &self,
        job: &JobReference,
        page_token: Option<&str>,
    ) -> Result<QueryResponse> {
        let mut params = vec![
            ("location", self.location(job)),
            ("timeoutMs", BIGQUERY_JOB_WAIT_MS.to_string()),
            ("maxResults", self.page_size.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        let builder = self
            .http_client
            .get(format!("{}/queries/{}", self.project_url(), job.job_id))
            .query(&params);
        let value = self.send(builder, &format!("job {}", job.job_id)).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl WarehouseConnection for BigQueryConnection {
    async fn run_query(&self, request: &BackendRequest) -> Result<ResultTable> {
        let mut page = self.start_query(request).await?;
        let job_reference = page.job_reference.clone();

        if !page.job_complete {
            let job = job_reference.as_ref().ok_or_else(|| {
                Error::warehouse(format!("{PROVIDER} returned an incomplete job without a reference"))
            })?;
            while !page.job_complete {
                trace!(job_id = %job.job_id, "waiting for job completion");
                tokio::time::sleep(Duration::from_millis(BIGQUERY_POLL_INTERVAL_MS)).await;
                page = self.query_results(job, None).await?;
            }
        }

        let columns = page.schema.as_ref().map(decode_schema).unwrap_or_default();
        let mut rows = decode_rows(&columns, &page.rows)?;
        let cap = request
            .row_cap
            .and_then(|cap| usize::try_from(cap).ok());

        while let Some(token) = page.page_token.take() {
            if cap.is_some_and(|cap| rows.len() >= cap) {
                break;
            }
            let Some(job) = job_reference.as_ref() else {
                break;
            };
            debug!(job_id = %job.job_id, rows = rows.len(), "fetching next result page");
            page = self.query_results(job, Some(&token)).await?;
            rows.extend(decode_rows(&columns, &page.rows)?);
        }

        if let Some(cap) = cap {
            rows.truncate(cap);
        }
        ResultTable::new(columns, rows)
    }

    async fn table_stats(&self, table: &TableRef) -> Result<TableStats> {
        let url = format!(
            "{}/projects/{}/datasets/{}/tables/{}",
            self.base_url, table.project_id, table.dataset_id, table.table_id
        );
        let value = self
            .send(self.http_client.get(url), &table.to_string())
            .await?;
        let resource: TableResource = serde_json::from_value(value)?;
        decode_table_stats(&resource)
    }

    fn endpoint(&self) -> &EndpointIdentity {
        &self.endpoint
    }
}

// ============================================================================
// Connector
// ============================================================================

/// Builds [`BigQueryConnection`] handles
///
/// Constructing the connector does no I/O. `connect` validates the endpoint
/// and resolves the access token.
pub struct BigQueryConnector {
    http_client: Client,
    access_token: Option<String>,
    base_url: Option<String>,
    page_size: u32,
}

impl BigQueryConnector {
    /// Create a connector
    ///
    /// # Arguments
    /// * `access_token` - OAuth token; falls back to `GOOGLE_OAUTH_ACCESS_TOKEN`
    /// * `base_url` - Optional API base URL (defaults to the public endpoint)
    /// * `page_size` - Rows requested per result page
    /// * `http_client` - Reqwest HTTP client for making API requests
    pub fn new(
        access_token: Option<String>,
        base_url: Option<String>,
        page_size: u32,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            access_token: access_token.filter(|t| !t.trim().is_empty()),
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            page_size: page_size.max(1),
        }
    }

    /// Get the base URL for this provider
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(BIGQUERY_DEFAULT_BASE_URL)
    }

    fn resolve_token(&self) -> Option<String> {
        self.access_token.clone().or_else(|| {
            std::env::var(BIGQUERY_TOKEN_ENV_VAR)
                .ok()
                .filter(|t| !t.trim().is_empty())
        })
    }
}

#[async_trait]
impl WarehouseConnector for BigQueryConnector {
    async fn connect(&self, endpoint: &EndpointIdentity) -> Result<Arc<dyn WarehouseConnection>> {
        if endpoint.project_id.trim().is_empty() {
            return Err(Error::configuration("BigQuery requires a project id"));
        }
        let access_token = self.resolve_token().ok_or_else(|| {
            Error::authentication(format!(
                "BigQuery requires an access token (set warehouse.access_token or {BIGQUERY_TOKEN_ENV_VAR})"
            ))
        })?;

        Ok(Arc::new(BigQueryConnection {
            http_client: self.http_client.clone(),
            access_token,
            base_url: self.base_url().to_string(),
            endpoint: endpoint.clone(),
            page_size: self.page_size,
        }))
    }

    fn provider_name(&self) -> &str {
        "bigquery"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(WAREHOUSE_PROVIDERS)]
static BIGQUERY_PROVIDER: WarehouseProviderEntry = WarehouseProviderEntry {
    name: "bigquery",
    description: "Google BigQuery over the REST v2 API",
    factory: bigquery_factory,
};

fn bigquery_factory(
    config: &WarehouseProviderConfig,
) -> std::result::Result<Arc<dyn WarehouseConnector>, String> {
    let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(BIGQUERY_DEFAULT_TIMEOUT_SECS));
    let http_client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

    Ok(Arc::new(BigQueryConnector::new(
        config.access_token.clone(),
        config.base_url.clone(),
        config.page_size.unwrap_or(BIGQUERY_DEFAULT_PAGE_SIZE),
        http_client,
    )))
}
