//! Plain-text and JSON rendering of command output

use std::fmt::Write;

use wql_application::use_cases::DiagnosticsReport;
use wql_domain::value_objects::{ResultTable, TableMetadata};

use super::OutputFormat;

/// Render a result table in the requested format
pub fn render_result(table: &ResultTable, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(table)),
        OutputFormat::Json => serde_json::to_string_pretty(table).map(|json| json + "\n"),
    }
}

/// Aligned text rendering with a row count footer
pub fn render_table(table: &ResultTable) -> String {
    if table.column_count() == 0 {
        return "(no results)\n".to_string();
    }

    let header: Vec<String> = table.columns().iter().map(|c| c.name.clone()).collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    let count = table.row_count();
    let _ = writeln!(out, "({count} row{})", if count == 1 { "" } else { "s" });
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join(" | ").trim_end());
}

/// Metadata as `key: value` lines, or a notice when there is none
pub fn render_metadata(table: &str, metadata: Option<&TableMetadata>) -> String {
    let Some(metadata) = metadata else {
        return format!("No metadata available for {table}\n");
    };
    let mut out = String::new();
    for (key, value) in metadata.to_map() {
        match value {
            serde_json::Value::String(text) => {
                let _ = writeln!(out, "{key}: {text}");
            }
            other => {
                let _ = writeln!(out, "{key}: {other}");
            }
        }
    }
    out
}

/// Diagnostics report for operators
pub fn render_report(report: &DiagnosticsReport, format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(report).map(|json| json + "\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "Endpoint: {}", report.endpoint);
    if !report.connected {
        let _ = writeln!(
            out,
            "Connection: FAILED ({})",
            report.connection_error.as_deref().unwrap_or("unknown error")
        );
        return Ok(out);
    }
    let _ = writeln!(out, "Connection: OK");

    match &report.discovered_dataset {
        Some(dataset) => {
            let _ = writeln!(
                out,
                "Analytics dataset: {dataset} ({})",
                report.discovered_tables.join(", ")
            );
            if report.dataset_mismatch() {
                let _ = writeln!(
                    out,
                    "Configured dataset '{}' differs; update warehouse.dataset_id to '{dataset}'",
                    report.endpoint.dataset_id
                );
            }
            for check in &report.table_checks {
                match (check.row_count, &check.error) {
                    (Some(rows), _) => {
                        let _ = writeln!(out, "  {} ({}): {rows} rows", check.domain, check.table);
                    }
                    (None, error) => {
                        let _ = writeln!(
                            out,
                            "  {} ({}): ERROR {}",
                            check.domain,
                            check.table,
                            error.as_deref().unwrap_or("unknown error")
                        );
                    }
                }
            }
        }
        None => {
            let _ = writeln!(out, "Analytics dataset: not found");
            if !report.matching_datasets.is_empty() {
                let _ = writeln!(
                    out,
                    "Matching datasets: {}",
                    report.matching_datasets.join(", ")
                );
            }
        }
    }
    Ok(out)
}

/// Registered providers, one per line
pub fn render_providers(
    warehouses: &[(&'static str, &'static str)],
    notifiers: &[(&'static str, &'static str)],
) -> String {
    let mut out = String::from("Warehouse providers:\n");
    for (name, description) in warehouses {
        let _ = writeln!(out, "  {name:<10} {description}");
    }
    out.push_str("Notifiers:\n");
    for (name, description) in notifiers {
        let _ = writeln!(out, "  {name:<10} {description}");
    }
    out
}
