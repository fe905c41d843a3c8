//! HTTP Response Utilities
//!
//! Helper functions for processing HTTP responses from API providers.
//! These are shared utilities, not ports.

use reqwest::{Response, StatusCode};
use wql_domain::error::{Error, Result};

/// Extract the `error.message` of a Google-style JSON error body
fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value["error"]["message"].as_str().map(str::to_string)
}

/// Map a non-success status and its body to a domain error
///
/// `resource` names what the request was about and is used for
/// not-found and permission errors.
pub fn status_error(provider: &str, resource: &str, status: StatusCode, body: &str) -> Error {
    let details = api_error_message(body).unwrap_or_else(|| body.trim().to_string());
    let code = status.as_u16();
    match code {
        401 => Error::authentication(format!("{provider} authentication failed: {details}")),
        403 => Error::permission_denied(resource, format!("{provider}: {details}")),
        404 => Error::not_found(format!("{resource} ({details})")),
        408 => Error::timeout(format!("{provider} request timed out: {details}")),
        429 => Error::warehouse_with_code(
            format!("{provider} rate limit exceeded: {details}"),
            code.to_string(),
        ),
        500..=599 => Error::warehouse_with_code(
            format!("{provider} server error: {details}"),
            code.to_string(),
        ),
        _ => Error::warehouse_with_code(
            format!("{provider} request failed: {details}"),
            code.to_string(),
        ),
    }
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `provider_name` - Name of the provider for error messages
    /// * `resource` - What the request addressed (table, job, query)
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
        resource: &str,
    ) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(provider_name, resource, status, &error_text));
        }

        response.json().await.map_err(|e| {
            Error::warehouse(format!("{provider_name} response parse failed: {e}"))
        })
    }
}
