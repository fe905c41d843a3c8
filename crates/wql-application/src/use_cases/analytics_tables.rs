//! Analytics table catalog
//!
//! Maps logical domain names (e.g. `revenue`) to physical warehouse tables
//! and builds the whole-table queries the dashboard pages start from.

use std::collections::BTreeMap;

use wql_domain::error::{Error, Result};
use wql_domain::value_objects::{EndpointIdentity, QuerySpec};

/// Logical domain name to physical table lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsTables {
    tables: BTreeMap<String, String>,
}

impl AnalyticsTables {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain; replaces any previous mapping for it
    pub fn with_table(mut self, domain: impl Into<String>, table: impl Into<String>) -> Self {
        self.tables.insert(domain.into(), table.into());
        self
    }

    /// Physical table for a domain
    pub fn resolve(&self, domain: &str) -> Option<&str> {
        self.tables.get(domain).map(String::as_str)
    }

    /// Domains and tables in domain order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tables.iter().map(|(d, t)| (d.as_str(), t.as_str()))
    }

    /// Number of registered domains
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no domain is registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// `SELECT *` over the domain's table in the endpoint's dataset
    pub fn select_all(
        &self,
        endpoint: &EndpointIdentity,
        domain: &str,
        limit: Option<u64>,
    ) -> Result<QuerySpec> {
        let table = self
            .resolve(domain)
            .ok_or_else(|| Error::not_found(format!("analytics domain '{domain}'")))?;
        let table_ref = endpoint.table_ref(table)?;
        let spec = QuerySpec::new(format!("SELECT * FROM {}", table_ref.quoted()));
        Ok(match limit {
            Some(limit) => spec.with_limit(limit),
            None => spec,
        })
    }
}

impl<D, T> FromIterator<(D, T)> for AnalyticsTables
where
    D: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (D, T)>>(iter: I) -> Self {
        Self {
            tables: iter
                .into_iter()
                .map(|(d, t)| (d.into(), t.into()))
                .collect(),
        }
    }
}
