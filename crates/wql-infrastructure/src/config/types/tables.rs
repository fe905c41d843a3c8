//! Analytics table configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wql_application::use_cases::AnalyticsTables;

use crate::constants::DEFAULT_ANALYTICS_TABLES;

/// Logical domain name to physical table name
///
/// Entries from a config file are merged over the defaults, so a file only
/// needs to name the domains it remaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TablesConfig(pub BTreeMap<String, String>);

impl Default for TablesConfig {
    fn default() -> Self {
        Self(
            DEFAULT_ANALYTICS_TABLES
                .iter()
                .map(|(domain, table)| ((*domain).to_string(), (*table).to_string()))
                .collect(),
        )
    }
}

impl TablesConfig {
    /// Physical table for a domain
    pub fn get(&self, domain: &str) -> Option<&str> {
        self.0.get(domain).map(String::as_str)
    }

    /// Catalog used by the executor
    pub fn to_catalog(&self) -> AnalyticsTables {
        self.0.iter().map(|(d, t)| (d.as_str(), t.as_str())).collect()
    }
}
