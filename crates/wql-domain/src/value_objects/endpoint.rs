//! Warehouse Endpoint Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Identity of the analytical backend a connection talks to
///
/// The project/dataset/location triple of the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointIdentity {
    /// Project (billing and namespace root)
    pub project_id: String,
    /// Default dataset for unqualified table names
    pub dataset_id: String,
    /// Processing location (region)
    pub location: String,
}

impl EndpointIdentity {
    /// Create an endpoint identity
    pub fn new<P, D, L>(project_id: P, dataset_id: D, location: L) -> Self
    where
        P: Into<String>,
        D: Into<String>,
        L: Into<String>,
    {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            location: location.into(),
        }
    }

    /// Resolve a table identifier against this endpoint
    ///
    /// Accepts `table`, `dataset.table` or `project.dataset.table`;
    /// missing parts come from the endpoint.
    pub fn table_ref(&self, identifier: &str) -> Result<TableRef> {
        let parts: Vec<&str> = identifier.trim().trim_matches('`').split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(Error::invalid_argument(format!(
                "Invalid table identifier: '{identifier}'"
            )));
        }
        match parts.as_slice() {
            [table] => Ok(TableRef::new(&self.project_id, &self.dataset_id, *table)),
            [dataset, table] => Ok(TableRef::new(&self.project_id, *dataset, *table)),
            [project, dataset, table] => Ok(TableRef::new(*project, *dataset, *table)),
            _ => Err(Error::invalid_argument(format!(
                "Invalid table identifier: '{identifier}'"
            ))),
        }
    }
}

impl fmt::Display for EndpointIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} ({})", self.project_id, self.dataset_id, self.location)
    }
}

/// Fully qualified reference to a table in the backend catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    /// Project owning the dataset
    pub project_id: String,
    /// Dataset owning the table
    pub dataset_id: String,
    /// Table name
    pub table_id: String,
}

impl TableRef {
    /// Create a table reference
    pub fn new<P, D, T>(project_id: P, dataset_id: D, table_id: T) -> Self
    where
        P: Into<String>,
        D: Into<String>,
        T: Into<String>,
    {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    /// Backquoted form usable in a `FROM` clause
    pub fn quoted(&self) -> String {
        format!("`{self}`")
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}
