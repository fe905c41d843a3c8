//! Error handling types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Warehouse Query Layer
///
/// This is the error surface of providers and infrastructure. It never
/// reaches the presentation boundary of the executor; see [`QueryFailure`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// The caller lacks permission to read a resource
    #[error("Permission denied on {resource}: {message}")]
    PermissionDenied {
        /// The resource that was denied
        resource: String,
        /// Backend supplied detail
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication-related error
    #[error("Authentication error: {message}")]
    Authentication {
        /// Description of the authentication error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The warehouse rejected a request
    #[error("Warehouse error{}: {message}", .code.as_ref().map(|c| format!(" [{c}]")).unwrap_or_default())]
    Warehouse {
        /// Human-readable message from the backend
        message: String,
        /// Backend-specific error code, when one was reported
        code: Option<String>,
    },

    /// A backend round-trip did not finish in time
    #[error("Timeout: {message}")]
    Timeout {
        /// Description of what timed out
        message: String,
    },

}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied<R: Into<String>, S: Into<String>>(resource: R, message: S) -> Self {
        Self::PermissionDenied {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
            source: None,
        }
    }
}

// Network and warehouse error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a warehouse error without a backend code
    pub fn warehouse<S: Into<String>>(message: S) -> Self {
        Self::Warehouse {
            message: message.into(),
            code: None,
        }
    }

    /// Create a warehouse error carrying the backend's error code
    pub fn warehouse_with_code<S: Into<String>, C: Into<String>>(message: S, code: C) -> Self {
        Self::Warehouse {
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl Error {
    /// Whether this error means the catalog has no such table, or hides it
    pub fn is_missing_resource(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PermissionDenied { .. })
    }
}

/// Failure taxonomy at the executor boundary
///
/// Every failure an executor operation can observe is one of these three
/// kinds. The detail string carries the original message for the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryFailure {
    /// The warehouse handle could not be constructed
    #[error("Failed to connect to warehouse: {detail}")]
    ConnectionUnavailable {
        /// Detail of the construction failure
        detail: String,
    },

    /// The backend rejected the query or the round-trip failed
    #[error("Error executing query: {detail}")]
    ExecutionFailure {
        /// Detail of the execution failure
        detail: String,
    },

    /// The catalog has no such table, or hides it from the caller
    #[error("Error getting table info for {table}: {detail}")]
    MetadataNotFound {
        /// Table that was looked up
        table: String,
        /// Detail of the lookup failure
        detail: String,
    },
}

impl QueryFailure {
    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionUnavailable { .. } => "connection_unavailable",
            Self::ExecutionFailure { .. } => "execution_failure",
            Self::MetadataNotFound { .. } => "metadata_not_found",
        }
    }

    /// The original detail message
    pub fn detail(&self) -> &str {
        match self {
            Self::ConnectionUnavailable { detail }
            | Self::ExecutionFailure { detail }
            | Self::MetadataNotFound { detail, .. } => detail,
        }
    }
}
