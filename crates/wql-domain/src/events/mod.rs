//! Operator Notices
//!
//! Side-channel messages raised when an executor operation degrades to an
//! empty result. The presentation layer never sees the failure itself; the
//! operator sees it through an [`OperatorNotifier`](crate::ports::OperatorNotifier).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::QUERY_PREVIEW_CHARS;
use crate::error::QueryFailure;

/// A failure surfaced to the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorNotice {
    /// What went wrong, with the original detail
    pub failure: QueryFailure,
    /// What the failing operation was about (query preview, table, provider)
    pub subject: String,
    /// When the failure was observed
    pub raised_at: DateTime<Utc>,
}

impl OperatorNotice {
    /// Create a notice
    pub fn new<S: Into<String>>(failure: QueryFailure, subject: S, raised_at: DateTime<Utc>) -> Self {
        Self {
            failure,
            subject: subject.into(),
            raised_at,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        self.failure.to_string()
    }
}

/// Shorten query text for inclusion in a notice
pub fn query_preview(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= QUERY_PREVIEW_CHARS {
        flattened
    } else {
        let mut preview: String = flattened.chars().take(QUERY_PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }
}
