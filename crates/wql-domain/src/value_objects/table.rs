//! Tabular Result Value Objects
//!
//! The structured result of every query. A [`ResultTable`] is always
//! well-formed: every row has exactly one cell per column. The empty table
//! (no columns, no rows) is what callers receive when a query produced
//! nothing or failed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Primitive type of a result column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Signed 64-bit integers
    Integer,
    /// Floating point and decimal numbers
    Float,
    /// Booleans
    Boolean,
    /// Text, dates and other values carried as strings
    String,
    /// Instants in UTC
    Timestamp,
    /// Nested or repeated values
    Record,
}

/// A named, typed result column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as reported by the backend
    pub name: String,
    /// Primitive type of the column's cells
    pub column_type: ColumnType,
}

impl Column {
    /// Create a column
    pub fn new<S: Into<String>>(name: S, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// A single typed cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// SQL NULL
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    String(String),
    /// Timestamp value
    Timestamp(DateTime<Utc>),
    /// Nested or repeated value
    Json(serde_json::Value),
}

impl Cell {
    /// Whether the cell is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integer view of the cell, if it holds a whole number
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Numeric view of the cell
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Text view of the cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Cell {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Value Object: Tabular Query Result
///
/// Ordered named columns and ordered rows of typed cells.
///
/// ## Business Rules
///
/// - Every row has exactly `columns.len()` cells
/// - The empty table has zero columns and zero rows
/// - Tables are immutable once built
///
/// ## Example
///
/// ```rust
/// use wql_domain::value_objects::{Cell, Column, ColumnType, ResultTable};
///
/// let table = ResultTable::new(
///     vec![Column::new("x", ColumnType::Integer)],
///     vec![vec![Cell::Int(1)]],
/// ).unwrap();
/// assert_eq!(table.row_count(), 1);
/// assert_eq!(table.value(0, "x"), Some(&Cell::Int(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    /// Build a table, rejecting rows whose width differs from the column count
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(Error::invalid_argument(format!(
                "row {index} has {} cells but the table has {} columns",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// The explicitly empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in order
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Cell at a row for a named column
    pub fn value(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// All cells of a named column, top to bottom
    pub fn column_values(&self, column: &str) -> Option<Vec<&Cell>> {
        let index = self.column_index(column)?;
        Some(self.rows.iter().map(|r| &r[index]).collect())
    }

    /// Consume the table into its parts
    pub fn into_parts(self) -> (Vec<Column>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }
}
