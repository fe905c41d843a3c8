//! Result Table Tests

use wql_domain::value_objects::{Cell, Column, ColumnType, ResultTable};

fn sales() -> ResultTable {
    ResultTable::new(
        vec![
            Column::new("state", ColumnType::String),
            Column::new("revenue", ColumnType::Float),
        ],
        vec![
            vec![Cell::from("SP"), Cell::Float(1200.5)],
            vec![Cell::from("RJ"), Cell::Null],
        ],
    )
    .unwrap()
}

#[test]
fn test_ragged_rows_rejected() {
    let result = ResultTable::new(
        vec![Column::new("a", ColumnType::Integer)],
        vec![vec![Cell::Int(1)], vec![Cell::Int(2), Cell::Int(3)]],
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("row 1 has 2 cells"));
}

#[test]
fn test_empty_table_shape() {
    let table = ResultTable::empty();
    assert!(table.is_empty());
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 0);
    assert_eq!(table, ResultTable::default());
}

#[test]
fn test_columns_without_rows_is_empty() {
    let table = ResultTable::new(vec![Column::new("a", ColumnType::Integer)], vec![]).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.column_count(), 1);
}

#[test]
fn test_lookup_by_column_name() {
    let table = sales();

    assert_eq!(table.column_index("revenue"), Some(1));
    assert_eq!(table.column_index("missing"), None);
    assert_eq!(table.value(0, "state"), Some(&Cell::from("SP")));
    assert_eq!(table.value(5, "state"), None);
    assert_eq!(table.value(0, "missing"), None);

    let revenue = table.column_values("revenue").unwrap();
    assert_eq!(revenue, vec![&Cell::Float(1200.5), &Cell::Null]);
}

#[test]
fn test_cell_views() {
    assert_eq!(Cell::Int(7).as_i64(), Some(7));
    assert_eq!(Cell::from("42").as_i64(), Some(42));
    assert_eq!(Cell::Float(1.5).as_i64(), None);
    assert_eq!(Cell::Int(2).as_f64(), Some(2.0));
    assert_eq!(Cell::from("x").as_str(), Some("x"));
    assert!(Cell::Null.is_null());
}

#[test]
fn test_cell_display() {
    assert_eq!(Cell::Null.to_string(), "NULL");
    assert_eq!(Cell::Bool(true).to_string(), "true");
    assert_eq!(Cell::from("raw text").to_string(), "raw text");
}

#[test]
fn test_into_parts() {
    let (columns, rows) = sales().into_parts();
    assert_eq!(columns.len(), 2);
    assert_eq!(rows.len(), 2);
}
