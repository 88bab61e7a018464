// Query results rendered as ASCII tables
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::fmt;

use crate::error::Result;

pub const DEFAULT_SEPARATOR_WIDTH: usize = 40;
pub const EMPTY_PLACEHOLDER: &str = "(no rows)";

/// A single stringifiable value of a result row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(usize),
}

impl From<ValueRef<'_>> for Cell {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(i) => Cell::Integer(i),
            ValueRef::Real(f) => Cell::Real(f),
            ValueRef::Text(t) => Cell::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Cell::Blob(b.len()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("None"),
            Cell::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fractional part on whole numbers: 4500.0
            Cell::Real(r) => write!(f, "{:?}", r),
            Cell::Text(t) => f.write_str(t),
            Cell::Blob(len) => write!(f, "<{} bytes>", len),
        }
    }
}

/// Fully materialized output of one SELECT
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultSet {
    pub fn fetch(conn: &Connection, sql: &str) -> Result<Self> {
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(Cell::from(row.get_ref(idx)?));
            }
            rows.push(cells);
        }

        Ok(Self { columns, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render a titled table: header, separator, one pipe-joined line per row, separator
pub fn render(title: &str, result: &ResultSet, separator_width: usize) -> String {
    let separator = "-".repeat(separator_width);
    let mut out = String::new();

    out.push_str(&format!("\n--- {} ---\n", title));
    out.push_str(&result.columns.join(" | "));
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    if result.is_empty() {
        out.push_str(EMPTY_PLACEHOLDER);
        out.push('\n');
    } else {
        for row in &result.rows {
            let line: Vec<String> = row.iter().map(Cell::to_string).collect();
            out.push_str(&line.join(" | "));
            out.push('\n');
        }
    }

    out.push_str(&separator);
    out
}

/// Run `sql` and print it to stdout, returning the materialized rows
pub fn print_query(conn: &Connection, sql: &str, title: &str, separator_width: usize) -> Result<ResultSet> {
    let result = ResultSet::fetch(conn, sql)?;
    tracing::debug!(title, rows = result.rows.len(), "query executed");
    println!("{}", render(title, &result, separator_width));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (name TEXT, salary REAL, dept INTEGER);
             INSERT INTO t VALUES ('Ivan', 4500, 1), ('Anna', 5000.5, NULL);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Null.to_string(), "None");
        assert_eq!(Cell::Integer(42).to_string(), "42");
        assert_eq!(Cell::Real(4500.0).to_string(), "4500.0");
        assert_eq!(Cell::Real(27.5).to_string(), "27.5");
        assert_eq!(Cell::Text("R&D".into()).to_string(), "R&D");
        assert_eq!(Cell::Blob(3).to_string(), "<3 bytes>");
    }

    #[test]
    fn test_fetch_materializes_columns_and_rows() {
        let conn = sample_conn();
        let result = ResultSet::fetch(&conn, "SELECT name, salary AS pay, dept FROM t ORDER BY name").unwrap();
        assert_eq!(result.columns, vec!["name", "pay", "dept"]);
        assert_eq!(
            result.rows,
            vec![
                vec![Cell::Text("Anna".into()), Cell::Real(5000.5), Cell::Null],
                vec![Cell::Text("Ivan".into()), Cell::Real(4500.0), Cell::Integer(1)],
            ]
        );
    }

    #[test]
    fn test_render_table() {
        let conn = sample_conn();
        let result = ResultSet::fetch(&conn, "SELECT name, dept FROM t ORDER BY name").unwrap();
        let text = render("Staff", &result, 10);
        assert_eq!(
            text,
            "\n--- Staff ---\nname | dept\n----------\nAnna | None\nIvan | 1\n----------"
        );
    }

    #[test]
    fn test_render_empty_placeholder() {
        let conn = sample_conn();
        let result = ResultSet::fetch(&conn, "SELECT name FROM t WHERE dept = 99").unwrap();
        assert!(result.is_empty());
        let text = render("Nobody", &result, 4);
        assert_eq!(text, "\n--- Nobody ---\nname\n----\n(no rows)\n----");
    }

    #[test]
    fn test_fetch_rejects_malformed_sql() {
        let conn = sample_conn();
        assert!(ResultSet::fetch(&conn, "SELEC name FROM t").is_err());
    }
}
