// src/table/mod.rs

mod group;
mod infer;
mod load;

pub use group::{Aggregate, Series};
pub use load::{load_run, load_table};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

/// A single column of typed values.
///
/// The type model is deliberately flat: a column is numeric when every
/// non-empty cell in the source file parses as a float, and text otherwise.
/// Empty cells are nulls under either type.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Num(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Num(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Num(_))
    }

    /// Render the cell at `row` as a grouping key or series label.
    /// Whole-number floats print without a fractional part, so an
    /// `agent_id` column labels as `3`, not `3.0`.
    pub(crate) fn label(&self, row: usize) -> Option<String> {
        match self {
            Column::Num(v) => v.get(row).copied().flatten().map(fmt_num),
            Column::Text(v) => v.get(row).and_then(|cell| cell.clone()),
        }
    }
}

/// An in-memory, column-typed, ordered row collection loaded from one CSV
/// file. Header order and row order follow the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    pub(crate) fn new(name: String, headers: Vec<String>, columns: Vec<Column>) -> Self {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        Table {
            name,
            headers,
            columns,
            rows,
        }
    }

    /// Name the table was registered under (file name, extension stripped).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows (the header row is not a row).
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Look up a column by name. With duplicate headers the first match
    /// wins.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| AnalysisError::MissingColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Typed access to a numeric column's cells.
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        match self.column(name)? {
            Column::Num(v) => Ok(v.as_slice()),
            Column::Text(_) => Err(AnalysisError::ColumnNotNumeric {
                table: self.name.clone(),
                column: name.to_string(),
            }),
        }
    }

    /// `(header, column)` pairs in file order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter())
    }

    /// Numeric columns that are data rather than keys, for default plot
    /// column selection.
    pub fn numeric_value_columns(&self, exclude: &[&str]) -> Vec<&str> {
        self.columns()
            .filter(|(h, c)| c.is_numeric() && !exclude.contains(h))
            .map(|(h, _)| h)
            .collect()
    }
}

/// The set of tables loaded for one run, keyed by derived name.
///
/// Built once per load call and only read afterwards; nothing mutates a
/// registry after [`load_run`] returns it.
#[derive(Debug, Clone)]
pub struct Registry {
    run_dir: PathBuf,
    tables: BTreeMap<String, Table>,
}

impl Registry {
    pub(crate) fn new(run_dir: PathBuf, tables: BTreeMap<String, Table>) -> Self {
        Registry { run_dir, tables }
    }

    /// Directory the tables were loaded from.
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Loaded table names, ascending.
    pub fn names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Look up a table; a miss names both the request and what was loaded.
    pub fn get(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| AnalysisError::MissingTable {
                name: name.to_string(),
                loaded: self.tables.keys().cloned().collect(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// `(name, table)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Format a float the way it was most likely written: whole numbers
/// without a fractional part.
pub(crate) fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
