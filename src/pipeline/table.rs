//! Columnar table of dynamically typed cells.
//!
//! Every uploaded dataset becomes a `Table` before any normalization
//! step runs. The table is owned by the request that produced it and
//! dropped when the response is built — nothing here is shared.
//!
//! Duplicate column names are allowed transiently (header files in the
//! wild contain them); every by-name operation binds the *first* column
//! carrying the name, and record serialization writes the first
//! occurrence only.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single cell value. `Text` covers everything that is not a number;
/// numeric typing happens at ingest and again in the coercer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Numeric view of the cell. `Text` is not parsed here — that is the
    /// coercer's job.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Cell::Null => Value::Null,
            // Non-finite floats have no JSON representation; emit null.
            Cell::Number(v) if !v.is_finite() => Value::Null,
            Cell::Number(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Cell::Text(s) => Value::String(s.clone()),
        }
    }
}

/// One named column; `cells.len()` always equals the owning table's row
/// count.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    /// Mean over numeric cells. `None` when no cell is numeric.
    pub fn mean(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut n = 0usize;
        for cell in &self.cells {
            if let Some(v) = cell.as_number() {
                sum += v;
                n += 1;
            }
        }
        if n == 0 {
            None
        } else {
            Some(sum / n as f64)
        }
    }

    /// Sum over numeric cells; 0.0 for a column with no numbers.
    pub fn sum(&self) -> f64 {
        self.cells.iter().filter_map(Cell::as_number).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Empty table with a fixed row count and no columns yet.
    pub fn with_rows(rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// First column named `name`, if any.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Append a column. Panics if the cell count does not match the row
    /// count — callers construct columns from the table's own rows, so a
    /// mismatch is a programming error, not bad input.
    pub fn push_column(&mut self, name: impl Into<String>, cells: Vec<Cell>) {
        assert_eq!(
            cells.len(),
            self.rows,
            "column length must match table row count"
        );
        self.columns.push(Column {
            name: name.into(),
            cells,
        });
    }

    /// Replace the first column named `name`, or append it.
    pub fn set_column(&mut self, name: &str, cells: Vec<Cell>) {
        assert_eq!(cells.len(), self.rows);
        match self.column_mut(name) {
            Some(col) => col.cells = cells,
            None => self.push_column(name, cells),
        }
    }

    /// Rename a column by index. Out-of-range indices are ignored.
    pub fn rename_column(&mut self, index: usize, new_name: &str) {
        if let Some(col) = self.columns.get_mut(index) {
            col.name = new_name.to_string();
        }
    }

    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Rows as JSON objects, preserving column order. For duplicate
    /// column names only the first occurrence is written.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        let mut out = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let mut obj = Map::new();
            for col in &self.columns {
                if !obj.contains_key(&col.name) {
                    obj.insert(col.name.clone(), col.cells[row].to_json());
                }
            }
            out.push(obj);
        }
        out
    }

    /// First `n` rows as JSON objects.
    pub fn head(&self, n: usize) -> Vec<Map<String, Value>> {
        let mut records = self.records();
        records.truncate(n);
        records
    }
}
