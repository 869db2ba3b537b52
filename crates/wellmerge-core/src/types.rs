//! Columnar record set parsed from a CSV object.
//!
//! Cell values are kept as the exact text from the file. Nothing is coerced,
//! so pass-through columns are written back the way they were read.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One named column of cell values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct values in first-seen order.
    pub fn distinct_values(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for v in &self.values {
            if !seen.contains(&v.as_str()) {
                seen.push(v.as_str());
            }
        }
        seen
    }
}

/// Ordered columns of equal length. Column order is the CSV header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub columns: Vec<Column>,
}

impl RecordSet {
    /// Build a record set from a header and row-major records.
    ///
    /// Every row must have exactly as many cells as the header.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::Parse(format!(
                    "row {} has {} fields, header has {}",
                    idx + 1,
                    row.len(),
                    columns.len()
                )));
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.values.push(cell);
            }
        }

        Ok(Self { columns })
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cells of row `idx` in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&str>> {
        if idx >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[idx].as_str()).collect())
    }

    /// Row-major view over all rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.num_rows()).map(move |idx| {
            self.columns
                .iter()
                .map(|c| c.values[idx].as_str())
                .collect()
        })
    }

    /// Set `name` to `value` on every row.
    ///
    /// An existing column of that name is overwritten in place; otherwise the
    /// column is appended after the last one.
    pub fn broadcast_column(&mut self, name: &str, value: &str) {
        let values = vec![value.to_string(); self.num_rows()];
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(col) => col.values = values,
            None => self.columns.push(Column::new(name, values)),
        }
    }
}
