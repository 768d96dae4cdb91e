// src/export/model.rs

use serde::Serialize;

/// A tabular report, shared by every output format.
///
/// `rows` feed CSV/XLSX/PDF; `records` are the typed rows for JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub headers: Vec<String>,
    /// Per column: write as a number in spreadsheets.
    #[serde(skip)]
    pub numeric: Vec<bool>,
    #[serde(skip)]
    pub rows: Vec<Vec<String>>,
    pub records: Vec<serde_json::Value>,
}

impl Report {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            numeric: vec![false; headers.len()],
            rows: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn numeric_columns(mut self, cols: &[usize]) -> Self {
        for &c in cols {
            if let Some(flag) = self.numeric.get_mut(c) {
                *flag = true;
            }
        }
        self
    }

    pub fn push<T: Serialize>(&mut self, row: Vec<String>, record: &T) -> serde_json::Result<()> {
        self.rows.push(row);
        self.records.push(serde_json::to_value(record)?);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
