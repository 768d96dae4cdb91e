//! Table rendering utilities for CLI outputs.

use crate::utils::colors::{BLUE, RESET};
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"));

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Printed width of a cell, ignoring colour codes.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_width: usize,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            max_width: 40,
        }
    }

    /// Cells wider than this are cut with `…`.
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width.max(4);
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn fit(&self, cell: &str) -> String {
        if visible_width(cell) <= self.max_width {
            return cell.to_string();
        }
        let plain = strip_ansi(cell);
        let mut out = String::new();
        for c in plain.chars() {
            if UnicodeWidthStr::width(out.as_str()) + 2 > self.max_width {
                break;
            }
            out.push(c);
        }
        out.push('…');
        out
    }

    pub fn render(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(|c| self.fit(c)).collect())
            .collect();

        let mut widths: Vec<usize> = self.headers.iter().map(|h| visible_width(h)).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(visible_width(cell));
            }
        }

        let mut out = String::new();

        for (h, w) in self.headers.iter().zip(&widths) {
            let pad = w.saturating_sub(visible_width(h));
            out.push_str(&format!("{BLUE}{h}{RESET}{} ", " ".repeat(pad)));
        }
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + widths.len();
        out.push_str(&"─".repeat(total));
        out.push('\n');

        for row in &rows {
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = w.saturating_sub(visible_width(cell));
                out.push_str(cell);
                out.push_str(&" ".repeat(pad + 1));
            }
            out.push('\n');
        }

        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}
