// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::Report;
use crate::export::notify_export_success;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the report as CSV (header row first) to any writer.
pub fn write_csv<W: Write>(report: &Report, out: W) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record(&report.headers)?;
    for row in &report.rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// CSV text in memory, used by the portal download endpoints.
pub fn render_csv(report: &Report) -> AppResult<String> {
    let mut buf = Vec::new();
    write_csv(report, &mut buf)?;
    String::from_utf8(buf).map_err(|e| AppError::Export(e.to_string()))
}

pub(crate) fn export_csv(report: &Report, path: &Path) -> AppResult<()> {
    write_csv(report, File::create(path)?)?;
    notify_export_success("CSV", path);
    Ok(())
}

/// JSON array of records, pretty printed.
pub(crate) fn export_json(report: &Report, path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(&report.records)?;
    std::fs::write(path, json)?;
    notify_export_success("JSON", path);
    Ok(())
}
