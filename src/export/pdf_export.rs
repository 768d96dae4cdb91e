// src/export/pdf_export.rs

use crate::errors::AppResult;
use crate::export::model::Report;
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use std::path::Path;

pub(crate) fn export_pdf(report: &Report, path: &Path, title: &str) -> AppResult<()> {
    let mut pdf = PdfManager::new();
    pdf.write_table(title, &report.headers, &report.rows);
    pdf.save(path)?;

    notify_export_success("PDF", path);
    Ok(())
}
