// src/export/logic.rs

use crate::core::Services;
use crate::errors::{AppError, AppResult};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::range::parse_optional_range;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, Report, ReportKind, ensure_writable, reports, require_absolute};
use crate::ui::messages::warning;
use chrono::NaiveDateTime;
use std::path::Path;

/// Options of one export run.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub kind: ReportKind,
    pub format: ExportFormat,
    pub file: String,
    pub event_id: Option<String>,
    /// `None`, `"all"` or a period expression:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `YYYY:YYYY`
    ///   - `YYYY-MM:YYYY-MM`
    ///   - `YYYY-MM-DD:YYYY-MM-DD`
    pub range: Option<String>,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Build the report selected by `kind`.
    pub fn build(
        svc: &Services,
        kind: ReportKind,
        event_id: Option<&str>,
        range: Option<&str>,
        now: NaiveDateTime,
    ) -> AppResult<Report> {
        let bounds = parse_optional_range(range)?;
        let store = svc.store.as_ref();

        match kind {
            ReportKind::Registrations => reports::registrations(store, event_id, bounds),
            ReportKind::Feedback => {
                let id = event_id.ok_or_else(|| {
                    AppError::Export("the feedback report needs --event".to_string())
                })?;
                reports::feedback(store, id, bounds)
            }
            ReportKind::Events => reports::events(store, bounds, now),
        }
    }

    /// Build a report and write it to `req.file`.
    ///
    /// Returns `false` when the report was empty and nothing was written.
    pub fn export(svc: &Services, req: &ExportRequest, now: NaiveDateTime) -> AppResult<bool> {
        let path = Path::new(&req.file);
        require_absolute(path)?;

        let report = Self::build(
            svc,
            req.kind,
            req.event_id.as_deref(),
            req.range.as_deref(),
            now,
        )?;

        if report.is_empty() {
            warning(format!("No {} found for the selected range.", req.kind.as_str()));
            return Ok(false);
        }

        ensure_writable(path, req.force)?;

        match req.format {
            ExportFormat::Csv => export_csv(&report, path)?,
            ExportFormat::Json => export_json(&report, path)?,
            ExportFormat::Xlsx => export_xlsx(&report, path)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(&report.title, req.range.as_deref());
                export_pdf(&report, path, &title)?
            }
        }

        svc.audit(
            "export",
            &req.file,
            &format!("{} as {} ({} rows)", req.kind.as_str(), req.format.as_str(), report.rows.len()),
        );

        Ok(true)
    }
}

/// PDF title: the report title plus the selected period.
fn build_pdf_title(title: &str, period: Option<&str>) -> String {
    match period {
        None => title.to_string(),
        Some(p) if p.eq_ignore_ascii_case("all") => title.to_string(),
        Some(p) => match p.split_once(':') {
            Some((from, to)) => format!("{title} ({from} to {to})"),
            None => format!("{title} ({p})"),
        },
    }
}
