use crate::core::Services;
use crate::errors::{AppError, AppResult};
use crate::export::pdf::{CertificateData, PdfManager};
use crate::export::{ensure_writable, require_absolute, slugify};
use crate::mail::templates;
use crate::models::{Event, EventStatus, Registration};
use crate::store::conductor_name;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct CertificateRequest {
    pub event_id: String,
    /// Absolute output directory, created when missing.
    pub out_dir: String,
    /// One multi-page PDF instead of one file per participant.
    pub combined: bool,
    /// Only registrants who also submitted feedback.
    pub feedback_only: bool,
    /// Overwrite existing files and allow events that are not completed.
    pub force: bool,
    /// Mail each participant their certificate.
    pub send: bool,
}

#[derive(Debug, Default)]
pub struct CertificateOutcome {
    pub participants: usize,
    pub files: Vec<PathBuf>,
    pub sent: usize,
    pub failed: usize,
}

pub struct CertificateLogic;

impl CertificateLogic {
    pub fn generate(
        svc: &Services,
        req: &CertificateRequest,
        now: NaiveDateTime,
    ) -> AppResult<CertificateOutcome> {
        let out_dir = Path::new(&req.out_dir);
        require_absolute(out_dir)?;

        let event = svc.store.get_event(&req.event_id)?;
        let status = event.status_at(now);
        if status != EventStatus::Completed && !req.force {
            return Err(AppError::Certificate(format!(
                "event '{}' is {status}; certificates are issued for completed events (use --force to override)",
                event.title
            )));
        }

        let participants = Self::participants(svc, &event, req.feedback_only)?;
        let mut outcome = CertificateOutcome {
            participants: participants.len(),
            ..Default::default()
        };
        if participants.is_empty() {
            return Ok(outcome);
        }

        fs::create_dir_all(out_dir)?;

        let conductor = match event.conductor() {
            Some(c) => conductor_name(svc.store.as_ref(), &c)?,
            None => None,
        };
        let issued_on = now.date();
        let data_for = |r: &Registration| certificate_data(svc, &event, r, conductor.clone(), issued_on);

        if req.combined {
            let path = out_dir.join(format!("certificates-{}.pdf", slugify(&event.title)));
            ensure_writable(&path, req.force)?;

            let mut pdf = PdfManager::new();
            for r in &participants {
                pdf.write_certificate(&data_for(r));
            }
            pdf.save(&path)?;
            outcome.files.push(path);
        }

        let mut used = HashSet::new();
        for r in &participants {
            let filename = unique_filename(&mut used, &r.name);

            let mut pdf = PdfManager::new();
            pdf.write_certificate(&data_for(r));
            let bytes = pdf.finish();

            if !req.combined {
                let path = out_dir.join(&filename);
                ensure_writable(&path, req.force)?;
                fs::write(&path, &bytes)?;
                outcome.files.push(path);
            }

            if req.send {
                let mail = templates::certificate_delivery(
                    &svc.organisation,
                    &event,
                    &r.name,
                    &r.email,
                    &filename,
                    bytes,
                );
                match svc.mailer.send(&mail) {
                    Ok(()) => outcome.sent += 1,
                    Err(e) => {
                        tracing::warn!("Certificate mail to {} failed: {e}", r.email);
                        svc.audit("mail_failed", &r.email, &e.to_string());
                        outcome.failed += 1;
                    }
                }
            }
        }

        svc.audit(
            "certificates",
            &event.id,
            &format!(
                "{} participants, {} files, {} mailed",
                outcome.participants,
                outcome.files.len(),
                outcome.sent
            ),
        );

        Ok(outcome)
    }

    /// Registrants of the event, one per email address, ordered by name.
    fn participants(svc: &Services, event: &Event, feedback_only: bool) -> AppResult<Vec<Registration>> {
        let mut regs = svc.store.list_registrations(Some(&event.id))?;

        if feedback_only {
            let responded: HashSet<String> = svc
                .store
                .list_feedback(&event.id)?
                .into_iter()
                .map(|f| f.email.to_lowercase())
                .collect();
            regs.retain(|r| responded.contains(&r.email.to_lowercase()));
        }

        let mut seen = HashSet::new();
        regs.retain(|r| seen.insert(r.email.to_lowercase()));
        regs.sort_by_key(|r| r.name.to_lowercase());

        Ok(regs)
    }
}

fn certificate_data(
    svc: &Services,
    event: &Event,
    reg: &Registration,
    conductor: Option<String>,
    issued_on: NaiveDate,
) -> CertificateData {
    CertificateData {
        organisation: svc.organisation.clone(),
        participant: reg.name.clone(),
        event_title: event.title.clone(),
        date_span: event.date_span(),
        place: event.place(),
        conductor,
        issued_on: issued_on.format("%-d %B %Y").to_string(),
    }
}

/// `certificate-<slug>.pdf`, with `-2`, `-3`, ... for repeated names.
fn unique_filename(used: &mut HashSet<String>, name: &str) -> String {
    let base = slugify(name);
    let mut slug = base.clone();
    let mut n = 2;
    while !used.insert(slug.clone()) {
        slug = format!("{base}-{n}");
        n += 1;
    }
    format!("certificate-{slug}.pdf")
}

