use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::certificate::{CertificateLogic, CertificateRequest};
use crate::core::{Services, status};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde_str;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Certificate {
        event,
        out_dir,
        combined,
        feedback_only,
        send,
        force,
    } = cmd
    {
        let svc = Services::open(cfg)?;
        let req = CertificateRequest {
            event_id: event.clone(),
            out_dir: expand_tilde_str(out_dir),
            combined: *combined,
            feedback_only: *feedback_only,
            force: *force,
            send: *send,
        };

        let outcome = CertificateLogic::generate(&svc, &req, status::now())?;

        if outcome.participants == 0 {
            warning("No participants: no certificates generated.");
            return Ok(());
        }

        for f in &outcome.files {
            info(format!("Written {}", f.display()));
        }
        success(format!(
            "Certificates generated for {} participant(s)",
            outcome.participants
        ));

        if *send {
            info(format!("Mailed: {}", outcome.sent));
            if outcome.failed > 0 {
                warning(format!(
                    "Mail failed for {} participant(s); see `outreach log --print`",
                    outcome.failed
                ));
            }
        }
    }
    Ok(())
}
