use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{Services, status};
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;
use crate::utils::path::expand_tilde_str;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        file,
        event,
        range,
        force,
    } = cmd
    {
        let svc = Services::open(cfg)?;
        let req = ExportRequest {
            kind: *report,
            format: *format,
            file: expand_tilde_str(file),
            event_id: event.clone(),
            range: range.clone(),
            force: *force,
        };
        ExportLogic::export(&svc, &req, status::now())?;
    }
    Ok(())
}
