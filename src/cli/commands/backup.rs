use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Services;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde_str;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let svc = Services::open(cfg)?;
        let path = BackupLogic::backup(&svc, cfg, &expand_tilde_str(file), *compress, *force)?;
        success(format!("Backup created: {}", path.display()));
    }

    Ok(())
}
