use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::{SqliteStore, Store};
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file with a fresh portal key (not in test mode)
///  - the local SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing outreach portal…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    let store = SqliteStore::open(&cfg.database)?;
    success(format!("Database initialized at {}", &cfg.database));

    if let Err(e) = store.audit(
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    if let Some(key) = &cfg.portal_key {
        info(format!("Portal key: {key}"));
        if cli.test {
            info("Test mode: set OUTREACH_PORTAL_KEY to use a key of your choice");
        } else {
            info("Keep it secret: staff commands need --key, the HTTP portal the x-portal-key header");
        }
    }

    println!("🎉 Initialization completed!");
    Ok(())
}
