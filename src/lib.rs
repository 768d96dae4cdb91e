//! Outreach portal library root.
//! Exposes the CLI parser, the high-level `run()` function, the HTTP server
//! and the domain modules shared by both.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod mail;
pub mod models;
pub mod server;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use core::gate::check_portal_key;
use errors::AppResult;
use tracing_subscriber::{EnvFilter, fmt};

/// Central command dispatcher. Staff commands pass the portal gate first.
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if !cli.command.is_public() {
        check_portal_key(cfg.portal_key.as_deref(), cli.key.as_deref())?;
    }

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Event(cmd) => commands::event::handle(cmd, cfg),
        Commands::Registration(cmd) => commands::registration::handle(cmd, cfg),
        Commands::Feedback(cmd) => commands::feedback::handle(cmd, cfg),
        Commands::Facilitator(cmd) => commands::people::handle_facilitator(cmd, cfg),
        Commands::Team(cmd) => commands::people::handle_team(cmd, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Certificate { .. } => commands::certificate::handle(&cli.command, cfg),
        Commands::Outbox { .. } => commands::outbox::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Serve { .. } => commands::serve::handle(&cli.command, cfg),
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG`.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    init_tracing(match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    });

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde_str(custom_db);
    }

    dispatch(&cli, &cfg)
}
