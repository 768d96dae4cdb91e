use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::server::{self, AppState};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { port } = cmd {
        let mut cfg = cfg.clone();
        if let Some(p) = port {
            cfg.server.port = *p;
        }

        // Store and mailer hold blocking HTTP clients: build and drop them
        // outside the async runtime.
        let state = AppState::new(cfg)?;

        let runtime = tokio::runtime::Runtime::new()?;
        let result = runtime.block_on(server::start_server(state.clone()));
        drop(runtime);
        drop(state);

        result?;
    }

    Ok(())
}
