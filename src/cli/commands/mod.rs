pub mod backup;
pub mod certificate;
pub mod config;
pub mod event;
pub mod export;
pub mod feedback;
pub mod init;
pub mod log;
pub mod outbox;
pub mod people;
pub mod registration;
pub mod serve;

use crate::errors::AppResult;
use serde::Serialize;

/// Pretty JSON on stdout, for `--json` output.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
