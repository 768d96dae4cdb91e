pub mod backup;
pub mod certificate;
pub mod event;
pub mod feedback;
pub mod forms;
pub mod gate;
pub mod log;
pub mod people;
pub mod questions;
pub mod register;
pub mod status;

use crate::config::Config;
use crate::errors::AppResult;
use crate::mail::{Mailer, open_mailer};
use crate::store::{Store, open_store};

/// Backends a workflow needs: persistence, mail, and the sender identity.
pub struct Services {
    pub store: Box<dyn Store>,
    pub mailer: Box<dyn Mailer>,
    pub organisation: String,
}

impl Services {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            store: open_store(cfg)?,
            mailer: open_mailer(cfg)?,
            organisation: cfg.organisation.clone(),
        })
    }

    /// Audit failures never abort the operation being audited.
    pub(crate) fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.audit(operation, target, message) {
            tracing::warn!("Failed to write audit log ({operation}): {e}");
        }
    }
}
