//! Transactional email.

pub mod outbox;
pub mod resend;
pub mod templates;

use crate::config::{Config, MailProvider};
use crate::errors::AppResult;

pub use outbox::OutboxMailer;
pub use resend::ResendMailer;

#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    pub attachments: Vec<Attachment>,
}

impl OutgoingMail {
    pub fn with_attachment(mut self, filename: &str, content: Vec<u8>) -> Self {
        self.attachments.push(Attachment {
            filename: filename.to_string(),
            content,
        });
        self
    }
}

pub trait Mailer: Send {
    fn send(&self, mail: &OutgoingMail) -> AppResult<()>;
}

/// Build the mailer selected in the configuration.
pub fn open_mailer(cfg: &Config) -> AppResult<Box<dyn Mailer>> {
    match cfg.mail.provider {
        MailProvider::Outbox => Ok(Box::new(OutboxMailer::open(&cfg.database)?)),
        MailProvider::Resend => Ok(Box::new(ResendMailer::new(&cfg.mail)?)),
    }
}
