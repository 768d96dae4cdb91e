//! Mail API client (Resend-compatible JSON endpoint).

use super::{Mailer, OutgoingMail};
use crate::config::MailConfig;
use crate::errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct ApiAttachment<'a> {
    filename: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ApiMail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<ApiAttachment<'a>>,
}

pub struct ResendMailer {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
    reply_to: Option<String>,
}

impl ResendMailer {
    pub fn new(cfg: &MailConfig) -> AppResult<Self> {
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Config("missing mail api key (OUTREACH_MAIL_KEY)".into()))?;

        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(20)).build()?,
            api_url: cfg.api_url.clone(),
            api_key,
            from: cfg.from.clone(),
            reply_to: cfg.reply_to.clone(),
        })
    }
}

impl Mailer for ResendMailer {
    fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        let body = ApiMail {
            from: &self.from,
            to: [&mail.to],
            subject: &mail.subject,
            text: &mail.text,
            html: &mail.html,
            reply_to: self.reply_to.as_deref(),
            attachments: mail
                .attachments
                .iter()
                .map(|a| ApiAttachment {
                    filename: &a.filename,
                    content: STANDARD.encode(&a.content),
                })
                .collect(),
        };

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(AppError::Mail(format!("{status}: {text}")));
        }

        Ok(())
    }
}
