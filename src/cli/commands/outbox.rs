use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::range::display_timestamp;
use crate::mail::OutboxMailer;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Outbox { print: true }) {
        let entries = OutboxMailer::open(&cfg.database)?.entries()?;

        if entries.is_empty() {
            println!("📭 Outbox is empty.");
            return Ok(());
        }

        println!("📬 Outbox ({} message(s)):\n", entries.len());
        for e in entries {
            println!("#{} {} → {}", e.id, display_timestamp(&e.created_at), e.recipient);
            println!("   Subject: {}", e.subject);
            if !e.attachments.is_empty() {
                println!("   Attachments: {}", e.attachments.replace(';', ", "));
            }
            for line in e.body.lines() {
                println!("   | {line}");
            }
            println!();
        }
    }

    Ok(())
}
