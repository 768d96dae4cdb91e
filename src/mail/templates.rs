//! Message bodies for the transactional mails.

use super::OutgoingMail;
use crate::models::{Event, Registration};

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Paragraphs → `<p>` blocks, single newlines → `<br>`.
fn text_to_html(text: &str) -> String {
    text.split("\n\n")
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn mail(to: &str, subject: String, text: String) -> OutgoingMail {
    OutgoingMail {
        to: to.to_string(),
        html: text_to_html(&text),
        subject,
        text,
        attachments: Vec::new(),
    }
}

pub fn registration_confirmation(org: &str, event: &Event, reg: &Registration) -> OutgoingMail {
    let mut text = format!(
        "Hi {},\n\nYou are registered for \"{}\".",
        reg.name, event.title
    );

    if !event.sessions.is_empty() {
        text.push_str("\n\nSessions:");
        for s in &event.sessions {
            text.push_str(&format!("\n- {}", s.describe()));
        }
    }

    let place = event.place();
    if !place.is_empty() {
        text.push_str(&format!("\n\nWhere: {place}"));
    }

    text.push_str(&format!("\n\nSee you there!\n{org}"));

    mail(
        &reg.email,
        format!("Registration confirmed: {}", event.title),
        text,
    )
}

pub fn feedback_thanks(org: &str, event: &Event, name: &str, email: &str) -> OutgoingMail {
    let text = format!(
        "Hi {name},\n\nThank you for sharing your feedback on \"{}\". It helps us make the next sessions better.\n\n{org}",
        event.title
    );
    mail(email, format!("Thanks for your feedback: {}", event.title), text)
}

pub fn certificate_delivery(
    org: &str,
    event: &Event,
    name: &str,
    email: &str,
    filename: &str,
    pdf: Vec<u8>,
) -> OutgoingMail {
    let text = format!(
        "Hi {name},\n\nCongratulations on completing \"{}\" ({}). Your certificate of participation is attached.\n\n{org}",
        event.title,
        event.date_span()
    );
    mail(email, format!("Your certificate: {}", event.title), text).with_attachment(filename, pdf)
}
