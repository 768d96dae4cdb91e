use crate::cli::commands::print_json;
use crate::cli::parser::FeedbackCommand;
use crate::config::Config;
use crate::core::Services;
use crate::core::feedback::FeedbackLogic;
use crate::core::questions::{FormStep, QuestionKind, response_questions};
use crate::errors::AppResult;
use crate::export::range::display_timestamp;
use crate::ui::messages::{header, info};
use serde::Serialize;

#[derive(Serialize)]
struct FormView<'a> {
    event_id: &'a str,
    event_title: &'a str,
    module: &'a str,
    steps: &'a [FormStep],
}

pub fn handle(cmd: &FeedbackCommand, cfg: &Config) -> AppResult<()> {
    let svc = Services::open(cfg)?;

    match cmd {
        FeedbackCommand::List { event, output } => {
            let ev = svc.store.get_event(event)?;
            let entries = svc.store.list_feedback(&ev.id)?;

            if output.json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                info(format!("No feedback yet for '{}'.", ev.title));
                return Ok(());
            }

            header(format!("Feedback for {}", ev.title));
            let questions = response_questions(ev.event_type);

            for fb in &entries {
                let session = fb
                    .session_number
                    .map(|n| format!(" - session {n}"))
                    .unwrap_or_default();
                println!(
                    "{} <{}>{session} [{}]",
                    fb.name,
                    fb.email,
                    display_timestamp(&fb.created_at)
                );
                for q in &questions {
                    if let Some(a) = fb.responses.get(q.id) {
                        println!("   {}: {a}", q.label);
                    }
                }
                println!();
            }
            info(format!("{} submission(s)", entries.len()));
        }

        FeedbackCommand::Form { event, output } => {
            let (ev, steps) = FeedbackLogic::form(svc.store.as_ref(), event)?;

            if output.json {
                return print_json(&FormView {
                    event_id: &ev.id,
                    event_title: &ev.title,
                    module: ev.event_type.as_str(),
                    steps: &steps,
                });
            }

            header(format!("Feedback form: {} ({})", ev.title, ev.event_type.label()));
            for (i, step) in steps.iter().enumerate() {
                println!("Step {}: {}", i + 1, step.title);
                for q in &step.questions {
                    let req = if q.required { "*" } else { " " };
                    println!("  {req} {:<20} {} {}", q.id, q.label, describe_kind(&q.kind));
                }
                println!();
            }
        }
    }

    Ok(())
}

fn describe_kind(kind: &QuestionKind) -> String {
    match kind {
        QuestionKind::Scale { min, max } => format!("[{min}-{max}]"),
        QuestionKind::YesNo => "[yes/no]".to_string(),
        QuestionKind::Text { .. } => "[text]".to_string(),
        QuestionKind::Choice { options } => format!("[{}]", options.join(" | ")),
    }
}
