use crate::cli::commands::print_json;
use crate::cli::parser::EventCommand;
use crate::config::Config;
use crate::core::Services;
use crate::core::event::{EventLogic, NewEvent};
use crate::core::status;
use crate::errors::AppResult;
use crate::export::range::parse_optional_range;
use crate::models::{ConductorRef, Event, EventStatus, EventType, Session};
use crate::store::conductor_name;
use crate::ui::messages::{info, success};
use crate::utils::colors::{colorize_optional, paint_status};
use crate::utils::table::Table;
use serde::Serialize;

/// Event plus its status at the time of the command.
#[derive(Serialize)]
struct EventView<'a> {
    #[serde(flatten)]
    event: &'a Event,
    current_status: EventStatus,
}

pub fn handle(cmd: &EventCommand, cfg: &Config) -> AppResult<()> {
    let svc = Services::open(cfg)?;
    let now = status::now();

    match cmd {
        EventCommand::Create {
            title,
            event_type,
            sessions,
            description,
            location,
            country,
            region,
            status,
            conductor,
            agenda,
            images,
            output,
        } => {
            let input = NewEvent {
                title: title.clone(),
                description: description.clone(),
                event_type: EventType::parse(event_type)?,
                sessions: sessions
                    .iter()
                    .map(|s| Session::parse_spec(s))
                    .collect::<AppResult<Vec<_>>>()?,
                location: location.clone(),
                country: country.clone(),
                region: region.clone(),
                status: status.as_deref().map(EventStatus::parse).transpose()?,
                conductor: conductor.as_deref().map(ConductorRef::parse).transpose()?,
                agenda: agenda.clone(),
                images: images.clone(),
            };

            let event = EventLogic::create(&svc, input)?;

            if output.json {
                print_json(&EventView {
                    current_status: event.status_at(now),
                    event: &event,
                })?;
            } else {
                success(format!("Event created: {} ({})", event.title, event.id));
                info(format!("Status: {}", paint_status(event.status_at(now))));
            }
        }

        EventCommand::List {
            status,
            period,
            output,
        } => {
            let filter = status.as_deref().map(EventStatus::parse).transpose()?;
            let bounds = parse_optional_range(period.as_deref())?;
            let events = EventLogic::list(svc.store.as_ref(), filter, bounds, now)?;

            if output.json {
                let views: Vec<EventView> = events
                    .iter()
                    .map(|l| EventView {
                        event: &l.event,
                        current_status: l.status,
                    })
                    .collect();
                return print_json(&views);
            }

            if events.is_empty() {
                info("No events found.");
                return Ok(());
            }

            let mut table =
                Table::new(&["ID", "Title", "Module", "Status", "Dates", "Place"]).max_width(36);
            for l in &events {
                table.add_row(vec![
                    l.event.id.clone(),
                    l.event.title.clone(),
                    l.event.event_type.as_str().to_string(),
                    paint_status(l.status),
                    l.event.date_span(),
                    colorize_optional(&l.event.place()),
                ]);
            }
            table.print();
        }

        EventCommand::Show { id, output } => {
            let event = svc.store.get_event(id)?;
            let current = event.status_at(now);

            if output.json {
                return print_json(&EventView {
                    event: &event,
                    current_status: current,
                });
            }

            print_event(&svc, &event, current, now)?;
        }

        EventCommand::Status { id, status } => {
            let status = EventStatus::parse(status)?;
            let event = EventLogic::set_status(&svc, id, status)?;
            success(format!("Stored status of '{}' set to {status}", event.title));
            if !event.sessions.is_empty() {
                info(format!(
                    "The event has sessions; its displayed status stays {}",
                    paint_status(event.status_at(now))
                ));
            }
        }

        EventCommand::Delete { id } => {
            let event = EventLogic::delete(&svc, id)?;
            success(format!("Event deleted: {} ({})", event.title, event.id));
        }
    }

    Ok(())
}

fn print_event(
    svc: &Services,
    event: &Event,
    current: EventStatus,
    now: chrono::NaiveDateTime,
) -> AppResult<()> {
    println!("📅 {}", event.title);
    println!("   ID       : {}", event.id);
    println!("   Module   : {}", event.event_type.label());
    println!("   Status   : {}", paint_status(current));
    println!("   Dates    : {}", event.date_span());
    println!("   Place    : {}", colorize_optional(&event.place()));

    if let Some(c) = event.conductor() {
        let name = conductor_name(svc.store.as_ref(), &c)?.unwrap_or_else(|| c.id.clone());
        println!("   Conductor: {name} ({})", c.kind.as_str());
    }

    if !event.description.is_empty() {
        println!("\n{}", textwrap::fill(&event.description, 72));
    }

    if !event.sessions.is_empty() {
        println!("\nSessions:");
        let next = status::next_session(&event.sessions, now).map(|s| s.number);
        for s in &event.sessions {
            let marker = if Some(s.number) == next { "▶" } else { " " };
            println!(" {marker} {}. {}", s.number, s.describe());
        }
    }

    if !event.agenda.is_empty() {
        println!("\nAgenda:");
        for item in &event.agenda {
            println!("   - {item}");
        }
    }

    let registrations = svc.store.list_registrations(Some(&event.id))?.len();
    println!("\n👥 Registrations: {registrations}");

    Ok(())
}
