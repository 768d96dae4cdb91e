use crate::core::forms::FieldError;
use crate::core::{Services, status};
use crate::errors::{AppError, AppResult};
use crate::models::{ConductorRef, Event, EventStatus, EventType, Session};
use crate::store::{Store, ensure_conductor};
use chrono::{NaiveDate, NaiveDateTime};

/// Input for creating an event from the portal.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub sessions: Vec<Session>,
    pub location: String,
    pub country: String,
    pub region: String,
    pub status: Option<EventStatus>,
    pub conductor: Option<ConductorRef>,
    pub agenda: Vec<String>,
    pub images: Vec<String>,
}

/// Event with its status evaluated at a given instant.
#[derive(Debug, Clone)]
pub struct ListedEvent {
    pub event: Event,
    pub status: EventStatus,
}

pub struct EventLogic;

impl EventLogic {
    pub fn create(svc: &Services, input: NewEvent) -> AppResult<Event> {
        if input.title.trim().is_empty() {
            return Err(AppError::Validation(vec![
                FieldError::new("title", "is required"),
            ]));
        }

        if let Some(c) = &input.conductor {
            ensure_conductor(svc.store.as_ref(), c)?;
        }

        let mut event = Event::new(&input.title, input.event_type, input.sessions)
            .with_conductor(input.conductor);
        event.description = input.description.trim().to_string();
        event.location = input.location.trim().to_string();
        event.country = input.country.trim().to_string();
        event.region = input.region.trim().to_string();
        event.agenda = input.agenda;
        event.images = input.images;
        if let Some(s) = input.status {
            event.status = s;
        }

        svc.store.insert_event(&event)?;
        svc.audit("event_create", &event.id, &event.title);

        Ok(event)
    }

    /// Events for listing pages: derived status, optional status filter,
    /// optional date window (an event matches if any session falls inside).
    pub fn list(
        store: &dyn Store,
        status_filter: Option<EventStatus>,
        bounds: Option<(NaiveDate, NaiveDate)>,
        now: NaiveDateTime,
    ) -> AppResult<Vec<ListedEvent>> {
        let mut events = store.list_events()?;

        if let Some(s) = status_filter {
            events = status::filter_by_status(events, s, now);
        }

        if let Some((from, to)) = bounds {
            events.retain(|e| e.sessions.iter().any(|s| s.date >= from && s.date <= to));
        }

        status::sort_for_listing(&mut events, now);

        Ok(events
            .into_iter()
            .map(|event| ListedEvent {
                status: event.status_at(now),
                event,
            })
            .collect())
    }

    /// Override the stored status. Only visible for events without sessions,
    /// since derived status wins otherwise.
    pub fn set_status(svc: &Services, id: &str, status: EventStatus) -> AppResult<Event> {
        svc.store.update_event_status(id, status)?;
        svc.audit("event_status", id, status.as_str());
        svc.store.get_event(id)
    }

    pub fn delete(svc: &Services, id: &str) -> AppResult<Event> {
        let event = svc.store.get_event(id)?;
        svc.store.delete_event(id)?;
        svc.audit("event_delete", id, &event.title);
        Ok(event)
    }
}
