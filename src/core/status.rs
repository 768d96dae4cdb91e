//! Temporal state of events, derived from their session dates.

use crate::models::{Event, EventStatus, Session};
use chrono::{Local, NaiveDateTime};
use std::cmp::Reverse;

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Derive the status of an event from its sessions.
///
/// Returns `None` when there are no sessions, in which case callers fall
/// back to the stored status. Gaps between sessions count as ongoing.
pub fn derive_status(sessions: &[Session], now: NaiveDateTime) -> Option<EventStatus> {
    let first = sessions.iter().map(Session::starts_at).min()?;
    let last = sessions.iter().map(Session::ends_at).max()?;

    if now < first {
        Some(EventStatus::Upcoming)
    } else if now > last {
        Some(EventStatus::Completed)
    } else {
        Some(EventStatus::Ongoing)
    }
}

/// The session currently running or the next one to start.
pub fn next_session(sessions: &[Session], now: NaiveDateTime) -> Option<&Session> {
    sessions
        .iter()
        .filter(|s| s.ends_at() >= now)
        .min_by_key(|s| s.starts_at())
}

/// Listing order: ongoing, then upcoming soonest first, then completed most
/// recent first. Events without sessions sort last within their group.
pub fn sort_for_listing(events: &mut [Event], now: NaiveDateTime) {
    events.sort_by_cached_key(|e| {
        let status = e.status_at(now);
        let first = e.sessions.iter().map(Session::starts_at).min();
        let last = e.sessions.iter().map(Session::ends_at).max();

        match status {
            EventStatus::Ongoing => (0, first.is_none(), first, None, e.title.clone()),
            EventStatus::Upcoming => (1, first.is_none(), first, None, e.title.clone()),
            EventStatus::Completed => (2, last.is_none(), None, last.map(Reverse), e.title.clone()),
        }
    });
}

/// Keep only events whose status at `now` matches.
pub fn filter_by_status(events: Vec<Event>, status: EventStatus, now: NaiveDateTime) -> Vec<Event> {
    events
        .into_iter()
        .filter(|e| e.status_at(now) == status)
        .collect()
}
