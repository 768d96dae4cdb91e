use super::{
    ConductorKind, ConductorRef, EventStatus, EventType, Session, new_id, now_rfc3339,
    null_as_default, session::normalize_sessions,
};
use crate::core::status;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sessions: Vec<Session>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    /// Stored status, only authoritative when the event has no sessions.
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub conductor_kind: Option<ConductorKind>,
    #[serde(default)]
    pub conductor_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agenda: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Event {
    /// New event with a fresh id; sessions are sorted and renumbered.
    pub fn new(title: &str, event_type: EventType, mut sessions: Vec<Session>) -> Self {
        normalize_sessions(&mut sessions);
        Self {
            id: new_id(),
            title: title.trim().to_string(),
            description: String::new(),
            event_type,
            sessions,
            location: String::new(),
            country: String::new(),
            region: String::new(),
            status: EventStatus::Upcoming,
            conductor_kind: None,
            conductor_id: None,
            agenda: Vec::new(),
            images: Vec::new(),
            created_at: now_rfc3339(),
        }
    }

    pub fn with_conductor(mut self, conductor: Option<ConductorRef>) -> Self {
        match conductor {
            Some(c) => {
                self.conductor_kind = Some(c.kind);
                self.conductor_id = Some(c.id);
            }
            None => {
                self.conductor_kind = None;
                self.conductor_id = None;
            }
        }
        self
    }

    pub fn conductor(&self) -> Option<ConductorRef> {
        match (self.conductor_kind, &self.conductor_id) {
            (Some(kind), Some(id)) if !id.is_empty() => Some(ConductorRef {
                kind,
                id: id.clone(),
            }),
            _ => None,
        }
    }

    /// Status at `now`: derived from the sessions, stored status as fallback.
    pub fn status_at(&self, now: NaiveDateTime) -> EventStatus {
        status::derive_status(&self.sessions, now).unwrap_or(self.status)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.sessions.iter().map(|s| s.date).min()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.sessions.iter().map(|s| s.date).max()
    }

    pub fn session(&self, number: u32) -> Option<&Session> {
        self.sessions.iter().find(|s| s.number == number)
    }

    /// `12 Oct 2025`, `12-14 Oct 2025`, or `30 Sep 2025 - 2 Oct 2025`.
    pub fn date_span(&self) -> String {
        match (self.first_date(), self.last_date()) {
            (Some(a), Some(b)) if a == b => a.format("%-d %b %Y").to_string(),
            (Some(a), Some(b)) if (a.year(), a.month()) == (b.year(), b.month()) => {
                format!("{}-{}", a.format("%-d"), b.format("%-d %b %Y"))
            }
            (Some(a), Some(b)) => format!("{} - {}", a.format("%-d %b %Y"), b.format("%-d %b %Y")),
            _ => String::from("date to be announced"),
        }
    }

    /// `location, region, country` without empty parts.
    pub fn place(&self) -> String {
        [&self.location, &self.region, &self.country]
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
