// src/export/reports.rs

use crate::core::questions::{QuestionKind, response_questions};
use crate::core::status;
use crate::errors::AppResult;
use crate::export::model::Report;
use crate::export::range::{display_timestamp, in_bounds, timestamp_date};
use crate::models::{Event, Registration};
use crate::store::{Store, conductor_name};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

type Bounds = Option<(NaiveDate, NaiveDate)>;

/// Registrations of one event, or of every event when `event_id` is `None`
/// (an extra leading `Event` column then names the event).
pub fn registrations(store: &dyn Store, event_id: Option<&str>, bounds: Bounds) -> AppResult<Report> {
    let (title, titles) = match event_id {
        Some(id) => {
            let ev = store.get_event(id)?;
            (format!("Registrations - {}", ev.title), HashMap::new())
        }
        None => {
            let titles: HashMap<String, String> = store
                .list_events()?
                .into_iter()
                .map(|e| (e.id, e.title))
                .collect();
            ("Registrations - all events".to_string(), titles)
        }
    };

    let mut headers = vec!["Name", "Email", "Phone", "Country", "Registered At"];
    if event_id.is_none() {
        headers.insert(0, "Event");
    }
    let mut report = Report::new(title, &headers);

    let mut regs: Vec<Registration> = store
        .list_registrations(event_id)?
        .into_iter()
        .filter(|r| in_bounds(timestamp_date(&r.created_at), bounds))
        .collect();
    regs.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    for r in &regs {
        let mut row = vec![
            r.name.clone(),
            r.email.clone(),
            r.phone.clone(),
            r.country.clone(),
            display_timestamp(&r.created_at),
        ];
        if event_id.is_none() {
            row.insert(0, titles.get(&r.event_id).cloned().unwrap_or_default());
        }
        report.push(row, r)?;
    }

    Ok(report)
}

/// Feedback of one event, one column per response question of the event's
/// module in form order. Headers are the question labels.
pub fn feedback(store: &dyn Store, event_id: &str, bounds: Bounds) -> AppResult<Report> {
    let event = store.get_event(event_id)?;
    let questions = response_questions(event.event_type);

    let mut headers: Vec<&str> = vec!["Submitted At", "Session", "Name", "Email"];
    headers.extend(questions.iter().map(|q| q.label));

    let numeric: Vec<usize> = std::iter::once(1)
        .chain(
            questions
                .iter()
                .enumerate()
                .filter(|(_, q)| matches!(q.kind, QuestionKind::Scale { .. }))
                .map(|(i, _)| i + 4),
        )
        .collect();

    let mut report =
        Report::new(format!("Feedback - {}", event.title), &headers).numeric_columns(&numeric);

    let mut entries = store.list_feedback(event_id)?;
    entries.retain(|f| in_bounds(timestamp_date(&f.created_at), bounds));
    entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    for fb in &entries {
        let mut row = vec![
            display_timestamp(&fb.created_at),
            fb.session_number.map(|n| n.to_string()).unwrap_or_default(),
            fb.name.clone(),
            fb.email.clone(),
        ];

        // JSON records are keyed by question id
        let mut record = Map::new();
        record.insert("submitted_at".into(), Value::String(fb.created_at.clone()));
        record.insert(
            "session".into(),
            fb.session_number.map(Value::from).unwrap_or(Value::Null),
        );
        record.insert("name".into(), Value::String(fb.name.clone()));
        record.insert("email".into(), Value::String(fb.email.clone()));

        for q in &questions {
            let answer = fb.responses.get(q.id);
            row.push(answer.map(|a| a.to_string()).unwrap_or_default());
            record.insert(
                q.id.to_string(),
                answer.map(serde_json::to_value).transpose()?.unwrap_or(Value::Null),
            );
        }

        report.push(row, &record)?;
    }

    Ok(report)
}

#[derive(Serialize)]
struct EventRecord<'a> {
    id: &'a str,
    title: &'a str,
    module: &'a str,
    status: &'a str,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
    sessions: usize,
    location: &'a str,
    country: &'a str,
    region: &'a str,
    conductor: Option<&'a str>,
    registrations: usize,
}

/// Overview of events with derived status and registration counts. An
/// event is in range when any of its sessions is.
pub fn events(store: &dyn Store, bounds: Bounds, now: NaiveDateTime) -> AppResult<Report> {
    let mut events: Vec<Event> = store.list_events()?;
    if let Some((from, to)) = bounds {
        events.retain(|e| e.sessions.iter().any(|s| s.date >= from && s.date <= to));
    }
    status::sort_for_listing(&mut events, now);

    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in store.list_registrations(None)? {
        *counts.entry(r.event_id).or_default() += 1;
    }

    let mut report = Report::new(
        "Events",
        &[
            "ID",
            "Title",
            "Module",
            "Status",
            "First Date",
            "Last Date",
            "Sessions",
            "Location",
            "Country",
            "Region",
            "Conductor",
            "Registrations",
        ],
    )
    .numeric_columns(&[6, 11]);

    for ev in &events {
        let conductor = match ev.conductor() {
            Some(c) => conductor_name(store, &c)?,
            None => None,
        };
        let status = ev.status_at(now);
        let registrations = counts.get(&ev.id).copied().unwrap_or(0);
        let fmt_date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();

        let row = vec![
            ev.id.clone(),
            ev.title.clone(),
            ev.event_type.as_str().to_string(),
            status.as_str().to_string(),
            fmt_date(ev.first_date()),
            fmt_date(ev.last_date()),
            ev.sessions.len().to_string(),
            ev.location.clone(),
            ev.country.clone(),
            ev.region.clone(),
            conductor.clone().unwrap_or_default(),
            registrations.to_string(),
        ];

        let record = EventRecord {
            id: &ev.id,
            title: &ev.title,
            module: ev.event_type.as_str(),
            status: status.as_str(),
            first_date: ev.first_date(),
            last_date: ev.last_date(),
            sessions: ev.sessions.len(),
            location: &ev.location,
            country: &ev.country,
            region: &ev.region,
            conductor: conductor.as_deref(),
            registrations,
        };

        report.push(row, &record)?;
    }

    Ok(report)
}
