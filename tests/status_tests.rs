use chrono::{NaiveDate, NaiveDateTime};
use outreach::core::status::{derive_status, next_session, sort_for_listing};
use outreach::models::{Event, EventStatus, EventType, Session};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn sessions(specs: &[&str]) -> Vec<Session> {
    event("x", specs).sessions
}

fn event(title: &str, specs: &[&str]) -> Event {
    Event::new(
        title,
        EventType::General,
        specs.iter().map(|s| Session::parse_spec(s).unwrap()).collect(),
    )
}

#[test]
fn test_status_around_a_single_timed_session() {
    let s = sessions(&["2025-06-10@10:00-12:00"]);

    assert_eq!(derive_status(&s, at("2025-06-10 09:59")), Some(EventStatus::Upcoming));
    assert_eq!(derive_status(&s, at("2025-06-10 10:00")), Some(EventStatus::Ongoing));
    assert_eq!(derive_status(&s, at("2025-06-10 12:00")), Some(EventStatus::Ongoing));
    assert_eq!(derive_status(&s, at("2025-06-10 12:01")), Some(EventStatus::Completed));
}

#[test]
fn test_untimed_session_covers_the_whole_day() {
    let s = sessions(&["2025-06-10"]);

    assert_eq!(derive_status(&s, at("2025-06-09 23:59")), Some(EventStatus::Upcoming));
    assert_eq!(derive_status(&s, at("2025-06-10 00:00")), Some(EventStatus::Ongoing));
    assert_eq!(derive_status(&s, at("2025-06-10 23:59")), Some(EventStatus::Ongoing));
    assert_eq!(derive_status(&s, at("2025-06-11 00:00")), Some(EventStatus::Completed));
}

#[test]
fn test_gap_between_sessions_is_ongoing() {
    let s = sessions(&["2025-06-10@10:00-12:00", "2025-06-17@10:00-12:00"]);
    assert_eq!(derive_status(&s, at("2025-06-13 15:00")), Some(EventStatus::Ongoing));
}

#[test]
fn test_no_sessions_falls_back_to_stored_status() {
    let mut ev = event("Open Evening", &[]);
    let now = at("2025-06-10 10:00");

    assert_eq!(derive_status(&ev.sessions, now), None);
    assert_eq!(ev.status_at(now), EventStatus::Upcoming);

    ev.status = EventStatus::Completed;
    assert_eq!(ev.status_at(now), EventStatus::Completed);

    // sessions win over the stored status
    let mut dated = event("Dated", &["2030-01-01"]);
    dated.status = EventStatus::Completed;
    assert_eq!(dated.status_at(now), EventStatus::Upcoming);
}

#[test]
fn test_sessions_sorted_and_renumbered() {
    let ev = event(
        "Series",
        &["2025-06-17@14:00-15:00", "2025-06-10", "2025-06-17@09:00-10:00"],
    );

    let order: Vec<(u32, String)> = ev
        .sessions
        .iter()
        .map(|s| (s.number, s.describe()))
        .collect();
    assert_eq!(
        order,
        vec![
            (1, "2025-06-10".to_string()),
            (2, "2025-06-17 09:00-10:00".to_string()),
            (3, "2025-06-17 14:00-15:00".to_string()),
        ]
    );
}

#[test]
fn test_next_session() {
    let s = sessions(&["2025-06-10@10:00-12:00", "2025-06-17@10:00-12:00=Wrap-up"]);

    assert_eq!(next_session(&s, at("2025-06-01 08:00")).map(|s| s.number), Some(1));
    // running session counts as next
    assert_eq!(next_session(&s, at("2025-06-10 11:00")).map(|s| s.number), Some(1));
    let second = next_session(&s, at("2025-06-12 08:00")).unwrap();
    assert_eq!(second.number, 2);
    assert_eq!(second.title.as_deref(), Some("Wrap-up"));
    assert!(next_session(&s, at("2025-06-18 08:00")).is_none());
}

#[test]
fn test_sort_for_listing() {
    let now = at("2025-06-15 12:00");
    let mut events = vec![
        event("Old", &["2025-01-01"]),
        event("Later", &["2025-09-01"]),
        event("Recent", &["2025-06-01"]),
        event("Now", &["2025-06-15"]),
        event("Soon", &["2025-06-20"]),
    ];

    sort_for_listing(&mut events, now);

    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Now", "Soon", "Later", "Recent", "Old"]);
}

#[test]
fn test_session_spec_parsing() {
    let s = Session::parse_spec("2025-10-04@10:00-12:30=Kick-off").unwrap();
    assert_eq!(s.date, NaiveDate::from_ymd_opt(2025, 10, 4).unwrap());
    assert_eq!(s.describe(), "2025-10-04 10:00-12:30 (Kick-off)");

    assert!(Session::parse_spec("2025-10-04@10:00").is_err());
    assert!(Session::parse_spec("2025-10-04@25:00-26:00").is_err());
    assert!(Session::parse_spec("2025-10-04@12:00-12:00").is_err());
    assert!(Session::parse_spec("04/10/2025").is_err());

    let untitled = Session::parse_spec("2025-10-04=").unwrap();
    assert_eq!(untitled.title, None);
}

#[test]
fn test_date_span() {
    assert_eq!(event("a", &["2025-10-12"]).date_span(), "12 Oct 2025");
    assert_eq!(
        event("b", &["2025-10-14", "2025-10-12"]).date_span(),
        "12-14 Oct 2025"
    );
    assert_eq!(
        event("c", &["2025-09-30", "2025-10-02"]).date_span(),
        "30 Sep 2025 - 2 Oct 2025"
    );
    assert_eq!(event("d", &[]).date_span(), "date to be announced");
}
