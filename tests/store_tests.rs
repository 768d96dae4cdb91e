mod common;
use common::StubServer;
use outreach::db::migrate::applied_versions;
use outreach::errors::AppError;
use outreach::models::{
    Answer, ConductorKind, ConductorRef, Event, EventStatus, EventType, Facilitator, Feedback,
    Registration, Session, TeamMember,
};
use outreach::store::{RestStore, SqliteStore, Store, conductor_name};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn open_store() -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.sqlite");
    let store = SqliteStore::open(&path.to_string_lossy()).unwrap();
    (dir, store)
}

fn sample_event() -> Event {
    let mut ev = Event::new(
        "Digital Saturdays",
        EventType::DigitalSkills,
        vec![
            Session::parse_spec("2025-11-08@10:00-13:00=Intro").unwrap(),
            Session::parse_spec("2025-11-01@10:00-13:00").unwrap(),
        ],
    );
    ev.location = "Town Library".into();
    ev.agenda = vec!["Welcome".into(), "Hands-on".into()];
    ev.images = vec!["https://cdn.example.org/a.jpg".into()];
    ev
}

#[test]
fn test_event_roundtrip_keeps_json_columns() {
    let (_dir, store) = open_store();
    let ev = sample_event();
    store.insert_event(&ev).unwrap();

    let loaded = store.get_event(&ev.id).unwrap();
    assert_eq!(loaded, ev);
    assert_eq!(loaded.sessions[0].number, 1);
    assert_eq!(loaded.sessions[1].title.as_deref(), Some("Intro"));

    store
        .update_event_status(&ev.id, EventStatus::Completed)
        .unwrap();
    assert_eq!(store.get_event(&ev.id).unwrap().status, EventStatus::Completed);

    assert!(matches!(
        store.get_event("missing"),
        Err(AppError::NotFound { entity: "Event", .. })
    ));
    assert!(matches!(
        store.update_event_status("missing", EventStatus::Ongoing),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn test_registration_uniqueness_and_integrity() {
    let (_dir, store) = open_store();
    let ev = sample_event();
    store.insert_event(&ev).unwrap();

    let reg = Registration::new(&ev.id, "Ada", "ada@example.org", "07700900123", "UK");
    store.insert_registration(&reg).unwrap();

    let again = Registration::new(&ev.id, "Ada L", "ada@example.org", "07700900123", "UK");
    assert!(matches!(
        store.insert_registration(&again),
        Err(AppError::DuplicateRegistration(email)) if email == "ada@example.org"
    ));

    let orphan = Registration::new("no-such-event", "Bob", "bob@example.org", "07700900123", "UK");
    assert!(matches!(
        store.insert_registration(&orphan),
        Err(AppError::NotFound { entity: "Event", .. })
    ));

    assert_eq!(store.list_registrations(Some(&ev.id)).unwrap().len(), 1);
    assert_eq!(store.list_registrations(None).unwrap().len(), 1);

    store.delete_registration(&reg.id).unwrap();
    assert!(matches!(
        store.delete_registration(&reg.id),
        Err(AppError::NotFound { entity: "Registration", .. })
    ));
}

#[test]
fn test_deleting_event_cascades() {
    let (_dir, store) = open_store();
    let ev = sample_event();
    store.insert_event(&ev).unwrap();

    store
        .insert_registration(&Registration::new(&ev.id, "Ada", "ada@example.org", "07700900123", "UK"))
        .unwrap();

    let mut responses = BTreeMap::new();
    responses.insert("overall".to_string(), Answer::Scale(5));
    responses.insert("digital_device".to_string(), Answer::Flag(true));
    responses.insert("highlights".to_string(), Answer::Text("Coding".into()));
    store
        .insert_feedback(&Feedback::new(&ev.id, Some(2), "Ada", "ada@example.org", responses.clone()))
        .unwrap();

    let fb = store.list_feedback(&ev.id).unwrap();
    assert_eq!(fb.len(), 1);
    assert_eq!(fb[0].session_number, Some(2));
    assert_eq!(fb[0].responses, responses);

    store.delete_event(&ev.id).unwrap();

    assert!(store.list_registrations(None).unwrap().is_empty());
    assert!(store.list_feedback(&ev.id).unwrap().is_empty());
    assert!(store.list_events().unwrap().is_empty());
}

#[test]
fn test_conductor_directory() {
    let (_dir, store) = open_store();

    let f = Facilitator::new("Maya", "MAYA@example.org", "Poetry Trust");
    let t = TeamMember::new("Jo", "Coordinator", "jo@example.org");
    store.insert_facilitator(&f).unwrap();
    store.insert_team_member(&t).unwrap();

    let facilitators = store.list_facilitators().unwrap();
    assert_eq!(facilitators.len(), 1);
    assert_eq!(facilitators[0].email, "maya@example.org");
    assert_eq!(store.list_team().unwrap()[0].role, "Coordinator");

    let by_facilitator = ConductorRef {
        kind: ConductorKind::Facilitator,
        id: f.id.clone(),
    };
    assert_eq!(
        conductor_name(&store, &by_facilitator).unwrap().as_deref(),
        Some("Maya")
    );

    // a facilitator id is not a team id
    let wrong_table = ConductorRef {
        kind: ConductorKind::Team,
        id: f.id.clone(),
    };
    assert_eq!(conductor_name(&store, &wrong_table).unwrap(), None);
}

#[test]
fn test_migrations_recorded_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("migrations.sqlite").to_string_lossy().to_string();

    let first = SqliteStore::open(&path).unwrap();
    let versions = applied_versions(&first.pool().conn).unwrap();
    assert!(!versions.is_empty());
    drop(first);

    // reopening applies nothing new
    let second = SqliteStore::open(&path).unwrap();
    assert_eq!(applied_versions(&second.pool().conn).unwrap(), versions);

    let log = second.load_log().unwrap();
    assert_eq!(
        log.iter().filter(|e| e.operation == "migration_applied").count(),
        versions.len()
    );

    second.audit("init", "here", "Database initialized").unwrap();
    let last = second.load_log().unwrap().pop().unwrap();
    assert_eq!(last.operation, "init");
    assert_eq!(last.target, "here");
}

// ---------------------------
// Hosted REST backend
// ---------------------------

const REST_KEY: &str = "svc-key";

fn rest_store(stub: &StubServer) -> RestStore {
    RestStore::new(&stub.base, Some(REST_KEY)).unwrap()
}

#[test]
fn test_rest_get_event_sends_key_headers_and_eq_filter() {
    let event = sample_event();
    let rows = serde_json::to_string(&vec![event.clone()]).unwrap();
    let stub = StubServer::start(move |_| (200, rows.clone()));

    let got = rest_store(&stub).get_event(&event.id).unwrap();
    assert_eq!(got.id, event.id);
    assert_eq!(got.title, "Digital Saturdays");
    assert_eq!(got.sessions.len(), 2);

    let reqs = stub.requests();
    assert_eq!(reqs.len(), 1);
    let req = &reqs[0];
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/rest/v1/events");
    assert!(req.query.contains("select=*"));
    assert!(req.query.contains(&format!("id=eq.{}", event.id)));
    assert_eq!(req.header("apikey"), REST_KEY);
    assert_eq!(req.header("authorization"), "Bearer svc-key");
}

#[test]
fn test_rest_empty_result_is_not_found() {
    let stub = StubServer::start(|_| (200, "[]".to_string()));

    let err = rest_store(&stub).get_event("missing").unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Event", .. }));
}

#[test]
fn test_rest_404_is_not_found() {
    let stub = StubServer::start(|_| (404, r#"{"message":"relation does not exist"}"#.to_string()));

    let err = rest_store(&stub).list_events().unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "events", .. }));
    assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);

    let err = rest_store(&stub).get_event("abc").unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[test]
fn test_rest_other_failures_keep_status_and_body() {
    let stub = StubServer::start(|_| (503, "maintenance".to_string()));

    match rest_store(&stub).list_facilitators().unwrap_err() {
        AppError::Remote { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_rest_insert_asks_for_representation() {
    let stub = StubServer::start(|req| (201, format!("[{}]", req.body)));
    let reg = Registration::new("e1", "Ada", "ada@example.org", "+44 7700 900123", "UK");

    rest_store(&stub).insert_registration(&reg).unwrap();

    let req = &stub.requests()[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/rest/v1/registrations");
    assert_eq!(req.header("prefer"), "return=representation");
    assert_eq!(req.json()["email"], "ada@example.org");
    assert_eq!(req.json()["event_id"], "e1");
}

#[test]
fn test_rest_conflicts_map_to_duplicate_or_missing_event() {
    let stub = StubServer::start(|req| {
        let code = if req.body.contains("dup@example.org") {
            "23505"
        } else {
            "23503"
        };
        (409, format!(r#"{{"code":"{code}","message":"conflict"}}"#))
    });
    let store = rest_store(&stub);

    let dup = Registration::new("e1", "Ada", "dup@example.org", "+44 7700 900123", "UK");
    match store.insert_registration(&dup).unwrap_err() {
        AppError::DuplicateRegistration(email) => assert_eq!(email, "dup@example.org"),
        other => panic!("unexpected error: {other}"),
    }

    let orphan = Registration::new("gone", "Ada", "ada@example.org", "+44 7700 900123", "UK");
    match store.insert_registration(&orphan).unwrap_err() {
        AppError::NotFound { entity, id } => {
            assert_eq!(entity, "Event");
            assert_eq!(id, "gone");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_rest_status_update_and_delete() {
    let stub = StubServer::start(|req| {
        if req.query.contains("id=eq.e1") {
            (200, r#"[{"id":"e1"}]"#.to_string())
        } else {
            (200, "[]".to_string())
        }
    });
    let store = rest_store(&stub);

    store.update_event_status("e1", EventStatus::Completed).unwrap();
    store.delete_registration("e1").unwrap();

    let err = store.delete_event("nope").unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "Event", .. }));

    let reqs = stub.requests();
    assert_eq!(reqs[0].method, "PATCH");
    assert_eq!(reqs[0].path, "/rest/v1/events");
    assert_eq!(reqs[0].json(), serde_json::json!({ "status": "completed" }));
    assert_eq!(reqs[0].header("prefer"), "return=representation");
    assert_eq!(reqs[1].method, "DELETE");
    assert_eq!(reqs[1].path, "/rest/v1/registrations");
    assert_eq!(reqs[2].method, "DELETE");
    assert!(reqs[2].query.contains("id=eq.nope"));
}

#[test]
fn test_rest_lists_filter_by_event() {
    let stub = StubServer::start(|_| (200, "[]".to_string()));
    let store = rest_store(&stub);

    assert!(store.list_registrations(Some("e7")).unwrap().is_empty());
    assert!(store.list_feedback("e7").unwrap().is_empty());

    let reqs = stub.requests();
    assert_eq!(reqs[0].path, "/rest/v1/registrations");
    assert!(reqs[0].query.contains("event_id=eq.e7"));
    assert!(reqs[0].query.contains("order=created_at.asc"));
    assert_eq!(reqs[1].path, "/rest/v1/event_feedback");
    assert!(reqs[1].query.contains("event_id=eq.e7"));
}

#[test]
fn test_rest_requires_api_key() {
    assert!(matches!(
        RestStore::new("http://127.0.0.1:9", None),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        RestStore::new("http://127.0.0.1:9", Some("  ")),
        Err(AppError::Config(_))
    ));
}
