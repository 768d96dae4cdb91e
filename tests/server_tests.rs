use outreach::config::Config;
use outreach::core::Services;
use outreach::core::event::{EventLogic, NewEvent};
use outreach::mail::OutboxMailer;
use outreach::models::{EventType, Session};
use outreach::server::{AppState, build_router};
use outreach::store::SqliteStore;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tempfile::TempDir;

const KEY: &str = "server-test-key";

struct TestServer {
    base: String,
    client: reqwest::Client,
    completed: String,
    upcoming: String,
    _dir: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

fn services(db: &str) -> Services {
    Services {
        store: Box::new(SqliteStore::open(db).unwrap()),
        mailer: Box::new(OutboxMailer::open(db).unwrap()),
        organisation: "Test Outreach".to_string(),
    }
}

fn new_event(title: &str, event_type: EventType, session: &str) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        event_type,
        sessions: vec![Session::parse_spec(session).unwrap()],
        ..NewEvent::default()
    }
}

async fn start() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("server.sqlite").to_string_lossy().to_string();

    let svc = services(&db);
    let completed = EventLogic::create(
        &svc,
        new_event("Leaders of Tomorrow", EventType::Leadership, "2024-03-01@10:00-13:00"),
    )
    .unwrap()
    .id;
    let upcoming = EventLogic::create(
        &svc,
        new_event("Code Club", EventType::DigitalSkills, "2099-01-10@09:00-12:00"),
    )
    .unwrap()
    .id;

    let config = Config {
        database: db,
        portal_key: Some(KEY.to_string()),
        ..Config::default()
    };
    let state = AppState::with_services(svc, config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    TestServer {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
        completed,
        upcoming,
        _dir: dir,
    }
}

fn registration(email: &str) -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": email,
        "phone": "+44 7700 900123",
        "country": "United Kingdom"
    })
}

#[tokio::test]
async fn test_health_and_listing() {
    let srv = start().await;

    let health: Value = srv.get("/health").await.json().await.unwrap();
    assert_eq!(health["status"], "ok");

    let events: Value = srv.get("/api/events").await.json().await.unwrap();
    let titles: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Code Club", "Leaders of Tomorrow"]);
    assert_eq!(events[0]["current_status"], "upcoming");
    assert_eq!(events[0]["next_session"]["date"], "2099-01-10");
    assert_eq!(events[1]["next_session"], Value::Null);

    let completed: Value = srv
        .get("/api/events?status=completed")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(completed.as_array().unwrap().len(), 1);

    let resp = srv.get("/api/events?status=postponed").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_event_detail_and_form() {
    let srv = start().await;

    let detail: Value = srv
        .get(&format!("/api/events/{}", srv.upcoming))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(detail["title"], "Code Club");
    assert_eq!(detail["conductor"], Value::Null);

    let resp = srv.get("/api/events/does-not-exist").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Event not found: does-not-exist");

    let form: Value = srv
        .get(&format!("/api/events/{}/feedback-form", srv.completed))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(form["module"], "leadership");
    assert_eq!(form["steps"].as_array().unwrap().len(), 4);
    assert_eq!(form["steps"][2]["questions"][1]["id"], "lead_skill");
    assert_eq!(form["steps"][1]["questions"][0]["kind"]["type"], "scale");
}

#[tokio::test]
async fn test_registration_flow() {
    let srv = start().await;
    let path = format!("/api/events/{}/registrations", srv.upcoming);

    let resp = srv.post(&path, registration("Ada@Example.org")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let reg: Value = resp.json().await.unwrap();
    assert_eq!(reg["email"], "ada@example.org");
    assert_eq!(reg["event_id"], srv.upcoming.as_str());

    let resp = srv.post(&path, registration("ada@example.org")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = srv
        .post(&path, json!({ "name": "", "email": "x", "phone": "1", "country": "" }))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "phone", "country"]);

    let closed = format!("/api/events/{}/registrations", srv.completed);
    let resp = srv.post(&closed, registration("late@example.org")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = srv
        .client
        .post(srv.url(&path))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_feedback_flow() {
    let srv = start().await;
    let answers = json!({
        "name": "Ada",
        "email": "ada@example.org",
        "session_number": 1,
        "responses": {
            "overall": 5,
            "facilitator": 4,
            "content": 4,
            "recommend": "yes",
            "lead_confidence": 4,
            "lead_skill": "Delegation"
        }
    });

    let early = format!("/api/events/{}/feedback", srv.upcoming);
    let resp = srv.post(&early, answers.clone()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let path = format!("/api/events/{}/feedback", srv.completed);
    let resp = srv.post(&path, answers.clone()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert!(body["id"].as_str().is_some());

    let mut bad = answers;
    bad["responses"]["overall"] = json!(9);
    let resp = srv.post(&path, bad).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_portal_requires_key() {
    let srv = start().await;
    srv.post(
        &format!("/api/events/{}/registrations", srv.upcoming),
        registration("ada@example.org"),
    )
    .await;

    let path = format!("/api/portal/events/{}/registrations", srv.upcoming);

    let resp = srv.get(&path).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = srv
        .client
        .get(srv.url(&path))
        .header("x-portal-key", "wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let regs: Value = srv
        .client
        .get(srv.url(&path))
        .header("x-portal-key", KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(regs.as_array().unwrap().len(), 1);

    let resp = srv
        .client
        .get(srv.url(&format!("{path}.csv")))
        .header("x-portal-key", KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let csv = resp.text().await.unwrap();
    assert!(csv.starts_with("Name,Email,Phone,Country,Registered At"));
    assert!(csv.contains("ada@example.org"));

    let resp = srv
        .client
        .get(srv.url("/api/portal/events/does-not-exist/feedback.csv"))
        .header("x-portal-key", KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_conductors_directory() {
    let srv = start().await;
    let dir: Value = srv.get("/api/conductors").await.json().await.unwrap();
    assert_eq!(dir["facilitators"], json!([]));
    assert_eq!(dir["team"], json!([]));
}

#[tokio::test]
async fn test_overlapping_requests_do_not_wait_on_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("pool.sqlite").to_string_lossy().to_string();
    let config = Config {
        database: db.clone(),
        ..Config::default()
    };
    let state = AppState::with_services(services(&db), config);

    // both closures must be inside `run` at once to pass the barrier
    let barrier = std::sync::Arc::new(std::sync::Barrier::new(2));
    let (b1, b2) = (barrier.clone(), barrier);
    let first = state.run(move |svc| {
        b1.wait();
        svc.store.list_events()
    });
    let second = state.run(move |svc| {
        b2.wait();
        svc.store.list_events()
    });

    let (a, b) = tokio::time::timeout(std::time::Duration::from_secs(10), async {
        tokio::join!(first, second)
    })
    .await
    .expect("requests ran concurrently");

    assert!(a.unwrap().is_empty());
    assert!(b.unwrap().is_empty());
    assert_eq!(state.idle_count(), 2);
}
