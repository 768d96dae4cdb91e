#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};

use outreach::core::Services;
use outreach::core::feedback::FeedbackLogic;
use outreach::core::forms::FeedbackForm;
use outreach::core::status;
use outreach::mail::OutboxMailer;
use outreach::store::SqliteStore;

pub const TEST_KEY: &str = "test-portal-key";

/// Config directory shared by every test run; nothing is written into it
/// in `--test` mode.
pub fn test_home() -> PathBuf {
    env::temp_dir().join("outreach_test_home")
}

/// The binary with a throwaway config directory and a known portal key.
pub fn outreach() -> Command {
    let mut cmd = cargo_bin_cmd!("outreach");
    cmd.env("OUTREACH_HOME", test_home())
        .env("OUTREACH_PORTAL_KEY", TEST_KEY)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// A staff command against `db_path`, key supplied.
pub fn staff(db_path: &str) -> Command {
    let mut cmd = outreach();
    cmd.args(["--db", db_path, "--key", TEST_KEY]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_outreach.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    outreach()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("command printed JSON")
}

/// Create an event through the CLI and return its id.
pub fn create_event(db_path: &str, title: &str, module: &str, sessions: &[&str]) -> String {
    let mut cmd = staff(db_path);
    cmd.args(["event", "create", "--title", title, "--type", module, "--json"]);
    for s in sessions {
        cmd.args(["--session", s]);
    }
    json_stdout(&mut cmd)["id"]
        .as_str()
        .expect("event id")
        .to_string()
}

/// Register a participant (walk-in, so closed events work too).
pub fn register(db_path: &str, event_id: &str, name: &str, email: &str) -> String {
    let mut cmd = staff(db_path);
    cmd.args([
        "registration",
        "add",
        "--event",
        event_id,
        "--name",
        name,
        "--email",
        email,
        "--phone",
        "+44 7700 900123",
        "--country",
        "United Kingdom",
        "--walk-in",
        "--json",
    ]);
    json_stdout(&mut cmd)["id"]
        .as_str()
        .expect("registration id")
        .to_string()
}

/// A session date relative to today, `YYYY-MM-DD`.
pub fn day_offset(days: i64) -> String {
    (chrono::Local::now().date_naive() + chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Database with one completed, one ongoing and one upcoming event.
/// Returns (completed, ongoing, upcoming) ids.
pub fn init_db_with_events(db_path: &str) -> (String, String, String) {
    init_db(db_path);
    let completed = create_event(
        db_path,
        "Leaders of Tomorrow",
        "leadership",
        &["2024-03-02@10:00-13:00", "2024-03-01@10:00-13:00"],
    );
    let ongoing = create_event(db_path, "Career Day", "career", &[&day_offset(0)]);
    let upcoming = create_event(
        db_path,
        "Code Club",
        "digital_skills",
        &["2099-01-10@09:00-12:00=Kick-off"],
    );
    (completed, ongoing, upcoming)
}

/// Library-side services on the same database the CLI uses.
pub fn services(db_path: &str) -> Services {
    Services {
        store: Box::new(SqliteStore::open(db_path).expect("open store")),
        mailer: Box::new(OutboxMailer::open(db_path).expect("open outbox")),
        organisation: "Test Outreach".to_string(),
    }
}

/// Submit a feedback form for session 1 of `event_id`.
pub fn submit_feedback(
    db_path: &str,
    event_id: &str,
    name: &str,
    email: &str,
    responses: serde_json::Value,
) -> String {
    let form = FeedbackForm {
        session_number: Some(1),
        name: name.to_string(),
        email: email.to_string(),
        responses: serde_json::from_value(responses).expect("responses map"),
    };
    FeedbackLogic::submit(&services(db_path), event_id, &form, status::now())
        .expect("feedback accepted")
        .id
}

/// A complete answer set for a leadership event.
pub fn leadership_answers() -> serde_json::Value {
    serde_json::json!({
        "overall": 5,
        "facilitator": "4",
        "content": 4,
        "recommend": "yes",
        "lead_confidence": 3,
        "lead_skill": "decision making",
        "highlights": "The role plays"
    })
}

/// A request received by a [`StubServer`].
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Seen {
    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

type Reply = Box<dyn Fn(&Seen) -> (u16, String) + Send + Sync>;

struct StubState {
    seen: Mutex<Vec<Seen>>,
    reply: Reply,
}

/// HTTP stand-in for the hosted backend and the mail API. Records every
/// request and answers with `reply(request)` as a JSON body.
///
/// Runs on its own thread and runtime so blocking clients can call it
/// from plain `#[test]` functions.
pub struct StubServer {
    pub base: String,
    state: Arc<StubState>,
}

impl StubServer {
    pub fn start(reply: impl Fn(&Seen) -> (u16, String) + Send + Sync + 'static) -> Self {
        let state = Arc::new(StubState {
            seen: Mutex::new(Vec::new()),
            reply: Box::new(reply),
        });

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind stub");
        listener.set_nonblocking(true).expect("non-blocking stub");
        let base = format!("http://{}", listener.local_addr().expect("stub address"));

        let app = Router::new()
            .fallback(capture)
            .with_state(Arc::clone(&state));

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("stub runtime");
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("stub listener");
                axum::serve(listener, app).await.ok();
            });
        });

        Self { base, state }
    }

    pub fn requests(&self) -> Vec<Seen> {
        self.state.seen.lock().unwrap().clone()
    }
}

async fn capture(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let seen = Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect(),
        body,
    };

    let (status, reply) = (state.reply)(&seen);
    state.seen.lock().unwrap().push(seen);

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}
