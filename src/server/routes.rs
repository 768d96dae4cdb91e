use super::state::SharedState;
use crate::core::event::EventLogic;
use crate::core::feedback::FeedbackLogic;
use crate::core::forms::{FeedbackForm, RegistrationForm};
use crate::core::gate::check_portal_key;
use crate::core::people::{Directory, PeopleLogic};
use crate::core::questions::FormStep;
use crate::core::register::RegisterLogic;
use crate::core::status;
use crate::errors::{AppError, AppResult};
use crate::export::{ReportKind, render_csv};
use crate::export::logic::ExportLogic;
use crate::models::{ConductorKind, Event, EventStatus, Registration, Session};
use crate::store::conductor_name;
use axum::{
    Json,
    extract::{Path, Query, Request, State, rejection::JsonRejection},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const PORTAL_KEY_HEADER: &str = "x-portal-key";

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(v)| v)
        .map_err(|e| AppError::MalformedPayload(e.body_text()))
}

#[derive(Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub current_status: EventStatus,
    pub next_session: Option<Session>,
}

impl EventView {
    fn at(event: Event, now: chrono::NaiveDateTime) -> Self {
        Self {
            current_status: event.status_at(now),
            next_session: status::next_session(&event.sessions, now).cloned(),
            event,
        }
    }
}

#[derive(Serialize)]
pub struct ConductorView {
    pub kind: ConductorKind,
    pub id: String,
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub view: EventView,
    pub conductor: Option<ConductorView>,
}

#[derive(Serialize)]
pub struct FeedbackFormView {
    pub event_id: String,
    pub module: String,
    pub steps: Vec<FormStep>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn list_events_handler(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<EventView>>> {
    let filter = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
        .map(EventStatus::parse)
        .transpose()?;

    let now = status::now();
    let events = state
        .run(move |svc| EventLogic::list(svc.store.as_ref(), filter, None, now))
        .await?;

    Ok(Json(
        events
            .into_iter()
            .map(|l| EventView::at(l.event, now))
            .collect(),
    ))
}

pub async fn event_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<EventDetail>> {
    let now = status::now();
    let detail = state
        .run(move |svc| {
            let event = svc.store.get_event(&id)?;
            let conductor = match event.conductor() {
                Some(c) => Some(ConductorView {
                    name: conductor_name(svc.store.as_ref(), &c)?,
                    kind: c.kind,
                    id: c.id,
                }),
                None => None,
            };
            Ok(EventDetail {
                view: EventView::at(event, now),
                conductor,
            })
        })
        .await?;

    Ok(Json(detail))
}

pub async fn feedback_form_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<FeedbackFormView>> {
    let (event, steps) = state
        .run(move |svc| FeedbackLogic::form(svc.store.as_ref(), &id))
        .await?;

    Ok(Json(FeedbackFormView {
        event_id: event.id,
        module: event.event_type.as_str().to_string(),
        steps,
    }))
}

pub async fn register_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<RegistrationForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Registration>)> {
    let form = payload(body)?;
    let reg = state
        .run(move |svc| RegisterLogic::apply(svc, &id, &form, status::now(), false))
        .await?;

    Ok((StatusCode::CREATED, Json(reg)))
}

pub async fn feedback_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<FeedbackForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let form = payload(body)?;
    let fb = state
        .run(move |svc| FeedbackLogic::submit(svc, &id, &form, status::now()))
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": fb.id }))))
}

pub async fn conductors_handler(State(state): State<SharedState>) -> AppResult<Json<Directory>> {
    let dir = state
        .run(|svc| PeopleLogic::directory(svc.store.as_ref()))
        .await?;
    Ok(Json(dir))
}

// ---------------------------
// Portal
// ---------------------------

/// Rejects portal requests without a valid `x-portal-key` header.
pub async fn portal_gate(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let supplied = req
        .headers()
        .get(PORTAL_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    check_portal_key(state.config.portal_key.as_deref(), supplied)?;
    Ok(next.run(req).await)
}

pub async fn portal_registrations_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Registration>>> {
    let regs = state
        .run(move |svc| {
            svc.store.get_event(&id)?;
            svc.store.list_registrations(Some(&id))
        })
        .await?;
    Ok(Json(regs))
}

async fn csv_report(state: SharedState, id: String, kind: ReportKind) -> AppResult<Response> {
    let now = status::now();
    let filename = format!("{}-{}.csv", kind.as_str(), id);
    let csv = state
        .run(move |svc| {
            let report = ExportLogic::build(svc, kind, Some(&id), None, now)?;
            render_csv(&report)
        })
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

pub async fn portal_registrations_csv_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    csv_report(state, id, ReportKind::Registrations).await
}

pub async fn portal_feedback_csv_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    csv_report(state, id, ReportKind::Feedback).await
}
