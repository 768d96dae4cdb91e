//! Hosted backend over its REST interface (PostgREST dialect).
//!
//! Tables live under `<url>/rest/v1/<table>`; filters are query parameters
//! such as `id=eq.<id>`. Every request carries the project key both as
//! `apikey` and as a bearer token.

use super::Store;
use crate::errors::{AppError, AppResult};
use crate::models::{Event, EventStatus, Facilitator, Feedback, Registration, TeamMember};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const EVENTS: &str = "events";
const REGISTRATIONS: &str = "registrations";
const FACILITATORS: &str = "facilitators";
const TEAMS: &str = "teams";
const FEEDBACK: &str = "event_feedback";

/// Postgres error code for a foreign-key violation.
const FK_VIOLATION: &str = "23503";

pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(url: &str, api_key: Option<&str>) -> AppResult<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Config("missing REST api key (OUTREACH_REST_KEY)".into()))?;

        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    /// Map a non-2xx reply to an error. A 404 means the table (or the
    /// row addressed by the filter) does not exist on the backend.
    fn check(resp: Response, table: &'static str) -> AppResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND {
            let filter = resp.url().query().unwrap_or_default().to_string();
            return Err(AppError::not_found(table, filter));
        }
        let body = resp.text().unwrap_or_default();
        Err(AppError::Remote {
            status: status.as_u16(),
            body,
        })
    }

    fn select<T: DeserializeOwned>(&self, table: &'static str, query: &[(&str, String)]) -> AppResult<Vec<T>> {
        let req = self
            .client
            .get(self.endpoint(table))
            .query(&[("select", "*")])
            .query(query);

        let resp = Self::check(self.authed(req).send()?, table)?;
        Ok(resp.json()?)
    }

    fn insert<T: Serialize>(&self, table: &'static str, row: &T) -> AppResult<()> {
        let req = self.client.post(self.endpoint(table)).json(row);
        self.mutate(req, table)?;
        Ok(())
    }

    /// POST/PATCH/DELETE returning the affected rows, so callers can detect
    /// a filter that matched nothing.
    fn mutate(&self, req: RequestBuilder, table: &'static str) -> AppResult<usize> {
        let req = req.header("Prefer", "return=representation");
        let resp = Self::check(self.authed(req).send()?, table)?;
        let rows: Vec<serde_json::Value> = resp.json()?;
        Ok(rows.len())
    }

    fn eq(value: &str) -> String {
        format!("eq.{value}")
    }
}

impl Store for RestStore {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    fn insert_event(&self, event: &Event) -> AppResult<()> {
        self.insert(EVENTS, event)
    }

    fn get_event(&self, id: &str) -> AppResult<Event> {
        self.select::<Event>(EVENTS, &[("id", Self::eq(id))])?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("Event", id))
    }

    fn list_events(&self) -> AppResult<Vec<Event>> {
        self.select(EVENTS, &[("order", "created_at.asc".to_string())])
    }

    fn update_event_status(&self, id: &str, status: EventStatus) -> AppResult<()> {
        let req = self
            .client
            .patch(self.endpoint(EVENTS))
            .query(&[("id", Self::eq(id))])
            .json(&serde_json::json!({ "status": status }));

        match self.mutate(req, EVENTS)? {
            0 => Err(AppError::not_found("Event", id)),
            _ => Ok(()),
        }
    }

    fn delete_event(&self, id: &str) -> AppResult<()> {
        let req = self
            .client
            .delete(self.endpoint(EVENTS))
            .query(&[("id", Self::eq(id))]);

        match self.mutate(req, EVENTS)? {
            0 => Err(AppError::not_found("Event", id)),
            _ => Ok(()),
        }
    }

    fn insert_registration(&self, registration: &Registration) -> AppResult<()> {
        match self.insert(REGISTRATIONS, registration) {
            Err(AppError::Remote { status, body }) if status == StatusCode::CONFLICT.as_u16() => {
                if body.contains(FK_VIOLATION) {
                    Err(AppError::not_found("Event", registration.event_id.clone()))
                } else {
                    Err(AppError::DuplicateRegistration(registration.email.clone()))
                }
            }
            other => other,
        }
    }

    fn list_registrations(&self, event_id: Option<&str>) -> AppResult<Vec<Registration>> {
        let mut query = vec![("order", "created_at.asc".to_string())];
        if let Some(id) = event_id {
            query.push(("event_id", Self::eq(id)));
        }
        self.select(REGISTRATIONS, &query)
    }

    fn delete_registration(&self, id: &str) -> AppResult<()> {
        let req = self
            .client
            .delete(self.endpoint(REGISTRATIONS))
            .query(&[("id", Self::eq(id))]);

        match self.mutate(req, REGISTRATIONS)? {
            0 => Err(AppError::not_found("Registration", id)),
            _ => Ok(()),
        }
    }

    fn insert_facilitator(&self, facilitator: &Facilitator) -> AppResult<()> {
        self.insert(FACILITATORS, facilitator)
    }

    fn list_facilitators(&self) -> AppResult<Vec<Facilitator>> {
        self.select(FACILITATORS, &[("order", "name.asc".to_string())])
    }

    fn insert_team_member(&self, member: &TeamMember) -> AppResult<()> {
        self.insert(TEAMS, member)
    }

    fn list_team(&self) -> AppResult<Vec<TeamMember>> {
        self.select(TEAMS, &[("order", "name.asc".to_string())])
    }

    fn insert_feedback(&self, feedback: &Feedback) -> AppResult<()> {
        self.insert(FEEDBACK, feedback)
    }

    fn list_feedback(&self, event_id: &str) -> AppResult<Vec<Feedback>> {
        self.select(
            FEEDBACK,
            &[
                ("event_id", Self::eq(event_id)),
                ("order", "created_at.asc".to_string()),
            ],
        )
    }
}
