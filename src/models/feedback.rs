use super::{new_id, now_rfc3339, null_as_default};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single answer in a feedback submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Flag(bool),
    Scale(i64),
    Text(String),
}

impl Answer {
    pub fn is_blank(&self) -> bool {
        matches!(self, Answer::Text(t) if t.trim().is_empty())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Flag(true) => f.write_str("Yes"),
            Answer::Flag(false) => f.write_str("No"),
            Answer::Scale(n) => write!(f, "{n}"),
            Answer::Text(t) => f.write_str(t),
        }
    }
}

/// Row of the `event_feedback` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub event_id: String,
    #[serde(default)]
    pub session_number: Option<u32>,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responses: BTreeMap<String, Answer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Feedback {
    pub fn new(
        event_id: &str,
        session_number: Option<u32>,
        name: &str,
        email: &str,
        responses: BTreeMap<String, Answer>,
    ) -> Self {
        Self {
            id: new_id(),
            event_id: event_id.to_string(),
            session_number,
            name: name.to_string(),
            email: email.to_string(),
            responses,
            created_at: now_rfc3339(),
        }
    }
}
