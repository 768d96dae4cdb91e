use super::{new_id, now_rfc3339, null_as_default};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Registration {
    pub fn new(event_id: &str, name: &str, email: &str, phone: &str, country: &str) -> Self {
        Self {
            id: new_id(),
            event_id: event_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            country: country.to_string(),
            created_at: now_rfc3339(),
        }
    }
}
