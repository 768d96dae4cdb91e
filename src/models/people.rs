use super::{new_id, now_rfc3339, null_as_default};
use serde::{Deserialize, Serialize};

/// External facilitator, listed in the `facilitators` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facilitator {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organisation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Facilitator {
    pub fn new(name: &str, email: &str, organisation: &str) -> Self {
        Self {
            id: new_id(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            organisation: organisation.trim().to_string(),
            bio: String::new(),
            photo_url: None,
            created_at: now_rfc3339(),
        }
    }
}

/// Programme staff, listed in the `teams` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl TeamMember {
    pub fn new(name: &str, role: &str, email: &str) -> Self {
        Self {
            id: new_id(),
            name: name.trim().to_string(),
            role: role.trim().to_string(),
            email: email.trim().to_lowercase(),
            bio: String::new(),
            photo_url: None,
            created_at: now_rfc3339(),
        }
    }
}
