use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Which directory a conductor comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConductorKind {
    Facilitator,
    Team,
}

impl ConductorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConductorKind::Facilitator => "facilitator",
            ConductorKind::Team => "team",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "facilitator" => Some(ConductorKind::Facilitator),
            "team" => Some(ConductorKind::Team),
            _ => None,
        }
    }
}

/// Reference from an event to the person running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConductorRef {
    pub kind: ConductorKind,
    pub id: String,
}

impl ConductorRef {
    /// Parse `facilitator:<id>` or `team:<id>`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| AppError::InvalidConductor(s.to_string()))?;

        let kind = ConductorKind::from_db_str(kind.trim())
            .ok_or_else(|| AppError::InvalidConductor(s.to_string()))?;
        let id = id.trim();

        if id.is_empty() {
            return Err(AppError::InvalidConductor(s.to_string()));
        }

        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }
}
