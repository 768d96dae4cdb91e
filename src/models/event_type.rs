use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Programme module an event belongs to. Drives the module-specific
/// feedback questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Leadership,
    DigitalSkills,
    Career,
    Wellbeing,
    #[default]
    General,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Leadership,
        EventType::DigitalSkills,
        EventType::Career,
        EventType::Wellbeing,
        EventType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Leadership => "leadership",
            EventType::DigitalSkills => "digital_skills",
            EventType::Career => "career",
            EventType::Wellbeing => "wellbeing",
            EventType::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventType::Leadership => "Leadership",
            EventType::DigitalSkills => "Digital Skills",
            EventType::Career => "Career Readiness",
            EventType::Wellbeing => "Wellbeing",
            EventType::General => "General",
        }
    }

    /// Convert DB/CLI string → enum. Accepts `-` or space instead of `_`.
    pub fn from_db_str(s: &str) -> Option<Self> {
        let norm = s.trim().to_lowercase().replace(['-', ' '], "_");
        match norm.as_str() {
            "leadership" => Some(EventType::Leadership),
            "digital_skills" | "digital" => Some(EventType::DigitalSkills),
            "career" | "career_readiness" => Some(EventType::Career),
            "wellbeing" | "well_being" => Some(EventType::Wellbeing),
            "general" => Some(EventType::General),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        Self::from_db_str(s).ok_or_else(|| AppError::InvalidEventType(s.to_string()))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
