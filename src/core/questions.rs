//! Feedback question catalogue.
//!
//! The feedback form has four steps. Steps 1, 2 and 4 are shared by every
//! event; step 3 depends on the programme module of the event.

use crate::models::EventType;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Scale { min: i64, max: i64 },
    YesNo,
    Text { max_len: usize },
    Choice { options: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: QuestionKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStep {
    pub key: &'static str,
    pub title: &'static str,
    pub questions: Vec<Question>,
}

const RATING: QuestionKind = QuestionKind::Scale { min: 1, max: 5 };
const SHORT_TEXT: QuestionKind = QuestionKind::Text { max_len: 200 };
const LONG_TEXT: QuestionKind = QuestionKind::Text { max_len: 2000 };

const fn required(id: &'static str, label: &'static str, kind: QuestionKind) -> Question {
    Question {
        id,
        label,
        kind,
        required: true,
    }
}

const fn optional(id: &'static str, label: &'static str, kind: QuestionKind) -> Question {
    Question {
        id,
        label,
        kind,
        required: false,
    }
}

/// Respondent identity. Kept as form fields, stored on the feedback row
/// rather than inside `responses`.
pub const ABOUT: [Question; 2] = [
    required("name", "Your name", SHORT_TEXT),
    required("email", "Your email", SHORT_TEXT),
];

const SESSION: [Question; 4] = [
    required("overall", "How would you rate the session overall?", RATING),
    required("facilitator", "How would you rate the facilitator?", RATING),
    required("content", "How relevant was the content to you?", RATING),
    required("recommend", "Would you recommend this event to a friend?", QuestionKind::YesNo),
];

const LEADERSHIP: [Question; 3] = [
    required("lead_confidence", "How confident do you feel leading a group now?", RATING),
    required(
        "lead_skill",
        "Which skill will you use first?",
        QuestionKind::Choice {
            options: &["Communication", "Decision making", "Delegation", "Conflict resolution"],
        },
    ),
    optional("lead_project", "Describe a project you would like to lead", LONG_TEXT),
];

const DIGITAL_SKILLS: [Question; 3] = [
    required("digital_before", "Your digital confidence before the session", RATING),
    required("digital_after", "Your digital confidence after the session", RATING),
    required("digital_device", "Did you have access to a device during the session?", QuestionKind::YesNo),
];

const CAREER: [Question; 3] = [
    required("career_clarity", "How clear are your next career steps?", RATING),
    required("career_cv", "Do you have an up-to-date CV?", QuestionKind::YesNo),
    required(
        "career_interest",
        "Which pathway interests you most?",
        QuestionKind::Choice {
            options: &["Further education", "Apprenticeship", "Employment", "Entrepreneurship", "Undecided"],
        },
    ),
];

const WELLBEING: [Question; 3] = [
    required("wellbeing_mood", "How do you feel after the session?", RATING),
    required("wellbeing_safe", "Did you feel safe to share in the group?", QuestionKind::YesNo),
    optional("wellbeing_support", "What other support would help you?", LONG_TEXT),
];

const GENERAL: [Question; 1] = [optional("general_learned", "What is one thing you learned?", LONG_TEXT)];

const COMMENTS: [Question; 2] = [
    optional("highlights", "What did you enjoy most?", LONG_TEXT),
    optional("improvements", "What could we improve?", LONG_TEXT),
];

/// Question set specific to one programme module.
pub fn module_questions(module: EventType) -> &'static [Question] {
    match module {
        EventType::Leadership => &LEADERSHIP,
        EventType::DigitalSkills => &DIGITAL_SKILLS,
        EventType::Career => &CAREER,
        EventType::Wellbeing => &WELLBEING,
        EventType::General => &GENERAL,
    }
}

/// Ordered steps of the feedback form for an event of the given module.
pub fn feedback_steps(module: EventType) -> Vec<FormStep> {
    vec![
        FormStep {
            key: "about",
            title: "About you",
            questions: ABOUT.to_vec(),
        },
        FormStep {
            key: "session",
            title: "The session",
            questions: SESSION.to_vec(),
        },
        FormStep {
            key: "module",
            title: module.label(),
            questions: module_questions(module).to_vec(),
        },
        FormStep {
            key: "comments",
            title: "Anything else?",
            questions: COMMENTS.to_vec(),
        },
    ]
}

/// Questions whose answers live in `responses`, in form order. Used for
/// validation lookups and for feedback report columns.
pub fn response_questions(module: EventType) -> Vec<Question> {
    SESSION
        .iter()
        .chain(module_questions(module))
        .chain(COMMENTS.iter())
        .copied()
        .collect()
}
