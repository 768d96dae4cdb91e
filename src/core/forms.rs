//! Public form handling: required-field checks for registrations and the
//! multi-step feedback form.

use crate::core::questions::{FormStep, Question, QuestionKind, feedback_steps};
use crate::errors::{AppError, AppResult};
use crate::models::{Answer, Event};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

const ABOUT_KEY: &str = "about";

/// One failing form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

fn into_result<T>(value: T, errors: Vec<FieldError>) -> AppResult<T> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(AppError::Validation(errors))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Phone numbers: 7 to 15 digits, separators `+ - ( )` and spaces allowed.
pub fn is_valid_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    allowed && (7..=15).contains(&digits)
}

fn check_identity(name: &str, email: &str, errors: &mut Vec<FieldError>) {
    if name.is_empty() {
        errors.push(FieldError::new("name", "is required"));
    }
    if email.is_empty() {
        errors.push(FieldError::new("email", "is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "is not a valid email address"));
    }
}

// ---------------------------
// Registration
// ---------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
}

impl RegistrationForm {
    /// Trim every field, lower-case the email and check all required fields.
    /// Every failing field is reported, not just the first one.
    pub fn validate(&self) -> AppResult<Self> {
        let form = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            country: self.country.trim().to_string(),
        };

        let mut errors = Vec::new();
        check_identity(&form.name, &form.email, &mut errors);

        if form.phone.is_empty() {
            errors.push(FieldError::new("phone", "is required"));
        } else if !is_valid_phone(&form.phone) {
            errors.push(FieldError::new("phone", "must contain 7 to 15 digits"));
        }

        if form.country.is_empty() {
            errors.push(FieldError::new("country", "is required"));
        }

        into_result(form, errors)
    }
}

// ---------------------------
// Feedback
// ---------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub session_number: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub responses: BTreeMap<String, Answer>,
}

impl FeedbackForm {
    fn normalized_identity(&self) -> (String, String) {
        (self.name.trim().to_string(), self.email.trim().to_lowercase())
    }
}

/// Check one answer against its question; returns the canonical answer.
///
/// Web forms often send numbers and booleans as strings, so `"4"` is
/// accepted for a scale and `"yes"` for a yes/no question.
fn check_answer(q: &Question, answer: &Answer) -> Result<Answer, String> {
    match (q.kind, answer) {
        (QuestionKind::Scale { min, max }, _) => {
            let n = match answer {
                Answer::Scale(n) => *n,
                Answer::Text(t) => t
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| format!("must be a number from {min} to {max}"))?,
                Answer::Flag(_) => return Err(format!("must be a number from {min} to {max}")),
            };
            if (min..=max).contains(&n) {
                Ok(Answer::Scale(n))
            } else {
                Err(format!("must be between {min} and {max}"))
            }
        }
        (QuestionKind::YesNo, Answer::Flag(b)) => Ok(Answer::Flag(*b)),
        (QuestionKind::YesNo, Answer::Text(t)) => match t.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Answer::Flag(true)),
            "no" | "n" | "false" => Ok(Answer::Flag(false)),
            _ => Err("must be yes or no".to_string()),
        },
        (QuestionKind::YesNo, Answer::Scale(_)) => Err("must be yes or no".to_string()),
        (QuestionKind::Text { max_len }, Answer::Text(t)) => {
            let t = t.trim();
            if t.chars().count() > max_len {
                Err(format!("must be at most {max_len} characters"))
            } else {
                Ok(Answer::Text(t.to_string()))
            }
        }
        (QuestionKind::Text { .. }, _) => Err("must be text".to_string()),
        (QuestionKind::Choice { options }, Answer::Text(t)) => options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(t.trim()))
            .map(|o| Answer::Text(o.to_string()))
            .ok_or_else(|| format!("must be one of: {}", options.join(", "))),
        (QuestionKind::Choice { options }, _) => {
            Err(format!("must be one of: {}", options.join(", ")))
        }
    }
}

/// Validate one step of the feedback form. Identity fields are checked
/// for the `about` step, `responses` for every other step.
pub fn validate_step(step: &FormStep, form: &FeedbackForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if step.key == ABOUT_KEY {
        let (name, email) = form.normalized_identity();
        check_identity(&name, &email, &mut errors);
        return errors;
    }

    for q in &step.questions {
        match form.responses.get(q.id) {
            None => {
                if q.required {
                    errors.push(FieldError::new(q.id, "is required"));
                }
            }
            Some(a) if a.is_blank() => {
                if q.required {
                    errors.push(FieldError::new(q.id, "is required"));
                }
            }
            Some(a) => {
                if let Err(msg) = check_answer(q, a) {
                    errors.push(FieldError::new(q.id, msg));
                }
            }
        }
    }

    errors
}

/// Validate a whole feedback submission for `event` and return it in
/// canonical form: trimmed identity, canonical answers, blank optional
/// answers dropped.
pub fn validate_feedback(event: &Event, form: &FeedbackForm) -> AppResult<FeedbackForm> {
    let steps = feedback_steps(event.event_type);
    let mut errors: Vec<FieldError> = steps
        .iter()
        .flat_map(|s| validate_step(s, form))
        .collect();

    let known: Vec<&Question> = steps
        .iter()
        .filter(|s| s.key != ABOUT_KEY)
        .flat_map(|s| s.questions.iter())
        .collect();

    for id in form.responses.keys() {
        if !known.iter().any(|q| q.id == id.as_str()) {
            errors.push(FieldError::new(id, "is not a question of this form"));
        }
    }

    if let Some(n) = form.session_number
        && event.session(n).is_none()
    {
        errors.push(FieldError::new(
            "session_number",
            format!("session {n} does not exist for this event"),
        ));
    }

    let (name, email) = form.normalized_identity();
    let mut responses = BTreeMap::new();

    for q in known {
        if let Some(a) = form.responses.get(q.id)
            && !a.is_blank()
            && let Ok(canonical) = check_answer(q, a)
        {
            responses.insert(q.id.to_string(), canonical);
        }
    }

    into_result(
        FeedbackForm {
            session_number: form.session_number,
            name,
            email,
            responses,
        },
        errors,
    )
}
