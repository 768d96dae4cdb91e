use crate::core::Services;
use crate::core::forms::{FeedbackForm, validate_feedback};
use crate::core::questions::{FormStep, feedback_steps};
use crate::errors::{AppError, AppResult};
use crate::mail::templates;
use crate::models::{Event, Feedback};
use crate::store::Store;
use chrono::NaiveDateTime;

pub struct FeedbackLogic;

impl FeedbackLogic {
    /// The multi-step form for an event: shared steps plus the question set
    /// of the event's module.
    pub fn form(store: &dyn Store, event_id: &str) -> AppResult<(Event, Vec<FormStep>)> {
        let event = store.get_event(event_id)?;
        let steps = feedback_steps(event.event_type);
        Ok((event, steps))
    }

    /// Validate and store a feedback submission, then thank the respondent.
    pub fn submit(
        svc: &Services,
        event_id: &str,
        form: &FeedbackForm,
        now: NaiveDateTime,
    ) -> AppResult<Feedback> {
        let event = svc.store.get_event(event_id)?;

        if !event.status_at(now).accepts_feedback() {
            return Err(AppError::FeedbackNotOpen(event.id));
        }

        let form = validate_feedback(&event, form)?;
        let fb = Feedback::new(
            &event.id,
            form.session_number,
            &form.name,
            &form.email,
            form.responses,
        );

        svc.store.insert_feedback(&fb)?;
        svc.audit("feedback", &fb.id, &format!("{} for {}", fb.email, event.title));

        let mail = templates::feedback_thanks(&svc.organisation, &event, &fb.name, &fb.email);
        if let Err(e) = svc.mailer.send(&mail) {
            tracing::warn!("Thank-you mail to {} failed: {e}", fb.email);
            svc.audit("mail_failed", &fb.email, &e.to_string());
        }

        Ok(fb)
    }
}
