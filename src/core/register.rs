use crate::core::Services;
use crate::core::forms::RegistrationForm;
use crate::errors::{AppError, AppResult};
use crate::mail::templates;
use crate::models::Registration;
use chrono::NaiveDateTime;

pub struct RegisterLogic;

impl RegisterLogic {
    /// Register someone for an event and send the confirmation mail.
    ///
    /// `walk_in` skips the registration window check (staff adding a
    /// participant after the event started or ended).
    pub fn apply(
        svc: &Services,
        event_id: &str,
        form: &RegistrationForm,
        now: NaiveDateTime,
        walk_in: bool,
    ) -> AppResult<Registration> {
        let form = form.validate()?;
        let event = svc.store.get_event(event_id)?;

        if !walk_in && !event.status_at(now).accepts_registrations() {
            return Err(AppError::RegistrationClosed(event.id));
        }

        let reg = Registration::new(&event.id, &form.name, &form.email, &form.phone, &form.country);
        svc.store.insert_registration(&reg)?;
        svc.audit("register", &reg.id, &format!("{} for {}", reg.email, event.title));

        let mail = templates::registration_confirmation(&svc.organisation, &event, &reg);
        if let Err(e) = svc.mailer.send(&mail) {
            tracing::warn!("Confirmation mail to {} failed: {e}", reg.email);
            svc.audit("mail_failed", &reg.email, &e.to_string());
        }

        Ok(reg)
    }

    pub fn remove(svc: &Services, registration_id: &str) -> AppResult<()> {
        svc.store.delete_registration(registration_id)?;
        svc.audit("unregister", registration_id, "Registration deleted");
        Ok(())
    }
}
