use crate::core::Services;
use crate::core::forms::{FieldError, is_valid_email};
use crate::errors::{AppError, AppResult};
use crate::models::{Facilitator, TeamMember};
use crate::store::Store;
use serde::Serialize;

/// Public directory of everyone who can conduct an event.
#[derive(Debug, Clone, Serialize)]
pub struct Directory {
    pub facilitators: Vec<Facilitator>,
    pub team: Vec<TeamMember>,
}

/// Optional profile fields shared by facilitators and team members.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub bio: String,
    pub photo_url: Option<String>,
}

fn check_person(name: &str, email: &str) -> AppResult<()> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "is required"));
    }
    let email = email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.push(FieldError::new("email", "is not a valid email address"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

pub struct PeopleLogic;

impl PeopleLogic {
    pub fn add_facilitator(
        svc: &Services,
        name: &str,
        email: &str,
        organisation: &str,
        profile: Profile,
    ) -> AppResult<Facilitator> {
        check_person(name, email)?;

        let mut f = Facilitator::new(name, email, organisation);
        f.bio = profile.bio.trim().to_string();
        f.photo_url = profile.photo_url.filter(|u| !u.trim().is_empty());

        svc.store.insert_facilitator(&f)?;
        svc.audit("facilitator_add", &f.id, &f.name);
        Ok(f)
    }

    pub fn add_team_member(
        svc: &Services,
        name: &str,
        role: &str,
        email: &str,
        profile: Profile,
    ) -> AppResult<TeamMember> {
        check_person(name, email)?;

        let mut t = TeamMember::new(name, role, email);
        t.bio = profile.bio.trim().to_string();
        t.photo_url = profile.photo_url.filter(|u| !u.trim().is_empty());

        svc.store.insert_team_member(&t)?;
        svc.audit("team_add", &t.id, &t.name);
        Ok(t)
    }

    /// Both directories, each sorted by name.
    pub fn directory(store: &dyn Store) -> AppResult<Directory> {
        let mut facilitators = store.list_facilitators()?;
        let mut team = store.list_team()?;
        facilitators.sort_by_key(|f| f.name.to_lowercase());
        team.sort_by_key(|t| t.name.to_lowercase());
        Ok(Directory { facilitators, team })
    }
}
