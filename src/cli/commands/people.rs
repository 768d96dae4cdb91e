use crate::cli::commands::print_json;
use crate::cli::parser::{FacilitatorCommand, TeamCommand};
use crate::config::Config;
use crate::core::Services;
use crate::core::people::{PeopleLogic, Profile};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;

pub fn handle_facilitator(cmd: &FacilitatorCommand, cfg: &Config) -> AppResult<()> {
    let svc = Services::open(cfg)?;

    match cmd {
        FacilitatorCommand::Add {
            name,
            email,
            organisation,
            bio,
            photo,
            output,
        } => {
            let profile = Profile {
                bio: bio.clone(),
                photo_url: photo.clone(),
            };
            let f = PeopleLogic::add_facilitator(&svc, name, email, organisation, profile)?;
            if output.json {
                print_json(&f)?;
            } else {
                success(format!("Facilitator added: {} ({})", f.name, f.id));
            }
        }
        FacilitatorCommand::List { output } => {
            let dir = PeopleLogic::directory(svc.store.as_ref())?;
            if output.json {
                return print_json(&dir.facilitators);
            }
            if dir.facilitators.is_empty() {
                info("No facilitators found.");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "Name", "Email", "Organisation"]);
            for f in &dir.facilitators {
                table.add_row(vec![
                    f.id.clone(),
                    f.name.clone(),
                    colorize_optional(&f.email),
                    colorize_optional(&f.organisation),
                ]);
            }
            table.print();
        }
    }

    Ok(())
}

pub fn handle_team(cmd: &TeamCommand, cfg: &Config) -> AppResult<()> {
    let svc = Services::open(cfg)?;

    match cmd {
        TeamCommand::Add {
            name,
            role,
            email,
            bio,
            photo,
            output,
        } => {
            let profile = Profile {
                bio: bio.clone(),
                photo_url: photo.clone(),
            };
            let t = PeopleLogic::add_team_member(&svc, name, role, email, profile)?;
            if output.json {
                print_json(&t)?;
            } else {
                success(format!("Team member added: {} ({})", t.name, t.id));
            }
        }
        TeamCommand::List { output } => {
            let dir = PeopleLogic::directory(svc.store.as_ref())?;
            if output.json {
                return print_json(&dir.team);
            }
            if dir.team.is_empty() {
                info("No team members found.");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "Name", "Role", "Email"]);
            for t in &dir.team {
                table.add_row(vec![
                    t.id.clone(),
                    t.name.clone(),
                    colorize_optional(&t.role),
                    colorize_optional(&t.email),
                ]);
            }
            table.print();
        }
    }

    Ok(())
}
