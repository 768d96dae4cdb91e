use crate::cli::commands::print_json;
use crate::cli::parser::RegistrationCommand;
use crate::config::Config;
use crate::core::Services;
use crate::core::forms::RegistrationForm;
use crate::core::register::RegisterLogic;
use crate::core::status;
use crate::errors::AppResult;
use crate::export::range::display_timestamp;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use std::collections::HashMap;

pub fn handle(cmd: &RegistrationCommand, cfg: &Config) -> AppResult<()> {
    let svc = Services::open(cfg)?;

    match cmd {
        RegistrationCommand::Add {
            event,
            name,
            email,
            phone,
            country,
            walk_in,
            output,
        } => {
            let form = RegistrationForm {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                country: country.clone(),
            };
            let reg = RegisterLogic::apply(&svc, event, &form, status::now(), *walk_in)?;

            if output.json {
                print_json(&reg)?;
            } else {
                success(format!("Registered {} <{}> ({})", reg.name, reg.email, reg.id));
            }
        }

        RegistrationCommand::List { event, output } => {
            let regs = svc.store.list_registrations(event.as_deref())?;

            if output.json {
                return print_json(&regs);
            }
            if regs.is_empty() {
                info("No registrations found.");
                return Ok(());
            }

            let titles: HashMap<String, String> = svc
                .store
                .list_events()?
                .into_iter()
                .map(|e| (e.id, e.title))
                .collect();

            let mut table = Table::new(&["ID", "Event", "Name", "Email", "Phone", "Country", "Registered"]);
            for r in &regs {
                table.add_row(vec![
                    r.id.clone(),
                    titles.get(&r.event_id).cloned().unwrap_or_else(|| r.event_id.clone()),
                    r.name.clone(),
                    r.email.clone(),
                    r.phone.clone(),
                    r.country.clone(),
                    display_timestamp(&r.created_at),
                ]);
            }
            table.print();
            info(format!("{} registration(s)", regs.len()));
        }

        RegistrationCommand::Delete { id } => {
            RegisterLogic::remove(&svc, id)?;
            success(format!("Registration deleted: {id}"));
        }
    }

    Ok(())
}
