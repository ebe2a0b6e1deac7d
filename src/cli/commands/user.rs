use crate::cli::commands::{open_pool, parse_choice, parse_opt_date};
use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::records::UserLogic;
use crate::errors::AppResult;
use crate::models::Choice;
use crate::models::role::RoleName;
use crate::models::user::{NewUser, UserChanges};
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User { action } = cmd {
        let mut pool = open_pool(cfg)?;
        let now = date::now();

        match action {
            UserAction::Add {
                name,
                email,
                role,
                status,
                date_of_birth,
            } => {
                let user = NewUser {
                    name: name.clone(),
                    email: email.clone(),
                    role: RoleName::parse(role)?,
                    status: parse_choice(status.as_deref())?.unwrap_or_default(),
                    date_of_birth: parse_opt_date(date_of_birth.as_deref())?,
                };
                let id = UserLogic::add(&mut pool, &user, now)?;
                success(format!(
                    "User #{} created: {} ({})",
                    id,
                    user.name,
                    user.role.display_name()
                ));
            }
            UserAction::Edit {
                id,
                name,
                email,
                role,
                status,
            } => {
                let changes = UserChanges {
                    name: name.clone(),
                    email: email.clone(),
                    role: parse_choice(role.as_deref())?,
                    status: parse_choice(status.as_deref())?,
                };
                UserLogic::edit(&mut pool, *id, &changes, now)?;
                success(format!("User #{} updated", id));
            }
            UserAction::Del { id } => {
                UserLogic::delete(&mut pool, *id)?;
                success(format!("User #{} deleted", id));
            }
        }
    }
    Ok(())
}
