use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, SubjectAction};
use crate::config::Config;
use crate::core::records::SubjectLogic;
use crate::errors::AppResult;
use crate::models::subject::NewSubject;
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Subject { action } = cmd {
        let mut pool = open_pool(cfg)?;

        match action {
            SubjectAction::Add {
                name,
                code,
                description,
                total_marks,
                pass_marks,
                category,
            } => {
                let subject = NewSubject {
                    name: name.clone(),
                    code: code.clone(),
                    description: description.clone(),
                    total_marks: *total_marks,
                    pass_marks: *pass_marks,
                    category: category.clone(),
                };
                let id = SubjectLogic::add(&mut pool, &subject, date::now())?;
                success(format!("Subject #{} created: {}", id, subject.code));
            }
            SubjectAction::Del { id } => {
                SubjectLogic::delete(&mut pool, *id)?;
                success(format!("Subject #{} deleted", id));
            }
        }
    }
    Ok(())
}
