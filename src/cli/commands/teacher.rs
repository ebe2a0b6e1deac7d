use crate::cli::commands::{date_or_today, open_pool};
use crate::cli::parser::{Commands, TeacherAction};
use crate::config::Config;
use crate::core::records::TeacherLogic;
use crate::errors::AppResult;
use crate::models::teacher::NewTeacher;
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Teacher { action } = cmd {
        let mut pool = open_pool(cfg)?;

        match action {
            TeacherAction::Add {
                user_id,
                employee_id,
                qualification,
                department,
                joining_date,
                salary,
                specialization,
                experience_years,
            } => {
                let teacher = NewTeacher {
                    user_id: *user_id,
                    employee_id: employee_id.clone(),
                    qualification: qualification.clone(),
                    department: department.clone(),
                    joining_date: date_or_today(joining_date.as_deref())?,
                    salary: *salary,
                    specialization: specialization.clone(),
                    experience_years: *experience_years,
                };
                let id = TeacherLogic::add(&mut pool, &teacher, date::now())?;
                success(format!("Teacher #{} created: {}", id, teacher.employee_id));
            }
            TeacherAction::Del { id } => {
                TeacherLogic::delete(&mut pool, *id)?;
                success(format!("Teacher #{} deleted", id));
            }
        }
    }
    Ok(())
}
