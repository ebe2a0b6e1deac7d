use crate::cli::commands::{open_pool, parse_choice};
use crate::cli::parser::{ClassAction, Commands};
use crate::config::Config;
use crate::core::records::ClassLogic;
use crate::errors::AppResult;
use crate::models::school_class::{ClassChanges, NewClass};
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Class { action } = cmd {
        let mut pool = open_pool(cfg)?;
        let now = date::now();

        match action {
            ClassAction::Add {
                name,
                grade_level,
                section,
                class_teacher_id,
                capacity,
                room_number,
                description,
                status,
            } => {
                let class = NewClass {
                    name: name.clone(),
                    grade_level: grade_level.clone(),
                    section: section.clone(),
                    class_teacher_id: *class_teacher_id,
                    capacity: *capacity,
                    room_number: room_number.clone(),
                    description: description.clone(),
                    status: parse_choice(status.as_deref())?.unwrap_or_default(),
                };
                let id = ClassLogic::add(&mut pool, &class, now)?;
                success(format!("Class #{} created: {}", id, class.name));
            }
            ClassAction::Edit {
                id,
                name,
                class_teacher_id,
                no_teacher,
                capacity,
                room_number,
                status,
            } => {
                let changes = ClassChanges {
                    name: name.clone(),
                    class_teacher_id: if *no_teacher {
                        Some(None)
                    } else {
                        class_teacher_id.map(Some)
                    },
                    capacity: *capacity,
                    room_number: room_number.clone(),
                    status: parse_choice(status.as_deref())?,
                };
                ClassLogic::edit(&mut pool, *id, &changes, now)?;
                success(format!("Class #{} updated", id));
            }
            ClassAction::Del { id } => {
                ClassLogic::delete(&mut pool, *id)?;
                success(format!("Class #{} deleted", id));
            }
        }
    }
    Ok(())
}
