use crate::cli::commands::{date_or_today, open_pool};
use crate::cli::parser::{Commands, GradeAction};
use crate::config::Config;
use crate::core::records::GradeLogic;
use crate::db::grades;
use crate::errors::AppResult;
use crate::models::grade::NewGrade;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::fmt_percent;
use crate::utils::formatting::fmt_marks;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Grade { action } = cmd {
        let mut pool = open_pool(cfg)?;

        match action {
            GradeAction::Add {
                student_id,
                subject_id,
                teacher_id,
                exam_type,
                marks_obtained,
                total_marks,
                grade_letter,
                gpa,
                remarks,
                exam_date,
            } => {
                let grade = NewGrade {
                    student_id: *student_id,
                    subject_id: *subject_id,
                    teacher_id: *teacher_id,
                    exam_type: exam_type.clone(),
                    marks_obtained: *marks_obtained,
                    // replaced by the subject's total when not given
                    total_marks: total_marks.unwrap_or_default(),
                    grade_letter: grade_letter.clone(),
                    gpa: *gpa,
                    remarks: remarks.clone(),
                    exam_date: date_or_today(exam_date.as_deref())?,
                };
                let id = GradeLogic::add(&mut pool, &grade, *total_marks, date::now())?;

                let stored = grades::get_grade(&pool.conn, id)?;
                match stored {
                    Some(g) => success(format!(
                        "Grade #{} recorded: {}/{} ({})",
                        id,
                        fmt_marks(g.marks_obtained),
                        fmt_marks(g.total_marks),
                        fmt_percent(g.percentage())
                    )),
                    None => success(format!("Grade #{} recorded", id)),
                }
            }
            GradeAction::Del { id } => {
                GradeLogic::delete(&mut pool, *id)?;
                success(format!("Grade #{} deleted", id));
            }
        }
    }
    Ok(())
}
