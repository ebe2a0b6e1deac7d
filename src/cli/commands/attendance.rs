use crate::cli::commands::dashboard::render_summary;
use crate::cli::commands::{date_or_today, open_pool, parse_choice, print_json};
use crate::cli::parser::{AttendanceAction, Commands};
use crate::config::Config;
use crate::core::calculator::attendance::{compute_attendance_percentage, today_summary};
use crate::core::records::AttendanceLogic;
use crate::db::students;
use crate::errors::{AppError, AppResult};
use crate::models::Choice;
use crate::models::attendance::{AttendanceChanges, AttendanceStatus, NewAttendance};
use crate::ui::messages::{header, success};
use crate::utils::colors::{color_for_percentage, paint};
use crate::utils::date;
use crate::utils::fmt_percent;
use crate::utils::time::parse_optional_time;
use serde_json::json;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attendance { action } = cmd {
        let mut pool = open_pool(cfg)?;
        let now = date::now();

        match action {
            AttendanceAction::Mark {
                student_id,
                status,
                marked_by,
                date: day,
                class_id,
                check_in,
                check_out,
                remarks,
            } => {
                let row = NewAttendance {
                    student_id: *student_id,
                    class_id: *class_id,
                    date: date_or_today(day.as_deref())?,
                    status: AttendanceStatus::parse(status)?,
                    check_in_time: parse_optional_time(check_in.as_ref())?,
                    check_out_time: parse_optional_time(check_out.as_ref())?,
                    remarks: remarks.clone(),
                    marked_by: *marked_by,
                };
                let id = AttendanceLogic::mark(&mut pool, &row, now)?;
                success(format!(
                    "Attendance #{} marked: {} on {}",
                    id,
                    row.status.to_db_str(),
                    date::fmt_date(&row.date)
                ));
            }
            AttendanceAction::Edit {
                id,
                status,
                check_in,
                check_out,
                remarks,
            } => {
                let changes = AttendanceChanges {
                    status: parse_choice(status.as_deref())?,
                    check_in_time: parse_optional_time(check_in.as_ref())?,
                    check_out_time: parse_optional_time(check_out.as_ref())?,
                    remarks: remarks.clone(),
                };
                AttendanceLogic::edit(&mut pool, *id, &changes, now)?;
                success(format!("Attendance #{} updated", id));
            }
            AttendanceAction::Del { id } => {
                AttendanceLogic::delete(&mut pool, *id)?;
                success(format!("Attendance #{} deleted", id));
            }
            AttendanceAction::Summary { date: day, json } => {
                let on = date_or_today(day.as_deref())?;
                let summary = today_summary(&pool.conn, on, cfg.attendance_summary_zero_fill)?;
                if *json {
                    return print_json(&summary);
                }
                header(format!("Attendance on {}", date::fmt_date(&on)));
                render_summary(&summary);
            }
            AttendanceAction::Percent {
                student_id,
                days,
                json,
            } => {
                let student = students::get_student(&pool.conn, *student_id)?
                    .ok_or_else(|| AppError::not_found("student", *student_id))?;
                let window = days.unwrap_or(cfg.attendance_window_days);
                let pct =
                    compute_attendance_percentage(&pool.conn, student.id, now.date(), window)?;

                if *json {
                    return print_json(&json!({
                        "student_id": student.id,
                        "student_code": student.student_code,
                        "window_days": window,
                        "percentage": pct,
                    }));
                }
                println!(
                    "{}: {} over the last {} days",
                    student.student_code,
                    paint(&fmt_percent(pct), color_for_percentage(pct)),
                    window
                );
            }
        }
    }
    Ok(())
}
