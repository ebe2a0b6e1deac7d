use crate::cli::commands::list::render_rows;
use crate::cli::commands::{date_or_today, open_pool, parse_choice, print_json};
use crate::cli::parser::{Commands, StudentAction};
use crate::config::Config;
use crate::core::dashboard::DashboardLogic;
use crate::core::records::StudentLogic;
use crate::errors::AppResult;
use crate::models::Choice;
use crate::models::dashboard::StudentProfile;
use crate::models::student::{NewStudent, StudentChanges};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{color_for_fee, color_for_percentage, paint};
use crate::utils::date;
use crate::utils::formatting::fmt_amount;
use crate::utils::{fmt_percent, or_dash};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Student { action } = cmd {
        let mut pool = open_pool(cfg)?;
        let now = date::now();

        match action {
            StudentAction::Add {
                user_id,
                student_code,
                class_id,
                roll_number,
                admission_date,
                guardian_name,
                guardian_phone,
                guardian_email,
                emergency_contact,
                medical_info,
                fee_amount,
                fee_status,
            } => {
                let student = NewStudent {
                    user_id: *user_id,
                    student_code: student_code.clone(),
                    class_id: *class_id,
                    roll_number: roll_number.clone(),
                    admission_date: date_or_today(admission_date.as_deref())?,
                    guardian_name: guardian_name.clone(),
                    guardian_phone: guardian_phone.clone(),
                    guardian_email: guardian_email.clone(),
                    emergency_contact: emergency_contact.clone(),
                    medical_info: medical_info.clone(),
                    fee_amount: *fee_amount,
                    fee_status: parse_choice(fee_status.as_deref())?.unwrap_or_default(),
                };
                let id = StudentLogic::add(&mut pool, &student, now)?;
                success(format!("Student #{} created: {}", id, student.student_code));
            }
            StudentAction::Edit {
                id,
                class_id,
                no_class,
                roll_number,
                guardian_name,
                guardian_phone,
                guardian_email,
                fee_amount,
                fee_status,
            } => {
                let changes = StudentChanges {
                    class_id: if *no_class {
                        Some(None)
                    } else {
                        class_id.map(Some)
                    },
                    roll_number: roll_number.clone(),
                    guardian_name: guardian_name.clone(),
                    guardian_phone: guardian_phone.clone(),
                    guardian_email: guardian_email.clone(),
                    fee_amount: *fee_amount,
                    fee_status: parse_choice(fee_status.as_deref())?,
                };
                StudentLogic::edit(&mut pool, *id, &changes, now)?;
                success(format!("Student #{} updated", id));
            }
            StudentAction::Del { id } => {
                StudentLogic::delete(&mut pool, *id)?;
                success(format!("Student #{} deleted", id));
            }
            StudentAction::Show { id, json } => {
                let profile = DashboardLogic::student_profile(&pool.conn, *id, now, cfg)?;
                if *json {
                    return print_json(&profile);
                }
                render_profile(&profile);
            }
        }
    }
    Ok(())
}

fn render_profile(p: &StudentProfile) {
    let s = &p.student;
    header(format!("{} · {}", s.name, s.student_code));
    println!("  Email     : {}", s.email);
    println!("  Class     : {}", or_dash(s.class_name.as_deref()));
    println!("  Roll      : {}", or_dash(s.roll_number.as_deref()));
    println!("  Admitted  : {}", date::fmt_date(&s.admission_date));
    println!("  Guardian  : {}", or_dash(s.guardian_name.as_deref()));
    println!(
        "  Fee       : {} ({})",
        fmt_amount(s.fee_amount),
        paint(s.fee_status.to_db_str(), color_for_fee(s.fee_status))
    );
    println!(
        "  Attendance: {} over {} days",
        paint(
            &fmt_percent(p.attendance_percentage),
            color_for_percentage(p.attendance_percentage)
        ),
        p.window_days
    );

    header("Grades");
    if p.grades.is_empty() {
        info("No grades yet.");
    } else {
        print!("{}", render_rows(&p.grades));
    }
}
