use crate::cli::commands::list::render_rows;
use crate::cli::commands::{open_pool, print_json};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::DashboardLogic;
use crate::errors::AppResult;
use crate::models::Choice;
use crate::models::dashboard::{AttendanceSummary, DashboardPayload, RoleData};
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREY, RESET, color_for_attendance, color_for_percentage, paint};
use crate::utils::date;
use crate::utils::fmt_percent;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { user, json } = cmd {
        let pool = open_pool(cfg)?;
        let payload = DashboardLogic::build(&pool.conn, *user, date::now(), cfg)?;

        if *json {
            return print_json(&payload);
        }
        render(&payload, cfg);
    }
    Ok(())
}

fn render(d: &DashboardPayload, cfg: &Config) {
    header(&cfg.school_name);
    if let Some(u) = &d.user {
        println!("{CYAN}Signed in as{RESET} {} ({})", u.name, u.role_display_name);
    }

    println!("  Students : {}", d.stats.total_students);
    println!("  Teachers : {}", d.stats.total_teachers);
    println!("  Classes  : {}", d.stats.total_classes);
    println!("  Subjects : {}", d.stats.total_subjects);

    if let Some(summary) = &d.attendance_today {
        header("Today's attendance");
        render_summary(summary);
    }

    match &d.role_data {
        RoleData::Student {
            recent_grades,
            attendance_percentage,
            class,
        } => {
            header("My class");
            match class {
                Some(c) => println!("  {} (grade {})", c.name, c.grade_level),
                None => info("Not assigned to a class."),
            }
            println!(
                "  Attendance ({} days): {}",
                cfg.attendance_window_days,
                paint(
                    &fmt_percent(*attendance_percentage),
                    color_for_percentage(*attendance_percentage)
                )
            );
            header("Recent grades");
            if recent_grades.is_empty() {
                info("No grades yet.");
            } else {
                print!("{}", render_rows(recent_grades));
            }
        }
        RoleData::Teacher {
            classes,
            recent_grades,
        } => {
            header("My classes");
            if classes.is_empty() {
                info("You do not lead any class.");
            }
            for tc in classes {
                println!(
                    "{CYAN}{}{RESET} {GREY}({} student(s), room {}){RESET}",
                    tc.class.name,
                    tc.students.len(),
                    tc.class.room_number.as_deref().unwrap_or("--")
                );
                if !tc.students.is_empty() {
                    print!("{}", render_rows(&tc.students));
                }
            }
            header("Grades I recorded");
            if recent_grades.is_empty() {
                info("No grades yet.");
            } else {
                print!("{}", render_rows(recent_grades));
            }
        }
        RoleData::Empty {} => {}
    }

    header("Announcements");
    if d.announcements.is_empty() {
        info("No announcements.");
    }
    for a in &d.announcements {
        let when = a
            .publish_at
            .map(|p| date::fmt_datetime(&p))
            .unwrap_or_else(|| "--".into());
        println!(
            "• {CYAN}{}{RESET} {GREY}[{}] {} · {}{RESET}",
            a.title,
            a.kind.to_db_str(),
            a.created_by_name,
            when
        );
        println!("  {}", a.content);
    }
}

/// One line per status, coloured.
pub(crate) fn render_summary(summary: &AttendanceSummary) {
    if summary.is_empty() {
        info("No attendance recorded.");
    }
    for (status, n) in summary {
        println!(
            "  {:<8} {}",
            status.to_db_str(),
            paint(&n.to_string(), color_for_attendance(*status))
        );
    }
}
