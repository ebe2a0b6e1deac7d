use crate::config::Config;
use crate::core::calculator::attendance::{compute_attendance_percentage, today_summary};
use crate::core::calculator::totals::dashboard_totals;
use crate::db::{announcements, classes, grades, students, teachers, users};
use crate::errors::{AppError, AppResult};
use crate::models::dashboard::{DashboardPayload, RoleData, StudentProfile, TeacherClass};
use crate::models::role::RoleName;
use crate::models::user::User;
use chrono::NaiveDateTime;
use rusqlite::Connection;

pub struct DashboardLogic;

impl DashboardLogic {
    /// Assemble the dashboard for `viewer` (a `users.id`) at instant `now`.
    /// Without a viewer only the school-wide parts are filled.
    pub fn build(
        conn: &Connection,
        viewer: Option<i64>,
        now: NaiveDateTime,
        cfg: &Config,
    ) -> AppResult<DashboardPayload> {
        let user = match viewer {
            Some(id) => Some(users::get_user(conn, id)?.ok_or_else(|| AppError::not_found("user", id))?),
            None => None,
        };

        let stats = dashboard_totals(conn)?;
        let announcements = announcements::visible(conn, &now, cfg.dashboard_announcements)?;

        let attendance_today = match &user {
            Some(u) if u.role.is_staff() => Some(today_summary(
                conn,
                now.date(),
                cfg.attendance_summary_zero_fill,
            )?),
            _ => None,
        };

        let role_data = match &user {
            Some(u) => Self::role_data(conn, u, now, cfg)?,
            None => RoleData::Empty {},
        };

        Ok(DashboardPayload {
            stats,
            announcements,
            attendance_today,
            role_data,
            user,
        })
    }

    fn role_data(
        conn: &Connection,
        user: &User,
        now: NaiveDateTime,
        cfg: &Config,
    ) -> AppResult<RoleData> {
        match user.role {
            RoleName::Student => {
                let Some(student) = students::find_by_user_id(conn, user.id)? else {
                    return Ok(RoleData::Empty {});
                };
                let class = match student.class_id {
                    Some(id) => classes::get_class(conn, id)?,
                    None => None,
                };
                Ok(RoleData::Student {
                    recent_grades: grades::recent_for_student(conn, student.id, cfg.recent_grades)?,
                    attendance_percentage: compute_attendance_percentage(
                        conn,
                        student.id,
                        now.date(),
                        cfg.attendance_window_days,
                    )?,
                    class,
                })
            }
            RoleName::Teacher => {
                let Some(teacher) = teachers::find_by_user_id(conn, user.id)? else {
                    return Ok(RoleData::Empty {});
                };
                let mut led = Vec::new();
                for class in classes::led_by(conn, user.id)? {
                    let students = students::roster(conn, class.id)?;
                    led.push(TeacherClass { class, students });
                }
                Ok(RoleData::Teacher {
                    classes: led,
                    recent_grades: grades::recent_by_teacher(conn, teacher.id, cfg.recent_grades)?,
                })
            }
            RoleName::SchoolAdmin | RoleName::Parent => Ok(RoleData::Empty {}),
        }
    }

    /// Profile of one student: attendance over the configured window and
    /// every grade, newest first.
    pub fn student_profile(
        conn: &Connection,
        student_id: i64,
        now: NaiveDateTime,
        cfg: &Config,
    ) -> AppResult<StudentProfile> {
        let student = students::get_student_row(conn, student_id)?
            .ok_or_else(|| AppError::not_found("student", student_id))?;

        Ok(StudentProfile {
            attendance_percentage: compute_attendance_percentage(
                conn,
                student_id,
                now.date(),
                cfg.attendance_window_days,
            )?,
            window_days: cfg.attendance_window_days,
            grades: grades::list_all(conn, Some(student_id))?,
            student,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::db::seed::{ADMIN_EMAIL, STUDENT_EMAIL, TEACHER_EMAIL, seed_demo};
    use crate::utils::date;

    fn seeded() -> (DbPool, NaiveDateTime) {
        let pool = DbPool::in_memory().unwrap();
        let now = date::now();
        seed_demo(&pool.conn, &now).unwrap();
        (pool, now)
    }

    fn user_id(pool: &DbPool, email: &str) -> i64 {
        users::find_user_by_email(&pool.conn, email)
            .unwrap()
            .unwrap()
            .id
    }

    fn cfg() -> Config {
        Config::with_database(":memory:".into())
    }

    #[test]
    fn anonymous_dashboard_has_no_role_data() {
        let (pool, now) = seeded();
        let d = DashboardLogic::build(&pool.conn, None, now, &cfg()).unwrap();

        assert_eq!(d.stats.total_subjects, 6);
        assert_eq!(d.announcements.len(), 1);
        assert!(d.attendance_today.is_none());
        assert!(d.user.is_none());
        assert!(matches!(d.role_data, RoleData::Empty {}));
    }

    #[test]
    fn staff_see_zero_filled_summary() {
        let (pool, now) = seeded();
        let admin = user_id(&pool, ADMIN_EMAIL);
        let d = DashboardLogic::build(&pool.conn, Some(admin), now, &cfg()).unwrap();

        let summary = d.attendance_today.unwrap();
        assert_eq!(summary.len(), 4);
        assert!(summary.values().all(|n| *n == 0));
    }

    #[test]
    fn teacher_sees_led_class_with_roster() {
        let (pool, now) = seeded();
        let teacher = user_id(&pool, TEACHER_EMAIL);
        let d = DashboardLogic::build(&pool.conn, Some(teacher), now, &cfg()).unwrap();

        match d.role_data {
            RoleData::Teacher { classes, .. } => {
                assert_eq!(classes.len(), 1);
                assert_eq!(classes[0].students.len(), 1);
            }
            other => panic!("unexpected role data: {other:?}"),
        }
    }

    #[test]
    fn student_without_attendance_has_zero_percentage() {
        let (pool, now) = seeded();
        let student = user_id(&pool, STUDENT_EMAIL);
        let d = DashboardLogic::build(&pool.conn, Some(student), now, &cfg()).unwrap();

        match d.role_data {
            RoleData::Student {
                attendance_percentage,
                class,
                ..
            } => {
                assert_eq!(attendance_percentage, 0.0);
                assert_eq!(class.map(|c| c.name).as_deref(), Some("Grade 5A"));
            }
            other => panic!("unexpected role data: {other:?}"),
        }
        assert!(d.attendance_today.is_none());
    }

    #[test]
    fn unknown_viewer_is_not_found() {
        let (pool, now) = seeded();
        let err = DashboardLogic::build(&pool.conn, Some(9999), now, &cfg()).unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "user", id: 9999 }));
    }
}
