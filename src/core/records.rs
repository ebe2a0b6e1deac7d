//! Create / update / delete for every record type.
//!
//! Inputs are validated before touching the store, unknown ids surface as
//! `NotFound`, and every successful mutation lands in the audit log.

use crate::db::db_utils::exists;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{announcements, attendance, classes, grades, students, subjects, teachers, users};
use crate::errors::{AppError, AppResult};
use crate::models::Choice;
use crate::models::announcement::{NewAnnouncement, TargetAudience};
use crate::models::attendance::{AttendanceChanges, NewAttendance};
use crate::models::grade::NewGrade;
use crate::models::role::RoleName;
use crate::models::school_class::{ClassChanges, NewClass};
use crate::models::student::{NewStudent, StudentChanges};
use crate::models::subject::NewSubject;
use crate::models::teacher::NewTeacher;
use crate::models::user::{NewUser, User, UserChanges};
use chrono::NaiveDateTime;
use rusqlite::Connection;

fn required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> AppResult<()> {
    if value < 0.0 || value.is_nan() {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

fn check_email(email: &str) -> AppResult<()> {
    required("email", email)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation(format!("'{email}' is not a valid email"))),
    }
}

fn require(conn: &Connection, table: &str, entity: &'static str, id: i64) -> AppResult<()> {
    if !exists(conn, table, id)? {
        return Err(AppError::not_found(entity, id));
    }
    Ok(())
}

fn user_with_role(conn: &Connection, user_id: i64, role: RoleName) -> AppResult<User> {
    let user = users::get_user(conn, user_id)?.ok_or_else(|| AppError::not_found("user", user_id))?;
    if user.role != role {
        return Err(AppError::validation(format!(
            "user #{} has role '{}', expected '{}'",
            user_id,
            user.role_display_name,
            role.display_name()
        )));
    }
    Ok(user)
}

fn found(entity: &'static str, id: i64, hit: bool) -> AppResult<()> {
    if hit {
        Ok(())
    } else {
        Err(AppError::not_found(entity, id))
    }
}

// ---------------------------
// Users
// ---------------------------

pub struct UserLogic;

impl UserLogic {
    pub fn add(pool: &mut DbPool, u: &NewUser, now: NaiveDateTime) -> AppResult<i64> {
        required("name", &u.name)?;
        check_email(&u.email)?;

        let id = users::insert_user(&pool.conn, u, &now)?;
        audit(
            &pool.conn,
            "add",
            &format!("user #{id}"),
            &format!("{} <{}> as {}", u.name, u.email, u.role.display_name()),
        );
        Ok(id)
    }

    pub fn edit(pool: &mut DbPool, id: i64, c: &UserChanges, now: NaiveDateTime) -> AppResult<()> {
        if c.name.is_none() && c.email.is_none() && c.role.is_none() && c.status.is_none() {
            return Err(AppError::validation("nothing to update"));
        }
        if let Some(name) = &c.name {
            required("name", name)?;
        }
        if let Some(email) = &c.email {
            check_email(email)?;
        }

        found("user", id, users::update_user(&pool.conn, id, c, &now)?)?;
        audit(&pool.conn, "edit", &format!("user #{id}"), "User updated");
        Ok(())
    }

    /// Cascades to the student/teacher profile and their grades/attendance.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        found("user", id, users::delete_user(&pool.conn, id)?)?;
        audit(&pool.conn, "del", &format!("user #{id}"), "User deleted");
        Ok(())
    }
}

// ---------------------------
// Students
// ---------------------------

pub struct StudentLogic;

impl StudentLogic {
    pub fn add(pool: &mut DbPool, s: &NewStudent, now: NaiveDateTime) -> AppResult<i64> {
        required("student code", &s.student_code)?;
        non_negative("fee amount", s.fee_amount)?;
        user_with_role(&pool.conn, s.user_id, RoleName::Student)?;
        if let Some(class_id) = s.class_id {
            require(&pool.conn, "classes", "class", class_id)?;
        }

        let id = students::insert_student(&pool.conn, s, &now)?;
        audit(
            &pool.conn,
            "add",
            &format!("student #{id}"),
            &format!("Student {} enrolled", s.student_code),
        );
        Ok(id)
    }

    pub fn edit(
        pool: &mut DbPool,
        id: i64,
        c: &StudentChanges,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        if c.is_empty() {
            return Err(AppError::validation("nothing to update"));
        }
        if let Some(fee) = c.fee_amount {
            non_negative("fee amount", fee)?;
        }
        if let Some(Some(class_id)) = c.class_id {
            require(&pool.conn, "classes", "class", class_id)?;
        }

        found("student", id, students::update_student(&pool.conn, id, c, &now)?)?;
        audit(&pool.conn, "edit", &format!("student #{id}"), "Student updated");
        Ok(())
    }

    /// Removes the profile; the owning user account is kept.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        found("student", id, students::delete_student(&pool.conn, id)?)?;
        audit(&pool.conn, "del", &format!("student #{id}"), "Student deleted");
        Ok(())
    }
}

// ---------------------------
// Teachers
// ---------------------------

pub struct TeacherLogic;

impl TeacherLogic {
    pub fn add(pool: &mut DbPool, t: &NewTeacher, now: NaiveDateTime) -> AppResult<i64> {
        required("employee id", &t.employee_id)?;
        required("qualification", &t.qualification)?;
        if t.experience_years < 0 {
            return Err(AppError::validation("experience years must not be negative"));
        }
        if let Some(salary) = t.salary {
            non_negative("salary", salary)?;
        }
        user_with_role(&pool.conn, t.user_id, RoleName::Teacher)?;

        let id = teachers::insert_teacher(&pool.conn, t, &now)?;
        audit(
            &pool.conn,
            "add",
            &format!("teacher #{id}"),
            &format!("Teacher {} hired", t.employee_id),
        );
        Ok(id)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        found("teacher", id, teachers::delete_teacher(&pool.conn, id)?)?;
        audit(&pool.conn, "del", &format!("teacher #{id}"), "Teacher deleted");
        Ok(())
    }
}

// ---------------------------
// Classes
// ---------------------------

pub struct ClassLogic;

impl ClassLogic {
    pub fn add(pool: &mut DbPool, c: &NewClass, now: NaiveDateTime) -> AppResult<i64> {
        required("name", &c.name)?;
        required("grade level", &c.grade_level)?;
        if c.capacity <= 0 {
            return Err(AppError::validation("capacity must be positive"));
        }
        if let Some(teacher) = c.class_teacher_id {
            user_with_role(&pool.conn, teacher, RoleName::Teacher)?;
        }

        let id = classes::insert_class(&pool.conn, c, &now)?;
        audit(
            &pool.conn,
            "add",
            &format!("class #{id}"),
            &format!("Class {} created", c.name),
        );
        Ok(id)
    }

    pub fn edit(pool: &mut DbPool, id: i64, c: &ClassChanges, now: NaiveDateTime) -> AppResult<()> {
        if c.is_empty() {
            return Err(AppError::validation("nothing to update"));
        }
        if let Some(name) = &c.name {
            required("name", name)?;
        }
        if let Some(cap) = c.capacity
            && cap <= 0
        {
            return Err(AppError::validation("capacity must be positive"));
        }
        if let Some(Some(teacher)) = c.class_teacher_id {
            user_with_role(&pool.conn, teacher, RoleName::Teacher)?;
        }

        found("class", id, classes::update_class(&pool.conn, id, c, &now)?)?;
        audit(&pool.conn, "edit", &format!("class #{id}"), "Class updated");
        Ok(())
    }

    /// Students are detached, attendance rows and class announcements removed.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        found("class", id, classes::delete_class(&pool.conn, id)?)?;
        audit(&pool.conn, "del", &format!("class #{id}"), "Class deleted");
        Ok(())
    }
}

// ---------------------------
// Subjects
// ---------------------------

pub struct SubjectLogic;

impl SubjectLogic {
    pub fn add(pool: &mut DbPool, s: &NewSubject, now: NaiveDateTime) -> AppResult<i64> {
        required("name", &s.name)?;
        required("code", &s.code)?;
        if s.total_marks < 0 || s.pass_marks < 0 {
            return Err(AppError::validation("marks must not be negative"));
        }
        if s.pass_marks > s.total_marks {
            return Err(AppError::validation(format!(
                "pass marks ({}) exceed total marks ({})",
                s.pass_marks, s.total_marks
            )));
        }

        let id = subjects::insert_subject(&pool.conn, s, &now)?;
        audit(
            &pool.conn,
            "add",
            &format!("subject #{id}"),
            &format!("Subject {} ({})", s.name, s.code),
        );
        Ok(id)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        found("subject", id, subjects::delete_subject(&pool.conn, id)?)?;
        audit(&pool.conn, "del", &format!("subject #{id}"), "Subject deleted");
        Ok(())
    }
}

// ---------------------------
// Grades
// ---------------------------

pub struct GradeLogic;

impl GradeLogic {
    /// `total_marks` of `None` takes the subject's total.
    pub fn add(
        pool: &mut DbPool,
        g: &NewGrade,
        total_marks: Option<f64>,
        now: NaiveDateTime,
    ) -> AppResult<i64> {
        required("exam type", &g.exam_type)?;
        require(&pool.conn, "students", "student", g.student_id)?;
        let teacher = teachers::get_teacher(&pool.conn, g.teacher_id)?
            .ok_or_else(|| AppError::not_found("teacher", g.teacher_id))?;
        let subject = subjects::get_subject(&pool.conn, g.subject_id)?
            .ok_or_else(|| AppError::not_found("subject", g.subject_id))?;

        let mut grade = g.clone();
        grade.total_marks = total_marks.unwrap_or(subject.total_marks as f64);

        non_negative("marks obtained", grade.marks_obtained)?;
        non_negative("total marks", grade.total_marks)?;
        if grade.total_marks > 0.0 && grade.marks_obtained > grade.total_marks {
            return Err(AppError::validation(format!(
                "marks obtained ({}) exceed total marks ({})",
                grade.marks_obtained, grade.total_marks
            )));
        }

        let id = grades::insert_grade(&pool.conn, &grade, &now)?;
        audit(
            &pool.conn,
            "add",
            &format!("grade #{id}"),
            &format!(
                "{} {}/{} for student #{} by {}",
                subject.code,
                grade.marks_obtained,
                grade.total_marks,
                grade.student_id,
                teacher.employee_id
            ),
        );
        Ok(id)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        found("grade", id, grades::delete_grade(&pool.conn, id)?)?;
        audit(&pool.conn, "del", &format!("grade #{id}"), "Grade deleted");
        Ok(())
    }
}

// ---------------------------
// Attendance
// ---------------------------

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Record one student's status for a day. The class defaults to the
    /// student's current class.
    pub fn mark(pool: &mut DbPool, a: &NewAttendance, now: NaiveDateTime) -> AppResult<i64> {
        let student = students::get_student(&pool.conn, a.student_id)?
            .ok_or_else(|| AppError::not_found("student", a.student_id))?;
        require(&pool.conn, "users", "user", a.marked_by)?;

        let class_id = match a.class_id.or(student.class_id) {
            Some(id) => {
                require(&pool.conn, "classes", "class", id)?;
                id
            }
            None => {
                return Err(AppError::validation(format!(
                    "student #{} is not assigned to a class; pass --class",
                    a.student_id
                )));
            }
        };

        if let (Some(cin), Some(cout)) = (a.check_in_time, a.check_out_time)
            && cout < cin
        {
            return Err(AppError::validation("check-out time is before check-in time"));
        }

        let id = attendance::insert_attendance(&pool.conn, a, class_id, &now)?;
        audit(
            &pool.conn,
            "mark",
            &format!("attendance #{id}"),
            &format!(
                "{} {} for {}",
                a.date,
                a.status.to_db_str(),
                student.student_code
            ),
        );
        Ok(id)
    }

    pub fn edit(
        pool: &mut DbPool,
        id: i64,
        c: &AttendanceChanges,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        if c.is_empty() {
            return Err(AppError::validation("nothing to update"));
        }
        let current = attendance::get_attendance(&pool.conn, id)?
            .ok_or_else(|| AppError::not_found("attendance", id))?;
        let check_in = c.check_in_time.or(current.check_in_time);
        let check_out = c.check_out_time.or(current.check_out_time);
        if let (Some(cin), Some(cout)) = (check_in, check_out)
            && cout < cin
        {
            return Err(AppError::validation("check-out time is before check-in time"));
        }

        found("attendance", id, attendance::update_attendance(&pool.conn, id, c, &now)?)?;
        audit(&pool.conn, "edit", &format!("attendance #{id}"), "Attendance updated");
        Ok(())
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        found("attendance", id, attendance::delete_attendance(&pool.conn, id)?)?;
        audit(&pool.conn, "del", &format!("attendance #{id}"), "Attendance deleted");
        Ok(())
    }
}

// ---------------------------
// Announcements
// ---------------------------

pub struct AnnouncementLogic;

impl AnnouncementLogic {
    pub fn add(pool: &mut DbPool, a: &NewAnnouncement, now: NaiveDateTime) -> AppResult<i64> {
        required("title", &a.title)?;
        required("content", &a.content)?;
        require(&pool.conn, "users", "user", a.created_by)?;

        match (a.target_audience, a.target_class_id) {
            (TargetAudience::SpecificClass, None) => {
                return Err(AppError::validation(
                    "a class-targeted announcement needs --class",
                ));
            }
            (_, Some(class_id)) => require(&pool.conn, "classes", "class", class_id)?,
            _ => {}
        }

        if let (Some(publish), Some(expires)) = (a.publish_at, a.expires_at)
            && expires <= publish
        {
            return Err(AppError::validation("expiry must be after the publish time"));
        }

        let mut ann = a.clone();
        if ann.is_published && ann.publish_at.is_none() {
            ann.publish_at = Some(now);
        }

        let id = announcements::insert_announcement(&pool.conn, &ann, &now)?;
        audit(
            &pool.conn,
            "add",
            &format!("announcement #{id}"),
            &format!("\"{}\"", ann.title),
        );
        Ok(id)
    }

    pub fn set_published(
        pool: &mut DbPool,
        id: i64,
        published: bool,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        found(
            "announcement",
            id,
            announcements::set_published(&pool.conn, id, published, &now)?,
        )?;
        audit(
            &pool.conn,
            "publish",
            &format!("announcement #{id}"),
            if published { "Published" } else { "Unpublished" },
        );
        Ok(())
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        found("announcement", id, announcements::delete_announcement(&pool.conn, id)?)?;
        audit(&pool.conn, "del", &format!("announcement #{id}"), "Announcement deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::attendance::{compute_attendance_percentage, today_summary};
    use crate::models::dashboard::AttendanceSummary;
    use crate::core::calculator::totals::dashboard_totals;
    use crate::db::seed::{ADMIN_EMAIL, TEACHER_EMAIL, seed_demo};
    use crate::models::announcement::AnnouncementType;
    use crate::models::attendance::AttendanceStatus;
    use crate::models::status::RecordStatus;
    use crate::models::student::FeeStatus;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn new_user(pool: &mut DbPool, email: &str, role: RoleName) -> i64 {
        UserLogic::add(
            pool,
            &NewUser {
                name: "Test User".into(),
                email: email.into(),
                role,
                status: RecordStatus::Active,
                date_of_birth: None,
            },
            now(),
        )
        .unwrap()
    }

    fn new_student(user_id: i64, code: &str, class_id: Option<i64>) -> NewStudent {
        NewStudent {
            user_id,
            student_code: code.into(),
            class_id,
            roll_number: None,
            admission_date: now().date(),
            guardian_name: None,
            guardian_phone: None,
            guardian_email: None,
            emergency_contact: None,
            medical_info: None,
            fee_amount: 0.0,
            fee_status: FeeStatus::Pending,
        }
    }

    fn class(pool: &mut DbPool) -> i64 {
        ClassLogic::add(
            pool,
            &NewClass {
                name: "Grade 6B".into(),
                grade_level: "6".into(),
                section: Some("B".into()),
                class_teacher_id: None,
                capacity: 25,
                room_number: None,
                description: None,
                status: RecordStatus::Active,
            },
            now(),
        )
        .unwrap()
    }

    #[test]
    fn creating_a_student_increments_total_by_one() {
        let mut pool = DbPool::in_memory().unwrap();
        let before = dashboard_totals(&pool.conn).unwrap().total_students;

        let uid = new_user(&mut pool, "kid@school.com", RoleName::Student);
        StudentLogic::add(&mut pool, &new_student(uid, "STU-9", None), now()).unwrap();

        assert_eq!(
            dashboard_totals(&pool.conn).unwrap().total_students,
            before + 1
        );
    }

    #[test]
    fn student_profile_requires_student_role() {
        let mut pool = DbPool::in_memory().unwrap();
        let uid = new_user(&mut pool, "t@school.com", RoleName::Teacher);
        let err = StudentLogic::add(&mut pool, &new_student(uid, "STU-1", None), now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn duplicate_student_code_is_rejected() {
        let mut pool = DbPool::in_memory().unwrap();
        let a = new_user(&mut pool, "a@school.com", RoleName::Student);
        let b = new_user(&mut pool, "b@school.com", RoleName::Student);
        StudentLogic::add(&mut pool, &new_student(a, "STU-1", None), now()).unwrap();
        let err = StudentLogic::add(&mut pool, &new_student(b, "STU-1", None), now()).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("student_code"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut pool = DbPool::in_memory().unwrap();
        assert!(matches!(
            StudentLogic::delete(&mut pool, 42),
            Err(AppError::NotFound { entity: "student", id: 42 })
        ));
        assert!(matches!(
            AnnouncementLogic::set_published(&mut pool, 7, true, now()),
            Err(AppError::NotFound { entity: "announcement", .. })
        ));
    }

    #[test]
    fn eighteen_present_of_twenty_is_ninety_percent() {
        let mut pool = DbPool::in_memory().unwrap();
        let admin = new_user(&mut pool, "root@school.com", RoleName::SchoolAdmin);
        let uid = new_user(&mut pool, "s@school.com", RoleName::Student);
        let class_id = class(&mut pool);
        let sid = StudentLogic::add(&mut pool, &new_student(uid, "STU-20", Some(class_id)), now())
            .unwrap();

        for day in 0..20 {
            let status = if day < 18 {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Absent
            };
            AttendanceLogic::mark(
                &mut pool,
                &NewAttendance {
                    student_id: sid,
                    class_id: None,
                    date: now().date() - Duration::days(day),
                    status,
                    check_in_time: None,
                    check_out_time: None,
                    remarks: None,
                    marked_by: admin,
                },
                now(),
            )
            .unwrap();
        }

        let pct = compute_attendance_percentage(&pool.conn, sid, now().date(), 30).unwrap();
        assert_eq!(pct, 90.0);
    }

    #[test]
    fn attendance_outside_window_is_ignored() {
        let mut pool = DbPool::in_memory().unwrap();
        let admin = new_user(&mut pool, "root@school.com", RoleName::SchoolAdmin);
        let uid = new_user(&mut pool, "s@school.com", RoleName::Student);
        let class_id = class(&mut pool);
        let sid = StudentLogic::add(&mut pool, &new_student(uid, "STU-21", Some(class_id)), now())
            .unwrap();

        AttendanceLogic::mark(
            &mut pool,
            &NewAttendance {
                student_id: sid,
                class_id: None,
                date: now().date() - Duration::days(45),
                status: AttendanceStatus::Present,
                check_in_time: None,
                check_out_time: None,
                remarks: None,
                marked_by: admin,
            },
            now(),
        )
        .unwrap();

        let pct = compute_attendance_percentage(&pool.conn, sid, now().date(), 30).unwrap();
        assert_eq!(pct, 0.0);
    }

    fn mark(pool: &mut DbPool, sid: i64, date: NaiveDate, status: AttendanceStatus, by: i64) {
        AttendanceLogic::mark(
            pool,
            &NewAttendance {
                student_id: sid,
                class_id: None,
                date,
                status,
                check_in_time: None,
                check_out_time: None,
                remarks: None,
                marked_by: by,
            },
            now(),
        )
        .unwrap();
    }

    #[test]
    fn window_includes_its_first_day_only() {
        let mut pool = DbPool::in_memory().unwrap();
        let admin = new_user(&mut pool, "root@school.com", RoleName::SchoolAdmin);
        let uid = new_user(&mut pool, "s@school.com", RoleName::Student);
        let class_id = class(&mut pool);
        let sid = StudentLogic::add(&mut pool, &new_student(uid, "STU-22", Some(class_id)), now())
            .unwrap();

        let today = now().date();
        mark(&mut pool, sid, today - Duration::days(30), AttendanceStatus::Present, admin);
        mark(&mut pool, sid, today - Duration::days(31), AttendanceStatus::Absent, admin);

        let from = crate::utils::date::window_start(today, 30).unwrap();
        assert_eq!(attendance::window_counts(&pool.conn, sid, from).unwrap(), (1, 1));
        assert_eq!(
            compute_attendance_percentage(&pool.conn, sid, today, 30).unwrap(),
            100.0
        );
    }

    #[test]
    fn today_summary_counts_marked_rows() {
        let mut pool = DbPool::in_memory().unwrap();
        let admin = new_user(&mut pool, "root@school.com", RoleName::SchoolAdmin);
        let class_id = class(&mut pool);
        let today = now().date();

        let statuses = [
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Late,
        ];
        for (i, status) in statuses.into_iter().enumerate() {
            let uid = new_user(&mut pool, &format!("kid{i}@school.com"), RoleName::Student);
            let sid = StudentLogic::add(
                &mut pool,
                &new_student(uid, &format!("STU-3{i}"), Some(class_id)),
                now(),
            )
            .unwrap();
            mark(&mut pool, sid, today, status, admin);
        }
        // another day must not leak into today's counts
        let uid = new_user(&mut pool, "late@school.com", RoleName::Student);
        let sid = StudentLogic::add(&mut pool, &new_student(uid, "STU-39", Some(class_id)), now())
            .unwrap();
        mark(&mut pool, sid, today - Duration::days(1), AttendanceStatus::Absent, admin);

        let seen = today_summary(&pool.conn, today, false).unwrap();
        let expected: AttendanceSummary =
            [(AttendanceStatus::Present, 2), (AttendanceStatus::Late, 1)]
                .into_iter()
                .collect();
        assert_eq!(seen, expected);

        let filled = today_summary(&pool.conn, today, true).unwrap();
        assert_eq!(filled.len(), 4);
        assert_eq!(filled[&AttendanceStatus::Present], 2);
        assert_eq!(filled[&AttendanceStatus::Late], 1);
        assert_eq!(filled[&AttendanceStatus::Absent], 0);
        assert_eq!(filled[&AttendanceStatus::Excused], 0);
    }

    #[test]
    fn second_mark_on_same_day_is_rejected() {
        let mut pool = DbPool::in_memory().unwrap();
        seed_demo(&pool.conn, &now()).unwrap();
        let admin = users::find_user_by_email(&pool.conn, ADMIN_EMAIL)
            .unwrap()
            .unwrap()
            .id;
        let sid = students::find_by_code(&pool.conn, "STU-2024-001")
            .unwrap()
            .unwrap()
            .id;

        let mark = NewAttendance {
            student_id: sid,
            class_id: None,
            date: now().date(),
            status: AttendanceStatus::Late,
            check_in_time: None,
            check_out_time: None,
            remarks: None,
            marked_by: admin,
        };
        AttendanceLogic::mark(&mut pool, &mark, now()).unwrap();
        assert!(matches!(
            AttendanceLogic::mark(&mut pool, &mark, now()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn student_without_class_needs_explicit_class() {
        let mut pool = DbPool::in_memory().unwrap();
        let admin = new_user(&mut pool, "root@school.com", RoleName::SchoolAdmin);
        let uid = new_user(&mut pool, "s@school.com", RoleName::Student);
        let sid = StudentLogic::add(&mut pool, &new_student(uid, "STU-3", None), now()).unwrap();

        let err = AttendanceLogic::mark(
            &mut pool,
            &NewAttendance {
                student_id: sid,
                class_id: None,
                date: now().date(),
                status: AttendanceStatus::Present,
                check_in_time: None,
                check_out_time: None,
                remarks: None,
                marked_by: admin,
            },
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn grade_defaults_to_subject_total_and_rejects_overflow() {
        let mut pool = DbPool::in_memory().unwrap();
        seed_demo(&pool.conn, &now()).unwrap();
        let teacher_user = users::find_user_by_email(&pool.conn, TEACHER_EMAIL)
            .unwrap()
            .unwrap()
            .id;
        let teacher = teachers::find_by_user_id(&pool.conn, teacher_user)
            .unwrap()
            .unwrap();
        let student = students::find_by_code(&pool.conn, "STU-2024-001")
            .unwrap()
            .unwrap();
        let pe = subjects::find_by_code(&pool.conn, "PE-001").unwrap().unwrap();

        let mut g = NewGrade {
            student_id: student.id,
            subject_id: pe.id,
            teacher_id: teacher.id,
            exam_type: "midterm".into(),
            marks_obtained: 45.0,
            total_marks: 0.0,
            grade_letter: Some("A".into()),
            gpa: None,
            remarks: None,
            exam_date: now().date(),
        };
        let id = GradeLogic::add(&mut pool, &g, None, now()).unwrap();
        let stored = grades::get_grade(&pool.conn, id).unwrap().unwrap();
        assert_eq!(stored.total_marks, 50.0);
        assert_eq!(stored.percentage(), 90.0);

        g.marks_obtained = 51.0;
        assert!(matches!(
            GradeLogic::add(&mut pool, &g, None, now()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn published_announcement_gets_publish_time() {
        let mut pool = DbPool::in_memory().unwrap();
        let admin = new_user(&mut pool, "root@school.com", RoleName::SchoolAdmin);
        let id = AnnouncementLogic::add(
            &mut pool,
            &NewAnnouncement {
                title: "Sports day".into(),
                content: "Friday".into(),
                kind: AnnouncementType::Event,
                target_audience: TargetAudience::All,
                target_class_id: None,
                created_by: admin,
                is_published: true,
                publish_at: None,
                expires_at: None,
            },
            now(),
        )
        .unwrap();

        let a = announcements::get_announcement(&pool.conn, id)
            .unwrap()
            .unwrap();
        assert_eq!(a.publish_at, Some(now()));
        assert!(a.is_visible_at(now()));

        AnnouncementLogic::set_published(&mut pool, id, false, now()).unwrap();
        let a = announcements::get_announcement(&pool.conn, id)
            .unwrap()
            .unwrap();
        assert!(!a.is_visible_at(now()));
    }

    #[test]
    fn class_targeted_announcement_needs_a_class() {
        let mut pool = DbPool::in_memory().unwrap();
        let admin = new_user(&mut pool, "root@school.com", RoleName::SchoolAdmin);
        let err = AnnouncementLogic::add(
            &mut pool,
            &NewAnnouncement {
                title: "Trip".into(),
                content: "Bring lunch".into(),
                kind: AnnouncementType::General,
                target_audience: TargetAudience::SpecificClass,
                target_class_id: None,
                created_by: admin,
                is_published: false,
                publish_at: None,
                expires_at: None,
            },
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn deleting_a_user_cascades_to_profile() {
        let mut pool = DbPool::in_memory().unwrap();
        let uid = new_user(&mut pool, "gone@school.com", RoleName::Student);
        let sid = StudentLogic::add(&mut pool, &new_student(uid, "STU-X", None), now()).unwrap();

        UserLogic::delete(&mut pool, uid).unwrap();
        assert!(students::get_student(&pool.conn, sid).unwrap().is_none());
    }
}
