//! Demo dataset for `init --seed`.
//!
//! Each record is looked up by its unique key first, so seeding an already
//! seeded database inserts nothing.

use crate::db::{announcements, classes, students, subjects, teachers, users};
use crate::errors::AppResult;
use crate::models::announcement::{AnnouncementType, NewAnnouncement, TargetAudience};
use crate::models::role::RoleName;
use crate::models::school_class::NewClass;
use crate::models::status::RecordStatus;
use crate::models::student::{FeeStatus, NewStudent};
use crate::models::subject::NewSubject;
use crate::models::teacher::NewTeacher;
use crate::models::user::NewUser;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension};

pub const ADMIN_EMAIL: &str = "admin@school.com";
pub const TEACHER_EMAIL: &str = "teacher@school.com";
pub const STUDENT_EMAIL: &str = "student@school.com";

const WELCOME_TITLE: &str = "Welcome to New Academic Year";

/// (name, code, description, total_marks, pass_marks, category)
const SUBJECTS: &[(&str, &str, &str, i64, i64, &str)] = &[
    (
        "Mathematics",
        "MATH-001",
        "Basic mathematics including arithmetic, algebra, and geometry",
        100,
        40,
        "Core",
    ),
    (
        "English Language",
        "ENG-001",
        "English grammar, literature, and communication skills",
        100,
        40,
        "Core",
    ),
    (
        "Science",
        "SCI-001",
        "General science covering physics, chemistry, and biology basics",
        100,
        40,
        "Core",
    ),
    (
        "Social Studies",
        "SS-001",
        "History, geography, and civic education",
        100,
        40,
        "Core",
    ),
    (
        "Physical Education",
        "PE-001",
        "Physical fitness, sports, and health education",
        50,
        25,
        "Extra",
    ),
    (
        "Art & Craft",
        "ART-001",
        "Creative arts, drawing, and handicrafts",
        50,
        25,
        "Elective",
    ),
];

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn ensure_user(
    conn: &Connection,
    name: &str,
    email: &str,
    role: RoleName,
    date_of_birth: Option<NaiveDate>,
    now: &NaiveDateTime,
    created: &mut usize,
) -> AppResult<i64> {
    if let Some(u) = users::find_user_by_email(conn, email)? {
        return Ok(u.id);
    }
    *created += 1;
    users::insert_user(
        conn,
        &NewUser {
            name: name.to_string(),
            email: email.to_string(),
            role,
            status: RecordStatus::Active,
            date_of_birth,
        },
        now,
    )
}

fn seed_subjects(conn: &Connection, now: &NaiveDateTime, created: &mut usize) -> AppResult<()> {
    for (name, code, description, total, pass, category) in SUBJECTS {
        if subjects::find_by_code(conn, code)?.is_some() {
            continue;
        }
        subjects::insert_subject(
            conn,
            &NewSubject {
                name: name.to_string(),
                code: code.to_string(),
                description: Some(description.to_string()),
                total_marks: *total,
                pass_marks: *pass,
                category: Some(category.to_string()),
            },
            now,
        )?;
        *created += 1;
    }
    Ok(())
}

/// Insert the demo dataset inside one transaction.
/// Returns how many records were created.
pub fn seed_demo(conn: &Connection, now: &NaiveDateTime) -> AppResult<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut created = 0;

    seed_subjects(&tx, now, &mut created)?;

    let admin_id = ensure_user(
        &tx,
        "School Admin",
        ADMIN_EMAIL,
        RoleName::SchoolAdmin,
        None,
        now,
        &mut created,
    )?;

    let teacher_user = ensure_user(
        &tx,
        "John Smith",
        TEACHER_EMAIL,
        RoleName::Teacher,
        None,
        now,
        &mut created,
    )?;
    if teachers::find_by_user_id(&tx, teacher_user)?.is_none() {
        teachers::insert_teacher(
            &tx,
            &NewTeacher {
                user_id: teacher_user,
                employee_id: "EMP-2024-001".into(),
                qualification: "Bachelor of Education".into(),
                department: Some("Primary".into()),
                joining_date: ymd(2024, 1, 1),
                salary: Some(50000.0),
                specialization: Some("Mathematics and Science".into()),
                experience_years: 5,
            },
            now,
        )?;
        created += 1;
    }

    let student_user = ensure_user(
        &tx,
        "Alice Johnson",
        STUDENT_EMAIL,
        RoleName::Student,
        Some(ymd(2010, 5, 15)),
        now,
        &mut created,
    )?;

    let class_id = match classes::find_by_name(&tx, "Grade 5A")? {
        Some(c) => c.id,
        None => {
            created += 1;
            classes::insert_class(
                &tx,
                &NewClass {
                    name: "Grade 5A".into(),
                    grade_level: "5".into(),
                    section: Some("A".into()),
                    class_teacher_id: Some(teacher_user),
                    capacity: 30,
                    room_number: Some("101".into()),
                    description: Some("Primary grade 5 section A".into()),
                    status: RecordStatus::Active,
                },
                now,
            )?
        }
    };

    if students::find_by_user_id(&tx, student_user)?.is_none() {
        students::insert_student(
            &tx,
            &NewStudent {
                user_id: student_user,
                student_code: "STU-2024-001".into(),
                class_id: Some(class_id),
                roll_number: Some("001".into()),
                admission_date: ymd(2024, 1, 1),
                guardian_name: Some("Robert Johnson".into()),
                guardian_phone: Some("+1234567890".into()),
                guardian_email: Some("parent@email.com".into()),
                emergency_contact: Some("+1234567891".into()),
                medical_info: None,
                fee_amount: 5000.0,
                fee_status: FeeStatus::Paid,
            },
            now,
        )?;
        created += 1;
    }

    let has_welcome = tx
        .query_row(
            "SELECT 1 FROM announcements WHERE title = ?1 LIMIT 1",
            [WELCOME_TITLE],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_welcome {
        announcements::insert_announcement(
            &tx,
            &NewAnnouncement {
                title: WELCOME_TITLE.into(),
                content: "We are excited to welcome all students and parents to the new \
                          academic year. Please check your schedules and be prepared for an \
                          amazing learning experience."
                    .into(),
                kind: AnnouncementType::General,
                target_audience: TargetAudience::All,
                target_class_id: None,
                created_by: admin_id,
                is_published: true,
                publish_at: Some(*now),
                expires_at: None,
            },
            now,
        )?;
        created += 1;
    }

    tx.commit()?;
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db_utils::count;
    use crate::db::pool::DbPool;
    use crate::utils::date;

    #[test]
    fn seeding_twice_creates_nothing_the_second_time() {
        let pool = DbPool::in_memory().unwrap();
        let now = date::now();

        let first = seed_demo(&pool.conn, &now).unwrap();
        assert_eq!(first, 6 + 3 + 1 + 1 + 1 + 1);
        assert_eq!(seed_demo(&pool.conn, &now).unwrap(), 0);

        assert_eq!(count(&pool.conn, "subjects").unwrap(), 6);
        assert_eq!(count(&pool.conn, "students").unwrap(), 1);
        assert_eq!(count(&pool.conn, "teachers").unwrap(), 1);
    }

    #[test]
    fn seeded_class_is_led_by_the_demo_teacher() {
        let pool = DbPool::in_memory().unwrap();
        seed_demo(&pool.conn, &date::now()).unwrap();

        let teacher = users::find_user_by_email(&pool.conn, TEACHER_EMAIL)
            .unwrap()
            .unwrap();
        let led = classes::led_by(&pool.conn, teacher.id).unwrap();
        assert_eq!(led.len(), 1);
        assert_eq!(led[0].name, "Grade 5A");
    }
}
