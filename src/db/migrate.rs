//! Schema migrations.
//!
//! Every migration is recorded in the `log` table with
//! `operation = 'migration_applied'` and `target = <version>`, so running the
//! engine twice is a no-op.

use crate::errors::{AppError, AppResult};
use crate::models::Choice;
use crate::models::announcement::{AnnouncementType, TargetAudience};
use crate::models::attendance::AttendanceStatus;
use crate::models::choice::sql_check;
use crate::models::role::RoleName;
use crate::models::status::RecordStatus;
use crate::models::student::FeeStatus;
use crate::utils::date;
use rusqlite::{Connection, OptionalExtension, Result, params};

struct Migration {
    version: &'static str,
    description: &'static str,
    up: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20241220_0001_create_roles_users",
        description: "Created roles and users tables",
        up: create_roles_users,
    },
    Migration {
        version: "20241220_0003_create_classes",
        description: "Created classes table",
        up: create_classes,
    },
    Migration {
        version: "20241220_0004_create_subjects",
        description: "Created subjects table",
        up: create_subjects,
    },
    Migration {
        version: "20241220_0005_create_students",
        description: "Created students table",
        up: create_students,
    },
    Migration {
        version: "20241220_0006_create_teachers",
        description: "Created teachers table",
        up: create_teachers,
    },
    Migration {
        version: "20241220_0007_create_grades",
        description: "Created grades table",
        up: create_grades,
    },
    Migration {
        version: "20241220_0008_create_attendances",
        description: "Created attendances table",
        up: create_attendances,
    },
    Migration {
        version: "20241220_0009_create_announcements",
        description: "Created announcements table",
        up: create_announcements,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn create_roles_users(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE roles (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL UNIQUE {role_check},
            display_name TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL UNIQUE,
            role_id       INTEGER NOT NULL REFERENCES roles(id),
            status        TEXT NOT NULL DEFAULT 'active' {status_check},
            date_of_birth TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );
        CREATE INDEX idx_users_role ON users(role_id);
        "#,
        role_check = sql_check::<RoleName>("name"),
        status_check = sql_check::<RecordStatus>("status"),
    ))?;

    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO roles (name, display_name, description) VALUES (?1, ?2, ?3)",
    )?;
    for role in RoleName::ALL {
        stmt.execute(params![
            role.to_db_str(),
            role.display_name(),
            role.description()
        ])?;
    }
    Ok(())
}

fn create_classes(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE classes (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL,
            grade_level      TEXT NOT NULL,
            section          TEXT,
            class_teacher_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            capacity         INTEGER NOT NULL DEFAULT 30 CHECK(capacity > 0),
            room_number      TEXT,
            description      TEXT,
            status           TEXT NOT NULL DEFAULT 'active' {status_check},
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );
        CREATE INDEX idx_classes_level_section ON classes(grade_level, section);
        CREATE INDEX idx_classes_teacher ON classes(class_teacher_id);
        CREATE INDEX idx_classes_status ON classes(status);
        "#,
        status_check = sql_check::<RecordStatus>("status"),
    ))
}

fn create_subjects(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE subjects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            code        TEXT NOT NULL UNIQUE,
            description TEXT,
            total_marks INTEGER NOT NULL DEFAULT 100 CHECK(total_marks >= 0),
            pass_marks  INTEGER NOT NULL DEFAULT 40 CHECK(pass_marks >= 0),
            category    TEXT,
            status      TEXT NOT NULL DEFAULT 'active' {status_check},
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );
        "#,
        status_check = sql_check::<RecordStatus>("status"),
    ))
}

fn create_students(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE students (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            student_code      TEXT NOT NULL UNIQUE,
            class_id          INTEGER REFERENCES classes(id) ON DELETE SET NULL,
            roll_number       TEXT,
            admission_date    TEXT NOT NULL,
            guardian_name     TEXT,
            guardian_phone    TEXT,
            guardian_email    TEXT,
            emergency_contact TEXT,
            medical_info      TEXT,
            fee_amount        REAL NOT NULL DEFAULT 0 CHECK(fee_amount >= 0),
            fee_status        TEXT NOT NULL DEFAULT 'pending' {fee_check},
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL
        );
        CREATE INDEX idx_students_class ON students(class_id);
        CREATE INDEX idx_students_roll ON students(roll_number);
        CREATE INDEX idx_students_fee_status ON students(fee_status);
        "#,
        fee_check = sql_check::<FeeStatus>("fee_status"),
    ))
}

fn create_teachers(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE teachers (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            employee_id      TEXT NOT NULL UNIQUE,
            qualification    TEXT NOT NULL,
            department       TEXT,
            joining_date     TEXT NOT NULL,
            salary           REAL,
            specialization   TEXT,
            experience_years INTEGER NOT NULL DEFAULT 0 CHECK(experience_years >= 0),
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );
        CREATE INDEX idx_teachers_department ON teachers(department);
        "#,
    )
}

fn create_grades(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE grades (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id     INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            subject_id     INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
            teacher_id     INTEGER NOT NULL REFERENCES teachers(id) ON DELETE CASCADE,
            exam_type      TEXT NOT NULL,
            marks_obtained REAL NOT NULL CHECK(marks_obtained >= 0),
            total_marks    REAL NOT NULL CHECK(total_marks >= 0),
            grade_letter   TEXT,
            gpa            REAL,
            remarks        TEXT,
            exam_date      TEXT NOT NULL,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );
        CREATE INDEX idx_grades_student_subject ON grades(student_id, subject_id);
        CREATE INDEX idx_grades_exam_type ON grades(exam_type);
        CREATE INDEX idx_grades_exam_date ON grades(exam_date);
        "#,
    )
}

fn create_attendances(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE attendances (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id     INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            class_id       INTEGER NOT NULL REFERENCES classes(id) ON DELETE CASCADE,
            date           TEXT NOT NULL,
            status         TEXT NOT NULL {status_check},
            check_in_time  TEXT,
            check_out_time TEXT,
            remarks        TEXT,
            marked_by      INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL,
            UNIQUE(student_id, date)
        );
        CREATE INDEX idx_attendances_class_date ON attendances(class_id, date);
        CREATE INDEX idx_attendances_status ON attendances(status);
        "#,
        status_check = sql_check::<AttendanceStatus>("status"),
    ))
}

fn create_announcements(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE announcements (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            title           TEXT NOT NULL,
            content         TEXT NOT NULL,
            type            TEXT NOT NULL {type_check},
            target_audience TEXT NOT NULL {audience_check},
            target_class_id INTEGER REFERENCES classes(id) ON DELETE CASCADE,
            created_by      INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            is_published    INTEGER NOT NULL DEFAULT 0,
            publish_at      TEXT,
            expires_at      TEXT,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );
        CREATE INDEX idx_announcements_type ON announcements(type);
        CREATE INDEX idx_announcements_audience ON announcements(target_audience);
        CREATE INDEX idx_announcements_published ON announcements(is_published);
        CREATE INDEX idx_announcements_publish_at ON announcements(publish_at);
        "#,
        type_check = sql_check::<AnnouncementType>("type"),
        audience_check = sql_check::<TargetAudience>("target_audience"),
    ))
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions not yet applied to this database, in order.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    (m.up)(&tx).map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![date::fmt_datetime(&date::now()), m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Returns the number applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&conn).unwrap(), 0);
        assert!(pending_migrations(&conn).unwrap().is_empty());
    }

    #[test]
    fn roles_are_seeded_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM roles", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 4);
    }
}
