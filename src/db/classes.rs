use crate::db::db_utils::{UpdateBuilder, choice_col, datetime_col, map_write_err, paginate};
use crate::errors::AppResult;
use crate::models::school_class::{ClassChanges, ClassRow, NewClass, SchoolClass};
use crate::models::{Choice, Page};
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_CLASS: &str = "
    SELECT id, name, grade_level, section, class_teacher_id, capacity,
           room_number, description, status, created_at
    FROM classes";

const SELECT_ROW: &str = "
    SELECT c.id, c.name, c.grade_level, c.section, c.class_teacher_id,
           u.name AS class_teacher_name, c.capacity, c.room_number, c.status,
           (SELECT COUNT(*) FROM students s WHERE s.class_id = c.id) AS student_count,
           c.created_at
    FROM classes c
    LEFT JOIN users u ON u.id = c.class_teacher_id";

const ORDER_ROWS: &str = "c.created_at DESC, c.id DESC";

pub fn map_class(row: &Row) -> rusqlite::Result<SchoolClass> {
    Ok(SchoolClass {
        id: row.get("id")?,
        name: row.get("name")?,
        grade_level: row.get("grade_level")?,
        section: row.get("section")?,
        class_teacher_id: row.get("class_teacher_id")?,
        capacity: row.get("capacity")?,
        room_number: row.get("room_number")?,
        description: row.get("description")?,
        status: choice_col(row, "status")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

fn map_class_row(row: &Row) -> rusqlite::Result<ClassRow> {
    Ok(ClassRow {
        id: row.get("id")?,
        name: row.get("name")?,
        grade_level: row.get("grade_level")?,
        section: row.get("section")?,
        class_teacher_id: row.get("class_teacher_id")?,
        class_teacher_name: row.get("class_teacher_name")?,
        capacity: row.get("capacity")?,
        room_number: row.get("room_number")?,
        status: choice_col(row, "status")?,
        student_count: row.get("student_count")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

pub fn insert_class(conn: &Connection, c: &NewClass, now: &NaiveDateTime) -> AppResult<i64> {
    let ts = date::fmt_datetime(now);

    conn.execute(
        "INSERT INTO classes (
            name, grade_level, section, class_teacher_id, capacity,
            room_number, description, status, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            c.name,
            c.grade_level,
            c.section,
            c.class_teacher_id,
            c.capacity,
            c.room_number,
            c.description,
            c.status.to_db_str(),
            ts,
        ],
    )
    .map_err(map_write_err)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_class(conn: &Connection, id: i64) -> AppResult<Option<SchoolClass>> {
    let sql = format!("{SELECT_CLASS} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_class).optional()?)
}

pub fn find_by_name(conn: &Connection, name: &str) -> AppResult<Option<SchoolClass>> {
    let sql = format!("{SELECT_CLASS} WHERE name = ?1 ORDER BY id LIMIT 1");
    Ok(conn.query_row(&sql, [name], map_class).optional()?)
}

/// Classes whose class teacher is the given user.
pub fn led_by(conn: &Connection, user_id: i64) -> AppResult<Vec<SchoolClass>> {
    let sql = format!("{SELECT_CLASS} WHERE class_teacher_id = ?1 ORDER BY name, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([user_id], map_class)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_class(
    conn: &Connection,
    id: i64,
    changes: &ClassChanges,
    now: &NaiveDateTime,
) -> AppResult<bool> {
    let mut upd = UpdateBuilder::new();
    upd.set_opt("name", changes.name.clone());
    if let Some(teacher) = changes.class_teacher_id {
        upd.set("class_teacher_id", teacher);
    }
    upd.set_opt("capacity", changes.capacity)
        .set_opt("room_number", changes.room_number.clone())
        .set_opt("status", changes.status.map(|s| s.to_db_str().to_string()));

    upd.execute(conn, "classes", id, &date::fmt_datetime(now))
}

/// Students are detached (class_id set to NULL); attendance rows and
/// class-targeted announcements are removed.
pub fn delete_class(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn
        .execute("DELETE FROM classes WHERE id = ?1", [id])
        .map_err(map_write_err)?;
    Ok(n > 0)
}

pub fn list_page(conn: &Connection, page: u32, per_page: u32) -> AppResult<Page<ClassRow>> {
    paginate(conn, SELECT_ROW, ORDER_ROWS, &[], page, per_page, map_class_row)
}

pub fn list_all(conn: &Connection) -> AppResult<Vec<ClassRow>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ROW} ORDER BY {ORDER_ROWS}"))?;
    let rows = stmt.query_map([], map_class_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
