use crate::db::db_utils::{date_col, datetime_col, map_write_err, paginate};
use crate::errors::AppResult;
use crate::models::Page;
use crate::models::teacher::{NewTeacher, Teacher, TeacherRow};
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_TEACHER: &str = "
    SELECT id, user_id, employee_id, qualification, department, joining_date,
           salary, specialization, experience_years, created_at
    FROM teachers";

const SELECT_ROW: &str = "
    SELECT t.id, t.user_id, t.employee_id, u.name AS name, u.email AS email,
           t.qualification, t.department, t.joining_date, t.experience_years,
           t.created_at
    FROM teachers t
    JOIN users u ON u.id = t.user_id";

const ORDER_ROWS: &str = "t.created_at DESC, t.id DESC";

fn map_teacher(row: &Row) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        employee_id: row.get("employee_id")?,
        qualification: row.get("qualification")?,
        department: row.get("department")?,
        joining_date: date_col(row, "joining_date")?,
        salary: row.get("salary")?,
        specialization: row.get("specialization")?,
        experience_years: row.get("experience_years")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

fn map_teacher_row(row: &Row) -> rusqlite::Result<TeacherRow> {
    Ok(TeacherRow {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        employee_id: row.get("employee_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        qualification: row.get("qualification")?,
        department: row.get("department")?,
        joining_date: date_col(row, "joining_date")?,
        experience_years: row.get("experience_years")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

pub fn insert_teacher(conn: &Connection, t: &NewTeacher, now: &NaiveDateTime) -> AppResult<i64> {
    let ts = date::fmt_datetime(now);

    conn.execute(
        "INSERT INTO teachers (
            user_id, employee_id, qualification, department, joining_date,
            salary, specialization, experience_years, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            t.user_id,
            t.employee_id,
            t.qualification,
            t.department,
            date::fmt_date(&t.joining_date),
            t.salary,
            t.specialization,
            t.experience_years,
            ts,
        ],
    )
    .map_err(map_write_err)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_teacher(conn: &Connection, id: i64) -> AppResult<Option<Teacher>> {
    let sql = format!("{SELECT_TEACHER} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_teacher).optional()?)
}

pub fn find_by_user_id(conn: &Connection, user_id: i64) -> AppResult<Option<Teacher>> {
    let sql = format!("{SELECT_TEACHER} WHERE user_id = ?1");
    Ok(conn.query_row(&sql, [user_id], map_teacher).optional()?)
}

/// Removes the teacher profile; grades it recorded are cascaded.
pub fn delete_teacher(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn
        .execute("DELETE FROM teachers WHERE id = ?1", [id])
        .map_err(map_write_err)?;
    Ok(n > 0)
}

pub fn list_page(conn: &Connection, page: u32, per_page: u32) -> AppResult<Page<TeacherRow>> {
    paginate(conn, SELECT_ROW, ORDER_ROWS, &[], page, per_page, map_teacher_row)
}

pub fn list_all(conn: &Connection) -> AppResult<Vec<TeacherRow>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ROW} ORDER BY {ORDER_ROWS}"))?;
    let rows = stmt.query_map([], map_teacher_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
