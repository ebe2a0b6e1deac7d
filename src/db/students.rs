use crate::db::db_utils::{
    UpdateBuilder, choice_col, date_col, datetime_col, map_write_err, paginate,
};
use crate::errors::AppResult;
use crate::models::Choice;
use crate::models::Page;
use crate::models::student::{NewStudent, Student, StudentChanges, StudentRow};
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_STUDENT: &str = "
    SELECT id, user_id, student_code, class_id, roll_number, admission_date,
           guardian_name, guardian_phone, guardian_email, emergency_contact,
           medical_info, fee_amount, fee_status, created_at
    FROM students";

const SELECT_ROW: &str = "
    SELECT s.id, s.student_code, u.name, u.email, s.class_id, c.name AS class_name,
           s.roll_number, s.admission_date, s.guardian_name, s.fee_amount,
           s.fee_status, s.created_at
    FROM students s
    JOIN users u ON u.id = s.user_id
    LEFT JOIN classes c ON c.id = s.class_id";

const ORDER_ROWS: &str = "s.created_at DESC, s.id DESC";

fn map_student(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        student_code: row.get("student_code")?,
        class_id: row.get("class_id")?,
        roll_number: row.get("roll_number")?,
        admission_date: date_col(row, "admission_date")?,
        guardian_name: row.get("guardian_name")?,
        guardian_phone: row.get("guardian_phone")?,
        guardian_email: row.get("guardian_email")?,
        emergency_contact: row.get("emergency_contact")?,
        medical_info: row.get("medical_info")?,
        fee_amount: row.get("fee_amount")?,
        fee_status: choice_col(row, "fee_status")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

pub fn map_student_row(row: &Row) -> rusqlite::Result<StudentRow> {
    Ok(StudentRow {
        id: row.get("id")?,
        student_code: row.get("student_code")?,
        name: row.get("name")?,
        email: row.get("email")?,
        class_id: row.get("class_id")?,
        class_name: row.get("class_name")?,
        roll_number: row.get("roll_number")?,
        admission_date: date_col(row, "admission_date")?,
        guardian_name: row.get("guardian_name")?,
        fee_amount: row.get("fee_amount")?,
        fee_status: choice_col(row, "fee_status")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

pub fn insert_student(conn: &Connection, s: &NewStudent, now: &NaiveDateTime) -> AppResult<i64> {
    let ts = date::fmt_datetime(now);

    conn.execute(
        "INSERT INTO students (
            user_id, student_code, class_id, roll_number, admission_date,
            guardian_name, guardian_phone, guardian_email, emergency_contact,
            medical_info, fee_amount, fee_status, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
        params![
            s.user_id,
            s.student_code,
            s.class_id,
            s.roll_number,
            date::fmt_date(&s.admission_date),
            s.guardian_name,
            s.guardian_phone,
            s.guardian_email,
            s.emergency_contact,
            s.medical_info,
            s.fee_amount,
            s.fee_status.to_db_str(),
            ts,
        ],
    )
    .map_err(map_write_err)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_student(conn: &Connection, id: i64) -> AppResult<Option<Student>> {
    let sql = format!("{SELECT_STUDENT} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_student).optional()?)
}

pub fn get_student_row(conn: &Connection, id: i64) -> AppResult<Option<StudentRow>> {
    let sql = format!("{SELECT_ROW} WHERE s.id = ?1");
    Ok(conn.query_row(&sql, [id], map_student_row).optional()?)
}

/// The student profile owned by a user, if that user is a student.
pub fn find_by_user_id(conn: &Connection, user_id: i64) -> AppResult<Option<Student>> {
    let sql = format!("{SELECT_STUDENT} WHERE user_id = ?1");
    Ok(conn.query_row(&sql, [user_id], map_student).optional()?)
}

pub fn find_by_code(conn: &Connection, code: &str) -> AppResult<Option<Student>> {
    let sql = format!("{SELECT_STUDENT} WHERE student_code = ?1");
    Ok(conn.query_row(&sql, [code], map_student).optional()?)
}

pub fn update_student(
    conn: &Connection,
    id: i64,
    changes: &StudentChanges,
    now: &NaiveDateTime,
) -> AppResult<bool> {
    let mut upd = UpdateBuilder::new();
    if let Some(class_id) = changes.class_id {
        upd.set("class_id", class_id);
    }
    upd.set_opt("roll_number", changes.roll_number.clone())
        .set_opt("guardian_name", changes.guardian_name.clone())
        .set_opt("guardian_phone", changes.guardian_phone.clone())
        .set_opt("guardian_email", changes.guardian_email.clone())
        .set_opt("fee_amount", changes.fee_amount)
        .set_opt(
            "fee_status",
            changes.fee_status.map(|s| s.to_db_str().to_string()),
        );

    upd.execute(conn, "students", id, &date::fmt_datetime(now))
}

/// Removes the student profile only; grades and attendance go with it.
pub fn delete_student(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn
        .execute("DELETE FROM students WHERE id = ?1", [id])
        .map_err(map_write_err)?;
    Ok(n > 0)
}

fn class_filter(class_id: Option<i64>) -> (String, Vec<Value>) {
    match class_id {
        Some(id) => (
            format!("{SELECT_ROW} WHERE s.class_id = ?1"),
            vec![Value::Integer(id)],
        ),
        None => (SELECT_ROW.to_string(), Vec::new()),
    }
}

/// Newest first, optionally restricted to one class.
pub fn list_page(
    conn: &Connection,
    class_id: Option<i64>,
    page: u32,
    per_page: u32,
) -> AppResult<Page<StudentRow>> {
    let (sql, params) = class_filter(class_id);
    paginate(conn, &sql, ORDER_ROWS, &params, page, per_page, map_student_row)
}

pub fn list_all(conn: &Connection, class_id: Option<i64>) -> AppResult<Vec<StudentRow>> {
    let (sql, params) = class_filter(class_id);
    let mut stmt = conn.prepare(&format!("{sql} ORDER BY {ORDER_ROWS}"))?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), map_student_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Roster of a class ordered by roll number, then name.
pub fn roster(conn: &Connection, class_id: i64) -> AppResult<Vec<StudentRow>> {
    let sql = format!("{SELECT_ROW} WHERE s.class_id = ?1 ORDER BY s.roll_number, u.name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([class_id], map_student_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
