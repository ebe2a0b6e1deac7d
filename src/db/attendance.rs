use crate::db::db_utils::{
    UpdateBuilder, choice_col, date_col, datetime_col, map_write_err, opt_time_col, paginate,
};
use crate::errors::AppResult;
use crate::models::attendance::{
    Attendance, AttendanceChanges, AttendanceRow, AttendanceStatus, NewAttendance,
};
use crate::models::{Choice, Page};
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

const SELECT_ATTENDANCE: &str = "
    SELECT id, student_id, class_id, date, status, check_in_time, check_out_time,
           remarks, marked_by, created_at
    FROM attendances";

const SELECT_ROW: &str = "
    SELECT a.id, a.student_id, s.student_code, su.name AS student_name,
           a.class_id, c.name AS class_name, a.date, a.status,
           a.check_in_time, a.check_out_time, a.remarks,
           a.marked_by, mu.name AS marked_by_name, a.created_at
    FROM attendances a
    JOIN students s ON s.id = a.student_id
    JOIN users su   ON su.id = s.user_id
    JOIN classes c  ON c.id = a.class_id
    JOIN users mu   ON mu.id = a.marked_by";

const ORDER_ROWS: &str = "a.created_at DESC, a.id DESC";

fn map_attendance(row: &Row) -> rusqlite::Result<Attendance> {
    Ok(Attendance {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        class_id: row.get("class_id")?,
        date: date_col(row, "date")?,
        status: choice_col(row, "status")?,
        check_in_time: opt_time_col(row, "check_in_time")?,
        check_out_time: opt_time_col(row, "check_out_time")?,
        remarks: row.get("remarks")?,
        marked_by: row.get("marked_by")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

fn map_attendance_row(row: &Row) -> rusqlite::Result<AttendanceRow> {
    Ok(AttendanceRow {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        student_code: row.get("student_code")?,
        student_name: row.get("student_name")?,
        class_id: row.get("class_id")?,
        class_name: row.get("class_name")?,
        date: date_col(row, "date")?,
        status: choice_col(row, "status")?,
        check_in_time: opt_time_col(row, "check_in_time")?,
        check_out_time: opt_time_col(row, "check_out_time")?,
        remarks: row.get("remarks")?,
        marked_by: row.get("marked_by")?,
        marked_by_name: row.get("marked_by_name")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

/// `class_id` must already be resolved by the caller.
pub fn insert_attendance(
    conn: &Connection,
    a: &NewAttendance,
    class_id: i64,
    now: &NaiveDateTime,
) -> AppResult<i64> {
    let ts = date::fmt_datetime(now);

    conn.execute(
        "INSERT INTO attendances (
            student_id, class_id, date, status, check_in_time, check_out_time,
            remarks, marked_by, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            a.student_id,
            class_id,
            date::fmt_date(&a.date),
            a.status.to_db_str(),
            a.check_in_time.as_ref().map(time::fmt_time),
            a.check_out_time.as_ref().map(time::fmt_time),
            a.remarks,
            a.marked_by,
            ts,
        ],
    )
    .map_err(map_write_err)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_attendance(conn: &Connection, id: i64) -> AppResult<Option<Attendance>> {
    let sql = format!("{SELECT_ATTENDANCE} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_attendance).optional()?)
}

pub fn update_attendance(
    conn: &Connection,
    id: i64,
    changes: &AttendanceChanges,
    now: &NaiveDateTime,
) -> AppResult<bool> {
    let mut upd = UpdateBuilder::new();
    upd.set_opt("status", changes.status.map(|s| s.to_db_str().to_string()))
        .set_opt("check_in_time", changes.check_in_time.as_ref().map(time::fmt_time))
        .set_opt("check_out_time", changes.check_out_time.as_ref().map(time::fmt_time))
        .set_opt("remarks", changes.remarks.clone());

    upd.execute(conn, "attendances", id, &date::fmt_datetime(now))
}

pub fn delete_attendance(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn
        .execute("DELETE FROM attendances WHERE id = ?1", [id])
        .map_err(map_write_err)?;
    Ok(n > 0)
}

fn filtered(on: Option<NaiveDate>, class_id: Option<i64>) -> (String, Vec<Value>) {
    let mut clauses = Vec::new();
    let mut params = Vec::new();

    if let Some(d) = on {
        params.push(Value::Text(date::fmt_date(&d)));
        clauses.push(format!("a.date = ?{}", params.len()));
    }
    if let Some(c) = class_id {
        params.push(Value::Integer(c));
        clauses.push(format!("a.class_id = ?{}", params.len()));
    }

    if clauses.is_empty() {
        (SELECT_ROW.to_string(), params)
    } else {
        (
            format!("{SELECT_ROW} WHERE {}", clauses.join(" AND ")),
            params,
        )
    }
}

pub fn list_page(
    conn: &Connection,
    on: Option<NaiveDate>,
    class_id: Option<i64>,
    page: u32,
    per_page: u32,
) -> AppResult<Page<AttendanceRow>> {
    let (sql, params) = filtered(on, class_id);
    paginate(conn, &sql, ORDER_ROWS, &params, page, per_page, map_attendance_row)
}

pub fn list_all(
    conn: &Connection,
    on: Option<NaiveDate>,
    class_id: Option<i64>,
) -> AppResult<Vec<AttendanceRow>> {
    let (sql, params) = filtered(on, class_id);
    let mut stmt = conn.prepare(&format!("{sql} ORDER BY {ORDER_ROWS}"))?;
    let rows = stmt.query_map(params_from_iter(params.iter()), map_attendance_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// `(present, total)` rows of a student dated on or after `from`.
pub fn window_counts(conn: &Connection, student_id: i64, from: NaiveDate) -> AppResult<(i64, i64)> {
    let counts = conn.query_row(
        "SELECT COALESCE(SUM(CASE WHEN status = ?3 THEN 1 ELSE 0 END), 0), COUNT(*)
         FROM attendances
         WHERE student_id = ?1 AND date >= ?2",
        params![
            student_id,
            date::fmt_date(&from),
            AttendanceStatus::Present.to_db_str()
        ],
        |r| Ok((r.get::<_, i64>(0)?, r.get::<_, i64>(1)?)),
    )?;
    Ok(counts)
}

/// Per-status counts for one calendar day. Statuses with no rows are absent.
pub fn counts_on(conn: &Connection, day: NaiveDate) -> AppResult<Vec<(AttendanceStatus, i64)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT status, COUNT(*) AS n
         FROM attendances
         WHERE date = ?1
         GROUP BY status",
    )?;
    let rows = stmt.query_map([date::fmt_date(&day)], |row| {
        Ok((choice_col::<AttendanceStatus>(row, "status")?, row.get("n")?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
