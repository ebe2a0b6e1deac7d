use crate::db::db_utils::{choice_col, datetime_col, map_write_err, paginate};
use crate::errors::AppResult;
use crate::models::Page;
use crate::models::subject::{NewSubject, Subject};
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_SUBJECT: &str = "
    SELECT id, name, code, description, total_marks, pass_marks, category,
           status, created_at
    FROM subjects";

const ORDER_ROWS: &str = "created_at DESC, id DESC";

fn map_subject(row: &Row) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get("id")?,
        name: row.get("name")?,
        code: row.get("code")?,
        description: row.get("description")?,
        total_marks: row.get("total_marks")?,
        pass_marks: row.get("pass_marks")?,
        category: row.get("category")?,
        status: choice_col(row, "status")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

pub fn insert_subject(conn: &Connection, s: &NewSubject, now: &NaiveDateTime) -> AppResult<i64> {
    let ts = date::fmt_datetime(now);

    conn.execute(
        "INSERT INTO subjects (
            name, code, description, total_marks, pass_marks, category,
            created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            s.name,
            s.code,
            s.description,
            s.total_marks,
            s.pass_marks,
            s.category,
            ts,
        ],
    )
    .map_err(map_write_err)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_subject(conn: &Connection, id: i64) -> AppResult<Option<Subject>> {
    let sql = format!("{SELECT_SUBJECT} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_subject).optional()?)
}

pub fn find_by_code(conn: &Connection, code: &str) -> AppResult<Option<Subject>> {
    let sql = format!("{SELECT_SUBJECT} WHERE code = ?1");
    Ok(conn.query_row(&sql, [code], map_subject).optional()?)
}

/// Grades recorded for the subject are cascaded.
pub fn delete_subject(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn
        .execute("DELETE FROM subjects WHERE id = ?1", [id])
        .map_err(map_write_err)?;
    Ok(n > 0)
}

pub fn list_page(conn: &Connection, page: u32, per_page: u32) -> AppResult<Page<Subject>> {
    paginate(conn, SELECT_SUBJECT, ORDER_ROWS, &[], page, per_page, map_subject)
}

pub fn list_all(conn: &Connection) -> AppResult<Vec<Subject>> {
    let mut stmt = conn.prepare(&format!("{SELECT_SUBJECT} ORDER BY {ORDER_ROWS}"))?;
    let rows = stmt.query_map([], map_subject)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
