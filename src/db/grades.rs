use crate::core::calculator::grade::grade_percentage;
use crate::db::db_utils::{date_col, datetime_col, map_write_err, paginate};
use crate::errors::AppResult;
use crate::models::Page;
use crate::models::grade::{Grade, GradeRow, NewGrade};
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

const SELECT_GRADE: &str = "
    SELECT id, student_id, subject_id, teacher_id, exam_type, marks_obtained,
           total_marks, grade_letter, gpa, remarks, exam_date, created_at
    FROM grades";

const SELECT_ROW: &str = "
    SELECT g.id, g.student_id, s.student_code, su.name AS student_name,
           g.subject_id, sb.name AS subject_name,
           g.teacher_id, tu.name AS teacher_name,
           g.exam_type, g.marks_obtained, g.total_marks, g.grade_letter,
           g.exam_date, g.created_at
    FROM grades g
    JOIN students s  ON s.id = g.student_id
    JOIN users su    ON su.id = s.user_id
    JOIN subjects sb ON sb.id = g.subject_id
    JOIN teachers t  ON t.id = g.teacher_id
    JOIN users tu    ON tu.id = t.user_id";

const ORDER_ROWS: &str = "g.created_at DESC, g.id DESC";

fn map_grade(row: &Row) -> rusqlite::Result<Grade> {
    Ok(Grade {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        subject_id: row.get("subject_id")?,
        teacher_id: row.get("teacher_id")?,
        exam_type: row.get("exam_type")?,
        marks_obtained: row.get("marks_obtained")?,
        total_marks: row.get("total_marks")?,
        grade_letter: row.get("grade_letter")?,
        gpa: row.get("gpa")?,
        remarks: row.get("remarks")?,
        exam_date: date_col(row, "exam_date")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

fn map_grade_row(row: &Row) -> rusqlite::Result<GradeRow> {
    let marks_obtained: f64 = row.get("marks_obtained")?;
    let total_marks: f64 = row.get("total_marks")?;

    Ok(GradeRow {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        student_code: row.get("student_code")?,
        student_name: row.get("student_name")?,
        subject_id: row.get("subject_id")?,
        subject_name: row.get("subject_name")?,
        teacher_id: row.get("teacher_id")?,
        teacher_name: row.get("teacher_name")?,
        exam_type: row.get("exam_type")?,
        marks_obtained,
        total_marks,
        percentage: grade_percentage(marks_obtained, total_marks),
        grade_letter: row.get("grade_letter")?,
        exam_date: date_col(row, "exam_date")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

pub fn insert_grade(conn: &Connection, g: &NewGrade, now: &NaiveDateTime) -> AppResult<i64> {
    let ts = date::fmt_datetime(now);

    conn.execute(
        "INSERT INTO grades (
            student_id, subject_id, teacher_id, exam_type, marks_obtained,
            total_marks, grade_letter, gpa, remarks, exam_date, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
        params![
            g.student_id,
            g.subject_id,
            g.teacher_id,
            g.exam_type,
            g.marks_obtained,
            g.total_marks,
            g.grade_letter,
            g.gpa,
            g.remarks,
            date::fmt_date(&g.exam_date),
            ts,
        ],
    )
    .map_err(map_write_err)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_grade(conn: &Connection, id: i64) -> AppResult<Option<Grade>> {
    let sql = format!("{SELECT_GRADE} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_grade).optional()?)
}

pub fn delete_grade(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn
        .execute("DELETE FROM grades WHERE id = ?1", [id])
        .map_err(map_write_err)?;
    Ok(n > 0)
}

fn student_filter(student_id: Option<i64>) -> (String, Vec<Value>) {
    match student_id {
        Some(id) => (
            format!("{SELECT_ROW} WHERE g.student_id = ?1"),
            vec![Value::Integer(id)],
        ),
        None => (SELECT_ROW.to_string(), Vec::new()),
    }
}

pub fn list_page(
    conn: &Connection,
    student_id: Option<i64>,
    page: u32,
    per_page: u32,
) -> AppResult<Page<GradeRow>> {
    let (sql, params) = student_filter(student_id);
    paginate(conn, &sql, ORDER_ROWS, &params, page, per_page, map_grade_row)
}

pub fn list_all(conn: &Connection, student_id: Option<i64>) -> AppResult<Vec<GradeRow>> {
    let (sql, params) = student_filter(student_id);
    collect(conn, &format!("{sql} ORDER BY {ORDER_ROWS}"), &params)
}

/// Newest grades of one student.
pub fn recent_for_student(conn: &Connection, student_id: i64, limit: u32) -> AppResult<Vec<GradeRow>> {
    let sql = format!("{SELECT_ROW} WHERE g.student_id = ?1 ORDER BY {ORDER_ROWS} LIMIT ?2");
    collect(
        conn,
        &sql,
        &[Value::Integer(student_id), Value::Integer(i64::from(limit))],
    )
}

/// Newest grades recorded by one teacher.
pub fn recent_by_teacher(conn: &Connection, teacher_id: i64, limit: u32) -> AppResult<Vec<GradeRow>> {
    let sql = format!("{SELECT_ROW} WHERE g.teacher_id = ?1 ORDER BY {ORDER_ROWS} LIMIT ?2");
    collect(
        conn,
        &sql,
        &[Value::Integer(teacher_id), Value::Integer(i64::from(limit))],
    )
}

fn collect(conn: &Connection, sql: &str, params: &[Value]) -> AppResult<Vec<GradeRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), map_grade_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
