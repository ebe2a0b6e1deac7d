//! Row decoding and error mapping shared by the per-table query modules.

use crate::errors::{AppError, AppResult};
use crate::models::page::{Page, offset};
use crate::models::Choice;
use crate::utils::date::{DATE_FMT, DATETIME_FMT};
use crate::utils::time::parse_time;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params_from_iter};

fn conversion_err(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

fn decode_date(s: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&s, DATE_FMT).map_err(|_| conversion_err(AppError::InvalidDate(s)))
}

fn decode_datetime(s: String) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&s, DATETIME_FMT)
        .map_err(|_| conversion_err(AppError::InvalidDateTime(s)))
}

pub fn date_col(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    decode_date(row.get(col)?)
}

pub fn opt_date_col(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDate>> {
    row.get::<_, Option<String>>(col)?.map(decode_date).transpose()
}

pub fn datetime_col(row: &Row, col: &str) -> rusqlite::Result<NaiveDateTime> {
    decode_datetime(row.get(col)?)
}

pub fn opt_datetime_col(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDateTime>> {
    row.get::<_, Option<String>>(col)?
        .map(decode_datetime)
        .transpose()
}

pub fn opt_time_col(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveTime>> {
    row.get::<_, Option<String>>(col)?
        .map(|s| parse_time(&s).ok_or_else(|| conversion_err(AppError::InvalidTime(s))))
        .transpose()
}

pub fn choice_col<T: Choice>(row: &Row, col: &str) -> rusqlite::Result<T> {
    let raw: String = row.get(col)?;
    T::from_db_str(&raw).ok_or_else(|| {
        conversion_err(AppError::validation(format!(
            "invalid {} '{}' stored in {}",
            T::FIELD,
            raw,
            col
        )))
    })
}

/// Turn SQLite constraint failures into validation errors the user can act on.
pub fn map_write_err(e: rusqlite::Error) -> AppError {
    if let rusqlite::Error::SqliteFailure(err, msg) = &e
        && err.code == ErrorCode::ConstraintViolation
    {
        let detail = msg.clone().unwrap_or_default();
        if let Some(cols) = detail.strip_prefix("UNIQUE constraint failed: ") {
            return AppError::validation(format!("a record with the same {cols} already exists"));
        }
        if detail.starts_with("FOREIGN KEY constraint failed") {
            return AppError::validation("a referenced record does not exist");
        }
        if let Some(check) = detail.strip_prefix("CHECK constraint failed: ") {
            return AppError::validation(format!("value out of range ({check})"));
        }
        if let Some(col) = detail.strip_prefix("NOT NULL constraint failed: ") {
            return AppError::validation(format!("{col} is required"));
        }
        return AppError::validation(detail);
    }
    AppError::Db(e)
}

/// `true` when `table` holds a row with the given id.
/// `table` is always a literal from this crate, never user input.
pub fn exists(conn: &Connection, table: &str, id: i64) -> rusqlite::Result<bool> {
    let sql = format!("SELECT 1 FROM {table} WHERE id = ?1");
    conn.query_row(&sql, [id], |_| Ok(()))
        .optional()
        .map(|v| v.is_some())
}

pub fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    conn.query_row(&sql, [], |row| row.get(0))
}

/// Run `select` (which must not contain ORDER BY/LIMIT) for one page,
/// together with the total row count of the same filtered query.
pub fn paginate<T, F>(
    conn: &Connection,
    select: &str,
    order_by: &str,
    params: &[Value],
    page: u32,
    per_page: u32,
    map: F,
) -> AppResult<Page<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM ({select})"),
        params_from_iter(params.iter()),
        |row| row.get(0),
    )?;

    let mut values = params.to_vec();
    values.push(Value::Integer(i64::from(per_page)));
    values.push(Value::Integer(offset(page, per_page)));

    let sql = format!(
        "{select} ORDER BY {order_by} LIMIT ?{} OFFSET ?{}",
        params.len() + 1,
        params.len() + 2
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map)?;

    let mut data = Vec::new();
    for r in rows {
        data.push(r?);
    }

    Ok(Page::new(data, page, per_page, total))
}

/// Collects `SET col = ?` fragments for partial updates.
#[derive(Default)]
pub struct UpdateBuilder {
    sets: Vec<String>,
    values: Vec<Value>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<Value>>(&mut self, column: &str, value: V) -> &mut Self {
        self.values.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.values.len()));
        self
    }

    pub fn set_opt<V: Into<Value>>(&mut self, column: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.set(column, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Apply to the row `id` of `table`, stamping `updated_at`.
    /// Returns `false` when no row matched.
    pub fn execute(mut self, conn: &Connection, table: &str, id: i64, now: &str) -> AppResult<bool> {
        self.set("updated_at", now.to_string());
        self.values.push(Value::Integer(id));
        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{}",
            self.sets.join(", "),
            self.values.len()
        );
        let n = conn
            .execute(&sql, params_from_iter(self.values.iter()))
            .map_err(map_write_err)?;
        Ok(n > 0)
    }
}
