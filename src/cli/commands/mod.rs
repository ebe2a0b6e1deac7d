//! One handler per top-level command, plus the helpers they share.

pub mod announce;
pub mod attendance;
pub mod backup;
pub mod class;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod export;
pub mod grade;
pub mod health;
pub mod init;
pub mod list;
pub mod log;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Choice;
use crate::utils::date::{parse_date_arg, parse_datetime_arg, today};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Open the configured database, applying pending migrations silently.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    DbPool::open_initialized(&cfg.db_path())
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))?;
    println!("{out}");
    Ok(())
}

pub(crate) fn parse_choice<T: Choice>(value: Option<&str>) -> AppResult<Option<T>> {
    value.map(T::parse).transpose()
}

pub(crate) fn date_or_today(value: Option<&str>) -> AppResult<NaiveDate> {
    value.map_or_else(|| Ok(today()), parse_date_arg)
}

pub(crate) fn parse_opt_date(value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    value.map(parse_date_arg).transpose()
}

pub(crate) fn parse_opt_datetime(value: Option<&str>) -> AppResult<Option<NaiveDateTime>> {
    value.map(parse_datetime_arg).transpose()
}
