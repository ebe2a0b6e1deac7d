//! Time utilities: parsing HH:MM check-in/check-out times.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub const TIME_FMT: &str = "%H:%M";

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), TIME_FMT)
        .or_else(|_| NaiveTime::parse_from_str(t.trim(), "%H:%M:%S"))
        .ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

pub fn fmt_time(t: &NaiveTime) -> String {
    t.format(TIME_FMT).to_string()
}
