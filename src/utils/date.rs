//! Date helpers. Dates are stored as `YYYY-MM-DD`, timestamps as
//! `YYYY-MM-DDTHH:MM:SS` (local time), so string order equals time order.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let n = Local::now().naive_local();
    NaiveDateTime::parse_from_str(&n.format(DATETIME_FMT).to_string(), DATETIME_FMT).unwrap_or(n)
}

pub fn fmt_date(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub fn fmt_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

/// Parse a CLI date, `today` accepted.
pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    if s.trim().eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Parse a CLI timestamp: `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM[:SS]`,
/// or a bare date (midnight).
pub fn parse_datetime_arg(s: &str) -> AppResult<NaiveDateTime> {
    let t = s.trim();
    let formats = [
        DATETIME_FMT,
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Ok(dt);
        }
    }
    parse_date(t)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::InvalidDateTime(s.to_string()))
}

/// First day included in a trailing window of `days` ending `today`.
/// Fails when the window reaches before the earliest representable date.
pub fn window_start(today: NaiveDate, days: u32) -> AppResult<NaiveDate> {
    Duration::try_days(i64::from(days))
        .and_then(|span| today.checked_sub_signed(span))
        .ok_or_else(|| AppError::validation(format!("attendance window of {days} days is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_start_goes_back_the_given_days() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            window_start(d, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn oversized_window_is_rejected() {
        let d = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        assert!(matches!(
            window_start(d, u32::MAX),
            Err(AppError::Validation(_))
        ));
        assert!(window_start(d, 3650).is_ok());
    }

    #[test]
    fn datetime_arg_accepts_space_and_t_separators() {
        let a = parse_datetime_arg("2024-05-01 08:30").unwrap();
        let b = parse_datetime_arg("2024-05-01T08:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(fmt_datetime(&a), "2024-05-01T08:30:00");
    }

    #[test]
    fn bare_date_is_midnight() {
        let dt = parse_datetime_arg("2024-05-01").unwrap();
        assert_eq!(fmt_datetime(&dt), "2024-05-01T00:00:00");
        assert!(parse_datetime_arg("01/05/2024").is_err());
    }
}
