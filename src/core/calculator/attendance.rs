use super::round2;
use crate::db::attendance::{counts_on, window_counts};
use crate::errors::AppResult;
use crate::models::Choice;
use crate::models::attendance::AttendanceStatus;
use crate::models::dashboard::AttendanceSummary;
use crate::utils::date::window_start;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Share of `present` rows, 0 when there are no rows at all.
pub fn attendance_percentage(present: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round2(present as f64 / total as f64 * 100.0)
}

/// Attendance percentage of a student over rows dated on or after
/// `today - window_days`.
pub fn compute_attendance_percentage(
    conn: &Connection,
    student_id: i64,
    today: NaiveDate,
    window_days: u32,
) -> AppResult<f64> {
    let (present, total) = window_counts(conn, student_id, window_start(today, window_days)?)?;
    Ok(attendance_percentage(present, total))
}

/// Per-status counts of `today`'s rows. With `zero_fill`, every known
/// status appears (with 0 when unused); otherwise only statuses seen today.
pub fn today_summary(
    conn: &Connection,
    today: NaiveDate,
    zero_fill: bool,
) -> AppResult<AttendanceSummary> {
    let mut summary = AttendanceSummary::new();
    if zero_fill {
        for status in AttendanceStatus::ALL {
            summary.insert(*status, 0);
        }
    }
    for (status, n) in counts_on(conn, today)? {
        summary.insert(status, n);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::errors::AppError;

    #[test]
    fn no_rows_is_zero_not_nan() {
        assert_eq!(attendance_percentage(0, 0), 0.0);
    }

    #[test]
    fn eighteen_of_twenty_is_ninety() {
        assert_eq!(attendance_percentage(18, 20), 90.0);
    }

    #[test]
    fn partial_attendance_is_rounded() {
        assert_eq!(attendance_percentage(2, 3), 66.67);
        assert_eq!(attendance_percentage(3, 3), 100.0);
    }

    #[test]
    fn oversized_window_is_a_validation_error() {
        let pool = DbPool::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        let err = compute_attendance_percentage(&pool.conn, 1, today, u32::MAX).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{err:?}");
    }

    #[test]
    fn empty_day_summary_depends_on_zero_fill() {
        let pool = DbPool::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();

        assert!(today_summary(&pool.conn, today, false).unwrap().is_empty());

        let filled = today_summary(&pool.conn, today, true).unwrap();
        assert_eq!(filled.len(), AttendanceStatus::ALL.len());
        assert!(filled.values().all(|n| *n == 0));
    }
}
