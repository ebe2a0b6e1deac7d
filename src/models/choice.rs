//! Shared behaviour for the enumerated columns (status, type, audience...).

use crate::errors::{AppError, AppResult};

/// An enumerated column stored as a lowercase string in SQLite.
pub trait Choice: Sized + Copy + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Human name of the field, used in validation messages.
    const FIELD: &'static str;

    /// Convert enum → DB string
    fn to_db_str(&self) -> &'static str;

    /// Convert DB string → enum
    fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.to_db_str() == s)
    }

    /// Parse user input (case-insensitive, `-` accepted for `_`).
    fn parse(input: &str) -> AppResult<Self> {
        let norm = input.trim().to_lowercase().replace('-', "_");
        Self::from_db_str(&norm).ok_or_else(|| {
            AppError::validation(format!(
                "invalid {} '{}' (allowed: {})",
                Self::FIELD,
                input,
                Self::allowed()
            ))
        })
    }

    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|v| v.to_db_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// SQL `CHECK(col IN (...))` fragment for a choice column.
pub fn sql_check<T: Choice>(column: &str) -> String {
    let values = T::ALL
        .iter()
        .map(|v| format!("'{}'", v.to_db_str()))
        .collect::<Vec<_>>()
        .join(",");
    format!("CHECK({column} IN ({values}))")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;
    use crate::models::student::FeeStatus;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(FeeStatus::parse("PAID").unwrap(), FeeStatus::Paid);
        assert_eq!(
            AttendanceStatus::parse(" Late ").unwrap(),
            AttendanceStatus::Late
        );
    }

    #[test]
    fn parse_rejects_unknown_values_listing_allowed_ones() {
        let err = FeeStatus::parse("waived").unwrap_err().to_string();
        assert!(err.contains("paid, pending, overdue"), "{err}");
    }

    #[test]
    fn sql_check_lists_every_variant() {
        assert_eq!(
            sql_check::<FeeStatus>("fee_status"),
            "CHECK(fee_status IN ('paid','pending','overdue'))"
        );
    }
}
