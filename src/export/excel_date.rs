// src/export/excel_date.rs

use crate::export::model::Cell;
use chrono::{Datelike, NaiveDate, Timelike};

/// `num_days_from_ce` of 1899-12-30, day zero of Excel's 1900 date system.
const EXCEL_EPOCH_CE_DAYS: i32 = 693_594;

/// Excel number format and serial value for date/time cells.
pub(crate) fn excel_date(cell: &Cell) -> Option<(&'static str, f64)> {
    match cell {
        Cell::DateTime(dt) => Some((
            "yyyy-mm-dd hh:mm",
            day_serial(&dt.date()) + day_fraction(dt.num_seconds_from_midnight()),
        )),
        Cell::Date(d) => Some(("yyyy-mm-dd", day_serial(d))),
        Cell::Time(t) => Some(("hh:mm", day_fraction(t.num_seconds_from_midnight()))),
        _ => None,
    }
}

fn day_serial(d: &NaiveDate) -> f64 {
    f64::from(d.num_days_from_ce() - EXCEL_EPOCH_CE_DAYS)
}

fn day_fraction(secs: u32) -> f64 {
    f64::from(secs) / 86400.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn known_serials() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(excel_date(&Cell::Date(d)), Some(("yyyy-mm-dd", 45292.0)));

        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(excel_date(&Cell::Time(noon)), Some(("hh:mm", 0.5)));
        assert_eq!(
            excel_date(&Cell::DateTime(d.and_time(noon))),
            Some(("yyyy-mm-dd hh:mm", 45292.5))
        );

        assert_eq!(excel_date(&Cell::text("2024-01-01")), None);
    }
}
