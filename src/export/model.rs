// src/export/model.rs

use crate::models::Choice;
use crate::models::announcement::AnnouncementRow;
use crate::models::attendance::AttendanceRow;
use crate::models::grade::GradeRow;
use crate::models::school_class::ClassRow;
use crate::models::student::StudentRow;
use crate::models::subject::Subject;
use crate::models::teacher::TeacherRow;
use crate::utils::date::{fmt_date, fmt_datetime};
use crate::utils::time::fmt_time;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

/// One typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl Cell {
    pub fn text<S: Into<String>>(s: S) -> Self {
        Cell::Text(s.into())
    }

    pub fn opt_text(s: Option<&str>) -> Self {
        s.map_or(Cell::Empty, Cell::text)
    }

    pub fn opt_datetime(v: Option<NaiveDateTime>) -> Self {
        v.map_or(Cell::Empty, Cell::DateTime)
    }

    pub fn opt_time(v: Option<NaiveTime>) -> Self {
        v.map_or(Cell::Empty, Cell::Time)
    }

    pub fn choice<T: Choice>(v: T) -> Self {
        Cell::text(v.to_db_str())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v:.2}"),
            Cell::Date(d) => f.write_str(&fmt_date(d)),
            Cell::DateTime(dt) => f.write_str(&fmt_datetime(dt)),
            Cell::Time(t) => f.write_str(&fmt_time(t)),
        }
    }
}

/// A listing row that can be laid out as a flat table.
pub trait Tabular: Serialize {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

impl Tabular for StudentRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "student_code",
        "name",
        "email",
        "class",
        "roll_number",
        "admission_date",
        "guardian",
        "fee_amount",
        "fee_status",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::text(&self.student_code),
            Cell::text(&self.name),
            Cell::text(&self.email),
            Cell::opt_text(self.class_name.as_deref()),
            Cell::opt_text(self.roll_number.as_deref()),
            Cell::Date(self.admission_date),
            Cell::opt_text(self.guardian_name.as_deref()),
            Cell::Float(self.fee_amount),
            Cell::choice(self.fee_status),
        ]
    }
}

impl Tabular for TeacherRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "employee_id",
        "name",
        "email",
        "qualification",
        "department",
        "joining_date",
        "experience_years",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::text(&self.employee_id),
            Cell::text(&self.name),
            Cell::text(&self.email),
            Cell::text(&self.qualification),
            Cell::opt_text(self.department.as_deref()),
            Cell::Date(self.joining_date),
            Cell::Int(self.experience_years),
        ]
    }
}

impl Tabular for ClassRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "grade_level",
        "section",
        "class_teacher",
        "students",
        "capacity",
        "room",
        "status",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::text(&self.name),
            Cell::text(&self.grade_level),
            Cell::opt_text(self.section.as_deref()),
            Cell::opt_text(self.class_teacher_name.as_deref()),
            Cell::Int(self.student_count),
            Cell::Int(self.capacity),
            Cell::opt_text(self.room_number.as_deref()),
            Cell::choice(self.status),
        ]
    }
}

impl Tabular for Subject {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "code",
        "name",
        "category",
        "total_marks",
        "pass_marks",
        "status",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::text(&self.code),
            Cell::text(&self.name),
            Cell::opt_text(self.category.as_deref()),
            Cell::Int(self.total_marks),
            Cell::Int(self.pass_marks),
            Cell::choice(self.status),
        ]
    }
}

impl Tabular for GradeRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "student_code",
        "student",
        "subject",
        "teacher",
        "exam_type",
        "marks",
        "total",
        "percentage",
        "grade",
        "exam_date",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::text(&self.student_code),
            Cell::text(&self.student_name),
            Cell::text(&self.subject_name),
            Cell::text(&self.teacher_name),
            Cell::text(&self.exam_type),
            Cell::Float(self.marks_obtained),
            Cell::Float(self.total_marks),
            Cell::Float(self.percentage),
            Cell::opt_text(self.grade_letter.as_deref()),
            Cell::Date(self.exam_date),
        ]
    }
}

impl Tabular for AttendanceRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "date",
        "student_code",
        "student",
        "class",
        "status",
        "check_in",
        "check_out",
        "marked_by",
        "remarks",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::Date(self.date),
            Cell::text(&self.student_code),
            Cell::text(&self.student_name),
            Cell::text(&self.class_name),
            Cell::choice(self.status),
            Cell::opt_time(self.check_in_time),
            Cell::opt_time(self.check_out_time),
            Cell::text(&self.marked_by_name),
            Cell::opt_text(self.remarks.as_deref()),
        ]
    }
}

impl Tabular for AnnouncementRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "title",
        "type",
        "audience",
        "class",
        "published",
        "publish_at",
        "expires_at",
        "created_by",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::text(&self.title),
            Cell::choice(self.kind),
            Cell::choice(self.target_audience),
            Cell::opt_text(self.target_class_name.as_deref()),
            Cell::text(if self.is_published { "yes" } else { "no" }),
            Cell::opt_datetime(self.publish_at),
            Cell::opt_datetime(self.expires_at),
            Cell::text(&self.created_by_name),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render_like_the_stored_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Cell::Date(d).to_string(), "2024-02-29");
        assert_eq!(
            Cell::DateTime(d.and_hms_opt(8, 5, 0).unwrap()).to_string(),
            "2024-02-29T08:05:00"
        );
        assert_eq!(Cell::Float(90.0).to_string(), "90.00");
        assert_eq!(Cell::opt_text(None).to_string(), "");
    }
}
