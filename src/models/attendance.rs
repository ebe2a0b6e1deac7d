use super::Choice;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl Choice for AttendanceStatus {
    const ALL: &'static [Self] = &[
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Excused,
    ];
    const FIELD: &'static str = "attendance status";

    fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub remarks: Option<String>,
    pub marked_by: i64,
    pub created_at: NaiveDateTime,
}

/// Listing row: attendance eager-loaded with student, class and marker.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRow {
    pub id: i64,
    pub student_id: i64,
    pub student_code: String,
    pub student_name: String,
    pub class_id: i64,
    pub class_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub remarks: Option<String>,
    pub marked_by: i64,
    pub marked_by_name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    /// Falls back to the student's class when `None`.
    pub class_id: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub remarks: Option<String>,
    pub marked_by: i64,
}

/// Partial update for `attendance edit`.
#[derive(Debug, Clone, Default)]
pub struct AttendanceChanges {
    pub status: Option<AttendanceStatus>,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub remarks: Option<String>,
}

impl AttendanceChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.check_in_time.is_none()
            && self.check_out_time.is_none()
            && self.remarks.is_none()
    }
}
