//! Named payloads handed from the aggregation layer to the views.

use super::announcement::AnnouncementRow;
use super::attendance::AttendanceStatus;
use super::grade::GradeRow;
use super::school_class::SchoolClass;
use super::student::StudentRow;
use super::user::User;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_classes: i64,
    pub total_subjects: i64,
}

/// Count of today's attendance rows per status.
pub type AttendanceSummary = BTreeMap<AttendanceStatus, i64>;

/// A class led by the viewing teacher, with its roster.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherClass {
    #[serde(flatten)]
    pub class: SchoolClass,
    pub students: Vec<StudentRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RoleData {
    Student {
        recent_grades: Vec<GradeRow>,
        attendance_percentage: f64,
        class: Option<SchoolClass>,
    },
    Teacher {
        classes: Vec<TeacherClass>,
        recent_grades: Vec<GradeRow>,
    },
    Empty {},
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload {
    pub stats: DashboardStats,
    pub announcements: Vec<AnnouncementRow>,
    #[serde(rename = "attendanceToday")]
    pub attendance_today: Option<AttendanceSummary>,
    #[serde(rename = "roleData")]
    pub role_data: RoleData,
    pub user: Option<User>,
}

/// Profile view of a single student (`student show`).
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub student: StudentRow,
    pub attendance_percentage: f64,
    pub window_days: u32,
    pub grades: Vec<GradeRow>,
}
