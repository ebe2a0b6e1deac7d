use super::status::RecordStatus;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SchoolClass {
    pub id: i64,
    pub name: String,
    pub grade_level: String,
    pub section: Option<String>,
    /// A `users.id`, not a `teachers.id`.
    pub class_teacher_id: Option<i64>,
    pub capacity: i64,
    pub room_number: Option<String>,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub created_at: NaiveDateTime,
}

/// Listing row: class eager-loaded with its class teacher and roster size.
#[derive(Debug, Clone, Serialize)]
pub struct ClassRow {
    pub id: i64,
    pub name: String,
    pub grade_level: String,
    pub section: Option<String>,
    pub class_teacher_id: Option<i64>,
    pub class_teacher_name: Option<String>,
    pub capacity: i64,
    pub room_number: Option<String>,
    pub status: RecordStatus,
    pub student_count: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub grade_level: String,
    pub section: Option<String>,
    pub class_teacher_id: Option<i64>,
    pub capacity: i64,
    pub room_number: Option<String>,
    pub description: Option<String>,
    pub status: RecordStatus,
}

/// Partial update for `class edit`.
#[derive(Debug, Clone, Default)]
pub struct ClassChanges {
    pub name: Option<String>,
    pub class_teacher_id: Option<Option<i64>>,
    pub capacity: Option<i64>,
    pub room_number: Option<String>,
    pub status: Option<RecordStatus>,
}

impl ClassChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.class_teacher_id.is_none()
            && self.capacity.is_none()
            && self.room_number.is_none()
            && self.status.is_none()
    }
}
