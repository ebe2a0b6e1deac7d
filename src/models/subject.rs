use super::status::RecordStatus;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub total_marks: i64,
    pub pass_marks: i64,
    pub category: Option<String>,
    pub status: RecordStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub total_marks: i64,
    pub pass_marks: i64,
    pub category: Option<String>,
}
