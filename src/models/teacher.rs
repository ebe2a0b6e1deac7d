use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub employee_id: String,
    pub qualification: String,
    pub department: Option<String>,
    pub joining_date: NaiveDate,
    pub salary: Option<f64>,
    pub specialization: Option<String>,
    pub experience_years: i64,
    pub created_at: NaiveDateTime,
}

/// Listing row: teacher eager-loaded with its user.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherRow {
    pub id: i64,
    pub user_id: i64,
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub qualification: String,
    pub department: Option<String>,
    pub joining_date: NaiveDate,
    pub experience_years: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub user_id: i64,
    pub employee_id: String,
    pub qualification: String,
    pub department: Option<String>,
    pub joining_date: NaiveDate,
    pub salary: Option<f64>,
    pub specialization: Option<String>,
    pub experience_years: i64,
}
