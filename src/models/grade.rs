use crate::core::calculator::grade::grade_percentage;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    /// midterm, final, quiz, assignment...
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub grade_letter: Option<String>,
    pub gpa: Option<f64>,
    pub remarks: Option<String>,
    pub exam_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl Grade {
    pub fn percentage(&self) -> f64 {
        grade_percentage(self.marks_obtained, self.total_marks)
    }
}

/// Listing row: grade eager-loaded with student, subject and teacher names.
#[derive(Debug, Clone, Serialize)]
pub struct GradeRow {
    pub id: i64,
    pub student_id: i64,
    pub student_code: String,
    pub student_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub grade_letter: Option<String>,
    pub exam_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub grade_letter: Option<String>,
    pub gpa: Option<f64>,
    pub remarks: Option<String>,
    pub exam_date: NaiveDate,
}
