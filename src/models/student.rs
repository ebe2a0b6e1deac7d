use super::Choice;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

impl Choice for FeeStatus {
    const ALL: &'static [Self] = &[FeeStatus::Paid, FeeStatus::Pending, FeeStatus::Overdue];
    const FIELD: &'static str = "fee status";

    fn to_db_str(&self) -> &'static str {
        match self {
            FeeStatus::Paid => "paid",
            FeeStatus::Pending => "pending",
            FeeStatus::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    /// Business key, e.g. `STU-2024-001`.
    pub student_code: String,
    pub class_id: Option<i64>,
    pub roll_number: Option<String>,
    pub admission_date: NaiveDate,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_info: Option<String>,
    pub fee_amount: f64,
    pub fee_status: FeeStatus,
    pub created_at: NaiveDateTime,
}

/// Listing row: student eager-loaded with its user and class.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRow {
    pub id: i64,
    pub student_code: String,
    pub name: String,
    pub email: String,
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub roll_number: Option<String>,
    pub admission_date: NaiveDate,
    pub guardian_name: Option<String>,
    pub fee_amount: f64,
    pub fee_status: FeeStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub user_id: i64,
    pub student_code: String,
    pub class_id: Option<i64>,
    pub roll_number: Option<String>,
    pub admission_date: NaiveDate,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_info: Option<String>,
    pub fee_amount: f64,
    pub fee_status: FeeStatus,
}

/// Partial update for `student edit`.
/// `class_id: Some(None)` detaches the student from its class.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub class_id: Option<Option<i64>>,
    pub roll_number: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub fee_amount: Option<f64>,
    pub fee_status: Option<FeeStatus>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.class_id.is_none()
            && self.roll_number.is_none()
            && self.guardian_name.is_none()
            && self.guardian_phone.is_none()
            && self.guardian_email.is_none()
            && self.fee_amount.is_none()
            && self.fee_status.is_none()
    }
}
