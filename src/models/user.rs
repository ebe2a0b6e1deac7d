use super::role::RoleName;
use super::status::RecordStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A row of `users`, joined with its role.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub role: RoleName,
    pub role_display_name: String,
    pub status: RecordStatus,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Input for `user add`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: RoleName,
    pub status: RecordStatus,
    pub date_of_birth: Option<NaiveDate>,
}

/// Partial update for `user edit`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<RoleName>,
    pub status: Option<RecordStatus>,
}
