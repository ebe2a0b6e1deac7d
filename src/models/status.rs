use super::Choice;
use serde::Serialize;

/// Active/inactive flag shared by users, classes and subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl Choice for RecordStatus {
    const ALL: &'static [Self] = &[RecordStatus::Active, RecordStatus::Inactive];
    const FIELD: &'static str = "status";

    fn to_db_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
        }
    }
}
