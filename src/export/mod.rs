// src/export/mod.rs

mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
pub mod model;
mod xlsx;

pub use logic::ExportLogic;
pub use model::{Cell, Tabular};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Which listing to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Students,
    Teachers,
    Classes,
    Subjects,
    Grades,
    Attendance,
    Announcements,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Students => "students",
            ExportKind::Teachers => "teachers",
            ExportKind::Classes => "classes",
            ExportKind::Subjects => "subjects",
            ExportKind::Grades => "grades",
            ExportKind::Attendance => "attendance",
            ExportKind::Announcements => "announcements",
        }
    }
}
