// src/export/logic.rs

use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{announcements, attendance, classes, grades, students, subjects, teachers};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::Tabular;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportKind};
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Write every row of `kind` (no pagination) to `file`.
    ///
    /// `file` must be absolute; an existing file needs `force` or an
    /// interactive confirmation. Returns the number of rows written.
    pub fn export(
        pool: &mut DbPool,
        kind: ExportKind,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let conn = &pool.conn;
        let written = match kind {
            ExportKind::Students => write_rows(&students::list_all(conn, None)?, kind, format, path),
            ExportKind::Teachers => write_rows(&teachers::list_all(conn)?, kind, format, path),
            ExportKind::Classes => write_rows(&classes::list_all(conn)?, kind, format, path),
            ExportKind::Subjects => write_rows(&subjects::list_all(conn)?, kind, format, path),
            ExportKind::Grades => write_rows(&grades::list_all(conn, None)?, kind, format, path),
            ExportKind::Attendance => {
                write_rows(&attendance::list_all(conn, None, None)?, kind, format, path)
            }
            ExportKind::Announcements => {
                write_rows(&announcements::list_all(conn)?, kind, format, path)
            }
        }?;

        audit(
            conn,
            "export",
            file,
            &format!("{} {} row(s) as {}", written, kind.as_str(), format.as_str()),
        );
        Ok(written)
    }
}

fn write_rows<T: Tabular>(
    rows: &[T],
    kind: ExportKind,
    format: ExportFormat,
    path: &Path,
) -> AppResult<usize> {
    if rows.is_empty() {
        warning(format!("No {} to export.", kind.as_str()));
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
        ExportFormat::Xlsx => export_xlsx(rows, kind.as_str(), path)?,
    }

    Ok(rows.len())
}
