use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, zipping it when `compress`.
    /// Returns the final path, or `None` when the user declined to overwrite.
    pub fn backup(
        pool: &mut DbPool,
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::from(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !force && !confirm_overwrite(dest)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        // flush the WAL/journal so the copied file is complete
        pool.conn.execute_batch("PRAGMA wal_checkpoint(FULL);").ok();

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            match fs::remove_file(dest) {
                Ok(()) => info(format!("Removed uncompressed backup: {}", dest.display())),
                Err(e) => warning(format!("Failed to remove uncompressed backup: {}", e)),
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        audit(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(final_path))
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", dest.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}

/// Compress a backup into a sibling `.zip`.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "racademic.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
