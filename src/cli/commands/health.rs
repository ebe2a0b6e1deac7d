use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// `SELECT 1` against the configured database; any failure surfaces as an
/// error and a non-zero exit code.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let one: i64 = pool.conn.query_row("SELECT 1", [], |row| row.get(0))?;
    if one == 1 {
        success(format!(
            "racademic {}: Database OK ({})",
            env!("CARGO_PKG_VERSION"),
            cfg.db_path()
        ));
    }
    Ok(())
}
