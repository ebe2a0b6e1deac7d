use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let db_path = cfg.db_path();
        // plain open: `--migrate` reports what it applies
        let mut pool = DbPool::new(&db_path)?;

        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(&pool.conn)?;
            println!(
                "{}✔ Migration completed ({} applied).{}\n",
                GREEN, applied, RESET
            );
            if applied > 0 {
                audit(
                    &pool.conn,
                    "migrate",
                    &db_path,
                    &format!("{applied} migration(s) applied"),
                );
            }
        }

        if *info {
            stats::print_db_info(&mut pool, &db_path)?;
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
