use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::seed::seed_demo;
use crate::errors::AppResult;
use crate::utils::date;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database, bringing the schema up to date
///  - the demo dataset, when `--seed` is given
pub fn handle(cli: &Cli) -> AppResult<()> {
    let seed = matches!(cli.command, Commands::Init { seed: true });

    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing rAcademic…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::new(&db_path)?;
    let applied = init_db(&pool.conn)?;

    println!("✅ Database initialized ({} migration(s) applied)", applied);
    audit(
        &pool.conn,
        "init",
        &db_path,
        &format!("Database initialized, {applied} migration(s) applied"),
    );

    if seed {
        let created = seed_demo(&pool.conn, &date::now())?;
        if created == 0 {
            println!("🌱 Demo data already present");
        } else {
            println!("🌱 Demo data loaded: {} record(s)", created);
        }
        audit(
            &pool.conn,
            "seed",
            "demo",
            &format!("{created} record(s) created"),
        );
    }

    println!("🎉 rAcademic initialization completed!");
    Ok(())
}
