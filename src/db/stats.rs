use crate::db::db_utils::count;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Connection;
use std::fs;

const TABLES: &[&str] = &[
    "users",
    "students",
    "teachers",
    "classes",
    "subjects",
    "grades",
    "attendances",
    "announcements",
    "log",
];

/// Row count of every table, in a fixed order.
pub fn table_counts(conn: &Connection) -> AppResult<Vec<(&'static str, i64)>> {
    let mut out = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        out.push((*table, count(conn, table)?));
    }
    Ok(out)
}

fn attendance_range(conn: &Connection) -> AppResult<(Option<String>, Option<String>)> {
    let range = conn.query_row("SELECT MIN(date), MAX(date) FROM attendances", [], |row| {
        Ok((row.get(0)?, row.get(1)?))
    })?;
    Ok(range)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROWS PER TABLE
    //
    println!("{}• Rows:{}", CYAN, RESET);
    let counts = table_counts(&pool.conn)?;
    let width = counts.iter().map(|(t, _)| t.len()).max().unwrap_or(0);
    for (table, n) in counts {
        println!("    {:<width$}  {}{}{}", table, GREEN, n, RESET, width = width);
    }

    //
    // 3) ATTENDANCE DATE RANGE
    //
    let (first, last) = attendance_range(&pool.conn)?;
    let dash = || format!("{GREY}--{RESET}");

    println!("{}• Attendance range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(dash));
    println!("    to:   {}", last.unwrap_or_else(dash));

    println!();
    Ok(())
}
