//! SQLite connection wrapper (one connection per CLI invocation).

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file with foreign keys enforced.
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::from_connection(conn)
    }

    /// Open and bring the schema up to date.
    pub fn open_initialized(path: &str) -> AppResult<Self> {
        let pool = Self::new(path)?;
        crate::db::initialize::init_db(&pool.conn)?;
        Ok(pool)
    }

    /// Fresh in-memory database with the full schema, used by tests.
    pub fn in_memory() -> AppResult<Self> {
        let pool = Self::from_connection(Connection::open_in_memory()?)?;
        crate::db::initialize::init_db(&pool.conn)?;
        Ok(pool)
    }

    fn from_connection(conn: Connection) -> AppResult<Self> {
        // cascades rely on this pragma, it is off by default in SQLite
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }
}
