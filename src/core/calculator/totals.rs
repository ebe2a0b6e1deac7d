use crate::db::db_utils::count;
use crate::errors::AppResult;
use crate::models::dashboard::DashboardStats;
use rusqlite::Connection;

/// Row counts of students, teachers, classes and subjects, read inside one
/// transaction so the four numbers come from the same snapshot.
pub fn dashboard_totals(conn: &Connection) -> AppResult<DashboardStats> {
    let tx = conn.unchecked_transaction()?;

    let stats = DashboardStats {
        total_students: count(&tx, "students")?,
        total_teachers: count(&tx, "teachers")?,
        total_classes: count(&tx, "classes")?,
        total_subjects: count(&tx, "subjects")?,
    };

    tx.commit()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    #[test]
    fn empty_store_has_all_zero_totals() {
        let pool = DbPool::in_memory().unwrap();
        assert_eq!(dashboard_totals(&pool.conn).unwrap(), DashboardStats::default());
    }
}
