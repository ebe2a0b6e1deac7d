use crate::db::db_utils::{UpdateBuilder, choice_col, datetime_col, map_write_err, opt_date_col};
use crate::errors::{AppError, AppResult};
use crate::models::Choice;
use crate::models::role::RoleName;
use crate::models::user::{NewUser, User, UserChanges};
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_USER: &str = "
    SELECT u.id, u.name, u.email, u.role_id, r.name AS role,
           r.display_name AS role_display_name, u.status,
           u.date_of_birth, u.created_at
    FROM users u
    JOIN roles r ON r.id = u.role_id";

pub fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        role_id: row.get("role_id")?,
        role: choice_col(row, "role")?,
        role_display_name: row.get("role_display_name")?,
        status: choice_col(row, "status")?,
        date_of_birth: opt_date_col(row, "date_of_birth")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

/// `roles.id` for a role name. Roles are seeded by the first migration.
pub fn role_id(conn: &Connection, role: RoleName) -> AppResult<i64> {
    conn.query_row(
        "SELECT id FROM roles WHERE name = ?1",
        [role.to_db_str()],
        |r| r.get(0),
    )
    .optional()?
    .ok_or_else(|| AppError::Other(format!("role '{}' missing from roles table", role.to_db_str())))
}

pub fn insert_user(conn: &Connection, u: &NewUser, now: &NaiveDateTime) -> AppResult<i64> {
    let role_id = role_id(conn, u.role)?;
    let ts = date::fmt_datetime(now);

    conn.execute(
        "INSERT INTO users (name, email, role_id, status, date_of_birth, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            u.name,
            u.email,
            role_id,
            u.status.to_db_str(),
            u.date_of_birth.as_ref().map(date::fmt_date),
            ts,
        ],
    )
    .map_err(map_write_err)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let sql = format!("{SELECT_USER} WHERE u.id = ?1");
    Ok(conn.query_row(&sql, [id], map_user).optional()?)
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> AppResult<Option<User>> {
    let sql = format!("{SELECT_USER} WHERE u.email = ?1");
    Ok(conn.query_row(&sql, [email], map_user).optional()?)
}

/// Returns `false` when the user does not exist.
pub fn update_user(
    conn: &Connection,
    id: i64,
    changes: &UserChanges,
    now: &NaiveDateTime,
) -> AppResult<bool> {
    let mut upd = UpdateBuilder::new();
    upd.set_opt("name", changes.name.clone())
        .set_opt("email", changes.email.clone())
        .set_opt("status", changes.status.map(|s| s.to_db_str().to_string()));

    if let Some(role) = changes.role {
        upd.set("role_id", role_id(conn, role)?);
    }

    upd.execute(conn, "users", id, &date::fmt_datetime(now))
}

/// Deleting a user cascades to its student/teacher profile and everything below.
pub fn delete_user(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn
        .execute("DELETE FROM users WHERE id = ?1", [id])
        .map_err(map_write_err)?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::models::status::RecordStatus;

    fn new_user(email: &str, role: RoleName) -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: email.into(),
            role,
            status: RecordStatus::Active,
            date_of_birth: None,
        }
    }

    #[test]
    fn insert_and_fetch_with_role() {
        let pool = DbPool::in_memory().unwrap();
        let now = date::now();
        let id = insert_user(&pool.conn, &new_user("ada@school.com", RoleName::Teacher), &now)
            .unwrap();

        let u = get_user(&pool.conn, id).unwrap().unwrap();
        assert_eq!(u.role, RoleName::Teacher);
        assert_eq!(u.role_display_name, "Teacher");
        assert_eq!(
            find_user_by_email(&pool.conn, "ada@school.com")
                .unwrap()
                .map(|u| u.id),
            Some(id)
        );
    }

    #[test]
    fn duplicate_email_is_a_validation_error() {
        let pool = DbPool::in_memory().unwrap();
        let now = date::now();
        insert_user(&pool.conn, &new_user("x@school.com", RoleName::Student), &now).unwrap();
        let err = insert_user(&pool.conn, &new_user("x@school.com", RoleName::Parent), &now)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn update_changes_role_and_reports_missing_rows() {
        let pool = DbPool::in_memory().unwrap();
        let now = date::now();
        let id = insert_user(&pool.conn, &new_user("y@school.com", RoleName::Student), &now)
            .unwrap();

        let changes = UserChanges {
            role: Some(RoleName::Parent),
            ..Default::default()
        };
        assert!(update_user(&pool.conn, id, &changes, &now).unwrap());
        assert_eq!(
            get_user(&pool.conn, id).unwrap().unwrap().role,
            RoleName::Parent
        );
        assert!(!update_user(&pool.conn, id + 100, &changes, &now).unwrap());
    }
}
