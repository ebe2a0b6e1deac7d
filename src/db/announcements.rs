use crate::db::db_utils::{
    choice_col, datetime_col, map_write_err, opt_datetime_col, paginate,
};
use crate::errors::AppResult;
use crate::models::announcement::{Announcement, AnnouncementRow, NewAnnouncement};
use crate::models::{Choice, Page};
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_ANNOUNCEMENT: &str = "
    SELECT id, title, content, type, target_audience, target_class_id,
           created_by, is_published, publish_at, expires_at, created_at
    FROM announcements";

const SELECT_ROW: &str = "
    SELECT a.id, a.title, a.content, a.type, a.target_audience,
           a.target_class_id, c.name AS target_class_name,
           a.created_by, u.name AS created_by_name,
           a.is_published, a.publish_at, a.expires_at, a.created_at
    FROM announcements a
    JOIN users u ON u.id = a.created_by
    LEFT JOIN classes c ON c.id = a.target_class_id";

const ORDER_ROWS: &str = "a.created_at DESC, a.id DESC";

fn map_announcement(row: &Row) -> rusqlite::Result<Announcement> {
    Ok(Announcement {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        kind: choice_col(row, "type")?,
        target_audience: choice_col(row, "target_audience")?,
        target_class_id: row.get("target_class_id")?,
        created_by: row.get("created_by")?,
        is_published: row.get("is_published")?,
        publish_at: opt_datetime_col(row, "publish_at")?,
        expires_at: opt_datetime_col(row, "expires_at")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

fn map_announcement_row(row: &Row) -> rusqlite::Result<AnnouncementRow> {
    Ok(AnnouncementRow {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        kind: choice_col(row, "type")?,
        target_audience: choice_col(row, "target_audience")?,
        target_class_id: row.get("target_class_id")?,
        target_class_name: row.get("target_class_name")?,
        created_by: row.get("created_by")?,
        created_by_name: row.get("created_by_name")?,
        is_published: row.get("is_published")?,
        publish_at: opt_datetime_col(row, "publish_at")?,
        expires_at: opt_datetime_col(row, "expires_at")?,
        created_at: datetime_col(row, "created_at")?,
    })
}

pub fn insert_announcement(
    conn: &Connection,
    a: &NewAnnouncement,
    now: &NaiveDateTime,
) -> AppResult<i64> {
    let ts = date::fmt_datetime(now);

    conn.execute(
        "INSERT INTO announcements (
            title, content, type, target_audience, target_class_id, created_by,
            is_published, publish_at, expires_at, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            a.title,
            a.content,
            a.kind.to_db_str(),
            a.target_audience.to_db_str(),
            a.target_class_id,
            a.created_by,
            a.is_published,
            a.publish_at.as_ref().map(date::fmt_datetime),
            a.expires_at.as_ref().map(date::fmt_datetime),
            ts,
        ],
    )
    .map_err(map_write_err)?;

    Ok(conn.last_insert_rowid())
}

pub fn get_announcement(conn: &Connection, id: i64) -> AppResult<Option<Announcement>> {
    let sql = format!("{SELECT_ANNOUNCEMENT} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_announcement).optional()?)
}

/// Publishing stamps `publish_at` when it was never set.
pub fn set_published(
    conn: &Connection,
    id: i64,
    published: bool,
    now: &NaiveDateTime,
) -> AppResult<bool> {
    let ts = date::fmt_datetime(now);
    let n = conn
        .execute(
            "UPDATE announcements
             SET is_published = ?2,
                 publish_at = CASE WHEN ?2 AND publish_at IS NULL THEN ?3 ELSE publish_at END,
                 updated_at = ?3
             WHERE id = ?1",
            params![id, published, ts],
        )
        .map_err(map_write_err)?;
    Ok(n > 0)
}

pub fn delete_announcement(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn
        .execute("DELETE FROM announcements WHERE id = ?1", [id])
        .map_err(map_write_err)?;
    Ok(n > 0)
}

pub fn list_page(conn: &Connection, page: u32, per_page: u32) -> AppResult<Page<AnnouncementRow>> {
    paginate(conn, SELECT_ROW, ORDER_ROWS, &[], page, per_page, map_announcement_row)
}

pub fn list_all(conn: &Connection) -> AppResult<Vec<AnnouncementRow>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ROW} ORDER BY {ORDER_ROWS}"))?;
    let rows = stmt.query_map([], map_announcement_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Published rows whose expiry is unset or strictly after `now`, newest first.
pub fn visible(conn: &Connection, now: &NaiveDateTime, limit: u32) -> AppResult<Vec<AnnouncementRow>> {
    let sql = format!(
        "{SELECT_ROW}
         WHERE a.is_published = 1
           AND (a.expires_at IS NULL OR a.expires_at > ?1)
         ORDER BY {ORDER_ROWS}
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![date::fmt_datetime(now), i64::from(limit)],
        map_announcement_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::db::users;
    use crate::models::announcement::{AnnouncementType, TargetAudience};
    use crate::models::role::RoleName;
    use crate::models::status::RecordStatus;
    use crate::models::user::NewUser;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn author(conn: &Connection) -> i64 {
        users::insert_user(
            conn,
            &NewUser {
                name: "Office".into(),
                email: "office@school.com".into(),
                role: RoleName::SchoolAdmin,
                status: RecordStatus::Active,
                date_of_birth: None,
            },
            &now(),
        )
        .unwrap()
    }

    fn post(
        conn: &Connection,
        by: i64,
        title: &str,
        published: bool,
        expires_at: Option<NaiveDateTime>,
        created_at: NaiveDateTime,
    ) -> i64 {
        insert_announcement(
            conn,
            &NewAnnouncement {
                title: title.into(),
                content: "body".into(),
                kind: AnnouncementType::General,
                target_audience: TargetAudience::All,
                target_class_id: None,
                created_by: by,
                is_published: published,
                publish_at: None,
                expires_at,
            },
            &created_at,
        )
        .unwrap()
    }

    #[test]
    fn expiry_at_now_is_hidden_one_second_later_is_shown() {
        let pool = DbPool::in_memory().unwrap();
        let by = author(&pool.conn);
        let t0 = now() - Duration::hours(3);

        post(&pool.conn, by, "expires now", true, Some(now()), t0);
        let later = post(
            &pool.conn,
            by,
            "expires soon",
            true,
            Some(now() + Duration::seconds(1)),
            t0,
        );
        post(&pool.conn, by, "draft", false, None, t0);

        let ids: Vec<i64> = visible(&pool.conn, &now(), 10)
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![later]);

        // the row predicate agrees with the query
        for id in 1..=3 {
            let a = get_announcement(&pool.conn, id).unwrap().unwrap();
            assert_eq!(a.is_visible_at(now()), id == later, "{}", a.title);
        }
    }

    #[test]
    fn newest_first_and_capped_by_limit() {
        let pool = DbPool::in_memory().unwrap();
        let by = author(&pool.conn);

        let oldest = post(&pool.conn, by, "a", true, None, now() - Duration::days(3));
        let middle = post(&pool.conn, by, "b", true, None, now() - Duration::days(2));
        let newest = post(&pool.conn, by, "c", true, None, now() - Duration::days(1));
        // same timestamp as `newest`, higher id wins the tie
        let tied = post(&pool.conn, by, "d", true, None, now() - Duration::days(1));

        let all: Vec<i64> = visible(&pool.conn, &now(), 10)
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(all, vec![tied, newest, middle, oldest]);

        let top: Vec<i64> = visible(&pool.conn, &now(), 2)
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(top, vec![tied, newest]);
    }
}
