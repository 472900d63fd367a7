use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::{Link, NewLink, Platform};

const LINK_COLUMNS: &str = "id, url, platform, user_id, created_at, updated_at";

impl Database {
    /// Persist a validated link, assigning its id and timestamps.
    pub fn insert_link(&self, new_link: &NewLink) -> Result<Link> {
        // Stored timestamps keep microseconds; truncate up front so the
        // returned record equals what a later read yields.
        let now = Utc::now().trunc_subsecs(6);
        let link = Link {
            id: Uuid::new_v4(),
            url: new_link.url().to_string(),
            platform: new_link.platform(),
            user_id: new_link.user_id().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.conn().execute(
            &format!("INSERT INTO links ({LINK_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
            params![
                link.id.to_string(),
                link.url,
                link.platform.as_str(),
                link.user_id,
                format_timestamp(&link.created_at),
                format_timestamp(&link.updated_at),
            ],
        )?;

        tracing::debug!(id = %link.id, user_id = %link.user_id, platform = %link.platform, "link inserted");

        Ok(link)
    }

    /// All links owned by `user_id`, newest first.
    pub fn links_for_user(&self, user_id: &str) -> Result<Vec<Link>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {LINK_COLUMNS} FROM links
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC"
        ))?;

        let rows = stmt.query_map(params![user_id], row_to_link)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    pub fn get_link(&self, id: Uuid) -> Result<Link> {
        self.conn()
            .query_row(
                &format!("SELECT {LINK_COLUMNS} FROM links WHERE id = ?1"),
                params![id.to_string()],
                row_to_link,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// Delete a link by id. Returns whether a row existed; a missing id is not
    /// an error.
    pub fn delete_link(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM links WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    pub fn count_links(&self) -> Result<u64> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    // Fixed width so lexicographic order in SQLite matches time order.
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Wrap a column decoding failure so it surfaces as `StoreError::Sqlite`
/// with the typed store error as its source.
fn conversion_failure(idx: usize, err: StoreError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_failure(idx, StoreError::ChronoParse(e)))
}

fn row_to_link(row: &rusqlite::Row<'_>) -> rusqlite::Result<Link> {
    let id_str: String = row.get(0)?;
    let url: String = row.get(1)?;
    let platform_str: String = row.get(2)?;
    let user_id: String = row.get(3)?;
    let created_str: String = row.get(4)?;
    let updated_str: String = row.get(5)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| conversion_failure(0, StoreError::Uuid(e)))?;
    let platform: Platform = platform_str
        .parse()
        .map_err(|_| conversion_failure(2, StoreError::InvalidPlatform(platform_str.clone())))?;

    Ok(Link {
        id,
        url,
        platform,
        user_id,
        created_at: parse_timestamp(4, &created_str)?,
        updated_at: parse_timestamp(5, &updated_str)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(url: &str, platform: &str, user_id: &str) -> NewLink {
        NewLink::parse(Some(url), Some(platform), Some(user_id)).unwrap()
    }

    #[test]
    fn insert_then_list_returns_matching_record() {
        let db = Database::open_in_memory().unwrap();

        let created = db
            .insert_link(&new_link("https://x.com/a", "twitter", "u1"))
            .unwrap();
        assert_eq!(created.url, "https://x.com/a");
        assert_eq!(created.platform, Platform::Twitter);
        assert_eq!(created.user_id, "u1");
        assert_eq!(created.created_at, created.updated_at);

        let listed = db.links_for_user("u1").unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn list_is_newest_first_and_scoped_to_user() {
        let db = Database::open_in_memory().unwrap();

        let first = db
            .insert_link(&new_link("https://instagram.com/1", "instagram", "u1"))
            .unwrap();
        let other = db
            .insert_link(&new_link("https://facebook.com/x", "facebook", "u2"))
            .unwrap();
        let second = db
            .insert_link(&new_link("https://x.com/2", "twitter", "u1"))
            .unwrap();

        let ids: Vec<Uuid> = db
            .links_for_user("u1")
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let u2 = db.links_for_user("u2").unwrap();
        assert_eq!(u2, vec![other]);
    }

    #[test]
    fn list_for_unknown_user_is_empty() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.links_for_user("nobody").unwrap().is_empty());
    }

    #[test]
    fn delete_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let link = db
            .insert_link(&new_link("https://x.com/a", "twitter", "u1"))
            .unwrap();

        assert!(db.delete_link(link.id).unwrap());
        assert!(!db.delete_link(link.id).unwrap());
        assert!(db.links_for_user("u1").unwrap().is_empty());
        assert!(matches!(db.get_link(link.id), Err(StoreError::NotFound)));
    }

    #[test]
    fn delete_unknown_id_is_not_an_error() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.delete_link(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn get_link_and_count() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.count_links().unwrap(), 0);

        let link = db
            .insert_link(&new_link("https://facebook.com/p", "facebook", "u1"))
            .unwrap();
        assert_eq!(db.get_link(link.id).unwrap(), link);
        assert_eq!(db.count_links().unwrap(), 1);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.db");

        let created = {
            let db = Database::open_at(&path).unwrap();
            db.insert_link(&new_link("https://x.com/keep", "twitter", "u1"))
                .unwrap()
        };

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.links_for_user("u1").unwrap(), vec![created]);
    }

    /// The typed store error carried inside a column conversion failure.
    fn decode_cause(err: &StoreError) -> &StoreError {
        match err {
            StoreError::Sqlite(rusqlite::Error::FromSqlConversionFailure(_, _, cause)) => cause
                .downcast_ref::<StoreError>()
                .expect("conversion failure should carry a StoreError"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn corrupt_id_surfaces_as_uuid_error() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO links (id, url, platform, user_id, created_at, updated_at)
                 VALUES ('65a1b2c3d4e5f6a7b8c9d0e1', 'https://x.com', 'twitter', 'u1',
                         '2024-01-01T00:00:00.000000Z', '2024-01-01T00:00:00.000000Z')",
                [],
            )
            .unwrap();

        let err = db.links_for_user("u1").unwrap_err();
        assert!(matches!(decode_cause(&err), StoreError::Uuid(_)));
    }

    #[test]
    fn corrupt_timestamp_surfaces_as_chrono_error() {
        let db = Database::open_in_memory().unwrap();
        let id = Uuid::new_v4();
        db.conn()
            .execute(
                "INSERT INTO links (id, url, platform, user_id, created_at, updated_at)
                 VALUES (?1, 'https://x.com', 'twitter', 'u1', 'yesterday', 'yesterday')",
                params![id.to_string()],
            )
            .unwrap();

        let err = db.get_link(id).unwrap_err();
        assert!(matches!(decode_cause(&err), StoreError::ChronoParse(_)));
    }

    #[test]
    fn schema_rejects_out_of_enum_platform() {
        let db = Database::open_in_memory().unwrap();
        let res = db.conn().execute(
            "INSERT INTO links (id, url, platform, user_id, created_at, updated_at)
             VALUES (?1, 'https://t.co', 'tiktok', 'u1', '2024-01-01T00:00:00.000000Z', '2024-01-01T00:00:00.000000Z')",
            params![Uuid::new_v4().to_string()],
        );
        assert!(res.is_err());
    }
}
