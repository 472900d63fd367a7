//! v001 -- Initial schema creation: the `links` table.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS links (
    id         TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    url        TEXT NOT NULL CHECK (length(url) > 0),
    platform   TEXT NOT NULL CHECK (platform IN ('instagram', 'twitter', 'facebook')),
    user_id    TEXT NOT NULL CHECK (length(user_id) > 0),
    created_at TEXT NOT NULL,               -- RFC-3339, fixed width
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_links_user_created
    ON links(user_id, created_at DESC);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
