//! Catalog schema.
//!
//! Sounds use class-table inheritance: the shared columns live in `sounds`
//! and the kind-specific ones in `raw_sounds` / `processed_sounds`, keyed by
//! the same hash. Creation is idempotent (`IF NOT EXISTS`).

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Connection;

use crate::library::ContentHash;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS sounds (
    hash TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    path TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('raw', 'processed')),
    duration REAL NOT NULL DEFAULT 0 CHECK (duration >= 0)
);

CREATE TABLE IF NOT EXISTS raw_sounds (
    hash TEXT PRIMARY KEY NOT NULL REFERENCES sounds(hash),
    recorded_at TEXT NOT NULL,
    location TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS processed_sounds (
    hash TEXT PRIMARY KEY NOT NULL REFERENCES sounds(hash),
    intensity REAL,
    origin_hash TEXT NOT NULL REFERENCES sounds(hash)
);

CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sounds_tags (
    sound_hash TEXT NOT NULL REFERENCES sounds(hash),
    tag_id INTEGER NOT NULL REFERENCES tags(id),
    PRIMARY KEY (sound_hash, tag_id)
);

CREATE INDEX IF NOT EXISTS idx_sounds_name ON sounds(name);
CREATE INDEX IF NOT EXISTS idx_processed_origin ON processed_sounds(origin_hash);
CREATE INDEX IF NOT EXISTS idx_tags_name ON tags(name);
"#;

/// Create all tables and turn on foreign-key enforcement
pub fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)
}

impl ToSql for ContentHash {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ContentHash {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(ContentHash::from_stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap();

        assert_eq!(
            table_names(&conn),
            vec!["processed_sounds", "raw_sounds", "sounds", "sounds_tags", "tags"]
        );
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let orphan = conn.execute(
            "INSERT INTO sounds_tags (sound_hash, tag_id) VALUES ('nope', 1)",
            [],
        );
        assert!(orphan.is_err());
    }

    #[test]
    fn test_content_hash_column_round_trip() {
        let conn = Connection::open_in_memory().unwrap();
        let hash = ContentHash::from_digest(&[7u8; 32]);

        let back: ContentHash = conn
            .query_row("SELECT ?1", [&hash], |row| row.get(0))
            .unwrap();
        assert_eq!(back, hash);
    }
}
