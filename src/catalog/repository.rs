//! SQLite-backed catalog of sounds and tags.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use tracing::debug;

use super::error::{CatalogError, Result};
use super::pattern::{contains_operand, NamePattern};
use super::schema;
use crate::domain::{Sound, SoundDetails, SoundKind, Tag};
use crate::library::{compute_hash, ContentHash};

/// Shared projection: base row plus whichever subtype row exists
const SOUND_SELECT: &str = r#"
    SELECT s.hash, s.name, s.path, s.kind, s.duration,
           r.recorded_at, r.location,
           p.origin_hash, p.intensity
    FROM sounds s
    LEFT JOIN raw_sounds r ON r.hash = s.hash
    LEFT JOIN processed_sounds p ON p.hash = s.hash
"#;

/// How long a statement waits on another process's write lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Persistent catalog of sounds
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open (or create) the catalog database at `path`.
    ///
    /// Several processes may hold the same catalog open; SQLite serializes
    /// their writes and readers never wait on an idle connection.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        schema::initialize(&conn)?;
        debug!("Opened catalog {}", path.display());

        Ok(Self { conn })
    }

    /// In-memory catalog (tests and dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    // ========================================================================
    // Sounds
    // ========================================================================

    /// Insert a sound with its kind-specific row (and any tags it carries).
    ///
    /// Fails with [`CatalogError::Duplicate`] if the hash is already cataloged;
    /// nothing is written in that case.
    pub fn create(&mut self, sound: &Sound) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO sounds (hash, name, path, kind, duration) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                sound.hash,
                sound.name,
                sound.path,
                sound.kind().as_str(),
                sound.duration
            ],
        )
        .map_err(|e| duplicate_or_database(e, &sound.hash))?;

        match &sound.details {
            SoundDetails::Raw {
                recorded_at,
                location,
            } => {
                tx.execute(
                    "INSERT INTO raw_sounds (hash, recorded_at, location) VALUES (?1, ?2, ?3)",
                    params![sound.hash, recorded_at, location],
                )?;
            }
            SoundDetails::Processed { origin, intensity } => {
                tx.execute(
                    "INSERT INTO processed_sounds (hash, intensity, origin_hash) VALUES (?1, ?2, ?3)",
                    params![sound.hash, intensity, origin],
                )?;
            }
        }

        for name in &sound.tags {
            let tag = find_or_create_tag_in(&tx, name)?;
            attach_tag(&tx, &sound.hash, tag.id)?;
        }

        tx.commit()?;
        debug!("Created {} sound {}", sound.kind(), sound.hash);
        Ok(())
    }

    /// Look up a sound by its full hash
    pub fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<Sound>> {
        let sql = format!("{} WHERE s.hash = ?1", SOUND_SELECT);
        Ok(self.query_sounds(&sql, params![hash])?.pop())
    }

    /// All sounds whose hash starts with `prefix` (case-insensitive)
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Sound>> {
        let prefix = prefix.to_ascii_lowercase();
        let sql = format!(
            "{} WHERE substr(s.hash, 1, ?2) = ?1 ORDER BY s.hash",
            SOUND_SELECT
        );
        self.query_sounds(&sql, params![prefix, prefix.chars().count() as i64])
    }

    /// Resolve a user reference to exactly one sound.
    ///
    /// An existing path always wins: a file is hashed and looked up exactly,
    /// anything else (a directory) is never cataloged. Otherwise the
    /// reference is a hash prefix that must match one sound.
    pub fn find_by_prefix_or_path(&self, reference: &str) -> Result<Sound> {
        let path = Path::new(reference);
        if path.exists() {
            if !path.is_file() {
                return Err(CatalogError::FileNotCataloged(path.to_path_buf()));
            }
            let hash = compute_hash(path)?;
            debug!("Resolving {} by content hash {}", reference, hash);
            return self
                .find_by_hash(&hash)?
                .ok_or_else(|| CatalogError::FileNotCataloged(path.to_path_buf()));
        }

        let mut matches = self.find_by_prefix(reference)?;
        debug!("Prefix '{}' matched {} sound(s)", reference, matches.len());
        match matches.len() {
            0 => Err(CatalogError::NotFound(reference.to_string())),
            1 => Ok(matches.remove(0)),
            count => Err(CatalogError::Ambiguous {
                reference: reference.to_string(),
                count,
            }),
        }
    }

    /// Sounds matching `keyword` by name, exact tag name, or raw location.
    ///
    /// Each sound appears once; ordered by name, then hash.
    pub fn search(&self, keyword: &str) -> Result<Vec<Sound>> {
        let sql = format!(
            r#"{}
            WHERE s.name LIKE ?1 ESCAPE '\'
               OR (s.kind = 'raw' AND r.location LIKE ?1 ESCAPE '\')
               OR EXISTS (
                    SELECT 1 FROM sounds_tags st
                    JOIN tags t ON t.id = st.tag_id
                    WHERE st.sound_hash = s.hash AND t.name = ?2
               )
            ORDER BY s.name ASC, s.hash ASC"#,
            SOUND_SELECT
        );
        self.query_sounds(&sql, params![contains_operand(keyword), keyword])
    }

    /// All sounds ordered by name, optionally filtered by a name pattern
    pub fn list(&self, pattern: Option<&str>) -> Result<Vec<Sound>> {
        let pattern = pattern.map(NamePattern::parse);

        let sounds = match pattern.as_ref().and_then(NamePattern::like_operand) {
            Some(operand) => {
                let sql = format!(
                    r#"{} WHERE s.name LIKE ?1 ESCAPE '\' ORDER BY s.name ASC, s.hash ASC"#,
                    SOUND_SELECT
                );
                self.query_sounds(&sql, params![operand])?
            }
            None => {
                let sql = format!("{} ORDER BY s.name ASC, s.hash ASC", SOUND_SELECT);
                self.query_sounds(&sql, [])?
            }
        };

        Ok(match pattern {
            Some(pattern) => sounds
                .into_iter()
                .filter(|s| pattern.accepts(&s.name))
                .collect(),
            None => sounds,
        })
    }

    /// Change the display name of a sound
    pub fn rename(&self, hash: &ContentHash, new_name: &str) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE sounds SET name = ?1 WHERE hash = ?2",
            params![new_name, hash],
        )?;
        if updated == 0 {
            return Err(CatalogError::NotFound(hash.to_string()));
        }
        Ok(())
    }

    /// Processed sounds derived directly from `hash`
    pub fn derived_from(&self, hash: &ContentHash) -> Result<Vec<Sound>> {
        let sql = format!(
            "{} WHERE p.origin_hash = ?1 ORDER BY s.name ASC, s.hash ASC",
            SOUND_SELECT
        );
        self.query_sounds(&sql, params![hash])
    }

    /// The sound itself followed by each origin up to the first raw sound.
    ///
    /// Stops early at a dangling origin or a cycle.
    pub fn lineage(&self, hash: &ContentHash) -> Result<Vec<Sound>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(hash.clone());

        while let Some(current) = next.take() {
            if !seen.insert(current.clone()) {
                break;
            }
            let Some(sound) = self.find_by_hash(&current)? else {
                break;
            };
            next = sound.origin().cloned();
            chain.push(sound);
        }

        Ok(chain)
    }

    /// Number of cataloged sounds
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sounds", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// Return the tag called `name`, creating it if needed
    pub fn find_or_create_tag(&mut self, name: &str) -> Result<Tag> {
        let tx = self.conn.transaction()?;
        let tag = find_or_create_tag_in(&tx, name)?;
        tx.commit()?;
        Ok(tag)
    }

    /// Attach tags to a sound; tags it already has are left alone.
    ///
    /// Runs in one transaction, so either every tag is attached or none.
    pub fn tag_sound(&mut self, hash: &ContentHash, names: &[String]) -> Result<Vec<Tag>> {
        let tx = self.conn.transaction()?;

        let exists = tx
            .query_row("SELECT 1 FROM sounds WHERE hash = ?1", params![hash], |_| Ok(()))
            .optional()?
            .is_some();
        if !exists {
            return Err(CatalogError::NotFound(hash.to_string()));
        }

        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            let tag = find_or_create_tag_in(&tx, name)?;
            attach_tag(&tx, hash, tag.id)?;
            tags.push(tag);
        }

        tx.commit()?;
        Ok(tags)
    }

    /// Tag names of a sound, ordered by name
    pub fn tags_for(&self, hash: &ContentHash) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT t.name
            FROM sounds_tags st
            JOIN tags t ON t.id = st.tag_id
            WHERE st.sound_hash = ?1
            ORDER BY t.name
            "#,
        )?;
        let names = stmt
            .query_map(params![hash], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn query_sounds<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Sound>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut sounds = stmt
            .query_map(params, sound_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for sound in &mut sounds {
            sound.tags = self.tags_for(&sound.hash)?;
        }
        Ok(sounds)
    }
}

/// Map a row of [`SOUND_SELECT`] to a sound (tags are filled in later)
fn sound_from_row(row: &Row<'_>) -> rusqlite::Result<Sound> {
    let kind: String = row.get(3)?;
    let kind: SoundKind = kind
        .parse()
        .map_err(|e: anyhow::Error| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?;

    let details = match kind {
        SoundKind::Raw => SoundDetails::Raw {
            recorded_at: row.get(5)?,
            location: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        },
        SoundKind::Processed => SoundDetails::Processed {
            origin: row.get(7)?,
            intensity: row.get(8)?,
        },
    };

    Ok(Sound {
        hash: row.get(0)?,
        name: row.get(1)?,
        path: row.get(2)?,
        duration: row.get(4)?,
        details,
        tags: Vec::new(),
    })
}

/// Oldest tag with this exact name, or a freshly inserted one
fn find_or_create_tag_in(conn: &Connection, name: &str) -> Result<Tag> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM tags WHERE name = ?1 ORDER BY id LIMIT 1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;

    let id = match existing {
        Some(id) => id,
        None => {
            conn.execute("INSERT INTO tags (name) VALUES (?1)", params![name])?;
            debug!("Created tag '{}'", name);
            conn.last_insert_rowid()
        }
    };

    Ok(Tag {
        id,
        name: name.to_string(),
    })
}

fn attach_tag(conn: &Connection, hash: &ContentHash, tag_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO sounds_tags (sound_hash, tag_id) VALUES (?1, ?2)",
        params![hash, tag_id],
    )?;
    Ok(())
}

/// Primary-key violations on insert mean the hash is already cataloged
fn duplicate_or_database(err: rusqlite::Error, hash: &ContentHash) -> CatalogError {
    use rusqlite::ffi::{SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE};

    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == SQLITE_CONSTRAINT_UNIQUE =>
        {
            CatalogError::Duplicate(hash.clone())
        }
        _ => CatalogError::Database(err),
    }
}
