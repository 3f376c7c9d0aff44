use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::data::{ImageRecord, NewImageRecord};
use crate::error::StoreError;

/// Persistence seam used by the editor.
///
/// `append` must persist before returning; there is no later flush.
pub trait RecordStore {
    /// Store a new record and return it with its assigned ID
    fn append(&self, record: NewImageRecord) -> Result<ImageRecord, StoreError>;

    /// Every record, in insertion order
    fn all(&self) -> Result<Vec<ImageRecord>, StoreError>;
}

/// Raw row before the timestamp is converted
type RecordRow = (i64, Vec<u8>, String, f64, f64, i64);

/// The Library manages the SQLite catalog of posted photos.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Open (or create) the catalog at `db_path` and initialize the schema.
    ///
    /// The parent directory is created if needed.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&db_path)?;
        info!("📁 Database opened at: {}", db_path.display());

        let library = Library { conn, db_path };
        library.init_schema()?;
        Ok(library)
    }

    /// Open a throwaway catalog that lives only as long as this value
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let library = Library {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Initialize the database schema.
    /// Safe to run on every open.
    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS posts (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                image           BLOB NOT NULL,
                title           TEXT NOT NULL,
                latitude        REAL NOT NULL,
                longitude       REAL NOT NULL,
                created_at      INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_posts_created_at
             ON posts(created_at)",
            [],
        )?;

        debug!("Database schema initialized");
        Ok(())
    }

    /// Number of stored posts
    pub fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Look up a single post
    pub fn get(&self, id: i64) -> Result<Option<ImageRecord>, StoreError> {
        let row: Option<RecordRow> = self
            .conn
            .query_row(
                "SELECT id, image, title, latitude, longitude, created_at
                 FROM posts WHERE id = ?1",
                params![id],
                read_row,
            )
            .optional()?;

        row.map(into_record).transpose()
    }

    /// Delete a post. Returns false if no post had that ID.
    pub fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        if changed > 0 {
            info!("🗑️  Removed post {}", id);
        }
        Ok(changed > 0)
    }
}

impl RecordStore for Library {
    fn append(&self, record: NewImageRecord) -> Result<ImageRecord, StoreError> {
        validate_image(&record.image)?;

        self.conn.execute(
            "INSERT INTO posts (image, title, latitude, longitude, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &record.image,
                &record.title,
                record.latitude,
                record.longitude,
                record.created_at.timestamp_millis(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        info!(
            "💾 Stored post {} \"{}\" ({} bytes) at {:.5}, {:.5}",
            id,
            record.title,
            record.image.len(),
            record.latitude,
            record.longitude
        );

        Ok(ImageRecord {
            id,
            image: record.image,
            title: record.title,
            latitude: record.latitude,
            longitude: record.longitude,
            created_at: record.created_at,
        })
    }

    fn all(&self) -> Result<Vec<ImageRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, image, title, latitude, longitude, created_at
             FROM posts ORDER BY id ASC",
        )?;

        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<RecordRow>, _>>()?;

        rows.into_iter().map(into_record).collect()
    }
}

/// A stored image must be non-empty and look like a known raster format
fn validate_image(bytes: &[u8]) -> Result<(), StoreError> {
    if bytes.is_empty() {
        return Err(StoreError::EmptyImage);
    }
    image::guess_format(bytes).map_err(StoreError::UnknownEncoding)?;
    Ok(())
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_record(row: RecordRow) -> Result<ImageRecord, StoreError> {
    let (id, image, title, latitude, longitude, millis) = row;
    let created_at: DateTime<Utc> =
        DateTime::from_timestamp_millis(millis).ok_or(StoreError::BadTimestamp(millis))?;

    Ok(ImageRecord {
        id,
        image,
        title,
        latitude,
        longitude,
        created_at,
    })
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster;
    use crate::state::data::Coordinate;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255])));
        raster::encode_png(&img).unwrap()
    }

    fn post(title: &str) -> NewImageRecord {
        NewImageRecord::now(png_bytes(), title, Coordinate::new(48.85, 2.35))
    }

    #[test]
    fn test_all_returns_insertion_order() {
        let library = Library::open_in_memory().unwrap();
        library.append(post("first")).unwrap();
        library.append(post("second")).unwrap();
        library.append(post("third")).unwrap();

        let titles: Vec<String> = library.all().unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
        assert_eq!(library.count().unwrap(), 3);
    }

    #[test]
    fn test_append_round_trips_fields() {
        let library = Library::open_in_memory().unwrap();
        let new = post("Sunset");
        let stored = library.append(new.clone()).unwrap();

        let loaded = library.get(stored.id).unwrap().unwrap();
        assert_eq!(loaded.title, "Sunset");
        assert_eq!(loaded.image, new.image);
        assert_eq!(loaded.coordinate(), Coordinate::new(48.85, 2.35));
        assert_eq!(
            loaded.created_at.timestamp_millis(),
            new.created_at.timestamp_millis()
        );
    }

    #[test]
    fn test_rejects_empty_and_unknown_images() {
        let library = Library::open_in_memory().unwrap();

        let mut empty = post("empty");
        empty.image.clear();
        assert!(matches!(library.append(empty), Err(StoreError::EmptyImage)));

        let mut garbage = post("garbage");
        garbage.image = vec![1, 2, 3, 4, 5, 6, 7, 8];
        assert!(matches!(
            library.append(garbage),
            Err(StoreError::UnknownEncoding(_))
        ));

        assert_eq!(library.count().unwrap(), 0);
    }

    #[test]
    fn test_remove() {
        let library = Library::open_in_memory().unwrap();
        let stored = library.append(post("gone")).unwrap();

        assert!(library.remove(stored.id).unwrap());
        assert!(!library.remove(stored.id).unwrap());
        assert!(library.get(stored.id).unwrap().is_none());
    }

    #[test]
    fn test_reopen_keeps_posts() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("posts.db");

        {
            let library = Library::open(&db_path).unwrap();
            library.append(post("kept")).unwrap();
        }

        let library = Library::open(&db_path).unwrap();
        let all = library.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "kept");
    }
}
