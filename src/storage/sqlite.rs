//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use serde::Serialize;
use crate::{Error, Result};
use crate::cookbook::{Cookbook, NewCookbook};
use super::schema;

/// Column list matching `CatalogStore::row_to_cookbook`
pub(crate) const COOKBOOK_COLUMNS: &str =
    "id, title, author, year_published, aesthetic_rating, instagram_worthy, cover_color";

/// Path reported in errors for in-memory stores
const MEMORY_PATH: &str = ":memory:";

/// Connection options applied at open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Turn on `PRAGMA foreign_keys` so links must point at existing rows
    pub enforce_foreign_keys: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { enforce_foreign_keys: true }
    }
}

/// SQLite-backed storage for the cookbook catalog.
///
/// Owns the only connection. Query and tag services borrow it.
pub struct CatalogStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl CatalogStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with(path, StoreOptions::default())
    }

    /// Open a database file with explicit connection options
    pub fn open_with(path: &Path, options: StoreOptions) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::Connection {
                    path: path.to_path_buf(),
                    source: source.into(),
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|source| Error::Connection {
            path: path.to_path_buf(),
            source: source.into(),
        })?;
        let store = Self::connect(conn, Some(path.to_path_buf()), options)?;
        tracing::info!(path = %path.display(), foreign_keys = options.enforce_foreign_keys, "opened catalog store");
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with(StoreOptions::default())
    }

    /// Open an in-memory database with explicit connection options
    pub fn open_in_memory_with(options: StoreOptions) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::Connection {
            path: PathBuf::from(MEMORY_PATH),
            source: source.into(),
        })?;
        Self::connect(conn, None, options)
    }

    fn connect(conn: Connection, path: Option<PathBuf>, options: StoreOptions) -> Result<Self> {
        let store = Self { conn, path };
        store.check_readable()?;
        store.apply_options(options)?;
        store.ensure_schema()?;
        Ok(store)
    }

    /// SQLite reads the file lazily, so a non-database file only fails on the
    /// first statement. Force that read here.
    fn check_readable(&self) -> Result<()> {
        self.conn
            .query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map(|_| ())
            .map_err(|source| self.connection_error(source))
    }

    fn apply_options(&self, options: StoreOptions) -> Result<()> {
        self.conn
            .pragma_update(None, "foreign_keys", options.enforce_foreign_keys)
            .map_err(|source| self.connection_error(source))
    }

    fn connection_error(&self, source: rusqlite::Error) -> Error {
        Error::Connection {
            path: self.path.clone().unwrap_or_else(|| PathBuf::from(MEMORY_PATH)),
            source: source.into(),
        }
    }

    /// Create the catalog tables if they are missing.
    ///
    /// Safe on every startup; existing tables and rows are left alone.
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, []).map_err(Error::Schema)?;
        }
        tracing::debug!("catalog schema ensured");
        Ok(())
    }

    /// Release the connection.
    ///
    /// Consumes the store, so it cannot be closed twice.
    pub fn close(self) -> Result<()> {
        let path = self.path.clone();
        self.conn.close().map_err(|(_, e)| Error::Storage(e))?;
        if let Some(path) = path {
            tracing::info!(path = %path.display(), "closed catalog store");
        }
        Ok(())
    }

    /// Backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // ========== Cookbook Operations ==========

    /// Insert a cookbook and return its engine-assigned id
    pub fn insert_cookbook(&self, cookbook: &NewCookbook) -> Result<i64> {
        self.conn
            .execute(
                r#"
                INSERT INTO cookbooks (title, author, year_published, aesthetic_rating, instagram_worthy, cover_color)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    cookbook.title,
                    cookbook.author,
                    cookbook.year_published,
                    cookbook.aesthetic_rating,
                    cookbook.instagram_worthy,
                    cookbook.cover_color,
                ],
            )
            .map_err(map_insert_error)?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, title = %cookbook.title, "inserted cookbook");
        Ok(id)
    }

    /// Get a cookbook by id
    pub fn get_cookbook(&self, id: i64) -> Result<Option<Cookbook>> {
        let sql = format!("SELECT {} FROM cookbooks WHERE id = ?1", COOKBOOK_COLUMNS);
        self.conn
            .query_row(&sql, [id], Self::row_to_cookbook)
            .optional()
            .map_err(Into::into)
    }

    /// List every cookbook in storage order (no ORDER BY)
    pub fn list_cookbooks(&self) -> Result<Vec<Cookbook>> {
        let sql = format!("SELECT {} FROM cookbooks", COOKBOOK_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let cookbooks = stmt
            .query_map([], Self::row_to_cookbook)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(cookbooks)
    }

    /// Helper to convert a row to a Cookbook
    pub(crate) fn row_to_cookbook(row: &rusqlite::Row) -> rusqlite::Result<Cookbook> {
        // A NULL flag reads as not worthy
        let instagram_worthy: Option<bool> = row.get(5)?;

        Ok(Cookbook {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            year_published: row.get(3)?,
            aesthetic_rating: row.get(4)?,
            instagram_worthy: instagram_worthy.unwrap_or(false),
            cover_color: row.get(6)?,
        })
    }

    // ========== Counts ==========

    /// Count all cookbooks
    pub fn count_cookbooks(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM cookbooks")
    }

    /// Count all tags
    pub fn count_tags(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM tags")
    }

    /// Count all cookbook/tag links
    pub fn count_links(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM cookbook_tags")
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<ShelfStats> {
        Ok(ShelfStats {
            cookbooks: self.count_cookbooks()?,
            tags: self.count_tags()?,
            links: self.count_links()?,
        })
    }
}

/// Map an insert failure, naming the violated column when SQLite reports it
fn map_insert_error(err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            let message = message.unwrap_or_else(|| failure.to_string());
            Error::Constraint {
                field: constraint_field(&message),
                message,
            }
        }
        other => Error::Storage(other),
    }
}

/// Extract `title` from `"NOT NULL constraint failed: cookbooks.title"`
fn constraint_field(message: &str) -> Option<String> {
    let (_, target) = message.rsplit_once(": ")?;
    let first = target.split(',').next()?.trim();
    let column = first.rsplit('.').next()?;
    if column.is_empty() {
        None
    } else {
        Some(column.to_string())
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShelfStats {
    pub cookbooks: usize,
    pub tags: usize,
    pub links: usize,
}

impl std::fmt::Display for ShelfStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Collection Statistics:")?;
        writeln!(f, "  Cookbooks: {}", self.cookbooks)?;
        writeln!(f, "  Tags: {}", self.tags)?;
        writeln!(f, "  Tag links: {}", self.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpenCause;

    fn sample_cookbook(title: &str, color: &str) -> NewCookbook {
        NewCookbook::new(title, "Sage Moonbeam")
            .year(2022)
            .rating(4)
            .instagram_worthy(true)
            .cover_color(color)
    }

    #[test]
    fn test_cookbook_crud() {
        let store = CatalogStore::open_in_memory().unwrap();

        let id = store.insert_cookbook(&sample_cookbook("Small Batch", "Raw Linen")).unwrap();
        assert_eq!(id, 1);

        let retrieved = store.get_cookbook(id).unwrap().unwrap();
        assert_eq!(retrieved.title, "Small Batch");
        assert_eq!(retrieved.author, "Sage Moonbeam");
        assert_eq!(retrieved.year_published, Some(2022));
        assert_eq!(retrieved.aesthetic_rating, Some(4));
        assert!(retrieved.instagram_worthy);
        assert_eq!(retrieved.cover_color.as_deref(), Some("Raw Linen"));

        assert!(store.get_cookbook(99).unwrap().is_none());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let store = CatalogStore::open_in_memory().unwrap();

        let first = store.insert_cookbook(&sample_cookbook("A", "Beige")).unwrap();
        let second = store.insert_cookbook(&sample_cookbook("B", "Denim")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_list_returns_every_row() {
        let store = CatalogStore::open_in_memory().unwrap();
        assert!(store.list_cookbooks().unwrap().is_empty());

        store.insert_cookbook(&sample_cookbook("A", "Beige")).unwrap();
        store.insert_cookbook(&NewCookbook::new("B", "Oak Wavelength")).unwrap();

        let all = store.list_cookbooks().unwrap();
        assert_eq!(all.len(), 2);
        let undated = all.iter().find(|c| c.title == "B").unwrap();
        assert!(undated.year_published.is_none());
        assert!(undated.aesthetic_rating.is_none());
        assert!(undated.cover_color.is_none());
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = CatalogStore::open_in_memory().unwrap();
        store.insert_cookbook(&sample_cookbook("Keep me", "Beige")).unwrap();

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        assert_eq!(store.count_cookbooks().unwrap(), 1);
    }

    #[test]
    fn test_not_null_violation_names_field() {
        let store = CatalogStore::open_in_memory().unwrap();
        let err = store
            .conn()
            .execute("INSERT INTO cookbooks (title, author) VALUES (NULL, 'Nobody')", [])
            .map_err(map_insert_error)
            .unwrap_err();

        match err {
            Error::Constraint { field, message } => {
                assert_eq!(field.as_deref(), Some("title"));
                assert!(message.contains("NOT NULL"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_constraint_field_parsing() {
        assert_eq!(
            constraint_field("NOT NULL constraint failed: cookbooks.author").as_deref(),
            Some("author")
        );
        assert_eq!(
            constraint_field("UNIQUE constraint failed: cookbook_tags.cookbook_id, cookbook_tags.tag_id").as_deref(),
            Some("cookbook_id")
        );
        assert!(constraint_field("FOREIGN KEY constraint failed").is_none());
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("shelf.db");

        let store = CatalogStore::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        store.insert_cookbook(&sample_cookbook("Persisted", "Denim")).unwrap();
        store.close().unwrap();

        let store = CatalogStore::open(&path).unwrap();
        let all = store.list_cookbooks().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Persisted");
        store.close().unwrap();
    }

    #[test]
    fn test_open_directory_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogStore::open(dir.path()).err().unwrap();
        assert!(matches!(err, Error::Connection { .. }), "got {:?}", err);
    }

    #[test]
    fn test_garbage_file_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, vec![b'z'; 4096]).unwrap();

        let err = CatalogStore::open(&path).err().unwrap();
        match err {
            Error::Connection { path: reported, source: OpenCause::Sqlite(_) } => {
                assert_eq!(reported, path);
            }
            other => panic!("expected connection error, got {:?}", other),
        }
    }

    #[test]
    fn test_uncreatable_parent_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("afile");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let path = blocker.join("sub").join("shelf.db");
        let err = CatalogStore::open(&path).err().unwrap();
        match err {
            Error::Connection { path: reported, source: OpenCause::Io(_) } => {
                assert_eq!(reported, path);
            }
            other => panic!("expected connection error, got {:?}", other),
        }
    }

    #[test]
    fn test_stats() {
        let store = CatalogStore::open_in_memory().unwrap();
        store.insert_cookbook(&sample_cookbook("A", "Beige")).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats, ShelfStats { cookbooks: 1, tags: 0, links: 0 });
        assert!(stats.to_string().contains("Cookbooks: 1"));
    }
}
