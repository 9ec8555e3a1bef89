// lectern-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Catalog Store
// Description: Durable CatalogStore backed by SQLite.
// Purpose: Persist catalog rows with scoped, ordered, indexed queries.
// Dependencies: lectern-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`CatalogStore`] using `SQLite`. The
//! four entity tables carry parent-id indexes and every ordering contract
//! adds the row id as a tiebreaker, so ties keep natural insertion order.
//! Partial updates run read-modify-write inside a transaction. The schema
//! declares no foreign keys: orphaned descendants are representable, and
//! cascade deletion (when enabled) is the engine's job.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use lectern_core::Book;
use lectern_core::BookChanges;
use lectern_core::BookId;
use lectern_core::Bookshelf;
use lectern_core::BookshelfChanges;
use lectern_core::CatalogStore;
use lectern_core::Chapter;
use lectern_core::ChapterChanges;
use lectern_core::ChapterId;
use lectern_core::NewBook;
use lectern_core::NewBookshelf;
use lectern_core::NewChapter;
use lectern_core::NewPage;
use lectern_core::Page;
use lectern_core::PageChanges;
use lectern_core::PageId;
use lectern_core::ShelfId;
use lectern_core::StoreError;
use lectern_core::Timestamp;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteJournalMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteJournalMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteJournalMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Builds a config with defaults for the given database path.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteJournalMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) | SqliteStoreError::Db(message) => {
                Self::Unavailable(message)
            }
            SqliteStoreError::VersionMismatch(message) => Self::Corrupt(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Maps a rusqlite error into the store error type.
fn db_err(error: rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(error.to_string())
}

// ============================================================================
// SECTION: Row Conversion
// ============================================================================

/// Raw bookshelf columns: id, name, location, created_at_ms.
type ShelfParts = (i64, String, Option<String>, i64);
/// Raw book columns: id, bookshelf_id, title, author, published_year,
/// created_at_ms.
type BookParts = (i64, i64, String, String, i32, i64);
/// Raw chapter columns: id, book_id, title, chapter_number, created_at_ms.
type ChapterParts = (i64, i64, String, i32, i64);
/// Raw page columns: id, chapter_id, page_number, content, created_at_ms.
type PageParts = (i64, i64, i32, String, i64);

/// Converts a raw id column into a typed id, failing closed on corrupt rows.
fn typed_id<T>(
    raw: i64,
    column: &str,
    build: impl FnOnce(i64) -> Option<T>,
) -> Result<T, SqliteStoreError> {
    build(raw).ok_or_else(|| SqliteStoreError::Invalid(format!("invalid {column}: {raw}")))
}

/// Builds a bookshelf entity from raw columns.
fn shelf_from_parts(parts: ShelfParts) -> Result<Bookshelf, SqliteStoreError> {
    let (id, name, location, created_at_ms) = parts;
    Ok(Bookshelf {
        id: typed_id(id, "bookshelf id", ShelfId::from_raw)?,
        name,
        location,
        created_at: Timestamp::from_unix_millis(created_at_ms),
    })
}

/// Builds a book entity from raw columns.
fn book_from_parts(parts: BookParts) -> Result<Book, SqliteStoreError> {
    let (id, bookshelf_id, title, author, published_year, created_at_ms) = parts;
    Ok(Book {
        id: typed_id(id, "book id", BookId::from_raw)?,
        bookshelf_id: typed_id(bookshelf_id, "bookshelf id", ShelfId::from_raw)?,
        title,
        author,
        published_year,
        created_at: Timestamp::from_unix_millis(created_at_ms),
    })
}

/// Builds a chapter entity from raw columns.
fn chapter_from_parts(parts: ChapterParts) -> Result<Chapter, SqliteStoreError> {
    let (id, book_id, title, chapter_number, created_at_ms) = parts;
    Ok(Chapter {
        id: typed_id(id, "chapter id", ChapterId::from_raw)?,
        book_id: typed_id(book_id, "book id", BookId::from_raw)?,
        title,
        chapter_number,
        created_at: Timestamp::from_unix_millis(created_at_ms),
    })
}

/// Builds a page entity from raw columns.
fn page_from_parts(parts: PageParts) -> Result<Page, SqliteStoreError> {
    let (id, chapter_id, page_number, content, created_at_ms) = parts;
    Ok(Page {
        id: typed_id(id, "page id", PageId::from_raw)?,
        chapter_id: typed_id(chapter_id, "chapter id", ChapterId::from_raw)?,
        page_number,
        content,
        created_at: Timestamp::from_unix_millis(created_at_ms),
    })
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed catalog store.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    /// Opens an `SQLite`-backed catalog store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized.
    pub fn new(config: SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(&config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the connection, mapping mutex poisoning to a store error.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn list_shelves(&self) -> Result<Vec<Bookshelf>, StoreError> {
        let guard = self.lock()?;
        let mut stmt = guard
            .prepare(
                "SELECT id, name, location, created_at_ms FROM bookshelves
                 ORDER BY name ASC, id ASC",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(db_err)?;
        let mut shelves = Vec::new();
        for row in rows {
            shelves.push(shelf_from_parts(row.map_err(db_err)?)?);
        }
        Ok(shelves)
    }

    fn find_shelf(&self, id: ShelfId) -> Result<Option<Bookshelf>, StoreError> {
        let guard = self.lock()?;
        let parts: Option<ShelfParts> = guard
            .query_row(
                "SELECT id, name, location, created_at_ms FROM bookshelves WHERE id = ?1",
                params![id.get()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()
            .map_err(db_err)?;
        drop(guard);
        parts.map(shelf_from_parts).transpose().map_err(StoreError::from)
    }

    fn insert_shelf(&self, row: NewBookshelf) -> Result<Bookshelf, StoreError> {
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO bookshelves (name, location, created_at_ms) VALUES (?1, ?2, ?3)",
                params![row.name, row.location, row.created_at.as_unix_millis()],
            )
            .map_err(db_err)?;
        let raw = guard.last_insert_rowid();
        drop(guard);
        Ok(Bookshelf {
            id: typed_id(raw, "bookshelf id", ShelfId::from_raw)?,
            name: row.name,
            location: row.location,
            created_at: row.created_at,
        })
    }

    fn update_shelf(
        &self,
        id: ShelfId,
        changes: BookshelfChanges,
    ) -> Result<Option<Bookshelf>, StoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db_err)?;
        let parts: Option<ShelfParts> = tx
            .query_row(
                "SELECT id, name, location, created_at_ms FROM bookshelves WHERE id = ?1",
                params![id.get()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()
            .map_err(db_err)?;
        let Some(parts) = parts else {
            tx.commit().map_err(db_err)?;
            return Ok(None);
        };
        let mut shelf = shelf_from_parts(parts)?;
        if let Some(name) = changes.name {
            shelf.name = name;
        }
        if let Some(location) = changes.location {
            shelf.location = location;
        }
        tx.execute(
            "UPDATE bookshelves SET name = ?1, location = ?2 WHERE id = ?3",
            params![shelf.name, shelf.location, id.get()],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;
        drop(guard);
        Ok(Some(shelf))
    }

    fn delete_shelf(&self, id: ShelfId) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let changed = guard
            .execute("DELETE FROM bookshelves WHERE id = ?1", params![id.get()])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    fn list_books(&self, shelf_id: ShelfId) -> Result<Vec<Book>, StoreError> {
        let guard = self.lock()?;
        let mut stmt = guard
            .prepare(
                "SELECT id, bookshelf_id, title, author, published_year, created_at_ms
                 FROM books WHERE bookshelf_id = ?1
                 ORDER BY published_year DESC, id ASC",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![shelf_id.get()], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .map_err(db_err)?;
        let mut books = Vec::new();
        for row in rows {
            books.push(book_from_parts(row.map_err(db_err)?)?);
        }
        Ok(books)
    }

    fn count_books(&self, shelf_id: ShelfId) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        let count: i64 = guard
            .query_row(
                "SELECT COUNT(*) FROM books WHERE bookshelf_id = ?1",
                params![shelf_id.get()],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn find_book(&self, shelf_id: ShelfId, id: BookId) -> Result<Option<Book>, StoreError> {
        let guard = self.lock()?;
        let parts: Option<BookParts> = guard
            .query_row(
                "SELECT id, bookshelf_id, title, author, published_year, created_at_ms
                 FROM books WHERE bookshelf_id = ?1 AND id = ?2",
                params![shelf_id.get(), id.get()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()
            .map_err(db_err)?;
        drop(guard);
        parts.map(book_from_parts).transpose().map_err(StoreError::from)
    }

    fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let guard = self.lock()?;
        let parts: Option<BookParts> = guard
            .query_row(
                "SELECT id, bookshelf_id, title, author, published_year, created_at_ms
                 FROM books WHERE id = ?1",
                params![id.get()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()
            .map_err(db_err)?;
        drop(guard);
        parts.map(book_from_parts).transpose().map_err(StoreError::from)
    }

    fn insert_book(&self, row: NewBook) -> Result<Book, StoreError> {
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO books (bookshelf_id, title, author, published_year, created_at_ms)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    row.bookshelf_id.get(),
                    row.title,
                    row.author,
                    row.published_year,
                    row.created_at.as_unix_millis()
                ],
            )
            .map_err(db_err)?;
        let raw = guard.last_insert_rowid();
        drop(guard);
        Ok(Book {
            id: typed_id(raw, "book id", BookId::from_raw)?,
            bookshelf_id: row.bookshelf_id,
            title: row.title,
            author: row.author,
            published_year: row.published_year,
            created_at: row.created_at,
        })
    }

    fn update_book(
        &self,
        shelf_id: ShelfId,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db_err)?;
        let parts: Option<BookParts> = tx
            .query_row(
                "SELECT id, bookshelf_id, title, author, published_year, created_at_ms
                 FROM books WHERE bookshelf_id = ?1 AND id = ?2",
                params![shelf_id.get(), id.get()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()
            .map_err(db_err)?;
        let Some(parts) = parts else {
            tx.commit().map_err(db_err)?;
            return Ok(None);
        };
        let mut book = book_from_parts(parts)?;
        if let Some(title) = changes.title {
            book.title = title;
        }
        if let Some(author) = changes.author {
            book.author = author;
        }
        if let Some(published_year) = changes.published_year {
            book.published_year = published_year;
        }
        tx.execute(
            "UPDATE books SET title = ?1, author = ?2, published_year = ?3
             WHERE bookshelf_id = ?4 AND id = ?5",
            params![book.title, book.author, book.published_year, shelf_id.get(), id.get()],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;
        drop(guard);
        Ok(Some(book))
    }

    fn delete_book(&self, shelf_id: ShelfId, id: BookId) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let changed = guard
            .execute(
                "DELETE FROM books WHERE bookshelf_id = ?1 AND id = ?2",
                params![shelf_id.get(), id.get()],
            )
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    fn search_books(&self, query: &str) -> Result<Vec<Book>, StoreError> {
        let guard = self.lock()?;
        // instr() keeps % and _ literal, unlike LIKE interpolation.
        let mut stmt = guard
            .prepare(
                "SELECT id, bookshelf_id, title, author, published_year, created_at_ms
                 FROM books
                 WHERE instr(lower(title), lower(?1)) > 0
                    OR instr(lower(author), lower(?1)) > 0
                 ORDER BY id ASC",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![query], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .map_err(db_err)?;
        let mut books = Vec::new();
        for row in rows {
            books.push(book_from_parts(row.map_err(db_err)?)?);
        }
        Ok(books)
    }

    fn list_chapters(&self, book_id: BookId) -> Result<Vec<Chapter>, StoreError> {
        let guard = self.lock()?;
        let mut stmt = guard
            .prepare(
                "SELECT id, book_id, title, chapter_number, created_at_ms
                 FROM chapters WHERE book_id = ?1
                 ORDER BY chapter_number ASC, id ASC",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![book_id.get()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })
            .map_err(db_err)?;
        let mut chapters = Vec::new();
        for row in rows {
            chapters.push(chapter_from_parts(row.map_err(db_err)?)?);
        }
        Ok(chapters)
    }

    fn count_chapters(&self, book_id: BookId) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        let count: i64 = guard
            .query_row(
                "SELECT COUNT(*) FROM chapters WHERE book_id = ?1",
                params![book_id.get()],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn find_chapter(
        &self,
        book_id: BookId,
        id: ChapterId,
    ) -> Result<Option<Chapter>, StoreError> {
        let guard = self.lock()?;
        let parts: Option<ChapterParts> = guard
            .query_row(
                "SELECT id, book_id, title, chapter_number, created_at_ms
                 FROM chapters WHERE book_id = ?1 AND id = ?2",
                params![book_id.get(), id.get()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()
            .map_err(db_err)?;
        drop(guard);
        parts.map(chapter_from_parts).transpose().map_err(StoreError::from)
    }

    fn find_chapter_by_id(&self, id: ChapterId) -> Result<Option<Chapter>, StoreError> {
        let guard = self.lock()?;
        let parts: Option<ChapterParts> = guard
            .query_row(
                "SELECT id, book_id, title, chapter_number, created_at_ms
                 FROM chapters WHERE id = ?1",
                params![id.get()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()
            .map_err(db_err)?;
        drop(guard);
        parts.map(chapter_from_parts).transpose().map_err(StoreError::from)
    }

    fn insert_chapter(&self, row: NewChapter) -> Result<Chapter, StoreError> {
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO chapters (book_id, title, chapter_number, created_at_ms)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    row.book_id.get(),
                    row.title,
                    row.chapter_number,
                    row.created_at.as_unix_millis()
                ],
            )
            .map_err(db_err)?;
        let raw = guard.last_insert_rowid();
        drop(guard);
        Ok(Chapter {
            id: typed_id(raw, "chapter id", ChapterId::from_raw)?,
            book_id: row.book_id,
            title: row.title,
            chapter_number: row.chapter_number,
            created_at: row.created_at,
        })
    }

    fn update_chapter(
        &self,
        book_id: BookId,
        id: ChapterId,
        changes: ChapterChanges,
    ) -> Result<Option<Chapter>, StoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db_err)?;
        let parts: Option<ChapterParts> = tx
            .query_row(
                "SELECT id, book_id, title, chapter_number, created_at_ms
                 FROM chapters WHERE book_id = ?1 AND id = ?2",
                params![book_id.get(), id.get()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()
            .map_err(db_err)?;
        let Some(parts) = parts else {
            tx.commit().map_err(db_err)?;
            return Ok(None);
        };
        let mut chapter = chapter_from_parts(parts)?;
        if let Some(title) = changes.title {
            chapter.title = title;
        }
        if let Some(chapter_number) = changes.chapter_number {
            chapter.chapter_number = chapter_number;
        }
        tx.execute(
            "UPDATE chapters SET title = ?1, chapter_number = ?2
             WHERE book_id = ?3 AND id = ?4",
            params![chapter.title, chapter.chapter_number, book_id.get(), id.get()],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;
        drop(guard);
        Ok(Some(chapter))
    }

    fn delete_chapter(&self, book_id: BookId, id: ChapterId) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let changed = guard
            .execute(
                "DELETE FROM chapters WHERE book_id = ?1 AND id = ?2",
                params![book_id.get(), id.get()],
            )
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    fn list_pages(&self, chapter_id: ChapterId) -> Result<Vec<Page>, StoreError> {
        let guard = self.lock()?;
        let mut stmt = guard
            .prepare(
                "SELECT id, chapter_id, page_number, content, created_at_ms
                 FROM pages WHERE chapter_id = ?1
                 ORDER BY page_number ASC, id ASC",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![chapter_id.get()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })
            .map_err(db_err)?;
        let mut pages = Vec::new();
        for row in rows {
            pages.push(page_from_parts(row.map_err(db_err)?)?);
        }
        Ok(pages)
    }

    fn count_pages(&self, chapter_id: ChapterId) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        let count: i64 = guard
            .query_row(
                "SELECT COUNT(*) FROM pages WHERE chapter_id = ?1",
                params![chapter_id.get()],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn find_page(&self, chapter_id: ChapterId, id: PageId) -> Result<Option<Page>, StoreError> {
        let guard = self.lock()?;
        let parts: Option<PageParts> = guard
            .query_row(
                "SELECT id, chapter_id, page_number, content, created_at_ms
                 FROM pages WHERE chapter_id = ?1 AND id = ?2",
                params![chapter_id.get(), id.get()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()
            .map_err(db_err)?;
        drop(guard);
        parts.map(page_from_parts).transpose().map_err(StoreError::from)
    }

    fn insert_page(&self, row: NewPage) -> Result<Page, StoreError> {
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO pages (chapter_id, page_number, content, created_at_ms)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    row.chapter_id.get(),
                    row.page_number,
                    row.content,
                    row.created_at.as_unix_millis()
                ],
            )
            .map_err(db_err)?;
        let raw = guard.last_insert_rowid();
        drop(guard);
        Ok(Page {
            id: typed_id(raw, "page id", PageId::from_raw)?,
            chapter_id: row.chapter_id,
            page_number: row.page_number,
            content: row.content,
            created_at: row.created_at,
        })
    }

    fn update_page(
        &self,
        chapter_id: ChapterId,
        id: PageId,
        changes: PageChanges,
    ) -> Result<Option<Page>, StoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db_err)?;
        let parts: Option<PageParts> = tx
            .query_row(
                "SELECT id, chapter_id, page_number, content, created_at_ms
                 FROM pages WHERE chapter_id = ?1 AND id = ?2",
                params![chapter_id.get(), id.get()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()
            .map_err(db_err)?;
        let Some(parts) = parts else {
            tx.commit().map_err(db_err)?;
            return Ok(None);
        };
        let mut page = page_from_parts(parts)?;
        if let Some(page_number) = changes.page_number {
            page.page_number = page_number;
        }
        if let Some(content) = changes.content {
            page.content = content;
        }
        tx.execute(
            "UPDATE pages SET page_number = ?1, content = ?2
             WHERE chapter_id = ?3 AND id = ?4",
            params![page.page_number, page.content, chapter_id.get(), id.get()],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;
        drop(guard);
        Ok(Some(page))
    }

    fn delete_page(&self, chapter_id: ChapterId, id: PageId) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let changed = guard
            .execute(
                "DELETE FROM pages WHERE chapter_id = ?1 AND id = ?2",
                params![chapter_id.get(), id.get()],
            )
            .map_err(db_err)?;
        Ok(changed > 0)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas for journaling and durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(db_err)?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(db_err)?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(db_err)?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(db_err)?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS bookshelves (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    location TEXT,
                    created_at_ms INTEGER NOT NULL
                );
                CREATE TABLE IF NOT EXISTS books (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    bookshelf_id INTEGER NOT NULL,
                    title TEXT NOT NULL,
                    author TEXT NOT NULL,
                    published_year INTEGER NOT NULL,
                    created_at_ms INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_books_bookshelf_id
                    ON books (bookshelf_id);
                CREATE TABLE IF NOT EXISTS chapters (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    book_id INTEGER NOT NULL,
                    title TEXT NOT NULL,
                    chapter_number INTEGER NOT NULL,
                    created_at_ms INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_chapters_book_id
                    ON chapters (book_id);
                CREATE TABLE IF NOT EXISTS pages (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    chapter_id INTEGER NOT NULL,
                    page_number INTEGER NOT NULL,
                    content TEXT NOT NULL,
                    created_at_ms INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_pages_chapter_id
                    ON pages (chapter_id);",
            )
            .map_err(db_err)?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(db_err)?;
    Ok(())
}
