// lectern-core/src/interfaces/mod.rs
// ============================================================================
// Module: Lectern Interfaces
// Description: Backend-agnostic interfaces for persistence and time.
// Purpose: Define the contract surfaces used by the Lectern catalog engine.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the catalog engine reaches external systems without
//! embedding backend-specific details. The persistence gateway exposes typed
//! create/read/update/delete and ordered-filtered-query operations per
//! entity; implementations must apply parent scoping exactly as specified and
//! fail closed on storage errors. Time is an interface too: the engine never
//! reads the wall clock directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::entities::Book;
use crate::core::entities::BookChanges;
use crate::core::entities::Bookshelf;
use crate::core::entities::BookshelfChanges;
use crate::core::entities::Chapter;
use crate::core::entities::ChapterChanges;
use crate::core::entities::NewBook;
use crate::core::entities::NewBookshelf;
use crate::core::entities::NewChapter;
use crate::core::entities::NewPage;
use crate::core::entities::Page;
use crate::core::entities::PageChanges;
use crate::core::identifiers::BookId;
use crate::core::identifiers::ChapterId;
use crate::core::identifiers::PageId;
use crate::core::identifiers::ShelfId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Catalog store errors. All variants are fatal to the current operation and
/// surface as internal errors; nothing is retried.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying store could not be reached or refused the operation.
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("catalog store corruption: {0}")]
    Corrupt(String),
    /// Store data is invalid for the catalog schema.
    #[error("catalog store invalid data: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Catalog Store
// ============================================================================

/// Persistence gateway for the four-level catalog hierarchy.
///
/// Ordering contracts: shelves list by name ascending, books by published
/// year descending, chapters by chapter number ascending, pages by page
/// number ascending. Ties keep natural (insertion) order. Scoped operations
/// filter by the declared parent id in addition to the entity id, so a row
/// that exists under a different parent reads as absent.
pub trait CatalogStore {
    // ------------------------------------------------------------------
    // Bookshelves
    // ------------------------------------------------------------------

    /// Lists every bookshelf, ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn list_shelves(&self) -> Result<Vec<Bookshelf>, StoreError>;

    /// Finds a bookshelf by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn find_shelf(&self, id: ShelfId) -> Result<Option<Bookshelf>, StoreError>;

    /// Inserts a bookshelf and returns the stored row with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn insert_shelf(&self, row: NewBookshelf) -> Result<Bookshelf, StoreError>;

    /// Applies a partial update to a bookshelf; returns `None` when the row
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn update_shelf(
        &self,
        id: ShelfId,
        changes: BookshelfChanges,
    ) -> Result<Option<Bookshelf>, StoreError>;

    /// Deletes a bookshelf row; returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_shelf(&self, id: ShelfId) -> Result<bool, StoreError>;

    // ------------------------------------------------------------------
    // Books
    // ------------------------------------------------------------------

    /// Lists the books of a shelf, ordered by published year descending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn list_books(&self, shelf_id: ShelfId) -> Result<Vec<Book>, StoreError>;

    /// Counts the books of a shelf.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn count_books(&self, shelf_id: ShelfId) -> Result<u64, StoreError>;

    /// Finds a book scoped to its shelf.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn find_book(&self, shelf_id: ShelfId, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Finds a book by id alone (parent-existence checks).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Inserts a book and returns the stored row with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn insert_book(&self, row: NewBook) -> Result<Book, StoreError>;

    /// Applies a partial update to a book scoped to its shelf; returns
    /// `None` when no row matches both ids.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn update_book(
        &self,
        shelf_id: ShelfId,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError>;

    /// Deletes a book scoped to its shelf; returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_book(&self, shelf_id: ShelfId, id: BookId) -> Result<bool, StoreError>;

    /// Returns every book whose title or author contains the query as a
    /// case-insensitive substring, in natural retrieval order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn search_books(&self, query: &str) -> Result<Vec<Book>, StoreError>;

    // ------------------------------------------------------------------
    // Chapters
    // ------------------------------------------------------------------

    /// Lists the chapters of a book, ordered by chapter number ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn list_chapters(&self, book_id: BookId) -> Result<Vec<Chapter>, StoreError>;

    /// Counts the chapters of a book.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn count_chapters(&self, book_id: BookId) -> Result<u64, StoreError>;

    /// Finds a chapter scoped to its book.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn find_chapter(
        &self,
        book_id: BookId,
        id: ChapterId,
    ) -> Result<Option<Chapter>, StoreError>;

    /// Finds a chapter by id alone (content assembly and parent checks).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn find_chapter_by_id(&self, id: ChapterId) -> Result<Option<Chapter>, StoreError>;

    /// Inserts a chapter and returns the stored row with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn insert_chapter(&self, row: NewChapter) -> Result<Chapter, StoreError>;

    /// Applies a partial update to a chapter scoped to its book; returns
    /// `None` when no row matches both ids.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn update_chapter(
        &self,
        book_id: BookId,
        id: ChapterId,
        changes: ChapterChanges,
    ) -> Result<Option<Chapter>, StoreError>;

    /// Deletes a chapter scoped to its book; returns whether a row was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_chapter(&self, book_id: BookId, id: ChapterId) -> Result<bool, StoreError>;

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    /// Lists the pages of a chapter, ordered by page number ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn list_pages(&self, chapter_id: ChapterId) -> Result<Vec<Page>, StoreError>;

    /// Counts the pages of a chapter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn count_pages(&self, chapter_id: ChapterId) -> Result<u64, StoreError>;

    /// Finds a page scoped to its chapter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn find_page(&self, chapter_id: ChapterId, id: PageId) -> Result<Option<Page>, StoreError>;

    /// Inserts a page and returns the stored row with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn insert_page(&self, row: NewPage) -> Result<Page, StoreError>;

    /// Applies a partial update to a page scoped to its chapter; returns
    /// `None` when no row matches both ids.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn update_page(
        &self,
        chapter_id: ChapterId,
        id: PageId,
        changes: PageChanges,
    ) -> Result<Option<Page>, StoreError>;

    /// Deletes a page scoped to its chapter; returns whether a row was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete_page(&self, chapter_id: ChapterId, id: PageId) -> Result<bool, StoreError>;
}

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Time source for the catalog engine.
///
/// The engine stamps creation times and derives the publication-year upper
/// bound (current year plus one) from this interface, never from the wall
/// clock directly.
pub trait Clock {
    /// Returns the current moment.
    fn now(&self) -> Timestamp;

    /// Returns the current calendar year (UTC).
    fn current_year(&self) -> i32;
}
