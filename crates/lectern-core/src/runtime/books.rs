// lectern-core/src/runtime/books.rs
// ============================================================================
// Module: Lectern Book Service
// Description: CRUD operations for books nested under a bookshelf.
// Purpose: Orchestrate validation, hierarchy checks, and gateway calls.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Books are addressed as `bookshelves/{shelf}/books/{book}`. Listing runs
//! the strict-id and child-count guards; creation validates the body, then
//! the path id, then the shelf row itself; `get`/`update`/`delete` are
//! shelf-scoped throughout, so a book id under the wrong shelf reads as
//! not found.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::entities::Book;
use crate::core::entities::BookDetail;
use crate::core::entities::NewBook;
use crate::core::identifiers::BookId;
use crate::core::identifiers::ShelfId;
use crate::core::requests::BookDraft;
use crate::core::requests::BookPatch;
use crate::interfaces::CatalogStore;
use crate::interfaces::Clock;
use crate::runtime::catalog::Catalog;
use crate::runtime::catalog::CatalogError;
use crate::runtime::catalog::ParentKind;
use crate::runtime::catalog::Resource;
use crate::runtime::hierarchy::ParentLink;
use crate::runtime::hierarchy::ensure_chain_exists;
use crate::runtime::hierarchy::ensure_children_exist;

// ============================================================================
// SECTION: Book Operations
// ============================================================================

impl<S, C> Catalog<S, C>
where
    S: CatalogStore,
    C: Clock,
{
    /// Lists the books of a shelf, ordered by published year descending.
    ///
    /// The child-count guard reports an empty shelf and a nonexistent shelf
    /// identically; the shelf row is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidIdentifier`] for a malformed shelf id,
    /// [`CatalogError::EmptyCollection`] when the shelf has no books, or
    /// [`CatalogError::Store`] on gateway failure.
    pub fn list_books(&self, shelf_id: &str) -> Result<Vec<Book>, CatalogError> {
        let id = ShelfId::parse_path(shelf_id)
            .map_err(|_| CatalogError::InvalidIdentifier(ParentKind::Bookshelf))?;
        ensure_children_exist(&self.store, ParentLink::Shelf(id))?;
        Ok(self.store.list_books(id)?)
    }

    /// Creates a book under a shelf, with the shelf id injected from the
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on field violations (checked
    /// first), [`CatalogError::InvalidIdentifier`] for a malformed shelf id,
    /// [`CatalogError::NotFound`] when the shelf row is absent, or
    /// [`CatalogError::Store`] when the insert fails.
    pub fn create_book(&self, shelf_id: &str, draft: &BookDraft) -> Result<Book, CatalogError> {
        let fields = draft.validate(self.max_published_year())?;
        let id = ShelfId::parse_path(shelf_id)
            .map_err(|_| CatalogError::InvalidIdentifier(ParentKind::Bookshelf))?;
        ensure_chain_exists(&self.store, &[ParentLink::Shelf(id)])?;
        Ok(self.store.insert_book(NewBook {
            bookshelf_id: id,
            title: fields.title,
            author: fields.author,
            published_year: fields.published_year,
            created_at: self.clock.now(),
        })?)
    }

    /// Returns a book with its chapters eager-loaded, scoped to the shelf.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no book matches both ids
    /// (including a book that exists under a different shelf), or
    /// [`CatalogError::Store`] on gateway failure.
    pub fn get_book(&self, shelf_id: &str, book_id: &str) -> Result<BookDetail, CatalogError> {
        let (shelf, id) = Self::book_path(shelf_id, book_id)?;
        let book = self
            .store
            .find_book(shelf, id)?
            .ok_or(CatalogError::NotFound(Resource::Book))?;
        let chapters = self.store.list_chapters(id)?;
        Ok(BookDetail {
            book,
            chapters,
        })
    }

    /// Applies a partial update to a book, scoped to the shelf. Unsupplied
    /// fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on field violations (checked
    /// first), [`CatalogError::NotFound`] when no book matches both ids, or
    /// [`CatalogError::Store`] on gateway failure.
    pub fn update_book(
        &self,
        shelf_id: &str,
        book_id: &str,
        patch: &BookPatch,
    ) -> Result<Book, CatalogError> {
        let changes = patch.validate(self.max_published_year())?;
        let (shelf, id) = Self::book_path(shelf_id, book_id)?;
        self.store
            .update_book(shelf, id, changes)?
            .ok_or(CatalogError::NotFound(Resource::Book))
    }

    /// Deletes a book, scoped to the shelf. With cascade delete enabled the
    /// book's chapters and pages are removed first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no book matches both ids
    /// (the store is left unchanged), or [`CatalogError::Store`] on gateway
    /// failure.
    pub fn delete_book(&self, shelf_id: &str, book_id: &str) -> Result<(), CatalogError> {
        let (shelf, id) = Self::book_path(shelf_id, book_id)?;
        if self.store.find_book(shelf, id)?.is_none() {
            return Err(CatalogError::NotFound(Resource::Book));
        }
        if self.config.cascade_delete {
            self.purge_book_children(id)?;
        }
        self.store.delete_book(shelf, id)?;
        Ok(())
    }

    /// Parses the shelf/book path pair leniently: malformed ids match
    /// nothing and report the book as not found.
    fn book_path(shelf_id: &str, book_id: &str) -> Result<(ShelfId, BookId), CatalogError> {
        let shelf = ShelfId::parse_path(shelf_id)
            .map_err(|_| CatalogError::NotFound(Resource::Book))?;
        let id =
            BookId::parse_path(book_id).map_err(|_| CatalogError::NotFound(Resource::Book))?;
        Ok((shelf, id))
    }
}
