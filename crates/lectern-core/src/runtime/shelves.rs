// lectern-core/src/runtime/shelves.rs
// ============================================================================
// Module: Lectern Shelf Service
// Description: CRUD operations for bookshelves, the hierarchy root.
// Purpose: Orchestrate validation and gateway calls for shelf requests.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Bookshelves are the root resource: listing is unguarded (an empty catalog
//! lists as an empty success), `get` eager-loads the shelf's books, and
//! `update` locates the row before validating the patch, so a missing shelf
//! reports not-found even when the payload is also invalid.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::entities::Bookshelf;
use crate::core::entities::BookshelfDetail;
use crate::core::identifiers::ShelfId;
use crate::core::requests::BookshelfDraft;
use crate::core::requests::BookshelfPatch;
use crate::interfaces::CatalogStore;
use crate::interfaces::Clock;
use crate::runtime::catalog::Catalog;
use crate::runtime::catalog::CatalogError;
use crate::runtime::catalog::Resource;

// ============================================================================
// SECTION: Shelf Operations
// ============================================================================

impl<S, C> Catalog<S, C>
where
    S: CatalogStore,
    C: Clock,
{
    /// Lists every bookshelf, ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] when the gateway fails.
    pub fn list_shelves(&self) -> Result<Vec<Bookshelf>, CatalogError> {
        Ok(self.store.list_shelves()?)
    }

    /// Creates a bookshelf. An omitted location persists as null.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on field violations, or
    /// [`CatalogError::Store`] when the insert fails.
    pub fn create_shelf(&self, draft: &BookshelfDraft) -> Result<Bookshelf, CatalogError> {
        let row = draft.validate(self.clock.now())?;
        Ok(self.store.insert_shelf(row)?)
    }

    /// Returns a bookshelf with its books eager-loaded.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the shelf does not exist (a
    /// malformed id matches nothing), or [`CatalogError::Store`] on gateway
    /// failure.
    pub fn get_shelf(&self, shelf_id: &str) -> Result<BookshelfDetail, CatalogError> {
        let id = ShelfId::parse_path(shelf_id)
            .map_err(|_| CatalogError::NotFound(Resource::Bookshelf))?;
        let shelf = self
            .store
            .find_shelf(id)?
            .ok_or(CatalogError::NotFound(Resource::Bookshelf))?;
        let books = self.store.list_books(id)?;
        Ok(BookshelfDetail {
            shelf,
            books,
        })
    }

    /// Applies a partial update to a bookshelf. Unsupplied fields are left
    /// unchanged; an explicit null location clears the column.
    ///
    /// The shelf is located before the patch is validated, so a missing
    /// shelf wins over an invalid payload.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the shelf does not exist,
    /// [`CatalogError::Validation`] on field violations, or
    /// [`CatalogError::Store`] on gateway failure.
    pub fn update_shelf(
        &self,
        shelf_id: &str,
        patch: &BookshelfPatch,
    ) -> Result<Bookshelf, CatalogError> {
        let id = ShelfId::parse_path(shelf_id)
            .map_err(|_| CatalogError::NotFound(Resource::Bookshelf))?;
        if self.store.find_shelf(id)?.is_none() {
            return Err(CatalogError::NotFound(Resource::Bookshelf));
        }
        let changes = patch.validate()?;
        self.store
            .update_shelf(id, changes)?
            .ok_or(CatalogError::NotFound(Resource::Bookshelf))
    }

    /// Deletes a bookshelf. With cascade delete enabled the shelf's books,
    /// their chapters, and their pages are removed first; otherwise only the
    /// shelf row goes and descendants are orphaned.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the shelf does not exist (the
    /// store is left unchanged), or [`CatalogError::Store`] on gateway
    /// failure.
    pub fn delete_shelf(&self, shelf_id: &str) -> Result<(), CatalogError> {
        let id = ShelfId::parse_path(shelf_id)
            .map_err(|_| CatalogError::NotFound(Resource::Bookshelf))?;
        if self.store.find_shelf(id)?.is_none() {
            return Err(CatalogError::NotFound(Resource::Bookshelf));
        }
        if self.config.cascade_delete {
            for book in self.store.list_books(id)? {
                self.purge_book_children(book.id)?;
                self.store.delete_book(id, book.id)?;
            }
        }
        self.store.delete_shelf(id)?;
        Ok(())
    }
}
