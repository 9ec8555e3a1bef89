// lectern-core/src/runtime/chapters.rs
// ============================================================================
// Module: Lectern Chapter Service
// Description: CRUD operations for chapters nested under a book.
// Purpose: Orchestrate validation, hierarchy checks, and gateway calls.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Chapters are addressed as `books/{book}/chapters/{chapter}` and ordered
//! by chapter number (an ordering key, not enforced unique). The guard and
//! scoping rules mirror the book service one level down.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::entities::Chapter;
use crate::core::entities::ChapterDetail;
use crate::core::entities::NewChapter;
use crate::core::identifiers::BookId;
use crate::core::identifiers::ChapterId;
use crate::core::requests::ChapterDraft;
use crate::core::requests::ChapterPatch;
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
// SECTION: Chapter Operations
// ============================================================================

impl<S, C> Catalog<S, C>
where
    S: CatalogStore,
    C: Clock,
{
    /// Lists the chapters of a book, ordered by chapter number ascending.
    ///
    /// The child-count guard reports an empty book and a nonexistent book
    /// identically; the book row is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidIdentifier`] for a malformed book id,
    /// [`CatalogError::EmptyCollection`] when the book has no chapters, or
    /// [`CatalogError::Store`] on gateway failure.
    pub fn list_chapters(&self, book_id: &str) -> Result<Vec<Chapter>, CatalogError> {
        let id = BookId::parse_path(book_id)
            .map_err(|_| CatalogError::InvalidIdentifier(ParentKind::Book))?;
        ensure_children_exist(&self.store, ParentLink::Book(id))?;
        Ok(self.store.list_chapters(id)?)
    }

    /// Creates a chapter under a book, with the book id injected from the
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on field violations (checked
    /// first), [`CatalogError::InvalidIdentifier`] for a malformed book id,
    /// [`CatalogError::NotFound`] when the book row is absent, or
    /// [`CatalogError::Store`] when the insert fails.
    pub fn create_chapter(
        &self,
        book_id: &str,
        draft: &ChapterDraft,
    ) -> Result<Chapter, CatalogError> {
        let fields = draft.validate()?;
        let id = BookId::parse_path(book_id)
            .map_err(|_| CatalogError::InvalidIdentifier(ParentKind::Book))?;
        ensure_chain_exists(&self.store, &[ParentLink::Book(id)])?;
        Ok(self.store.insert_chapter(NewChapter {
            book_id: id,
            title: fields.title,
            chapter_number: fields.chapter_number,
            created_at: self.clock.now(),
        })?)
    }

    /// Returns a chapter with its pages eager-loaded, scoped to the book.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no chapter matches both ids
    /// (including a chapter under a different book), or
    /// [`CatalogError::Store`] on gateway failure.
    pub fn get_chapter(
        &self,
        book_id: &str,
        chapter_id: &str,
    ) -> Result<ChapterDetail, CatalogError> {
        let (book, id) = Self::chapter_path(book_id, chapter_id)?;
        let chapter = self
            .store
            .find_chapter(book, id)?
            .ok_or(CatalogError::NotFound(Resource::Chapter))?;
        let pages = self.store.list_pages(id)?;
        Ok(ChapterDetail {
            chapter,
            pages,
        })
    }

    /// Applies a partial update to a chapter, scoped to the book.
    /// Unsupplied fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on field violations (checked
    /// first), [`CatalogError::NotFound`] when no chapter matches both ids,
    /// or [`CatalogError::Store`] on gateway failure.
    pub fn update_chapter(
        &self,
        book_id: &str,
        chapter_id: &str,
        patch: &ChapterPatch,
    ) -> Result<Chapter, CatalogError> {
        let changes = patch.validate()?;
        let (book, id) = Self::chapter_path(book_id, chapter_id)?;
        self.store
            .update_chapter(book, id, changes)?
            .ok_or(CatalogError::NotFound(Resource::Chapter))
    }

    /// Deletes a chapter, scoped to the book. With cascade delete enabled
    /// the chapter's pages are removed first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no chapter matches both ids
    /// (the store is left unchanged), or [`CatalogError::Store`] on gateway
    /// failure.
    pub fn delete_chapter(&self, book_id: &str, chapter_id: &str) -> Result<(), CatalogError> {
        let (book, id) = Self::chapter_path(book_id, chapter_id)?;
        if self.store.find_chapter(book, id)?.is_none() {
            return Err(CatalogError::NotFound(Resource::Chapter));
        }
        if self.config.cascade_delete {
            self.purge_chapter_children(id)?;
        }
        self.store.delete_chapter(book, id)?;
        Ok(())
    }

    /// Parses the book/chapter path pair leniently: malformed ids match
    /// nothing and report the chapter as not found.
    fn chapter_path(
        book_id: &str,
        chapter_id: &str,
    ) -> Result<(BookId, ChapterId), CatalogError> {
        let book = BookId::parse_path(book_id)
            .map_err(|_| CatalogError::NotFound(Resource::Chapter))?;
        let id = ChapterId::parse_path(chapter_id)
            .map_err(|_| CatalogError::NotFound(Resource::Chapter))?;
        Ok((book, id))
    }
}
