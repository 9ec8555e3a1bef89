// lectern-core/src/runtime/pages.rs
// ============================================================================
// Module: Lectern Page Service
// Description: CRUD operations for pages nested under a chapter.
// Purpose: Orchestrate validation, hierarchy checks, and gateway calls.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Pages are the leaves of the hierarchy, addressed as
//! `chapters/{chapter}/pages/{page}` and ordered by page number. Every
//! scoped operation filters by the chapter id from the path; a page id under
//! a different chapter reads as not found.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::entities::NewPage;
use crate::core::entities::Page;
use crate::core::identifiers::ChapterId;
use crate::core::identifiers::PageId;
use crate::core::requests::PageDraft;
use crate::core::requests::PagePatch;
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
// SECTION: Page Operations
// ============================================================================

impl<S, C> Catalog<S, C>
where
    S: CatalogStore,
    C: Clock,
{
    /// Lists the pages of a chapter, ordered by page number ascending.
    ///
    /// The child-count guard reports an empty chapter and a nonexistent
    /// chapter identically; the chapter row is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidIdentifier`] for a malformed chapter
    /// id, [`CatalogError::EmptyCollection`] when the chapter has no pages,
    /// or [`CatalogError::Store`] on gateway failure.
    pub fn list_pages(&self, chapter_id: &str) -> Result<Vec<Page>, CatalogError> {
        let id = ChapterId::parse_path(chapter_id)
            .map_err(|_| CatalogError::InvalidIdentifier(ParentKind::Chapter))?;
        ensure_children_exist(&self.store, ParentLink::Chapter(id))?;
        Ok(self.store.list_pages(id)?)
    }

    /// Creates a page under a chapter, with the chapter id injected from
    /// the path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on field violations (checked
    /// first), [`CatalogError::InvalidIdentifier`] for a malformed chapter
    /// id, [`CatalogError::NotFound`] when the chapter row is absent, or
    /// [`CatalogError::Store`] when the insert fails.
    pub fn create_page(&self, chapter_id: &str, draft: &PageDraft) -> Result<Page, CatalogError> {
        let fields = draft.validate()?;
        let id = ChapterId::parse_path(chapter_id)
            .map_err(|_| CatalogError::InvalidIdentifier(ParentKind::Chapter))?;
        ensure_chain_exists(&self.store, &[ParentLink::Chapter(id)])?;
        Ok(self.store.insert_page(NewPage {
            chapter_id: id,
            page_number: fields.page_number,
            content: fields.content,
            created_at: self.clock.now(),
        })?)
    }

    /// Returns a page, scoped to the chapter.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no page matches both ids
    /// (including a page under a different chapter), or
    /// [`CatalogError::Store`] on gateway failure.
    pub fn get_page(&self, chapter_id: &str, page_id: &str) -> Result<Page, CatalogError> {
        let (chapter, id) = Self::page_path(chapter_id, page_id)?;
        self.store
            .find_page(chapter, id)?
            .ok_or(CatalogError::NotFound(Resource::Page))
    }

    /// Applies a partial update to a page, scoped to the chapter.
    /// Unsupplied fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on field violations (checked
    /// first), [`CatalogError::NotFound`] when no page matches both ids, or
    /// [`CatalogError::Store`] on gateway failure.
    pub fn update_page(
        &self,
        chapter_id: &str,
        page_id: &str,
        patch: &PagePatch,
    ) -> Result<Page, CatalogError> {
        let changes = patch.validate()?;
        let (chapter, id) = Self::page_path(chapter_id, page_id)?;
        self.store
            .update_page(chapter, id, changes)?
            .ok_or(CatalogError::NotFound(Resource::Page))
    }

    /// Deletes a page, scoped to the chapter.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no page matches both ids
    /// (the store is left unchanged), or [`CatalogError::Store`] on gateway
    /// failure.
    pub fn delete_page(&self, chapter_id: &str, page_id: &str) -> Result<(), CatalogError> {
        let (chapter, id) = Self::page_path(chapter_id, page_id)?;
        if self.store.find_page(chapter, id)?.is_none() {
            return Err(CatalogError::NotFound(Resource::Page));
        }
        self.store.delete_page(chapter, id)?;
        Ok(())
    }

    /// Parses the chapter/page path pair leniently: malformed ids match
    /// nothing and report the page as not found.
    fn page_path(chapter_id: &str, page_id: &str) -> Result<(ChapterId, PageId), CatalogError> {
        let chapter = ChapterId::parse_path(chapter_id)
            .map_err(|_| CatalogError::NotFound(Resource::Page))?;
        let id =
            PageId::parse_path(page_id).map_err(|_| CatalogError::NotFound(Resource::Page))?;
        Ok((chapter, id))
    }
}
