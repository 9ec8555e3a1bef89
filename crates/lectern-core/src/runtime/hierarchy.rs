// lectern-core/src/runtime/hierarchy.rs
// ============================================================================
// Module: Lectern Hierarchy Validator
// Description: Parent-existence and child-count checks for nested resources.
// Purpose: Guard operations on a child behind validation of its parent chain.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Nested operations carry parent constraints taken from the request path.
//! [`ensure_parent_exists`] confirms the parent row is present before a
//! child is created under it; [`ensure_chain_exists`] walks a list of links
//! root-first for deeper nesting. [`ensure_children_exist`] is the listing
//! guard: it counts child rows only and deliberately does not verify the
//! parent row, so listing an existing-but-empty parent and listing a
//! nonexistent parent report the same empty-collection failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::BookId;
use crate::core::identifiers::ChapterId;
use crate::core::identifiers::ShelfId;
use crate::interfaces::CatalogStore;
use crate::runtime::catalog::CatalogError;
use crate::runtime::catalog::ParentKind;

// ============================================================================
// SECTION: Parent Links
// ============================================================================

/// One parsed (parent kind, parent id) constraint from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLink {
    /// A bookshelf constraining its books.
    Shelf(ShelfId),
    /// A book constraining its chapters.
    Book(BookId),
    /// A chapter constraining its pages.
    Chapter(ChapterId),
}

impl ParentLink {
    /// Returns the parent kind of the link.
    #[must_use]
    pub const fn kind(self) -> ParentKind {
        match self {
            Self::Shelf(_) => ParentKind::Bookshelf,
            Self::Book(_) => ParentKind::Book,
            Self::Chapter(_) => ParentKind::Chapter,
        }
    }
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Confirms the linked parent row exists.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] for the parent's resource when the row
/// is absent, or [`CatalogError::Store`] when the lookup fails.
pub fn ensure_parent_exists<S: CatalogStore>(
    store: &S,
    link: ParentLink,
) -> Result<(), CatalogError> {
    let present = match link {
        ParentLink::Shelf(id) => store.find_shelf(id)?.is_some(),
        ParentLink::Book(id) => store.find_book_by_id(id)?.is_some(),
        ParentLink::Chapter(id) => store.find_chapter_by_id(id)?.is_some(),
    };
    if present {
        Ok(())
    } else {
        Err(CatalogError::NotFound(link.kind().as_resource()))
    }
}

/// Confirms every link in a parent chain exists, root first.
///
/// # Errors
///
/// Returns the first failing link's error; see [`ensure_parent_exists`].
pub fn ensure_chain_exists<S: CatalogStore>(
    store: &S,
    chain: &[ParentLink],
) -> Result<(), CatalogError> {
    for link in chain {
        ensure_parent_exists(store, *link)?;
    }
    Ok(())
}

/// Listing guard: confirms the linked parent has at least one child row.
///
/// The parent row itself is not consulted.
///
/// # Errors
///
/// Returns [`CatalogError::EmptyCollection`] when the child count is zero,
/// or [`CatalogError::Store`] when the count fails.
pub fn ensure_children_exist<S: CatalogStore>(
    store: &S,
    link: ParentLink,
) -> Result<(), CatalogError> {
    let count = match link {
        ParentLink::Shelf(id) => store.count_books(id)?,
        ParentLink::Book(id) => store.count_chapters(id)?,
        ParentLink::Chapter(id) => store.count_pages(id)?,
    };
    if count == 0 {
        Err(CatalogError::EmptyCollection(link.kind()))
    } else {
        Ok(())
    }
}
