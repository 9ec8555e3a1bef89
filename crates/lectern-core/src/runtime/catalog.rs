// lectern-core/src/runtime/catalog.rs
// ============================================================================
// Module: Lectern Catalog Engine
// Description: Engine state, configuration, and the operation error taxonomy.
// Purpose: Anchor the resource services that orchestrate gateway calls.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! [`Catalog`] is the single canonical execution path for catalog
//! operations. Hosts (HTTP routers, CLIs, tests) call its methods with raw
//! path parameters and deserialized payloads; the engine validates, runs the
//! hierarchy checks, orchestrates the persistence gateway, and returns typed
//! results or a [`CatalogError`]. An operation either fully succeeds or
//! fails with no side effects; the engine performs no retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::BookId;
use crate::core::identifiers::ChapterId;
use crate::core::validate::ValidationError;
use crate::interfaces::CatalogStore;
use crate::interfaces::Clock;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Resource Naming
// ============================================================================

/// Catalog resource kinds, used for not-found reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A bookshelf row.
    Bookshelf,
    /// A book row.
    Book,
    /// A chapter row.
    Chapter,
    /// A page row.
    Page,
}

impl Resource {
    /// Returns the caller-facing not-found message for the resource.
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::Bookshelf => "Shelf not found",
            Self::Book => "Book not found",
            Self::Chapter => "Chapter not found",
            Self::Page => "Page not found",
        }
    }
}

/// Parent positions in the hierarchy, used by identifier and child-count
/// guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    /// A bookshelf parenting books.
    Bookshelf,
    /// A book parenting chapters.
    Book,
    /// A chapter parenting pages.
    Chapter,
}

impl ParentKind {
    /// Returns the caller-facing message for a malformed parent id.
    #[must_use]
    pub const fn invalid_id_message(self) -> &'static str {
        match self {
            Self::Bookshelf => "Invalid bookshelf ID",
            Self::Book => "Invalid book ID",
            Self::Chapter => "Invalid chapter ID",
        }
    }

    /// Returns the caller-facing message for a parent with no children.
    #[must_use]
    pub const fn empty_children_message(self) -> &'static str {
        match self {
            Self::Bookshelf => "There are no books in this bookshelf",
            Self::Book => "There are no chapters in this book",
            Self::Chapter => "There are no pages in this chapter",
        }
    }

    /// Returns the resource reported when the parent row itself is missing.
    #[must_use]
    pub const fn as_resource(self) -> Resource {
        match self {
            Self::Bookshelf => Resource::Bookshelf,
            Self::Book => Resource::Book,
            Self::Chapter => Resource::Chapter,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog operation errors.
///
/// The `Display` form of each variant is the caller-facing envelope message;
/// status mapping lives in [`crate::envelope`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A path identifier was non-numeric or not positive.
    #[error("{}", .0.invalid_id_message())]
    InvalidIdentifier(ParentKind),
    /// A field constraint was violated; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The addressed row does not exist under the declared parent.
    #[error("{}", .0.not_found_message())]
    NotFound(Resource),
    /// A child listing found zero rows for the parent id. The guard counts
    /// children only and does not verify the parent row exists.
    #[error("{}", .0.empty_children_message())]
    EmptyCollection(ParentKind),
    /// The persistence gateway failed; surfaced as-is, never retried.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Engine Configuration
// ============================================================================

/// Configuration for the catalog engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// When true, deleting a shelf, book, or chapter also removes its
    /// descendants through the gateway. Off by default: deletion removes
    /// only the targeted row and orphaned descendants are possible.
    pub cascade_delete: bool,
}

// ============================================================================
// SECTION: Catalog Engine
// ============================================================================

/// Catalog engine implementing the resource services, content aggregation,
/// and search over a persistence gateway.
pub struct Catalog<S, C> {
    /// Persistence gateway implementation.
    pub(crate) store: S,
    /// Time source for creation stamps and the publication-year bound.
    pub(crate) clock: C,
    /// Engine configuration.
    pub(crate) config: CatalogConfig,
}

impl<S, C> Catalog<S, C>
where
    S: CatalogStore,
    C: Clock,
{
    /// Creates a new catalog engine.
    #[must_use]
    pub const fn new(store: S, clock: C, config: CatalogConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Returns the inclusive upper bound for publication years: the current
    /// calendar year plus one.
    pub(crate) fn max_published_year(&self) -> i32 {
        self.clock.current_year().saturating_add(1)
    }

    /// Removes every chapter and page beneath a book (cascade delete).
    pub(crate) fn purge_book_children(&self, book_id: BookId) -> Result<(), CatalogError> {
        for chapter in self.store.list_chapters(book_id)? {
            self.purge_chapter_children(chapter.id)?;
            self.store.delete_chapter(book_id, chapter.id)?;
        }
        Ok(())
    }

    /// Removes every page beneath a chapter (cascade delete).
    pub(crate) fn purge_chapter_children(&self, chapter_id: ChapterId) -> Result<(), CatalogError> {
        for page in self.store.list_pages(chapter_id)? {
            self.store.delete_page(chapter_id, page.id)?;
        }
        Ok(())
    }
}
