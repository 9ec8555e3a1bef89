// lectern-core/src/core/mod.rs
// ============================================================================
// Module: Lectern Core Types
// Description: Identifiers, entities, request payloads, validation, and time.
// Purpose: Define the canonical data surface of the catalog.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core modules define the catalog's data types: typed identifiers, plain
//! entity rows, request drafts and patches with their validation rules, and
//! the host-supplied time model. Nothing here touches storage; persistence
//! is reached only through [`crate::interfaces`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod entities;
pub mod identifiers;
pub mod requests;
pub mod time;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use entities::Book;
pub use entities::BookChanges;
pub use entities::BookDetail;
pub use entities::Bookshelf;
pub use entities::BookshelfChanges;
pub use entities::BookshelfDetail;
pub use entities::Chapter;
pub use entities::ChapterChanges;
pub use entities::ChapterContent;
pub use entities::ChapterDetail;
pub use entities::ChapterSummary;
pub use entities::NewBook;
pub use entities::NewBookshelf;
pub use entities::NewChapter;
pub use entities::NewPage;
pub use entities::Page;
pub use entities::PageChanges;
pub use identifiers::BookId;
pub use identifiers::ChapterId;
pub use identifiers::IdentifierError;
pub use identifiers::PageId;
pub use identifiers::ShelfId;
pub use requests::BookDraft;
pub use requests::BookPatch;
pub use requests::BookshelfDraft;
pub use requests::BookshelfPatch;
pub use requests::ChapterDraft;
pub use requests::ChapterPatch;
pub use requests::FieldPatch;
pub use requests::PageDraft;
pub use requests::PagePatch;
pub use requests::SearchRequest;
pub use time::Timestamp;
pub use validate::FieldViolation;
pub use validate::MAX_TEXT_LENGTH;
pub use validate::MIN_PUBLISHED_YEAR;
pub use validate::ValidationError;
