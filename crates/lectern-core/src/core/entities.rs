// lectern-core/src/core/entities.rs
// ============================================================================
// Module: Lectern Catalog Entities
// Description: Plain data records for shelves, books, chapters, and pages.
// Purpose: Define the persisted catalog rows and their derived view payloads.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! Catalog entities are plain structs with no storage behavior attached;
//! persistence flows through the [`CatalogStore`](crate::interfaces::CatalogStore)
//! gateway. Each entity carries its parent id (except the root bookshelf) and
//! a creation timestamp stamped by the engine at insert time. Insert rows and
//! partial-change rows are separate types so the gateway never sees
//! unvalidated input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BookId;
use crate::core::identifiers::ChapterId;
use crate::core::identifiers::PageId;
use crate::core::identifiers::ShelfId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Persisted Rows
// ============================================================================

/// A bookshelf, the root of the catalog hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookshelf {
    /// Bookshelf identifier.
    pub id: ShelfId,
    /// Shelf name.
    pub name: String,
    /// Optional physical location.
    pub location: Option<String>,
    /// Creation timestamp.
    pub created_at: Timestamp,
}

/// A book owned by a bookshelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Book identifier.
    pub id: BookId,
    /// Owning bookshelf identifier.
    pub bookshelf_id: ShelfId,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Publication year.
    pub published_year: i32,
    /// Creation timestamp.
    pub created_at: Timestamp,
}

/// A chapter owned by a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter identifier.
    pub id: ChapterId,
    /// Owning book identifier.
    pub book_id: BookId,
    /// Chapter title.
    pub title: String,
    /// Ordering key within the book (not enforced unique).
    pub chapter_number: i32,
    /// Creation timestamp.
    pub created_at: Timestamp,
}

/// A page owned by a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page identifier.
    pub id: PageId,
    /// Owning chapter identifier.
    pub chapter_id: ChapterId,
    /// Ordering key within the chapter.
    pub page_number: i32,
    /// Page text content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: Insert Rows
// ============================================================================

/// Validated insert row for a bookshelf; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookshelf {
    /// Shelf name.
    pub name: String,
    /// Optional physical location.
    pub location: Option<String>,
    /// Creation timestamp stamped by the engine.
    pub created_at: Timestamp,
}

/// Validated insert row for a book; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    /// Owning bookshelf identifier (injected from the request path).
    pub bookshelf_id: ShelfId,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Publication year.
    pub published_year: i32,
    /// Creation timestamp stamped by the engine.
    pub created_at: Timestamp,
}

/// Validated insert row for a chapter; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChapter {
    /// Owning book identifier (injected from the request path).
    pub book_id: BookId,
    /// Chapter title.
    pub title: String,
    /// Ordering key within the book.
    pub chapter_number: i32,
    /// Creation timestamp stamped by the engine.
    pub created_at: Timestamp,
}

/// Validated insert row for a page; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    /// Owning chapter identifier (injected from the request path).
    pub chapter_id: ChapterId,
    /// Ordering key within the chapter.
    pub page_number: i32,
    /// Page text content.
    pub content: String,
    /// Creation timestamp stamped by the engine.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: Partial Changes
// ============================================================================

/// Validated partial update for a bookshelf. `None` fields are left
/// unchanged; `location` distinguishes "leave alone" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookshelfChanges {
    /// Replacement name, when supplied.
    pub name: Option<String>,
    /// Replacement location, when supplied (`Some(None)` clears it).
    pub location: Option<Option<String>>,
}

/// Validated partial update for a book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    /// Replacement title, when supplied.
    pub title: Option<String>,
    /// Replacement author, when supplied.
    pub author: Option<String>,
    /// Replacement publication year, when supplied.
    pub published_year: Option<i32>,
}

/// Validated partial update for a chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterChanges {
    /// Replacement title, when supplied.
    pub title: Option<String>,
    /// Replacement chapter number, when supplied.
    pub chapter_number: Option<i32>,
}

/// Validated partial update for a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageChanges {
    /// Replacement page number, when supplied.
    pub page_number: Option<i32>,
    /// Replacement content, when supplied.
    pub content: Option<String>,
}

// ============================================================================
// SECTION: Detail Views
// ============================================================================

/// A bookshelf with its books eager-loaded in natural store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookshelfDetail {
    /// The shelf row.
    #[serde(flatten)]
    pub shelf: Bookshelf,
    /// Books owned by the shelf.
    pub books: Vec<Book>,
}

/// A book with its chapters eager-loaded in natural store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetail {
    /// The book row.
    #[serde(flatten)]
    pub book: Book,
    /// Chapters owned by the book.
    pub chapters: Vec<Chapter>,
}

/// A chapter with its pages eager-loaded in natural store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterDetail {
    /// The chapter row.
    #[serde(flatten)]
    pub chapter: Chapter,
    /// Pages owned by the chapter.
    pub pages: Vec<Page>,
}

// ============================================================================
// SECTION: Aggregated Content
// ============================================================================

/// Chapter summary carried by the full-content payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    /// Chapter identifier.
    pub id: ChapterId,
    /// Chapter title.
    pub title: String,
    /// Ordering key within the book.
    pub chapter_number: i32,
}

impl From<&Chapter> for ChapterSummary {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id,
            title: chapter.title.clone(),
            chapter_number: chapter.chapter_number,
        }
    }
}

/// Assembled chapter content: summary plus concatenated page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterContent {
    /// Summary of the source chapter.
    pub chapter: ChapterSummary,
    /// Page contents joined in page-number order.
    pub content: String,
}
