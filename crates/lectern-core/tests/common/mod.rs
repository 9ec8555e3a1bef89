// lectern-core/tests/common/mod.rs
// =============================================================================
// Module: Catalog Test Helpers
// Description: Shared fixtures for catalog engine integration tests.
// Purpose: Reduce duplication across lectern-core test suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Seed helpers may panic on fixture setup failure."
)]

use lectern_core::Book;
use lectern_core::BookDraft;
use lectern_core::Bookshelf;
use lectern_core::BookshelfDraft;
use lectern_core::Catalog;
use lectern_core::CatalogConfig;
use lectern_core::Chapter;
use lectern_core::ChapterDraft;
use lectern_core::FixedClock;
use lectern_core::InMemoryCatalogStore;
use lectern_core::Page;
use lectern_core::PageDraft;
use lectern_core::Timestamp;

/// Calendar year pinned into every test clock.
pub const TEST_YEAR: i32 = 2026;

/// Moment pinned into every test clock.
pub const TEST_NOW: Timestamp = Timestamp::from_unix_millis(1_750_000_000_000);

/// Test engine type over the in-memory store and fixed clock.
pub type TestCatalog = Catalog<InMemoryCatalogStore, FixedClock>;

/// Builds an engine with default configuration (no cascade).
pub fn engine() -> TestCatalog {
    engine_with_config(CatalogConfig::default())
}

/// Builds an engine with explicit configuration.
pub fn engine_with_config(config: CatalogConfig) -> TestCatalog {
    Catalog::new(InMemoryCatalogStore::new(), FixedClock::new(TEST_NOW, TEST_YEAR), config)
}

/// Builds a shelf draft with the given name and no location.
pub fn shelf_draft(name: &str) -> BookshelfDraft {
    BookshelfDraft {
        name: Some(name.to_string()),
        location: None,
    }
}

/// Builds a book draft.
pub fn book_draft(title: &str, author: &str, published_year: i32) -> BookDraft {
    BookDraft {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        published_year: Some(published_year),
    }
}

/// Builds a chapter draft.
pub fn chapter_draft(title: &str, chapter_number: i32) -> ChapterDraft {
    ChapterDraft {
        title: Some(title.to_string()),
        chapter_number: Some(chapter_number),
    }
}

/// Builds a page draft.
pub fn page_draft(page_number: i32, content: &str) -> PageDraft {
    PageDraft {
        page_number: Some(page_number),
        content: Some(content.to_string()),
    }
}

/// Creates a shelf through the engine.
pub fn seed_shelf(catalog: &TestCatalog, name: &str) -> Bookshelf {
    catalog.create_shelf(&shelf_draft(name)).unwrap()
}

/// Creates a book under the shelf through the engine.
pub fn seed_book(
    catalog: &TestCatalog,
    shelf: &Bookshelf,
    title: &str,
    author: &str,
    published_year: i32,
) -> Book {
    catalog
        .create_book(&shelf.id.to_string(), &book_draft(title, author, published_year))
        .unwrap()
}

/// Creates a chapter under the book through the engine.
pub fn seed_chapter(
    catalog: &TestCatalog,
    book: &Book,
    title: &str,
    chapter_number: i32,
) -> Chapter {
    catalog
        .create_chapter(&book.id.to_string(), &chapter_draft(title, chapter_number))
        .unwrap()
}

/// Creates a page under the chapter through the engine.
pub fn seed_page(
    catalog: &TestCatalog,
    chapter: &Chapter,
    page_number: i32,
    content: &str,
) -> Page {
    catalog
        .create_page(&chapter.id.to_string(), &page_draft(page_number, content))
        .unwrap()
}
