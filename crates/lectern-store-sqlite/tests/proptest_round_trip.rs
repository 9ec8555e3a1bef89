// lectern-store-sqlite/tests/proptest_round_trip.rs
// ============================================================================
// Module: SQLite Round-Trip Property Tests
// Description: Property tests for content fidelity and ordering stability.
// Purpose: Detect data mangling across wide input ranges.
// ============================================================================

//! Property-based tests for the `SQLite` gateway.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use lectern_core::CatalogStore;
use lectern_core::NewBookshelf;
use lectern_core::NewChapter;
use lectern_core::NewPage;
use lectern_core::Timestamp;
use lectern_store_sqlite::SqliteCatalogStore;
use lectern_store_sqlite::SqliteStoreConfig;
use proptest::prelude::*;
use tempfile::TempDir;

/// Creation stamp used across fixtures.
const NOW: Timestamp = Timestamp::from_unix_millis(1_000);

proptest! {
    // SQLite setup per case is slow; keep the case count modest.
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Arbitrary unicode page content survives a store round-trip intact.
    #[test]
    fn page_content_round_trips(content in "\\PC{1,64}") {
        let dir = TempDir::new().unwrap();
        let store = SqliteCatalogStore::new(
            SqliteStoreConfig::for_path(dir.path().join("catalog.db")),
        ).unwrap();

        let shelf = store.insert_shelf(NewBookshelf {
            name: "Fixture".to_string(),
            location: None,
            created_at: NOW,
        }).unwrap();
        let book = store.insert_book(lectern_core::NewBook {
            bookshelf_id: shelf.id,
            title: "Fixture".to_string(),
            author: "Fixture".to_string(),
            published_year: 2000,
            created_at: NOW,
        }).unwrap();
        let chapter = store.insert_chapter(NewChapter {
            book_id: book.id,
            title: "Fixture".to_string(),
            chapter_number: 1,
            created_at: NOW,
        }).unwrap();
        let page = store.insert_page(NewPage {
            chapter_id: chapter.id,
            page_number: 1,
            content: content.clone(),
            created_at: NOW,
        }).unwrap();

        let found = store.find_page(chapter.id, page.id).unwrap().unwrap();
        prop_assert_eq!(found.content, content);
    }

    /// Page listings are ordered by page number with stable insertion-order
    /// ties, regardless of insertion order.
    #[test]
    fn page_listing_is_stably_ordered(numbers in prop::collection::vec(1 .. 6i32, 1 .. 10)) {
        let dir = TempDir::new().unwrap();
        let store = SqliteCatalogStore::new(
            SqliteStoreConfig::for_path(dir.path().join("catalog.db")),
        ).unwrap();

        let shelf = store.insert_shelf(NewBookshelf {
            name: "Fixture".to_string(),
            location: None,
            created_at: NOW,
        }).unwrap();
        let book = store.insert_book(lectern_core::NewBook {
            bookshelf_id: shelf.id,
            title: "Fixture".to_string(),
            author: "Fixture".to_string(),
            published_year: 2000,
            created_at: NOW,
        }).unwrap();
        let chapter = store.insert_chapter(NewChapter {
            book_id: book.id,
            title: "Fixture".to_string(),
            chapter_number: 1,
            created_at: NOW,
        }).unwrap();

        for (index, number) in numbers.iter().enumerate() {
            store.insert_page(NewPage {
                chapter_id: chapter.id,
                page_number: *number,
                content: format!("insert-{index}"),
                created_at: NOW,
            }).unwrap();
        }

        let mut expected: Vec<(i32, usize)> =
            numbers.iter().copied().enumerate().map(|(index, number)| (number, index)).collect();
        expected.sort_by_key(|(number, _)| *number);

        let listed: Vec<(i32, String)> = store
            .list_pages(chapter.id)
            .unwrap()
            .into_iter()
            .map(|page| (page.page_number, page.content))
            .collect();

        prop_assert_eq!(listed.len(), expected.len());
        for ((number, index), (listed_number, listed_content)) in
            expected.into_iter().zip(listed)
        {
            prop_assert_eq!(number, listed_number);
            prop_assert_eq!(format!("insert-{index}"), listed_content);
        }
    }
}
