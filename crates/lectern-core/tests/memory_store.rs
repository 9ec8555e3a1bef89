// lectern-core/tests/memory_store.rs
// ============================================================================
// Module: In-Memory Store Tests
// Description: Tests for the in-memory catalog store implementation.
// Purpose: Validate gateway contracts directly, below the engine.
// ============================================================================
//! ## Overview
//! Ensures the in-memory store honors the gateway contracts the engine
//! relies on: monotonic id assignment, scoped lookups, ordered listings,
//! and the shared wrapper's delegation.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use lectern_core::BookChanges;
use lectern_core::CatalogStore;
use lectern_core::InMemoryCatalogStore;
use lectern_core::NewBook;
use lectern_core::NewBookshelf;
use lectern_core::SharedCatalogStore;
use lectern_core::ShelfId;
use lectern_core::Timestamp;

/// Creation stamp used across fixtures.
const NOW: Timestamp = Timestamp::from_unix_millis(1_000);

/// Builds a shelf insert row.
fn shelf_row(name: &str) -> NewBookshelf {
    NewBookshelf {
        name: name.to_string(),
        location: None,
        created_at: NOW,
    }
}

/// Builds a book insert row under the shelf.
fn book_row(shelf: ShelfId, title: &str, year: i32) -> NewBook {
    NewBook {
        bookshelf_id: shelf,
        title: title.to_string(),
        author: "Author".to_string(),
        published_year: year,
        created_at: NOW,
    }
}

/// Verifies ids are assigned monotonically from 1.
#[test]
fn insert_assigns_monotonic_ids() {
    let store = InMemoryCatalogStore::new();
    let first = store.insert_shelf(shelf_row("A")).unwrap();
    let second = store.insert_shelf(shelf_row("B")).unwrap();
    assert_eq!(first.id.get(), 1);
    assert_eq!(second.id.get(), 2);
}

/// Verifies scoped find filters by the parent id.
#[test]
fn find_book_is_parent_scoped() {
    let store = InMemoryCatalogStore::new();
    let shelf_a = store.insert_shelf(shelf_row("A")).unwrap();
    let shelf_b = store.insert_shelf(shelf_row("B")).unwrap();
    let book = store.insert_book(book_row(shelf_a.id, "Dune", 1965)).unwrap();

    assert!(store.find_book(shelf_a.id, book.id).unwrap().is_some());
    assert!(store.find_book(shelf_b.id, book.id).unwrap().is_none());
    assert!(store.find_book_by_id(book.id).unwrap().is_some());
}

/// Verifies counts observe the parent filter.
#[test]
fn count_books_is_parent_scoped() {
    let store = InMemoryCatalogStore::new();
    let shelf_a = store.insert_shelf(shelf_row("A")).unwrap();
    let shelf_b = store.insert_shelf(shelf_row("B")).unwrap();
    store.insert_book(book_row(shelf_a.id, "Dune", 1965)).unwrap();

    assert_eq!(store.count_books(shelf_a.id).unwrap(), 1);
    assert_eq!(store.count_books(shelf_b.id).unwrap(), 0);
}

/// Verifies partial update touches only supplied fields and misses return
/// `None`.
#[test]
fn update_book_partial_and_scoped() {
    let store = InMemoryCatalogStore::new();
    let shelf = store.insert_shelf(shelf_row("A")).unwrap();
    let book = store.insert_book(book_row(shelf.id, "Dune", 1965)).unwrap();

    let updated = store
        .update_book(
            shelf.id,
            book.id,
            BookChanges {
                title: Some("Dune Messiah".to_string()),
                author: None,
                published_year: None,
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.author, "Author");
    assert_eq!(updated.published_year, 1965);

    let other_shelf = store.insert_shelf(shelf_row("B")).unwrap();
    let missed =
        store.update_book(other_shelf.id, book.id, BookChanges::default()).unwrap();
    assert!(missed.is_none());
}

/// Verifies search order follows insertion (natural) order.
#[test]
fn search_returns_natural_order() {
    let store = InMemoryCatalogStore::new();
    let shelf = store.insert_shelf(shelf_row("A")).unwrap();
    store.insert_book(book_row(shelf.id, "Dune Messiah", 1969)).unwrap();
    store.insert_book(book_row(shelf.id, "Dune", 1965)).unwrap();

    let titles: Vec<String> = store
        .search_books("dune")
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, ["Dune Messiah", "Dune"]);
}

/// Verifies the shared wrapper delegates to the wrapped store.
#[test]
fn shared_store_delegates() {
    let inner = InMemoryCatalogStore::new();
    let shared = SharedCatalogStore::from_store(inner);
    let shelf = shared.insert_shelf(shelf_row("A")).unwrap();
    assert!(shared.find_shelf(shelf.id).unwrap().is_some());
    assert_eq!(shared.list_shelves().unwrap().len(), 1);

    let clone = shared.clone();
    assert_eq!(clone.list_shelves().unwrap().len(), 1);
}
