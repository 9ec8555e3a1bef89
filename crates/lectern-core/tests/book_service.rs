// lectern-core/tests/book_service.rs
// ============================================================================
// Module: Book Service Tests
// Description: Tests for shelf-scoped book CRUD through the catalog engine.
// Purpose: Validate the listing guards, creation chain, parent scoping, and
//          partial updates on the first nested level.
// ============================================================================
//! ## Overview
//! Books carry the full guard set: strict parent-id parsing on list/create,
//! the child-count listing guard, parent-existence validation on create, and
//! uniform shelf scoping on every addressed operation.

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

use lectern_core::BookPatch;
use lectern_core::CatalogError;
use lectern_core::FieldPatch;
use lectern_core::ParentKind;
use lectern_core::Resource;

mod common;

/// Verifies a malformed shelf id on list reports the invalid-identifier
/// failure with the original message.
#[test]
fn list_books_rejects_malformed_shelf_id() {
    let catalog = common::engine();
    for raw in ["abc", "0", "-1", ""] {
        let error = catalog.list_books(raw).unwrap_err();
        assert!(matches!(error, CatalogError::InvalidIdentifier(ParentKind::Bookshelf)));
        assert_eq!(error.to_string(), "Invalid bookshelf ID");
    }
}

/// Verifies an existing-but-empty shelf and a nonexistent shelf produce the
/// same empty-collection failure on list.
#[test]
fn list_books_empty_and_missing_parent_are_identical() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");

    let on_empty = catalog.list_books(&shelf.id.to_string()).unwrap_err();
    let on_missing = catalog.list_books("999").unwrap_err();
    assert!(matches!(on_empty, CatalogError::EmptyCollection(ParentKind::Bookshelf)));
    assert!(matches!(on_missing, CatalogError::EmptyCollection(ParentKind::Bookshelf)));
    assert_eq!(on_empty.to_string(), "There are no books in this bookshelf");
    assert_eq!(on_empty.to_string(), on_missing.to_string());
}

/// Verifies books list ordered by published year descending.
#[test]
fn list_books_orders_by_year_descending() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);
    common::seed_book(&catalog, &shelf, "Neuromancer", "Gibson", 1984);
    common::seed_book(&catalog, &shelf, "The Hobbit", "J.R.R. Tolkien", 1937);

    let years: Vec<i32> = catalog
        .list_books(&shelf.id.to_string())
        .unwrap()
        .into_iter()
        .map(|book| book.published_year)
        .collect();
    assert_eq!(years, [1984, 1965, 1937]);
}

/// Verifies create injects the shelf id from the path and persists the row.
#[test]
fn create_book_injects_parent_from_path() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let book = catalog
        .create_book(&shelf.id.to_string(), &common::book_draft("Dune", "Herbert", 1965))
        .unwrap();
    assert_eq!(book.bookshelf_id, shelf.id);
    assert_eq!(catalog.list_books(&shelf.id.to_string()).unwrap().len(), 1);
}

/// Verifies a body violation wins over a malformed shelf id on create.
#[test]
fn create_book_validates_body_before_path() {
    let catalog = common::engine();
    let error = catalog
        .create_book("not-a-number", &common::book_draft("Dune", "Herbert", 999))
        .unwrap_err();
    assert!(matches!(error, CatalogError::Validation(_)));
}

/// Verifies create rejects a malformed shelf id once the body is valid.
#[test]
fn create_book_rejects_malformed_shelf_id() {
    let catalog = common::engine();
    let error = catalog
        .create_book("not-a-number", &common::book_draft("Dune", "Herbert", 1965))
        .unwrap_err();
    assert!(matches!(error, CatalogError::InvalidIdentifier(ParentKind::Bookshelf)));
}

/// Verifies create requires the shelf row to exist and persists nothing
/// otherwise.
#[test]
fn create_book_requires_existing_shelf() {
    let catalog = common::engine();
    let error =
        catalog.create_book("7", &common::book_draft("Dune", "Herbert", 1965)).unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Bookshelf)));
    assert_eq!(error.to_string(), "Shelf not found");
}

/// Verifies an out-of-range publication year persists no row.
#[test]
fn create_book_invalid_year_persists_nothing() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let id = shelf.id.to_string();

    let too_new = common::book_draft("Future", "Nobody", common::TEST_YEAR + 2);
    assert!(matches!(
        catalog.create_book(&id, &too_new).unwrap_err(),
        CatalogError::Validation(_)
    ));
    assert!(matches!(
        catalog.list_books(&id).unwrap_err(),
        CatalogError::EmptyCollection(_)
    ));
}

/// Verifies the publication year may reach the current year plus one.
#[test]
fn create_book_accepts_next_year() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let draft = common::book_draft("Forthcoming", "Somebody", common::TEST_YEAR + 1);
    assert!(catalog.create_book(&shelf.id.to_string(), &draft).is_ok());
}

/// Verifies get returns the book with chapters eager-loaded.
#[test]
fn get_book_includes_chapters() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let book = common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);
    common::seed_chapter(&catalog, &book, "Arrakis", 1);

    let detail = catalog.get_book(&shelf.id.to_string(), &book.id.to_string()).unwrap();
    assert_eq!(detail.book.id, book.id);
    assert_eq!(detail.chapters.len(), 1);
}

/// Verifies a book under a different shelf reads as not found, never as a
/// cross-parent success.
#[test]
fn get_book_enforces_shelf_scoping() {
    let catalog = common::engine();
    let shelf_a = common::seed_shelf(&catalog, "A");
    let shelf_b = common::seed_shelf(&catalog, "B");
    let book = common::seed_book(&catalog, &shelf_b, "Dune", "Herbert", 1965);

    let error =
        catalog.get_book(&shelf_a.id.to_string(), &book.id.to_string()).unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Book)));
    assert_eq!(error.to_string(), "Book not found");
}

/// Verifies a partial update changes only the supplied fields.
#[test]
fn update_book_partial_semantics() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let book = common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);

    let updated = catalog
        .update_book(
            &shelf.id.to_string(),
            &book.id.to_string(),
            &BookPatch {
                title: FieldPatch::Set(Some("Dune Messiah".to_string())),
                author: FieldPatch::Absent,
                published_year: FieldPatch::Absent,
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.author, "Herbert");
    assert_eq!(updated.published_year, 1965);
}

/// Verifies update enforces shelf scoping.
#[test]
fn update_book_enforces_shelf_scoping() {
    let catalog = common::engine();
    let shelf_a = common::seed_shelf(&catalog, "A");
    let shelf_b = common::seed_shelf(&catalog, "B");
    let book = common::seed_book(&catalog, &shelf_b, "Dune", "Herbert", 1965);

    let error = catalog
        .update_book(
            &shelf_a.id.to_string(),
            &book.id.to_string(),
            &BookPatch {
                title: FieldPatch::Set(Some("Stolen".to_string())),
                author: FieldPatch::Absent,
                published_year: FieldPatch::Absent,
            },
        )
        .unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Book)));

    let kept = catalog.get_book(&shelf_b.id.to_string(), &book.id.to_string()).unwrap();
    assert_eq!(kept.book.title, "Dune");
}

/// Verifies delete enforces shelf scoping and leaves the row in place on a
/// cross-parent attempt.
#[test]
fn delete_book_enforces_shelf_scoping() {
    let catalog = common::engine();
    let shelf_a = common::seed_shelf(&catalog, "A");
    let shelf_b = common::seed_shelf(&catalog, "B");
    let book = common::seed_book(&catalog, &shelf_b, "Dune", "Herbert", 1965);

    let error =
        catalog.delete_book(&shelf_a.id.to_string(), &book.id.to_string()).unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Book)));
    assert_eq!(catalog.list_books(&shelf_b.id.to_string()).unwrap().len(), 1);
}

/// Verifies deleting a nonexistent book reports not found and changes
/// nothing, confirmed by a subsequent list count.
#[test]
fn delete_missing_book_leaves_store_unchanged() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);

    let error = catalog.delete_book(&shelf.id.to_string(), "99").unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Book)));
    assert_eq!(catalog.list_books(&shelf.id.to_string()).unwrap().len(), 1);
}
