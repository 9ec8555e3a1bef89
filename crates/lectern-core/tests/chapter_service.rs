// lectern-core/tests/chapter_service.rs
// ============================================================================
// Module: Chapter Service Tests
// Description: Tests for book-scoped chapter CRUD through the catalog engine.
// Purpose: Validate chapter ordering, guards, scoping, and partial updates.
// ============================================================================
//! ## Overview
//! Chapters mirror the book service one level down: strict guards on
//! list/create, book scoping on addressed operations, and chapter-number
//! ordering where duplicates are allowed (it is a sort key, not a unique
//! constraint).

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

use lectern_core::CatalogError;
use lectern_core::ChapterPatch;
use lectern_core::FieldPatch;
use lectern_core::ParentKind;
use lectern_core::Resource;

mod common;

/// Verifies the list guards: malformed book id, then the child-count check
/// that treats an empty book and a missing book identically.
#[test]
fn list_chapters_guards() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let book = common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);

    let error = catalog.list_chapters("zero").unwrap_err();
    assert!(matches!(error, CatalogError::InvalidIdentifier(ParentKind::Book)));
    assert_eq!(error.to_string(), "Invalid book ID");

    let on_empty = catalog.list_chapters(&book.id.to_string()).unwrap_err();
    let on_missing = catalog.list_chapters("999").unwrap_err();
    assert!(matches!(on_empty, CatalogError::EmptyCollection(ParentKind::Book)));
    assert_eq!(on_empty.to_string(), "There are no chapters in this book");
    assert_eq!(on_empty.to_string(), on_missing.to_string());
}

/// Verifies chapters list ordered by chapter number ascending, with
/// duplicate numbers kept in insertion order.
#[test]
fn list_chapters_orders_by_number() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let book = common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);
    common::seed_chapter(&catalog, &book, "Second", 2);
    common::seed_chapter(&catalog, &book, "First", 1);
    common::seed_chapter(&catalog, &book, "Also second", 2);

    let titles: Vec<String> = catalog
        .list_chapters(&book.id.to_string())
        .unwrap()
        .into_iter()
        .map(|chapter| chapter.title)
        .collect();
    assert_eq!(titles, ["First", "Second", "Also second"]);
}

/// Verifies create requires the book row to exist.
#[test]
fn create_chapter_requires_existing_book() {
    let catalog = common::engine();
    let error =
        catalog.create_chapter("8", &common::chapter_draft("Intro", 1)).unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Book)));
    assert_eq!(error.to_string(), "Book not found");
}

/// Verifies get eager-loads the chapter's pages and enforces book scoping.
#[test]
fn get_chapter_scoped_with_pages() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let book_a = common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);
    let book_b = common::seed_book(&catalog, &shelf, "The Hobbit", "J.R.R. Tolkien", 1937);
    let chapter = common::seed_chapter(&catalog, &book_a, "Arrakis", 1);
    common::seed_page(&catalog, &chapter, 1, "The spice.");

    let detail =
        catalog.get_chapter(&book_a.id.to_string(), &chapter.id.to_string()).unwrap();
    assert_eq!(detail.pages.len(), 1);

    let error =
        catalog.get_chapter(&book_b.id.to_string(), &chapter.id.to_string()).unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Chapter)));
    assert_eq!(error.to_string(), "Chapter not found");
}

/// Verifies a title-only patch leaves the chapter number unchanged.
#[test]
fn update_chapter_title_keeps_number() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let book = common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);
    let chapter = common::seed_chapter(&catalog, &book, "Arrakis", 3);

    let updated = catalog
        .update_chapter(
            &book.id.to_string(),
            &chapter.id.to_string(),
            &ChapterPatch {
                title: FieldPatch::Set(Some("New Title".to_string())),
                chapter_number: FieldPatch::Absent,
            },
        )
        .unwrap();
    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.chapter_number, 3);
}

/// Verifies delete enforces book scoping and reports not found for a
/// missing chapter.
#[test]
fn delete_chapter_scoped() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let book_a = common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);
    let book_b = common::seed_book(&catalog, &shelf, "The Hobbit", "J.R.R. Tolkien", 1937);
    let chapter = common::seed_chapter(&catalog, &book_a, "Arrakis", 1);

    let error = catalog
        .delete_chapter(&book_b.id.to_string(), &chapter.id.to_string())
        .unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Chapter)));

    catalog.delete_chapter(&book_a.id.to_string(), &chapter.id.to_string()).unwrap();
    assert!(matches!(
        catalog.list_chapters(&book_a.id.to_string()).unwrap_err(),
        CatalogError::EmptyCollection(_)
    ));
}
