// lectern-core/tests/shelf_service.rs
// ============================================================================
// Module: Shelf Service Tests
// Description: Tests for bookshelf CRUD through the catalog engine.
// Purpose: Validate root-resource semantics: unguarded listing, partial
//          updates, and delete behavior.
// ============================================================================
//! ## Overview
//! Exercises the shelf operations end to end against the in-memory store:
//! name-ordered listing, null-location creation, eager-loaded detail,
//! null-vs-absent patch semantics, and not-found reporting.

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

use lectern_core::BookshelfDraft;
use lectern_core::BookshelfPatch;
use lectern_core::CatalogError;
use lectern_core::FieldPatch;
use lectern_core::Resource;

mod common;

/// Verifies listing an empty catalog succeeds with no rows.
#[test]
fn list_shelves_empty_catalog_is_success() {
    let catalog = common::engine();
    assert!(catalog.list_shelves().unwrap().is_empty());
}

/// Verifies shelves list ordered by name ascending.
#[test]
fn list_shelves_orders_by_name() {
    let catalog = common::engine();
    common::seed_shelf(&catalog, "Science");
    common::seed_shelf(&catalog, "Art");
    common::seed_shelf(&catalog, "History");

    let names: Vec<String> =
        catalog.list_shelves().unwrap().into_iter().map(|shelf| shelf.name).collect();
    assert_eq!(names, ["Art", "History", "Science"]);
}

/// Verifies creation stamps the clock time and leaves an omitted location
/// null.
#[test]
fn create_shelf_defaults_location_to_null() {
    let catalog = common::engine();
    let shelf = catalog.create_shelf(&common::shelf_draft("Fiction")).unwrap();
    assert_eq!(shelf.name, "Fiction");
    assert_eq!(shelf.location, None);
    assert_eq!(shelf.created_at, common::TEST_NOW);
}

/// Verifies get returns the shelf with its books eager-loaded.
#[test]
fn get_shelf_includes_books() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    common::seed_book(&catalog, &shelf, "Dune", "Herbert", 1965);
    common::seed_book(&catalog, &shelf, "The Hobbit", "J.R.R. Tolkien", 1937);

    let detail = catalog.get_shelf(&shelf.id.to_string()).unwrap();
    assert_eq!(detail.shelf.id, shelf.id);
    assert_eq!(detail.books.len(), 2);
}

/// Verifies get is idempotent: two reads with no mutation are identical.
#[test]
fn get_shelf_is_idempotent() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let first = catalog.get_shelf(&shelf.id.to_string()).unwrap();
    let second = catalog.get_shelf(&shelf.id.to_string()).unwrap();
    assert_eq!(first, second);
}

/// Verifies get on a missing or malformed id reports shelf not found.
#[test]
fn get_shelf_missing_reports_not_found() {
    let catalog = common::engine();
    let error = catalog.get_shelf("99").unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Bookshelf)));
    assert_eq!(error.to_string(), "Shelf not found");

    let error = catalog.get_shelf("not-a-number").unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Bookshelf)));
}

/// Verifies a partial update changes only the supplied fields and an
/// explicit null clears the location.
#[test]
fn update_shelf_partial_semantics() {
    let catalog = common::engine();
    let shelf = catalog
        .create_shelf(&BookshelfDraft {
            name: Some("Fiction".to_string()),
            location: Some("East wing".to_string()),
        })
        .unwrap();
    let id = shelf.id.to_string();

    let renamed = catalog
        .update_shelf(
            &id,
            &BookshelfPatch {
                name: FieldPatch::Set(Some("Speculative fiction".to_string())),
                location: FieldPatch::Absent,
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Speculative fiction");
    assert_eq!(renamed.location.as_deref(), Some("East wing"));

    let cleared = catalog
        .update_shelf(
            &id,
            &BookshelfPatch {
                name: FieldPatch::Absent,
                location: FieldPatch::Set(None),
            },
        )
        .unwrap();
    assert_eq!(cleared.name, "Speculative fiction");
    assert_eq!(cleared.location, None);
}

/// Verifies update locates the shelf before validating the payload, so a
/// missing shelf wins over an invalid patch.
#[test]
fn update_missing_shelf_beats_invalid_payload() {
    let catalog = common::engine();
    let error = catalog
        .update_shelf(
            "42",
            &BookshelfPatch {
                name: FieldPatch::Set(None),
                location: FieldPatch::Absent,
            },
        )
        .unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Bookshelf)));
}

/// Verifies delete removes the row and a second delete reports not found.
#[test]
fn delete_shelf_then_missing() {
    let catalog = common::engine();
    let shelf = common::seed_shelf(&catalog, "Fiction");
    let id = shelf.id.to_string();

    catalog.delete_shelf(&id).unwrap();
    assert!(catalog.list_shelves().unwrap().is_empty());

    let error = catalog.delete_shelf(&id).unwrap_err();
    assert!(matches!(error, CatalogError::NotFound(Resource::Bookshelf)));
}

/// Verifies deleting a nonexistent shelf leaves the store unchanged.
#[test]
fn delete_missing_shelf_leaves_store_unchanged() {
    let catalog = common::engine();
    common::seed_shelf(&catalog, "Fiction");
    assert!(catalog.delete_shelf("99").is_err());
    assert_eq!(catalog.list_shelves().unwrap().len(), 1);
}
