// lectern-core/tests/envelope.rs
// ============================================================================
// Module: Envelope Tests
// Description: Tests for the JSON envelope and status mapping.
// Purpose: Validate envelope shapes and the error-to-status taxonomy.
// ============================================================================
//! ## Overview
//! The envelope is the single caller-facing shape: success carries `data`,
//! deletion carries the "Deleted" message, failures carry the error's
//! display text with the status dictated by the taxonomy.

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

use lectern_core::AccessError;
use lectern_core::Action;
use lectern_core::ApiResponse;
use lectern_core::CatalogError;
use lectern_core::FieldViolation;
use lectern_core::ParentKind;
use lectern_core::Resource;
use lectern_core::ResourceKind;
use lectern_core::Role;
use lectern_core::StoreError;
use lectern_core::ValidationError;
use lectern_core::catalog_status;
use serde_json::json;

/// Verifies the success envelope carries data and no message.
#[test]
fn success_envelope_shape() {
    let response = ApiResponse::ok(json!({"id": 1}));
    assert_eq!(response.status, 200);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body, json!({"success": true, "data": {"id": 1}}));
}

/// Verifies creation answers 201 with the same envelope shape.
#[test]
fn created_envelope_shape() {
    let response = ApiResponse::created(json!({"id": 2}));
    assert_eq!(response.status, 201);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 2);
}

/// Verifies the deletion envelope carries the message and no data.
#[test]
fn deleted_envelope_shape() {
    let response = ApiResponse::deleted();
    assert_eq!(response.status, 200);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body, json!({"success": true, "message": "Deleted"}));
}

/// Verifies each catalog error maps to its taxonomy status.
#[test]
fn catalog_error_status_mapping() {
    assert_eq!(catalog_status(&CatalogError::InvalidIdentifier(ParentKind::Bookshelf)), 400);
    assert_eq!(
        catalog_status(&CatalogError::Validation(ValidationError::new(vec![
            FieldViolation::new("title", "is required"),
        ]))),
        422
    );
    assert_eq!(catalog_status(&CatalogError::NotFound(Resource::Book)), 404);
    assert_eq!(catalog_status(&CatalogError::EmptyCollection(ParentKind::Book)), 404);
    assert_eq!(
        catalog_status(&CatalogError::Store(StoreError::Unavailable("down".to_string()))),
        500
    );
}

/// Verifies failure envelopes carry the error display text verbatim.
#[test]
fn failure_envelope_messages() {
    let response = ApiResponse::from(&CatalogError::InvalidIdentifier(ParentKind::Bookshelf));
    assert_eq!(response.status, 400);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body, json!({"success": false, "message": "Invalid bookshelf ID"}));

    let response = ApiResponse::from(&CatalogError::EmptyCollection(ParentKind::Chapter));
    assert_eq!(response.status, 404);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body["message"], "There are no pages in this chapter");

    let response = ApiResponse::from(&CatalogError::NotFound(Resource::Page));
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body["message"], "Page not found");
}

/// Verifies capability denials map to 403 with the denial text.
#[test]
fn access_error_maps_to_forbidden() {
    let error = AccessError::Forbidden {
        role: Role::Employee,
        resource: ResourceKind::Books,
        action: Action::Create,
    };
    let response = ApiResponse::from(&error);
    assert_eq!(response.status, 403);
    let body = serde_json::to_value(&response.body).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "role employee is not permitted to create books");
}

/// Verifies validation failures join every violation into the message.
#[test]
fn validation_failure_lists_violations() {
    let error = CatalogError::Validation(ValidationError::new(vec![
        FieldViolation::new("title", "is required"),
        FieldViolation::new("author", "is required"),
    ]));
    let response = ApiResponse::from(&error);
    assert_eq!(response.status, 422);
    let body = serde_json::to_value(&response.body).unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("title: is required"));
    assert!(message.contains("author: is required"));
}
