// lectern-core/src/envelope.rs
// ============================================================================
// Module: Lectern Response Envelope
// Description: Uniform JSON envelope and HTTP status mapping.
// Purpose: Convert engine results and errors into caller-facing responses.
// Dependencies: crate::{access, runtime}, serde
// ============================================================================

//! ## Overview
//! Every operation answers with one envelope shape: successes carry
//! `{"success": true, "data": ...}` (deletions carry a message instead),
//! failures carry `{"success": false, "message": ...}`. The paired status
//! code follows the error taxonomy: 400 for malformed identifiers, 403 for
//! capability denials, 404 for missing rows and empty collections, 422 for
//! field violations, 500 for gateway failures, and 201 for creations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::access::AccessError;
use crate::runtime::catalog::CatalogError;

// ============================================================================
// SECTION: Status Codes
// ============================================================================

/// Status for plain successes.
pub const STATUS_OK: u16 = 200;
/// Status for successful creations.
pub const STATUS_CREATED: u16 = 201;
/// Status for malformed path identifiers.
pub const STATUS_BAD_REQUEST: u16 = 400;
/// Status for capability denials.
pub const STATUS_FORBIDDEN: u16 = 403;
/// Status for missing rows and empty collections.
pub const STATUS_NOT_FOUND: u16 = 404;
/// Status for field validation failures.
pub const STATUS_UNPROCESSABLE: u16 = 422;
/// Status for persistence gateway failures.
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Message carried by successful deletions.
pub const DELETED_MESSAGE: &str = "Deleted";

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Uniform JSON response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Success payload, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message (failures and deletions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An envelope paired with its HTTP-equivalent status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    /// HTTP-equivalent status code.
    pub status: u16,
    /// Response body.
    pub body: ApiEnvelope<T>,
}

impl<T> ApiResponse<T> {
    /// Builds a 200 success carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            status: STATUS_OK,
            body: ApiEnvelope {
                success: true,
                data: Some(data),
                message: None,
            },
        }
    }

    /// Builds a 201 creation success carrying `data`.
    #[must_use]
    pub const fn created(data: T) -> Self {
        Self {
            status: STATUS_CREATED,
            body: ApiEnvelope {
                success: true,
                data: Some(data),
                message: None,
            },
        }
    }
}

impl ApiResponse<()> {
    /// Builds the deletion success envelope.
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            status: STATUS_OK,
            body: ApiEnvelope {
                success: true,
                data: None,
                message: Some(DELETED_MESSAGE.to_string()),
            },
        }
    }

    /// Builds a failure envelope with an explicit status and message.
    #[must_use]
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiEnvelope {
                success: false,
                data: None,
                message: Some(message.into()),
            },
        }
    }
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// Returns the HTTP-equivalent status for a catalog error.
#[must_use]
pub const fn catalog_status(error: &CatalogError) -> u16 {
    match error {
        CatalogError::InvalidIdentifier(_) => STATUS_BAD_REQUEST,
        CatalogError::Validation(_) => STATUS_UNPROCESSABLE,
        CatalogError::NotFound(_) | CatalogError::EmptyCollection(_) => STATUS_NOT_FOUND,
        CatalogError::Store(_) => STATUS_INTERNAL_ERROR,
    }
}

impl From<&CatalogError> for ApiResponse<()> {
    fn from(error: &CatalogError) -> Self {
        Self::failure(catalog_status(error), error.to_string())
    }
}

impl From<&AccessError> for ApiResponse<()> {
    fn from(error: &AccessError) -> Self {
        Self::failure(STATUS_FORBIDDEN, error.to_string())
    }
}
