// lectern-core/src/core/identifiers.rs
// ============================================================================
// Module: Lectern Identifiers
// Description: Typed integer identifiers for catalog entities.
// Purpose: Provide strongly typed, serializable ids with a positive invariant.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Catalog entities are identified by positive 64-bit integers assigned by
//! the persistence gateway. Each entity gets its own wrapper type so a book
//! id cannot be passed where a chapter id is expected. Path parameters reach
//! the engine as raw strings; [`parse_path`](ShelfId::parse_path) applies the
//! strict positive-integer rule, while callers that tolerate malformed ids
//! (lookup paths, where a bad id simply matches nothing) use `from_raw`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identifier parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Value was not a positive integer.
    #[error("identifier must be a positive integer: {0}")]
    NotPositive(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a raw path string into a positive i64, or `None` when the string is
/// non-numeric or the value is below 1.
fn parse_positive(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|value| *value >= 1)
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Bookshelf identifier.
///
/// # Invariants
/// - Always >= 1 (positive, 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ShelfId(i64);

impl ShelfId {
    /// Creates a shelf identifier from a raw value (returns `None` below 1).
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        (raw >= 1).then_some(Self(raw))
    }

    /// Parses a shelf identifier from a raw path string.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::NotPositive`] when the string is
    /// non-numeric or the value is below 1.
    pub fn parse_path(raw: &str) -> Result<Self, IdentifierError> {
        parse_positive(raw)
            .map(Self)
            .ok_or_else(|| IdentifierError::NotPositive(raw.to_string()))
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ShelfId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for ShelfId {
    type Error = IdentifierError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or_else(|| IdentifierError::NotPositive(value.to_string()))
    }
}

impl From<ShelfId> for i64 {
    fn from(value: ShelfId) -> Self {
        value.get()
    }
}

/// Book identifier.
///
/// # Invariants
/// - Always >= 1 (positive, 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BookId(i64);

impl BookId {
    /// Creates a book identifier from a raw value (returns `None` below 1).
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        (raw >= 1).then_some(Self(raw))
    }

    /// Parses a book identifier from a raw path string.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::NotPositive`] when the string is
    /// non-numeric or the value is below 1.
    pub fn parse_path(raw: &str) -> Result<Self, IdentifierError> {
        parse_positive(raw)
            .map(Self)
            .ok_or_else(|| IdentifierError::NotPositive(raw.to_string()))
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for BookId {
    type Error = IdentifierError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or_else(|| IdentifierError::NotPositive(value.to_string()))
    }
}

impl From<BookId> for i64 {
    fn from(value: BookId) -> Self {
        value.get()
    }
}

/// Chapter identifier.
///
/// # Invariants
/// - Always >= 1 (positive, 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ChapterId(i64);

impl ChapterId {
    /// Creates a chapter identifier from a raw value (returns `None` below 1).
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        (raw >= 1).then_some(Self(raw))
    }

    /// Parses a chapter identifier from a raw path string.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::NotPositive`] when the string is
    /// non-numeric or the value is below 1.
    pub fn parse_path(raw: &str) -> Result<Self, IdentifierError> {
        parse_positive(raw)
            .map(Self)
            .ok_or_else(|| IdentifierError::NotPositive(raw.to_string()))
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for ChapterId {
    type Error = IdentifierError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or_else(|| IdentifierError::NotPositive(value.to_string()))
    }
}

impl From<ChapterId> for i64 {
    fn from(value: ChapterId) -> Self {
        value.get()
    }
}

/// Page identifier.
///
/// # Invariants
/// - Always >= 1 (positive, 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PageId(i64);

impl PageId {
    /// Creates a page identifier from a raw value (returns `None` below 1).
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        (raw >= 1).then_some(Self(raw))
    }

    /// Parses a page identifier from a raw path string.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::NotPositive`] when the string is
    /// non-numeric or the value is below 1.
    pub fn parse_path(raw: &str) -> Result<Self, IdentifierError> {
        parse_positive(raw)
            .map(Self)
            .ok_or_else(|| IdentifierError::NotPositive(raw.to_string()))
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for PageId {
    type Error = IdentifierError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or_else(|| IdentifierError::NotPositive(value.to_string()))
    }
}

impl From<PageId> for i64 {
    fn from(value: PageId) -> Self {
        value.get()
    }
}
