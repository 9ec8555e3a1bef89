// lectern-core/src/core/requests.rs
// ============================================================================
// Module: Lectern Request Payloads
// Description: Create drafts, partial-update patches, and the search request.
// Purpose: Deserialize caller input and validate it into gateway-ready rows.
// Dependencies: crate::core::{entities, time, validate}, serde
// ============================================================================

//! ## Overview
//! Request payloads are deserialized leniently (every field optional) and
//! then validated explicitly, so a missing or null field surfaces as a field
//! violation rather than a parse failure. Partial updates use [`FieldPatch`]
//! to distinguish an absent field (leave the column alone) from an explicit
//! null (required fields reject it; nullable `location` clears the column).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;

use crate::core::entities::BookChanges;
use crate::core::entities::BookshelfChanges;
use crate::core::entities::ChapterChanges;
use crate::core::entities::NewBookshelf;
use crate::core::entities::PageChanges;
use crate::core::time::Timestamp;
use crate::core::validate::MIN_PUBLISHED_YEAR;
use crate::core::validate::ValidationError;
use crate::core::validate::collect;
use crate::core::validate::int_at_least;
use crate::core::validate::int_within;
use crate::core::validate::optional_text;
use crate::core::validate::required_body;
use crate::core::validate::required_text;

// ============================================================================
// SECTION: Field Presence
// ============================================================================

/// A patch field that records whether the caller supplied it at all.
///
/// `#[serde(default)]` maps a missing JSON key to [`FieldPatch::Absent`];
/// a present key (including an explicit null, via an inner `Option`)
/// deserializes to [`FieldPatch::Set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// The field was not present in the payload.
    Absent,
    /// The field was present with the given value.
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<'de, T> Deserialize<'de> for FieldPatch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Set)
    }
}

// ============================================================================
// SECTION: Create Drafts
// ============================================================================

/// Unvalidated bookshelf creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookshelfDraft {
    /// Shelf name (required).
    #[serde(default)]
    pub name: Option<String>,
    /// Physical location (optional).
    #[serde(default)]
    pub location: Option<String>,
}

impl BookshelfDraft {
    /// Validates the draft into an insert row.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violated field rule.
    pub fn validate(&self, now: Timestamp) -> Result<NewBookshelf, ValidationError> {
        let mut violations = Vec::new();
        let name = collect(required_text("name", self.name.as_deref()), &mut violations);
        let location = collect(optional_text("location", self.location.as_deref()), &mut violations);
        match (name, location) {
            (Some(name), Some(location)) if violations.is_empty() => Ok(NewBookshelf {
                name,
                location,
                created_at: now,
            }),
            _ => Err(ValidationError::new(violations)),
        }
    }
}

/// Unvalidated book creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookDraft {
    /// Book title (required).
    #[serde(default)]
    pub title: Option<String>,
    /// Book author (required).
    #[serde(default)]
    pub author: Option<String>,
    /// Publication year (required, 1000..=currentYear+1).
    #[serde(default)]
    pub published_year: Option<i32>,
}

/// Validated book fields, prior to parent-id and timestamp injection by the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Publication year.
    pub published_year: i32,
}

impl BookDraft {
    /// Validates the draft's fields. The body is checked before any path
    /// identifier, so a field violation wins over a malformed parent id.
    ///
    /// `max_year` is the inclusive upper publication-year bound, derived by
    /// the engine from its clock (current year plus one).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violated field rule.
    pub fn validate(&self, max_year: i32) -> Result<BookFields, ValidationError> {
        let mut violations = Vec::new();
        let title = collect(required_text("title", self.title.as_deref()), &mut violations);
        let author = collect(required_text("author", self.author.as_deref()), &mut violations);
        let published_year = collect(
            int_within("published_year", self.published_year, MIN_PUBLISHED_YEAR, max_year),
            &mut violations,
        );
        match (title, author, published_year) {
            (Some(title), Some(author), Some(published_year)) if violations.is_empty() => {
                Ok(BookFields {
                    title,
                    author,
                    published_year,
                })
            }
            _ => Err(ValidationError::new(violations)),
        }
    }
}

/// Unvalidated chapter creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChapterDraft {
    /// Chapter title (required).
    #[serde(default)]
    pub title: Option<String>,
    /// Chapter number (required, >= 1).
    #[serde(default)]
    pub chapter_number: Option<i32>,
}

/// Validated chapter fields, prior to parent-id and timestamp injection by
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFields {
    /// Chapter title.
    pub title: String,
    /// Ordering key within the book.
    pub chapter_number: i32,
}

impl ChapterDraft {
    /// Validates the draft's fields. The body is checked before any path
    /// identifier, so a field violation wins over a malformed parent id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violated field rule.
    pub fn validate(&self) -> Result<ChapterFields, ValidationError> {
        let mut violations = Vec::new();
        let title = collect(required_text("title", self.title.as_deref()), &mut violations);
        let chapter_number =
            collect(int_at_least("chapter_number", self.chapter_number, 1), &mut violations);
        match (title, chapter_number) {
            (Some(title), Some(chapter_number)) if violations.is_empty() => Ok(ChapterFields {
                title,
                chapter_number,
            }),
            _ => Err(ValidationError::new(violations)),
        }
    }
}

/// Unvalidated page creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageDraft {
    /// Page number (required, >= 1).
    #[serde(default)]
    pub page_number: Option<i32>,
    /// Page content (required, non-empty, uncapped).
    #[serde(default)]
    pub content: Option<String>,
}

/// Validated page fields, prior to parent-id and timestamp injection by the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    /// Ordering key within the chapter.
    pub page_number: i32,
    /// Page text content.
    pub content: String,
}

impl PageDraft {
    /// Validates the draft's fields. The body is checked before any path
    /// identifier, so a field violation wins over a malformed parent id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violated field rule.
    pub fn validate(&self) -> Result<PageFields, ValidationError> {
        let mut violations = Vec::new();
        let page_number =
            collect(int_at_least("page_number", self.page_number, 1), &mut violations);
        let content = collect(required_body("content", self.content.as_deref()), &mut violations);
        match (page_number, content) {
            (Some(page_number), Some(content)) if violations.is_empty() => Ok(PageFields {
                page_number,
                content,
            }),
            _ => Err(ValidationError::new(violations)),
        }
    }
}

// ============================================================================
// SECTION: Update Patches
// ============================================================================

/// Partial bookshelf update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookshelfPatch {
    /// Replacement name; rejects an explicit null.
    #[serde(default)]
    pub name: FieldPatch<Option<String>>,
    /// Replacement location; an explicit null clears the column.
    #[serde(default)]
    pub location: FieldPatch<Option<String>>,
}

impl BookshelfPatch {
    /// Validates the supplied subset of fields into a change row.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a supplied field violates its rule.
    pub fn validate(&self) -> Result<BookshelfChanges, ValidationError> {
        let mut violations = Vec::new();
        let name = match &self.name {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => {
                collect(required_text("name", value.as_deref()), &mut violations)
            }
        };
        let location = match &self.location {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => {
                collect(optional_text("location", value.as_deref()), &mut violations)
            }
        };
        if violations.is_empty() {
            Ok(BookshelfChanges {
                name,
                location,
            })
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// Partial book update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookPatch {
    /// Replacement title; rejects an explicit null.
    #[serde(default)]
    pub title: FieldPatch<Option<String>>,
    /// Replacement author; rejects an explicit null.
    #[serde(default)]
    pub author: FieldPatch<Option<String>>,
    /// Replacement publication year; rejects an explicit null.
    #[serde(default)]
    pub published_year: FieldPatch<Option<i32>>,
}

impl BookPatch {
    /// Validates the supplied subset of fields into a change row.
    ///
    /// `max_year` is the inclusive upper publication-year bound.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a supplied field violates its rule.
    pub fn validate(&self, max_year: i32) -> Result<BookChanges, ValidationError> {
        let mut violations = Vec::new();
        let title = match &self.title {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => {
                collect(required_text("title", value.as_deref()), &mut violations)
            }
        };
        let author = match &self.author {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => {
                collect(required_text("author", value.as_deref()), &mut violations)
            }
        };
        let published_year = match &self.published_year {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => collect(
                int_within("published_year", *value, MIN_PUBLISHED_YEAR, max_year),
                &mut violations,
            ),
        };
        if violations.is_empty() {
            Ok(BookChanges {
                title,
                author,
                published_year,
            })
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// Partial chapter update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChapterPatch {
    /// Replacement title; rejects an explicit null.
    #[serde(default)]
    pub title: FieldPatch<Option<String>>,
    /// Replacement chapter number; rejects an explicit null.
    #[serde(default)]
    pub chapter_number: FieldPatch<Option<i32>>,
}

impl ChapterPatch {
    /// Validates the supplied subset of fields into a change row.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a supplied field violates its rule.
    pub fn validate(&self) -> Result<ChapterChanges, ValidationError> {
        let mut violations = Vec::new();
        let title = match &self.title {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => {
                collect(required_text("title", value.as_deref()), &mut violations)
            }
        };
        let chapter_number = match &self.chapter_number {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => {
                collect(int_at_least("chapter_number", *value, 1), &mut violations)
            }
        };
        if violations.is_empty() {
            Ok(ChapterChanges {
                title,
                chapter_number,
            })
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// Partial page update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PagePatch {
    /// Replacement page number; rejects an explicit null.
    #[serde(default)]
    pub page_number: FieldPatch<Option<i32>>,
    /// Replacement content; rejects an explicit null.
    #[serde(default)]
    pub content: FieldPatch<Option<String>>,
}

impl PagePatch {
    /// Validates the supplied subset of fields into a change row.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a supplied field violates its rule.
    pub fn validate(&self) -> Result<PageChanges, ValidationError> {
        let mut violations = Vec::new();
        let page_number = match &self.page_number {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => {
                collect(int_at_least("page_number", *value, 1), &mut violations)
            }
        };
        let content = match &self.content {
            FieldPatch::Absent => None,
            FieldPatch::Set(value) => {
                collect(required_body("content", value.as_deref()), &mut violations)
            }
        };
        if violations.is_empty() {
            Ok(PageChanges {
                page_number,
                content,
            })
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

// ============================================================================
// SECTION: Search Request
// ============================================================================

/// Book search payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    /// Substring to match against title or author (required, non-empty).
    #[serde(default)]
    pub query: Option<String>,
}

impl SearchRequest {
    /// Validates the search payload into the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the query is missing or empty.
    pub fn validate(&self) -> Result<String, ValidationError> {
        let mut violations = Vec::new();
        match collect(required_body("query", self.query.as_deref()), &mut violations) {
            Some(query) => Ok(query),
            None => Err(ValidationError::new(violations)),
        }
    }
}
