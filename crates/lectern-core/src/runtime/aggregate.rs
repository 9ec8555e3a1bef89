// lectern-core/src/runtime/aggregate.rs
// ============================================================================
// Module: Lectern Content Aggregator
// Description: Ordered concatenation of a chapter's page content.
// Purpose: Assemble the full-content payload for a chapter.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The aggregator loads a chapter with all of its pages, sorts the pages by
//! page number with a stable sort (ties keep retrieval order), and joins
//! their content with exactly two newline characters. A chapter with no
//! pages yields an empty string, not an error. The chapter is addressed
//! globally, not book-scoped, matching the `chapters/{chapter}/full-content`
//! route shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::entities::ChapterContent;
use crate::core::entities::ChapterSummary;
use crate::core::identifiers::ChapterId;
use crate::interfaces::CatalogStore;
use crate::interfaces::Clock;
use crate::runtime::catalog::Catalog;
use crate::runtime::catalog::CatalogError;
use crate::runtime::catalog::Resource;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator inserted between consecutive page contents.
const PAGE_SEPARATOR: &str = "\n\n";

// ============================================================================
// SECTION: Full Content
// ============================================================================

impl<S, C> Catalog<S, C>
where
    S: CatalogStore,
    C: Clock,
{
    /// Assembles the full text of a chapter: summary plus page contents
    /// joined in page-number order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the chapter does not exist
    /// (a malformed id matches nothing), or [`CatalogError::Store`] on
    /// gateway failure.
    pub fn full_content(&self, chapter_id: &str) -> Result<ChapterContent, CatalogError> {
        let id = ChapterId::parse_path(chapter_id)
            .map_err(|_| CatalogError::NotFound(Resource::Chapter))?;
        let chapter = self
            .store
            .find_chapter_by_id(id)?
            .ok_or(CatalogError::NotFound(Resource::Chapter))?;
        // The gateway already orders by page number with a stable sort, so
        // ties keep their natural retrieval order.
        let pages = self.store.list_pages(id)?;
        let content = pages
            .iter()
            .map(|page| page.content.as_str())
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR);
        Ok(ChapterContent {
            chapter: ChapterSummary::from(&chapter),
            content,
        })
    }
}
