// lectern-core/src/runtime/search.rs
// ============================================================================
// Module: Lectern Book Search
// Description: Substring search over book titles and authors.
// Purpose: Validate the search request and delegate matching to the gateway.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Search is a case-insensitive substring match over title or author with no
//! pagination or ranking; results arrive in the store's natural retrieval
//! order and an empty result set is a success.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::entities::Book;
use crate::core::requests::SearchRequest;
use crate::interfaces::CatalogStore;
use crate::interfaces::Clock;
use crate::runtime::catalog::Catalog;
use crate::runtime::catalog::CatalogError;

// ============================================================================
// SECTION: Search
// ============================================================================

impl<S, C> Catalog<S, C>
where
    S: CatalogStore,
    C: Clock,
{
    /// Returns every book whose title or author contains the query as a
    /// case-insensitive substring.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the query is missing or
    /// empty, or [`CatalogError::Store`] on gateway failure.
    pub fn search_books(&self, request: &SearchRequest) -> Result<Vec<Book>, CatalogError> {
        let query = request.validate()?;
        Ok(self.store.search_books(&query)?)
    }
}
