// lectern-store-sqlite/src/lib.rs
// ============================================================================
// Module: Lectern SQLite Store Library
// Description: Durable catalog store backed by SQLite.
// Purpose: Expose the SQLite CatalogStore implementation and its config.
// Dependencies: crate::store
// ============================================================================

//! ## Overview
//! This crate provides the durable [`lectern_core::CatalogStore`]
//! implementation: four entity tables with parent-id indexes, pragma-tuned
//! connections, and the gateway's scoping and ordering contracts expressed
//! in SQL. Foreign keys are deliberately absent: deletion removes only the
//! addressed row unless the engine cascades, so orphaned descendants are
//! representable.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteCatalogStore;
pub use store::SqliteJournalMode;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteSyncMode;
