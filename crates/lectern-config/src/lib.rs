// lectern-config/src/lib.rs
// ============================================================================
// Module: Lectern Config Library
// Description: Canonical configuration model for Lectern hosts.
// Purpose: Expose the config types, loading helpers, and validation.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration for Lectern hosts: storage backend selection (in-memory or
//! `SQLite`), behavior toggles (cascade delete, off by default), and an
//! optional capability-table override. Loading parses TOML and validates
//! fail-closed; the default configuration is valid as-is.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AccessConfig;
pub use config::BehaviorConfig;
pub use config::ConfigError;
pub use config::LecternConfig;
pub use config::StorageBackend;
pub use config::StorageConfig;
