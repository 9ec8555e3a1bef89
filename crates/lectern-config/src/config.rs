// lectern-config/src/config.rs
// ============================================================================
// Module: Lectern Configuration Model
// Description: TOML configuration sections, defaults, and validation.
// Purpose: Give hosts one canonical, validated configuration surface.
// Dependencies: lectern-core, lectern-store-sqlite, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! [`LecternConfig`] is the root configuration: `[storage]` selects the
//! catalog store backend, `[behavior]` carries engine toggles, and
//! `[access]` optionally overrides the default capability table. Every
//! section defaults sensibly and `validate()` fails closed with
//! field-path-prefixed messages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use lectern_core::CapabilityTable;
use lectern_core::CatalogConfig;
use lectern_store_sqlite::SqliteStoreConfig;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file could not be parsed as TOML.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Config failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Storage
// ============================================================================

/// Catalog store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// In-memory store (tests and demos).
    #[default]
    Memory,
    /// Durable `SQLite` store.
    Sqlite,
}

/// Storage configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,
    /// `SQLite` settings, required when the backend is `sqlite`.
    #[serde(default)]
    pub sqlite: Option<SqliteStoreConfig>,
}

impl StorageConfig {
    /// Validates the storage section.
    fn validate(&self, problems: &mut Vec<String>) {
        match (self.backend, self.sqlite.as_ref()) {
            (StorageBackend::Sqlite, None) => {
                problems
                    .push("storage.sqlite: section is required for the sqlite backend".to_string());
            }
            (StorageBackend::Sqlite, Some(sqlite)) => {
                if sqlite.path.as_os_str().is_empty() {
                    problems.push("storage.sqlite.path: must not be empty".to_string());
                }
                if sqlite.busy_timeout_ms == 0 {
                    problems.push("storage.sqlite.busy_timeout_ms: must be positive".to_string());
                }
            }
            (StorageBackend::Memory, _) => {}
        }
    }
}

// ============================================================================
// SECTION: Behavior
// ============================================================================

/// Engine behavior toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub struct BehaviorConfig {
    /// When true, deleting a shelf, book, or chapter removes its
    /// descendants. Off by default, matching the catalog's no-cascade
    /// semantics (orphans are representable).
    #[serde(default)]
    pub cascade_delete: bool,
}

impl BehaviorConfig {
    /// Converts the section into the engine configuration.
    #[must_use]
    pub const fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            cascade_delete: self.cascade_delete,
        }
    }
}

// ============================================================================
// SECTION: Access
// ============================================================================

/// Access-control configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct AccessConfig {
    /// Capability-table override; absent means the default table.
    #[serde(default)]
    pub table: Option<CapabilityTable>,
}

impl AccessConfig {
    /// Resolves the effective capability table.
    #[must_use]
    pub fn resolve(&self) -> CapabilityTable {
        self.table.clone().unwrap_or_default()
    }

    /// Validates the access section.
    fn validate(&self, problems: &mut Vec<String>) {
        if let Some(table) = &self.table
            && let Err(message) = table.validate()
        {
            problems.push(format!("access.table: {message}"));
        }
    }
}

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root Lectern configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct LecternConfig {
    /// Storage section.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Behavior section.
    #[serde(default)]
    pub behavior: BehaviorConfig,
    /// Access section.
    #[serde(default)]
    pub access: AccessConfig,
}

impl LecternConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or
    /// [`ConfigError::Invalid`] on validation failure.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// as [`Self::from_toml_str`].
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw =
            std::fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_toml_str(&raw)
    }

    /// Validates every section, collecting field-path-prefixed problems.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        self.storage.validate(&mut problems);
        self.access.validate(&mut problems);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}
