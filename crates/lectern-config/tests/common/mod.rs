// lectern-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for lectern-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use lectern_config::LecternConfig;

/// Parses a TOML string into a `LecternConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<LecternConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<LecternConfig, toml::de::Error> {
    config_from_toml("")
}
