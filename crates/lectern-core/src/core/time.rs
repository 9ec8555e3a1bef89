// lectern-core/src/core/time.rs
// ============================================================================
// Module: Lectern Time Model
// Description: Canonical timestamp representation for catalog records.
// Purpose: Provide deterministic, host-supplied time values across Lectern.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Catalog rows carry explicit creation timestamps. The core engine never
//! reads wall-clock time directly; hosts supply time through the
//! [`Clock`](crate::interfaces::Clock) interface, which keeps every engine
//! code path replayable in tests. Timestamps are unix-epoch milliseconds and
//! serialize as plain integers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp used on catalog records.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads
///   wall-clock time.
/// - No validation is performed; monotonicity is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix-epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix-epoch milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
