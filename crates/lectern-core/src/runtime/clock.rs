// lectern-core/src/runtime/clock.rs
// ============================================================================
// Module: Lectern Clock Implementations
// Description: Wall-clock and fixed clock sources for the catalog engine.
// Purpose: Supply host time through the Clock interface.
// Dependencies: crate::{core, interfaces}, time
// ============================================================================

//! ## Overview
//! Two [`Clock`] implementations: [`SystemClock`] reads UTC wall-clock time
//! for production hosts, and [`FixedClock`] pins both the moment and the
//! calendar year so engine tests stay deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

use crate::core::time::Timestamp;
use crate::interfaces::Clock;

// ============================================================================
// SECTION: System Clock
// ============================================================================

/// Wall-clock time source (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let millis = i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX);
        Timestamp::from_unix_millis(millis)
    }

    fn current_year(&self) -> i32 {
        OffsetDateTime::now_utc().year()
    }
}

// ============================================================================
// SECTION: Fixed Clock
// ============================================================================

/// Deterministic clock pinned to a fixed moment and year, for tests and
/// replayable demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// The pinned moment.
    now: Timestamp,
    /// The pinned calendar year.
    year: i32,
}

impl FixedClock {
    /// Creates a fixed clock at the given moment and year.
    #[must_use]
    pub const fn new(now: Timestamp, year: i32) -> Self {
        Self {
            now,
            year,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn current_year(&self) -> i32 {
        self.year
    }
}
