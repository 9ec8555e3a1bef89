// lectern-core/src/audit.rs
// ============================================================================
// Module: Lectern Access Audit
// Description: Structured audit events for authorization decisions.
// Purpose: Record allow/deny outcomes as JSON lines through a sink trait.
// Dependencies: crate::access, serde, serde_json
// ============================================================================

//! ## Overview
//! Every authorization decision produces an audit event. Events serialize as
//! single JSON lines; hosts choose where they go by supplying an
//! [`AuditSink`]: stderr in the bundled default, nothing in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;

use serde::Serialize;

use crate::access::AccessError;
use crate::access::Action;
use crate::access::ResourceKind;
use crate::access::Role;

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// Authorization audit event payload.
#[derive(Debug, Serialize)]
pub struct AccessAuditEvent {
    /// Event identifier.
    event: &'static str,
    /// Decision outcome.
    decision: &'static str,
    /// Caller role label.
    role: &'static str,
    /// Gated resource label.
    resource: &'static str,
    /// Attempted action label.
    action: &'static str,
    /// Denial reason (deny events only).
    reason: Option<String>,
    /// Request identifier (if provided).
    request_id: Option<String>,
}

impl AccessAuditEvent {
    /// Builds an allow event.
    #[must_use]
    pub fn allowed(
        role: Role,
        resource: ResourceKind,
        action: Action,
        request_id: Option<&str>,
    ) -> Self {
        Self {
            event: "catalog_access",
            decision: "allow",
            role: role.as_str(),
            resource: resource.as_str(),
            action: action.as_str(),
            reason: None,
            request_id: request_id.map(ToString::to_string),
        }
    }

    /// Builds a deny event.
    #[must_use]
    pub fn denied(
        role: Role,
        resource: ResourceKind,
        action: Action,
        error: &AccessError,
        request_id: Option<&str>,
    ) -> Self {
        Self {
            event: "catalog_access",
            decision: "deny",
            role: role.as_str(),
            resource: resource.as_str(),
            action: action.as_str(),
            reason: Some(error.to_string()),
            request_id: request_id.map(ToString::to_string),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for authorization decisions.
pub trait AuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &AccessAuditEvent);
}

/// Audit sink that writes JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AccessAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let mut err = io::stderr().lock();
            let _ = writeln!(err, "{payload}");
        }
    }
}

/// No-op audit sink for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AccessAuditEvent) {}
}
