// lectern-core/src/access.rs
// ============================================================================
// Module: Lectern Access Control
// Description: Static capability table gating catalog operations by role.
// Purpose: Provide fail-closed, config-driven authorization ahead of the engine.
// Dependencies: crate::audit, serde, thiserror
// ============================================================================

//! ## Overview
//! Authorization is an explicit table of (resource, action, allowed roles)
//! rules evaluated before the catalog engine is invoked. Evaluation is
//! fail-closed: an action with no matching grant is denied. The table is
//! plain data so hosts can override it from configuration; the default table
//! gives admins full CRUD everywhere, customers read-only access plus search
//! and full-content, and employees nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::audit::AccessAuditEvent;
use crate::audit::AuditSink;

// ============================================================================
// SECTION: Roles, Resources, Actions
// ============================================================================

/// Caller role attached to an already-authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full catalog administration.
    Admin,
    /// Staff role with no catalog capabilities in the default table.
    Employee,
    /// Read-only catalog consumer.
    Customer,
}

impl Role {
    /// Returns the role's stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog resource families gated by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Bookshelf collection.
    Bookshelves,
    /// Book collection.
    Books,
    /// Chapter collection.
    Chapters,
    /// Page collection.
    Pages,
}

impl ResourceKind {
    /// Returns the resource's stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bookshelves => "bookshelves",
            Self::Books => "books",
            Self::Chapters => "chapters",
            Self::Pages => "pages",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations a rule may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// List a resource collection.
    List,
    /// Fetch a single resource.
    Get,
    /// Create a resource.
    Create,
    /// Partially update a resource.
    Update,
    /// Delete a resource.
    Delete,
    /// Search books by title or author.
    Search,
    /// Assemble a chapter's full content.
    FullContent,
}

impl Action {
    /// Returns the action's stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Search => "search",
            Self::FullContent => "full_content",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authorization failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The role holds no grant for the resource/action pair.
    #[error("role {role} is not permitted to {action} {resource}")]
    Forbidden {
        /// Denied role.
        role: Role,
        /// Gated resource.
        resource: ResourceKind,
        /// Attempted action.
        action: Action,
    },
}

// ============================================================================
// SECTION: Capability Table
// ============================================================================

/// One grant: the roles allowed to perform an action on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRule {
    /// Gated resource.
    pub resource: ResourceKind,
    /// Gated action.
    pub action: Action,
    /// Roles holding the grant.
    pub roles: Vec<Role>,
}

/// Static capability table evaluated before the catalog engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityTable {
    /// Grant rules; order is irrelevant, any matching grant permits.
    rules: Vec<CapabilityRule>,
}

impl CapabilityTable {
    /// Builds a table from explicit rules.
    #[must_use]
    pub const fn new(rules: Vec<CapabilityRule>) -> Self {
        Self {
            rules,
        }
    }

    /// Builds the default table: admin gets every action on every resource,
    /// customer gets read access plus search and full-content, employee
    /// gets nothing.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut rules = Vec::new();
        for resource in [
            ResourceKind::Bookshelves,
            ResourceKind::Books,
            ResourceKind::Chapters,
            ResourceKind::Pages,
        ] {
            for action in [Action::List, Action::Get] {
                rules.push(CapabilityRule {
                    resource,
                    action,
                    roles: vec![Role::Admin, Role::Customer],
                });
            }
            for action in [Action::Create, Action::Update, Action::Delete] {
                rules.push(CapabilityRule {
                    resource,
                    action,
                    roles: vec![Role::Admin],
                });
            }
        }
        rules.push(CapabilityRule {
            resource: ResourceKind::Books,
            action: Action::Search,
            roles: vec![Role::Admin, Role::Customer],
        });
        rules.push(CapabilityRule {
            resource: ResourceKind::Chapters,
            action: Action::FullContent,
            roles: vec![Role::Admin, Role::Customer],
        });
        Self::new(rules)
    }

    /// Returns the grant rules.
    #[must_use]
    pub fn rules(&self) -> &[CapabilityRule] {
        &self.rules
    }

    /// Authorizes a role for an action on a resource. Fail-closed: denied
    /// unless some rule grants it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] when no grant matches.
    pub fn authorize(
        &self,
        role: Role,
        resource: ResourceKind,
        action: Action,
    ) -> Result<(), AccessError> {
        let granted = self.rules.iter().any(|rule| {
            rule.resource == resource && rule.action == action && rule.roles.contains(&role)
        });
        if granted {
            Ok(())
        } else {
            Err(AccessError::Forbidden {
                role,
                resource,
                action,
            })
        }
    }

    /// Validates table shape: at least one rule, no duplicate
    /// resource/action pairs, and the search and full-content actions only
    /// on the resources that define them.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.rules.is_empty() {
            return Err("capability table must define at least one rule".to_string());
        }
        for (index, rule) in self.rules.iter().enumerate() {
            if self
                .rules
                .iter()
                .skip(index + 1)
                .any(|other| other.resource == rule.resource && other.action == rule.action)
            {
                return Err(format!(
                    "duplicate capability rule for {} {}",
                    rule.action, rule.resource
                ));
            }
            if rule.action == Action::Search && rule.resource != ResourceKind::Books {
                return Err(format!("search is only defined for books, not {}", rule.resource));
            }
            if rule.action == Action::FullContent && rule.resource != ResourceKind::Chapters {
                return Err(format!(
                    "full_content is only defined for chapters, not {}",
                    rule.resource
                ));
            }
        }
        Ok(())
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// SECTION: Enforcement
// ============================================================================

/// Authorizes an operation against the table and records the decision on
/// the audit sink.
///
/// # Errors
///
/// Returns [`AccessError::Forbidden`] when the table denies the operation.
pub fn enforce(
    table: &CapabilityTable,
    role: Role,
    resource: ResourceKind,
    action: Action,
    sink: &dyn AuditSink,
    request_id: Option<&str>,
) -> Result<(), AccessError> {
    match table.authorize(role, resource, action) {
        Ok(()) => {
            sink.record(&AccessAuditEvent::allowed(role, resource, action, request_id));
            Ok(())
        }
        Err(error) => {
            sink.record(&AccessAuditEvent::denied(role, resource, action, &error, request_id));
            Err(error)
        }
    }
}
