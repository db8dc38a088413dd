//! `opsdesk-rbac` — role-based access control for the service-order platform.
//!
//! This crate is the authorization decision boundary: a hard-coded table of
//! employee roles (hierarchy level, manageable roles, granted permissions,
//! dashboard manifest) and the pure decision procedure that turns a
//! `(role, resource, action, context)` request into allow/deny.
//!
//! It is intentionally decoupled from HTTP, sessions and storage: callers
//! resolve the principal's [`Role`] elsewhere (token claims, session row) and
//! build an [`EvaluationContext`] from the operation at hand. Everything here
//! is deterministic, synchronous and free of IO; anomalous input (missing
//! context fields, grants on retired resources) resolves to deny, never to an
//! error a caller could mistake for allow.

pub mod catalog;
pub mod context;
pub mod evaluator;
pub mod explain;
pub mod grants;
pub mod permission;
pub mod role;
pub mod table;

pub use catalog::{Action, Resource, list_actions, list_resources};
pub use context::EvaluationContext;
pub use evaluator::PermissionEvaluator;
pub use explain::{AccessExplanation, AuditEntry, DecisionReason};
pub use grants::{accessible_resources, can_manage_user, effective_permissions};
pub use permission::{Conditions, Permission};
pub use role::{Role, RoleParseError};
pub use table::{DashboardConfig, RoleDefinition, RoleTable};
