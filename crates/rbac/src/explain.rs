//! Explained authorization decisions and the audit record built from them.
//!
//! [`PermissionEvaluator::allows`] answers yes/no; operators debugging a 403
//! and the audit trail need the *why*. [`PermissionEvaluator::explain`] runs
//! the same decision procedure and reports which branch decided, and
//! [`AuditEntry`] packages the outcome as the value the calling layer
//! persists. Persistence itself stays outside this crate.

use chrono::{DateTime, Utc};
use serde::Serialize;

use opsdesk_core::UserId;

use crate::catalog::{Action, Resource};
use crate::context::EvaluationContext;
use crate::evaluator::PermissionEvaluator;
use crate::permission::Conditions;
use crate::role::Role;

/// Which branch of the decision procedure settled the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DecisionReason {
    /// A wildcard-resource grant on the requested action.
    WildcardGrant,
    /// An unconditioned grant on the exact (resource, action) pair.
    SpecificGrant,
    /// A grant matched but its conditions did not hold against the context.
    ConditionsFailed { conditions: Conditions },
    /// No grant names the (resource, action) pair.
    NotGranted,
}

/// A fully explained authorization decision.
///
/// Invariant: `granted` always equals what [`PermissionEvaluator::allows`]
/// returns for the same arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessExplanation {
    pub role: Role,
    pub resource: Resource,
    pub action: Action,
    pub granted: bool,
    pub reason: DecisionReason,
}

impl PermissionEvaluator {
    /// Run the decision procedure and report which branch decided.
    ///
    /// Same order and semantics as [`PermissionEvaluator::allows`].
    pub fn explain(
        &self,
        role: Role,
        resource: &Resource,
        action: &Action,
        ctx: Option<&EvaluationContext>,
    ) -> AccessExplanation {
        let permissions = self.table().role_permissions(role);

        let (granted, reason) = if permissions
            .iter()
            .any(|p| p.resource.is_wildcard() && &p.action == action)
        {
            (true, DecisionReason::WildcardGrant)
        } else {
            match permissions.iter().find(|p| p.covers(resource, action)) {
                None => (false, DecisionReason::NotGranted),
                Some(grant) => match &grant.conditions {
                    None => (true, DecisionReason::SpecificGrant),
                    Some(conditions) if conditions.satisfied_by(ctx) => {
                        (true, DecisionReason::SpecificGrant)
                    }
                    Some(conditions) => (
                        false,
                        DecisionReason::ConditionsFailed {
                            conditions: conditions.clone(),
                        },
                    ),
                },
            }
        };

        AccessExplanation {
            role,
            resource: resource.clone(),
            action: action.clone(),
            granted,
            reason,
        }
    }
}

/// One line of the authorization audit trail.
///
/// Built by the core, persisted by the calling layer. `metadata` is
/// free-form (request id, client address, ...) and opaque here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub user_id: UserId,
    pub role: Role,
    pub resource: Resource,
    pub action: Action,
    pub granted: bool,
    pub reason: DecisionReason,
    pub occurred_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Record an explained decision for `user_id` at `occurred_at`.
    ///
    /// The timestamp is passed in rather than read from the clock so the
    /// core stays deterministic and the caller controls time in tests.
    pub fn record(
        user_id: UserId,
        explanation: AccessExplanation,
        occurred_at: DateTime<Utc>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            user_id,
            role: explanation.role,
            resource: explanation.resource,
            action: explanation.action,
            granted: explanation.granted,
            reason: explanation.reason,
            occurred_at,
            metadata,
        }
    }
}
