//! The authorization decision procedure.
//!
//! Security-critical: a bug here is a privilege-escalation bug. The check
//! order encodes precedence and must stay as is — wildcard grants first
//! (unconditional), then the specific grant, then condition narrowing.

use crate::catalog::{Action, Resource};
use crate::context::EvaluationContext;
use crate::role::Role;
use crate::table::RoleTable;

/// Pure allow/deny evaluator over an injected, immutable [`RoleTable`].
///
/// Evaluation is synchronous, performs no IO and keeps no state across
/// calls, so a single evaluator can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct PermissionEvaluator {
    table: RoleTable,
}

impl PermissionEvaluator {
    pub fn new(table: RoleTable) -> Self {
        Self { table }
    }

    /// The production evaluator, over [`RoleTable::builtin`].
    pub fn builtin() -> Self {
        Self::new(RoleTable::builtin())
    }

    pub fn table(&self) -> &RoleTable {
        &self.table
    }

    /// May `role` perform `action` on `resource`, given `ctx`?
    ///
    /// Decision order:
    /// 1. a wildcard-resource grant on the requested action allows,
    ///    unconditionally — conditions are not consulted;
    /// 2. no grant on the exact (resource, action) pair denies;
    /// 3. an unconditioned grant allows; a conditioned grant allows only if
    ///    every present condition holds against `ctx` (a missing `ctx`, or a
    ///    missing field a condition needs, fails the condition).
    pub fn allows(
        &self,
        role: Role,
        resource: &Resource,
        action: &Action,
        ctx: Option<&EvaluationContext>,
    ) -> bool {
        let permissions = self.table.role_permissions(role);

        if permissions
            .iter()
            .any(|p| p.resource.is_wildcard() && &p.action == action)
        {
            tracing::debug!(%role, %resource, %action, "wildcard grant");
            return true;
        }

        let Some(grant) = permissions.iter().find(|p| p.covers(resource, action)) else {
            tracing::debug!(%role, %resource, %action, "no matching grant");
            return false;
        };

        match &grant.conditions {
            None => {
                tracing::debug!(%role, %resource, %action, "specific grant");
                true
            }
            Some(conditions) => {
                let satisfied = conditions.satisfied_by(ctx);
                tracing::debug!(%role, %resource, %action, satisfied, "conditioned grant");
                satisfied
            }
        }
    }
}
