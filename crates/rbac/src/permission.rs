//! Permission grants and their conditions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Action, Resource};
use crate::context::EvaluationContext;

/// A single grant: a role may perform `action` on `resource`, optionally
/// narrowed by [`Conditions`].
///
/// A grant with the wildcard resource applies to every resource but still to
/// exactly one action; wildcard grants carry no conditions (the evaluator
/// treats them as unconditional).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
}

impl Permission {
    pub fn new(resource: impl Into<Resource>, action: impl Into<Action>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
            conditions: None,
        }
    }

    /// Attach conditions to this grant.
    pub fn when(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Does this grant name the same (resource, action) pair?
    pub fn covers(&self, resource: &Resource, action: &Action) -> bool {
        &self.resource == resource && &self.action == action
    }
}

/// Runtime refinements narrowing when a grant applies.
///
/// All present conditions must hold (logical AND). Evaluation is fail-closed:
/// a condition whose context field is absent fails, it is never skipped as
/// "not applicable".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    /// Only when the acting principal owns the target resource.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub own_only: bool,
    /// Only when the operation's monetary value (minor units) does not exceed
    /// this ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    /// Only when the target resource belongs to one of these departments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<BTreeSet<String>>,
}

impl Conditions {
    pub fn own_only() -> Self {
        Self {
            own_only: true,
            ..Self::default()
        }
    }

    pub fn max_value(value: i64) -> Self {
        Self {
            max_value: Some(value),
            ..Self::default()
        }
    }

    pub fn departments<I, S>(departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            departments: Some(departments.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Combine two condition sets (useful for table literals that narrow by
    /// both ownership and value).
    pub fn and(mut self, other: Conditions) -> Self {
        self.own_only |= other.own_only;
        if other.max_value.is_some() {
            self.max_value = other.max_value;
        }
        if other.departments.is_some() {
            self.departments = other.departments;
        }
        self
    }

    /// Evaluate every present condition against `ctx`, AND-composed.
    ///
    /// `ctx = None` fails any non-empty condition set.
    pub fn satisfied_by(&self, ctx: Option<&EvaluationContext>) -> bool {
        let Some(ctx) = ctx else {
            return self.is_empty();
        };

        if self.own_only {
            let owned = match (ctx.owner_id, ctx.user_id) {
                (Some(owner), Some(user)) => owner == user,
                _ => false,
            };
            if !owned {
                return false;
            }
        }

        if let Some(ceiling) = self.max_value {
            match ctx.value {
                Some(value) if value <= ceiling => {}
                _ => return false,
            }
        }

        if let Some(departments) = &self.departments {
            match &ctx.department {
                Some(department) if departments.contains(department) => {}
                _ => return false,
            }
        }

        true
    }

    fn is_empty(&self) -> bool {
        !self.own_only && self.max_value.is_none() && self.departments.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_core::UserId;

    #[test]
    fn empty_conditions_hold_without_context() {
        assert!(Conditions::default().satisfied_by(None));
        assert!(Conditions::default().satisfied_by(Some(&EvaluationContext::new())));
    }

    #[test]
    fn own_only_requires_matching_owner_and_user() {
        let cond = Conditions::own_only();
        let me = UserId::new();
        let other = UserId::new();

        let owned = EvaluationContext::new().with_owner(me).with_user(me);
        assert!(cond.satisfied_by(Some(&owned)));

        let not_owned = EvaluationContext::new().with_owner(other).with_user(me);
        assert!(!cond.satisfied_by(Some(&not_owned)));

        // Missing either side fails closed.
        let owner_only = EvaluationContext::new().with_owner(me);
        assert!(!cond.satisfied_by(Some(&owner_only)));
        assert!(!cond.satisfied_by(None));
    }

    #[test]
    fn max_value_is_an_inclusive_ceiling() {
        let cond = Conditions::max_value(10_000);
        assert!(cond.satisfied_by(Some(&EvaluationContext::new().with_value(10_000))));
        assert!(cond.satisfied_by(Some(&EvaluationContext::new().with_value(1))));
        assert!(!cond.satisfied_by(Some(&EvaluationContext::new().with_value(10_001))));
        // Absent value fails, it is not "no ceiling applies".
        assert!(!cond.satisfied_by(Some(&EvaluationContext::new())));
    }

    #[test]
    fn departments_require_membership() {
        let cond = Conditions::departments(["north", "south"]);
        assert!(cond.satisfied_by(Some(&EvaluationContext::new().with_department("north"))));
        assert!(!cond.satisfied_by(Some(&EvaluationContext::new().with_department("east"))));
        assert!(!cond.satisfied_by(Some(&EvaluationContext::new())));
    }

    #[test]
    fn conditions_compose_with_and() {
        let cond = Conditions::own_only().and(Conditions::max_value(500));
        let me = UserId::new();

        let both = EvaluationContext::new()
            .with_owner(me)
            .with_user(me)
            .with_value(400);
        assert!(cond.satisfied_by(Some(&both)));

        let wrong_owner = EvaluationContext::new()
            .with_owner(UserId::new())
            .with_user(me)
            .with_value(400);
        assert!(!cond.satisfied_by(Some(&wrong_owner)));

        let over_ceiling = EvaluationContext::new()
            .with_owner(me)
            .with_user(me)
            .with_value(600);
        assert!(!cond.satisfied_by(Some(&over_ceiling)));
    }
}
