//! Per-request evaluation context.

use opsdesk_core::UserId;

/// Facts about the operation being attempted, supplied by the caller.
///
/// Built fresh for each evaluation call and discarded afterwards; the
/// evaluator never caches one. Every field is optional — conditional grants
/// treat a missing field their condition needs as failure, so a caller that
/// omits a fact can only lose access, never gain it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Owner of the target resource (e.g. the technician assigned to an order).
    pub owner_id: Option<UserId>,
    /// The acting principal.
    pub user_id: Option<UserId>,
    /// Monetary value of the operation, in minor units (cents).
    pub value: Option<i64>,
    /// Department tag of the target resource.
    pub department: Option<String>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}
