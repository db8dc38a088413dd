//! Catalog of valid resource and action identifiers.
//!
//! The catalog is a reference surface for tooling and role-table authors
//! (admin UIs listing available grants, grant linters). It enforces nothing:
//! a grant naming a resource outside the catalog simply never matches a
//! request for a catalogued one.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Resource identifier.
///
/// Resources are modeled as opaque strings (e.g. `"orders"`). The special
/// wildcard resource `"*"` means "every resource" and is only meaningful
/// inside a role's grant list, never in a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Cow<'static, str>);

impl Resource {
    /// The wildcard resource, matching any requested resource.
    pub const WILDCARD: Resource = Resource(Cow::Borrowed("*"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Resource {
    fn from(value: &'static str) -> Self {
        Resource::new(value)
    }
}

/// Action identifier (e.g. `"read"`, `"approve"`).
///
/// There is no wildcard action; each wildcard-resource grant names one
/// concrete action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Cow<'static, str>);

impl Action {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Action {
    fn from(value: &'static str) -> Self {
        Action::new(value)
    }
}

/// Every resource the platform exposes to grant authors.
pub const RESOURCES: [&str; 13] = [
    "clients",
    "orders",
    "payments",
    "technical-reports",
    "operational-reports",
    "financial-reports",
    "users",
    "settings",
    "integrations",
    "audit",
    "chat",
    "technical-team",
    "service-history",
];

/// Every action the platform exposes to grant authors.
pub const ACTIONS: [&str; 8] = [
    "read", "write", "create", "delete", "approve", "reject", "assign", "export",
];

/// The fixed set of valid resource identifiers.
pub fn list_resources() -> BTreeSet<Resource> {
    RESOURCES.iter().map(|r| Resource::new(*r)).collect()
}

/// The fixed set of valid action identifiers.
pub fn list_actions() -> BTreeSet<Action> {
    ACTIONS.iter().map(|a| Action::new(*a)).collect()
}
