//! Employee roles.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Employee role, the unit of authority in the platform.
///
/// The set is closed: every principal carries exactly one of these, and the
/// role table in [`crate::table`] is total over it. External inputs (token
/// claims, legacy user rows) carrying a role *string* must pass through
/// [`FromStr`] before touching the table, so an unknown role fails at the
/// parse boundary rather than leaking into a lookup.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Front-desk agent: client intake, order creation, chat.
    FrontDesk,
    /// Field technician: works own assigned orders and reports.
    Technician,
    /// Technical supervisor: runs the technician team.
    TechnicalSupervisor,
    /// Administrative manager: everything except the financial area.
    AdministrativeManager,
    /// Financial manager: top of the hierarchy, financial area included.
    FinancialManager,
}

impl Role {
    /// All roles, in ascending hierarchy order.
    pub const ALL: [Role; 5] = [
        Role::FrontDesk,
        Role::Technician,
        Role::TechnicalSupervisor,
        Role::AdministrativeManager,
        Role::FinancialManager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::FrontDesk => "front-desk",
            Role::Technician => "technician",
            Role::TechnicalSupervisor => "technical-supervisor",
            Role::AdministrativeManager => "administrative-manager",
            Role::FinancialManager => "financial-manager",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to map an external role string onto the closed [`Role`] set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: '{0}'")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front-desk" => Ok(Role::FrontDesk),
            "technician" => Ok(Role::Technician),
            "technical-supervisor" => Ok(Role::TechnicalSupervisor),
            "administrative-manager" => Ok(Role::AdministrativeManager),
            "financial-manager" => Ok(Role::FinancialManager),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}
