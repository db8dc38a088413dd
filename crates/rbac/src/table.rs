//! The role definition table: the authoritative grant data.
//!
//! The table is a compile-time literal, one definition per [`Role`], built
//! through an exhaustive `match` so adding a role without defining it is a
//! compile error. It is constructed once, never mutated, and handed to the
//! evaluator explicitly instead of living as module-level global state — a
//! reduced table can be injected in tests.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Resource;
use crate::permission::{Conditions, Permission};
use crate::role::Role;

/// Which UI modules and widgets a role's user sees.
///
/// A presentation hint only — the evaluator remains the gate for every
/// underlying action, and nothing here must ever be consulted as an
/// authorization decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub modules: Vec<String>,
    pub widgets: Vec<String>,
}

impl DashboardConfig {
    pub fn new<I, J>(modules: I, widgets: J) -> Self
    where
        I: IntoIterator<Item = &'static str>,
        J: IntoIterator<Item = &'static str>,
    {
        Self {
            modules: modules.into_iter().map(str::to_string).collect(),
            widgets: widgets.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Everything the platform knows about one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub role: Role,
    /// Seniority proxy, strictly increasing with authority. Informational
    /// except where explicitly consulted; management capability comes from
    /// `can_manage_roles`, never from comparing levels.
    pub hierarchy_level: u8,
    /// Roles this role may administer (promote, deactivate, create accounts
    /// for). An explicit set: absence here means "cannot manage" regardless
    /// of hierarchy levels.
    pub can_manage_roles: BTreeSet<Role>,
    /// The role's grant list. Unordered; the effective grant set is the union.
    pub permissions: Vec<Permission>,
    pub dashboard: DashboardConfig,
}

impl RoleDefinition {
    /// A definition that grants nothing: no permissions, no manageable
    /// roles, hierarchy level 0, empty dashboard.
    pub fn empty(role: Role) -> Self {
        Self {
            role,
            hierarchy_level: 0,
            can_manage_roles: BTreeSet::new(),
            permissions: Vec::new(),
            dashboard: DashboardConfig::empty(),
        }
    }
}

/// Immutable mapping from every [`Role`] to its [`RoleDefinition`].
///
/// Construct with [`RoleTable::builtin`] for the production table, or
/// [`RoleTable::from_definitions`] for a reduced table in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleTable {
    // Indexed by Role discriminant; both constructors guarantee one entry
    // per role, no gaps.
    definitions: Vec<RoleDefinition>,
}

impl RoleTable {
    /// The production table.
    pub fn builtin() -> Self {
        Self {
            definitions: Role::ALL.into_iter().map(builtin_definition).collect(),
        }
    }

    /// Build a table from explicit definitions (reduced tables in tests,
    /// fixtures). Later duplicates win; roles the input does not cover get
    /// [`RoleDefinition::empty`] — no permissions, level 0 — so a partial
    /// table can only deny, never allow.
    pub fn from_definitions(definitions: Vec<RoleDefinition>) -> Self {
        let definitions = Role::ALL
            .into_iter()
            .map(|role| {
                definitions
                    .iter()
                    .rfind(|d| d.role == role)
                    .cloned()
                    .unwrap_or_else(|| RoleDefinition::empty(role))
            })
            .collect();
        Self { definitions }
    }

    pub fn definition(&self, role: Role) -> &RoleDefinition {
        &self.definitions[role as usize]
    }

    /// The role's grant list.
    pub fn role_permissions(&self, role: Role) -> &[Permission] {
        &self.definition(role).permissions
    }

    /// Whether `manager` may administer `target`.
    ///
    /// Explicit set membership, deliberately not a hierarchy-level
    /// comparison: the table data diverges from the levels on purpose (the
    /// financial manager administers the administrative manager one level
    /// below; the technical supervisor does not administer the front desk
    /// two levels below).
    pub fn can_manage(&self, manager: Role, target: Role) -> bool {
        self.definition(manager).can_manage_roles.contains(&target)
    }

    pub fn hierarchy_level(&self, role: Role) -> u8 {
        self.definition(role).hierarchy_level
    }

    pub fn dashboard_config(&self, role: Role) -> &DashboardConfig {
        &self.definition(role).dashboard
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_definition(role: Role) -> RoleDefinition {
    match role {
        Role::FrontDesk => RoleDefinition {
            role,
            hierarchy_level: 1,
            can_manage_roles: BTreeSet::new(),
            permissions: vec![
                Permission::new("clients", "read"),
                Permission::new("clients", "write"),
                Permission::new("orders", "read"),
                Permission::new("orders", "write").when(Conditions::own_only()),
                Permission::new("chat", "read"),
                Permission::new("chat", "write"),
            ],
            dashboard: DashboardConfig::new(
                ["clients", "orders", "chat"],
                ["pending_orders", "client_messages", "daily_tasks"],
            ),
        },

        Role::Technician => RoleDefinition {
            role,
            hierarchy_level: 2,
            can_manage_roles: BTreeSet::new(),
            permissions: vec![
                Permission::new("orders", "read").when(Conditions::own_only()),
                Permission::new("orders", "write").when(Conditions::own_only()),
                Permission::new("technical-reports", "read"),
                Permission::new("technical-reports", "write"),
                Permission::new("service-history", "read"),
                Permission::new("clients", "read").when(Conditions::own_only()),
            ],
            dashboard: DashboardConfig::new(
                ["orders", "reports", "history"],
                [
                    "assigned_orders",
                    "completed_today",
                    "pending_reports",
                    "tools_status",
                ],
            ),
        },

        Role::TechnicalSupervisor => RoleDefinition {
            role,
            hierarchy_level: 3,
            can_manage_roles: BTreeSet::from([Role::Technician]),
            // Technician grants without own_only, plus team management.
            permissions: vec![
                Permission::new("orders", "read"),
                Permission::new("orders", "write"),
                Permission::new("orders", "assign"),
                Permission::new("technical-reports", "read"),
                Permission::new("technical-reports", "write"),
                Permission::new("technical-team", "read"),
                Permission::new("technical-team", "write"),
                Permission::new("performance-reports", "read"),
                Permission::new("clients", "read"),
            ],
            dashboard: DashboardConfig::new(
                ["orders", "team", "reports", "performance"],
                [
                    "team_orders",
                    "team_performance",
                    "resource_allocation",
                    "efficiency_metrics",
                ],
            ),
        },

        Role::AdministrativeManager => RoleDefinition {
            role,
            hierarchy_level: 4,
            can_manage_roles: BTreeSet::from([
                Role::FrontDesk,
                Role::Technician,
                Role::TechnicalSupervisor,
            ]),
            // Full access except the financial area.
            permissions: vec![
                Permission::new("clients", "read"),
                Permission::new("clients", "write"),
                Permission::new("clients", "delete"),
                Permission::new("orders", "read"),
                Permission::new("orders", "write"),
                Permission::new("orders", "delete"),
                Permission::new("users", "read"),
                Permission::new("users", "write"),
                Permission::new("users", "create"),
                Permission::new("settings", "read"),
                Permission::new("settings", "write"),
                Permission::new("integrations", "read"),
                Permission::new("integrations", "write"),
                Permission::new("operational-reports", "read"),
                Permission::new("audit", "read"),
            ],
            dashboard: DashboardConfig::new(
                ["users", "settings", "reports", "integrations", "audit"],
                [
                    "system_health",
                    "user_activity",
                    "operational_metrics",
                    "integration_status",
                ],
            ),
        },

        Role::FinancialManager => RoleDefinition {
            role,
            hierarchy_level: 5,
            // May create accounts for other managers.
            can_manage_roles: BTreeSet::from([Role::AdministrativeManager]),
            // The wildcard covers read and write only; approve/reject/export
            // and the financial-area grants stay specific. Do not collapse
            // this into a wildcard action.
            permissions: vec![
                Permission {
                    resource: Resource::WILDCARD,
                    action: "read".into(),
                    conditions: None,
                },
                Permission {
                    resource: Resource::WILDCARD,
                    action: "write".into(),
                    conditions: None,
                },
                Permission::new("payments", "approve"),
                Permission::new("payments", "reject"),
                Permission::new("financial-reports", "read"),
                Permission::new("financial-reports", "write"),
                Permission::new("financial-reports", "export"),
                Permission::new("financial-users", "create"),
                Permission::new("financial-settings", "write"),
                Permission::new("financial-audit", "read"),
            ],
            dashboard: DashboardConfig::new(
                ["finance", "payments", "reports", "users", "audit"],
                [
                    "pending_approvals",
                    "financial_summary",
                    "cash_flow",
                    "revenue_metrics",
                ],
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_every_role_exactly_once() {
        let table = RoleTable::builtin();
        for role in Role::ALL {
            assert_eq!(table.definition(role).role, role);
        }
        assert_eq!(table.definitions.len(), Role::ALL.len());
    }

    #[test]
    fn hierarchy_levels_ascend_with_authority() {
        let table = RoleTable::builtin();
        let levels: Vec<u8> = Role::ALL.iter().map(|r| table.hierarchy_level(*r)).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn managers_sit_strictly_above_every_role_they_manage() {
        // Monotonicity is a convention of the table data, not enforced by
        // construction; this pins it so a future table edit cannot silently
        // break it.
        let table = RoleTable::builtin();
        for manager in Role::ALL {
            for managed in &table.definition(manager).can_manage_roles {
                assert!(
                    table.hierarchy_level(manager) > table.hierarchy_level(*managed),
                    "{manager} manages {managed} without outranking it"
                );
            }
        }
    }

    #[test]
    fn management_is_explicit_not_derived_from_levels() {
        let table = RoleTable::builtin();

        // Supervisor outranks the front desk by two levels yet does not
        // manage it.
        assert!(table.hierarchy_level(Role::TechnicalSupervisor) > table.hierarchy_level(Role::FrontDesk));
        assert!(!table.can_manage(Role::TechnicalSupervisor, Role::FrontDesk));

        // The explicit entries hold.
        assert!(table.can_manage(Role::TechnicalSupervisor, Role::Technician));
        assert!(table.can_manage(Role::FinancialManager, Role::AdministrativeManager));
        assert!(table.can_manage(Role::AdministrativeManager, Role::FrontDesk));

        // Nothing manages the financial manager, and nothing manages itself.
        for role in Role::ALL {
            assert!(!table.can_manage(role, Role::FinancialManager));
            assert!(!table.can_manage(role, role));
        }
    }

    #[test]
    fn only_the_financial_manager_holds_wildcard_grants() {
        let table = RoleTable::builtin();
        for role in Role::ALL {
            let has_wildcard = table
                .role_permissions(role)
                .iter()
                .any(|p| p.resource.is_wildcard());
            assert_eq!(has_wildcard, role == Role::FinancialManager);
        }
    }

    #[test]
    fn wildcard_grants_cover_read_and_write_only() {
        let table = RoleTable::builtin();
        let wildcard_actions: Vec<&str> = table
            .role_permissions(Role::FinancialManager)
            .iter()
            .filter(|p| p.resource.is_wildcard())
            .map(|p| p.action.as_str())
            .collect();
        assert_eq!(wildcard_actions, vec!["read", "write"]);
    }

    #[test]
    fn partial_tables_deny_for_uncovered_roles() {
        let table = RoleTable::from_definitions(vec![RoleDefinition {
            role: Role::Technician,
            hierarchy_level: 2,
            can_manage_roles: BTreeSet::new(),
            permissions: vec![Permission::new("orders", "read")],
            dashboard: DashboardConfig::empty(),
        }]);

        assert_eq!(table.role_permissions(Role::Technician).len(), 1);
        assert!(table.role_permissions(Role::FrontDesk).is_empty());
        assert_eq!(table.hierarchy_level(Role::FrontDesk), 0);
        assert_eq!(*table.dashboard_config(Role::FrontDesk), DashboardConfig::empty());
    }

    #[test]
    fn dashboard_config_falls_back_to_empty() {
        assert!(DashboardConfig::empty().modules.is_empty());
        assert!(DashboardConfig::empty().widgets.is_empty());
    }
}
