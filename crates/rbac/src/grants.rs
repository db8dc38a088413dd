//! Grant-set helpers layered on the role table.
//!
//! Per-user custom grants (stored by the user-management layer, fetched by
//! the caller) overlay the role's base grants; this module owns the merge
//! rule and the derived queries admin UIs need.

use std::collections::BTreeSet;

use opsdesk_core::UserId;

use crate::catalog::{Resource, list_resources};
use crate::permission::Permission;
use crate::role::Role;
use crate::table::RoleTable;

/// Merge a role's base grants with a user's custom grants.
///
/// A custom grant on a (resource, action) pair the role already grants
/// *replaces* the role grant (its conditions included — a custom grant can
/// narrow or widen); a custom grant on a new pair is appended. Base grants
/// the custom set does not touch pass through unchanged.
pub fn effective_permissions(base: &[Permission], custom: &[Permission]) -> Vec<Permission> {
    let mut effective: Vec<Permission> = base.to_vec();

    for custom_grant in custom {
        match effective
            .iter_mut()
            .find(|p| p.covers(&custom_grant.resource, &custom_grant.action))
        {
            Some(existing) => *existing = custom_grant.clone(),
            None => effective.push(custom_grant.clone()),
        }
    }

    effective
}

/// The set of resources a grant list can touch at all.
///
/// A wildcard grant expands to the full catalog; grants on resources outside
/// the catalog (stale names, financial-area extras) are reported as-is so
/// admin tooling can surface them.
pub fn accessible_resources(permissions: &[Permission]) -> BTreeSet<Resource> {
    let mut resources = BTreeSet::new();
    for permission in permissions {
        if permission.resource.is_wildcard() {
            resources.extend(list_resources());
        } else {
            resources.insert(permission.resource.clone());
        }
    }
    resources
}

/// May `manager` administer the account of `target`?
///
/// Everyone may edit their own account; beyond that the role table's
/// explicit management set decides.
pub fn can_manage_user(
    table: &RoleTable,
    manager_role: Role,
    manager_id: UserId,
    target_role: Role,
    target_id: UserId,
) -> bool {
    if manager_id == target_id {
        return true;
    }
    table.can_manage(manager_role, target_role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Action;
    use crate::permission::Conditions;

    #[test]
    fn custom_grant_replaces_base_grant_on_the_same_pair() {
        let base = vec![
            Permission::new("orders", "write").when(Conditions::own_only()),
            Permission::new("orders", "read"),
        ];
        // Custom grant lifts the ownership condition.
        let custom = vec![Permission::new("orders", "write")];

        let effective = effective_permissions(&base, &custom);
        assert_eq!(effective.len(), 2);
        let write = effective
            .iter()
            .find(|p| p.covers(&Resource::new("orders"), &Action::new("write")))
            .unwrap();
        assert!(write.conditions.is_none());
    }

    #[test]
    fn custom_grant_on_a_new_pair_is_appended() {
        let base = vec![Permission::new("orders", "read")];
        let custom = vec![Permission::new("payments", "read")];

        let effective = effective_permissions(&base, &custom);
        assert_eq!(effective.len(), 2);
    }

    #[test]
    fn wildcard_expands_to_the_full_catalog() {
        let perms = vec![Permission {
            resource: Resource::WILDCARD,
            action: "read".into(),
            conditions: None,
        }];
        assert_eq!(accessible_resources(&perms), list_resources());
    }

    #[test]
    fn stale_resources_are_reported_verbatim() {
        let perms = vec![Permission::new("financial-audit", "read")];
        let resources = accessible_resources(&perms);
        assert!(resources.contains(&Resource::new("financial-audit")));
        assert!(!list_resources().contains(&Resource::new("financial-audit")));
    }

    #[test]
    fn self_edit_is_always_allowed() {
        let table = RoleTable::builtin();
        let me = UserId::new();
        assert!(can_manage_user(&table, Role::Technician, me, Role::Technician, me));
        // A different technician is not manageable.
        assert!(!can_manage_user(
            &table,
            Role::Technician,
            me,
            Role::Technician,
            UserId::new()
        ));
        // The supervisor manages technicians regardless of identity.
        assert!(can_manage_user(
            &table,
            Role::TechnicalSupervisor,
            me,
            Role::Technician,
            UserId::new()
        ));
    }
}
