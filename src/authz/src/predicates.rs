//! Named checks used to gate screens and buttons
//!
//! Pure functions over a table and an optional actor. [`crate::Authorizer`]
//! exposes the same checks against the ambient actor.

use crate::engine::evaluate::has_permission;
use crate::scope::Scope;
use crate::table::PermissionTable;
use crate::types::{Action, Resource};
use hrm_core::{Actor, Role};

fn has_role(actor: Option<&Actor>, role: Role) -> bool {
    actor.map_or(false, |a| a.role == role)
}

pub fn is_system_admin(actor: Option<&Actor>) -> bool {
    has_role(actor, Role::SystemAdmin)
}

pub fn is_hr_admin(actor: Option<&Actor>) -> bool {
    has_role(actor, Role::HrAdmin)
}

pub fn is_department_manager(actor: Option<&Actor>) -> bool {
    has_role(actor, Role::DeptManager)
}

pub fn is_employee(actor: Option<&Actor>) -> bool {
    has_role(actor, Role::Employee)
}

/// HR admins and system admins manage user accounts and roles
pub fn can_manage_users(actor: Option<&Actor>) -> bool {
    is_hr_admin(actor) || is_system_admin(actor)
}

/// Approve leave requests at least within the actor's department
pub fn can_approve_leave(table: &PermissionTable, actor: Option<&Actor>) -> bool {
    has_permission(table, &Resource::Absences, Action::Approve, Scope::Department, actor)
}

pub fn can_view_company_analytics(table: &PermissionTable, actor: Option<&Actor>) -> bool {
    has_permission(table, &Resource::Analytics, Action::Read, Scope::Company, actor)
}

pub fn can_create_announcements(
    table: &PermissionTable,
    scope: Scope,
    actor: Option<&Actor>,
) -> bool {
    has_permission(table, &Resource::Announcements, Action::Create, scope, actor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> Actor {
        Actor::new("u-1", role)
    }

    #[test]
    fn test_role_predicates() {
        let admin = actor(Role::SystemAdmin);
        assert!(is_system_admin(Some(&admin)));
        assert!(!is_hr_admin(Some(&admin)));
        assert!(is_department_manager(Some(&actor(Role::DeptManager))));
        assert!(is_employee(Some(&actor(Role::Employee))));

        assert!(!is_system_admin(None));
        assert!(!is_employee(None));
    }

    #[test]
    fn test_can_manage_users() {
        assert!(can_manage_users(Some(&actor(Role::HrAdmin))));
        assert!(can_manage_users(Some(&actor(Role::SystemAdmin))));
        assert!(!can_manage_users(Some(&actor(Role::DeptManager))));
        assert!(!can_manage_users(Some(&actor(Role::Employee))));
        assert!(!can_manage_users(None));
    }

    #[test]
    fn test_can_approve_leave() {
        let table = PermissionTable::builtin();
        assert!(can_approve_leave(&table, Some(&actor(Role::HrAdmin))));
        assert!(can_approve_leave(&table, Some(&actor(Role::DeptManager))));
        assert!(!can_approve_leave(&table, Some(&actor(Role::Employee))));
        // Wildcard grants cover create/read/update/delete only
        assert!(!can_approve_leave(&table, Some(&actor(Role::SystemAdmin))));
    }

    #[test]
    fn test_can_view_company_analytics() {
        let table = PermissionTable::builtin();
        assert!(can_view_company_analytics(&table, Some(&actor(Role::HrAdmin))));
        assert!(can_view_company_analytics(&table, Some(&actor(Role::SystemAdmin))));
        assert!(!can_view_company_analytics(&table, Some(&actor(Role::DeptManager))));
        assert!(!can_view_company_analytics(&table, None));
    }

    #[test]
    fn test_can_create_announcements() {
        let table = PermissionTable::builtin();
        let manager = actor(Role::DeptManager);

        assert!(can_create_announcements(&table, Scope::Department, Some(&manager)));
        assert!(!can_create_announcements(&table, Scope::Company, Some(&manager)));
        assert!(can_create_announcements(&table, Scope::Company, Some(&actor(Role::HrAdmin))));
        assert!(!can_create_announcements(&table, Scope::Own, Some(&actor(Role::Employee))));
    }
}
