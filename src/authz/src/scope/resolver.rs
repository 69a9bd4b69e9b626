/// Scope resolution from actor and target
///
/// `has_permission` trusts the scope its caller claims. The resolver lets a
/// caller hand over the target record's ownership instead, and computes the
/// narrowest scope that relates the actor to it.

use hrm_core::{Actor, DepartmentId, UserId};
use serde::{Deserialize, Serialize};

use super::types::Scope;

/// Ownership facts about the record being accessed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// User the record belongs to
    #[serde(default, alias = "owner_id", alias = "employeeId", alias = "employee_id")]
    pub owner_id: Option<UserId>,

    /// Department the record belongs to
    #[serde(default, alias = "department_id")]
    pub department_id: Option<DepartmentId>,

    /// Manager of the record's owner
    #[serde(default, alias = "manager_id")]
    pub manager_id: Option<UserId>,
}

impl Target {
    /// A record with no owner, e.g. a company-wide announcement
    pub fn company() -> Self {
        Self::default()
    }

    /// A record belonging to a user
    pub fn owned_by(owner_id: impl Into<UserId>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            ..Self::default()
        }
    }

    /// Attach the record to a department
    pub fn in_department(mut self, department_id: impl Into<DepartmentId>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }

    /// Record the manager of the record's owner
    pub fn managed_by(mut self, manager_id: impl Into<UserId>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }
}

/// Derives the request scope for an actor/target pair
///
/// # Examples
///
/// ```
/// use hrm_authz::scope::{Scope, ScopeResolver, Target};
/// use hrm_core::{Actor, Role};
///
/// let resolver = ScopeResolver::new();
/// let manager = Actor::new("m-1", Role::DeptManager).with_department("d-1", "Sales");
///
/// let own = Target::owned_by("m-1");
/// let teammate = Target::owned_by("e-2").in_department("d-1");
/// let outsider = Target::owned_by("e-3").in_department("d-9");
///
/// assert_eq!(resolver.resolve(&manager, &own), Scope::Own);
/// assert_eq!(resolver.resolve(&manager, &teammate), Scope::Department);
/// assert_eq!(resolver.resolve(&manager, &outsider), Scope::Company);
/// ```
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    /// Treat records of the actor's direct reports as department scope even
    /// when department ids are missing or differ
    include_direct_reports: bool,
}

impl ScopeResolver {
    /// Creates a resolver that counts direct reports as department scope
    pub fn new() -> Self {
        Self {
            include_direct_reports: true,
        }
    }

    /// Creates a resolver that relies on department ids alone
    pub fn department_ids_only() -> Self {
        Self {
            include_direct_reports: false,
        }
    }

    /// Resolves the narrowest scope relating `actor` to `target`
    ///
    /// Missing ids never widen the relationship toward the actor: a target
    /// without a department is never "department" by id comparison.
    pub fn resolve(&self, actor: &Actor, target: &Target) -> Scope {
        if target.owner_id.as_deref() == Some(actor.id.as_str()) {
            return Scope::Own;
        }

        let same_department = match (&actor.department_id, &target.department_id) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => false,
        };
        if same_department {
            return Scope::Department;
        }

        if self.include_direct_reports
            && target.owner_id.is_some()
            && target.manager_id.as_deref() == Some(actor.id.as_str())
        {
            return Scope::Department;
        }

        Scope::Company
    }
}

impl Default for ScopeResolver {
    fn default() -> Self {
        Self::new()
    }
}
