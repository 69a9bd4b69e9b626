//! Actor roles

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Actor classification loaded from stored credentials
///
/// A role only changes through an explicit role update against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator with access to every resource
    SystemAdmin,
    /// HR administrator, company-wide people management
    HrAdmin,
    /// Department manager, scoped to their own department
    DeptManager,
    /// Regular employee, scoped to their own records
    Employee,
}

impl Role {
    /// All roles, in descending order of privilege
    pub const ALL: [Role; 4] = [
        Role::SystemAdmin,
        Role::HrAdmin,
        Role::DeptManager,
        Role::Employee,
    ];

    /// Wire name (`system_admin`, `hr_admin`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SystemAdmin => "system_admin",
            Role::HrAdmin => "hr_admin",
            Role::DeptManager => "dept_manager",
            Role::Employee => "employee",
        }
    }

    /// Human readable name shown in profile menus and user management
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SystemAdmin => "System Administrator",
            Role::HrAdmin => "HR Administrator",
            Role::DeptManager => "Department Manager",
            Role::Employee => "Employee",
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system_admin" => Ok(Role::SystemAdmin),
            "hr_admin" => Ok(Role::HrAdmin),
            "dept_manager" => Ok(Role::DeptManager),
            "employee" => Ok(Role::Employee),
            other => Err(CoreError::invalid(format!("unknown role '{}'", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display name for a raw role string, `"Unknown Role"` if it does not parse
pub fn role_display_name(role: &str) -> &'static str {
    role.parse::<Role>()
        .map(|r| r.display_name())
        .unwrap_or("Unknown Role")
}
