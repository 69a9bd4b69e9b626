//! Role to permission table
//!
//! The table is static configuration: built once (either the builtin grants
//! or a file loaded at startup) and never mutated afterwards, so it can be
//! shared across threads without locking.

use crate::error::{AuthzError, Result};
use crate::scope::Scope;
use crate::types::{Action, Permission, Resource};
use hrm_core::Role;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

static BUILTIN: Lazy<Arc<PermissionTable>> =
    Lazy::new(|| Arc::new(PermissionTable::default_grants()));

/// Immutable mapping from role to its permissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionTable {
    grants: HashMap<Role, Vec<Permission>>,
}

impl PermissionTable {
    /// An empty table, every role has zero permissions
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide builtin table
    pub fn builtin() -> Arc<PermissionTable> {
        Arc::clone(&BUILTIN)
    }

    /// Replace the grants of one role
    pub fn with_role(mut self, role: Role, permissions: Vec<Permission>) -> Self {
        self.grants.insert(role, permissions);
        self
    }

    /// Load a table from JSON of the form `{ "<role>": [ {resource, action, scope} ] }`
    ///
    /// Unknown role names are skipped. A malformed entry rejects the whole
    /// table.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<Permission>> = serde_json::from_str(json)
            .map_err(|e| AuthzError::InvalidTable(e.to_string()))?;

        let mut grants = HashMap::with_capacity(raw.len());
        for (name, permissions) in raw {
            match name.parse::<Role>() {
                Ok(role) => {
                    debug!("Loaded {} permissions for role {}", permissions.len(), role);
                    grants.insert(role, permissions);
                }
                Err(_) => {
                    warn!("Skipping permissions for unknown role '{}'", name);
                }
            }
        }

        Ok(Self { grants })
    }

    /// Load a table from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        info!(
            "Loaded permission table from {} ({} roles)",
            path.display(),
            table.grants.len()
        );
        Ok(table)
    }

    /// Permissions granted to a role; empty if the role has no entry
    pub fn permissions_for(&self, role: Role) -> &[Permission] {
        self.grants.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Roles that have an entry, in privilege order
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.grants.keys().copied().collect();
        roles.sort();
        roles
    }

    /// Total number of permission entries
    pub fn len(&self) -> usize {
        self.grants.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The grants the HR application ships with
    fn default_grants() -> Self {
        use Action::{Approve, Create, Delete, Read, Update};
        use Resource::*;
        use Scope::{Company, Department, Own};

        let p = Permission::new;

        Self::new()
            .with_role(
                Role::SystemAdmin,
                vec![
                    // Full system access
                    Permission::wildcard(Create, Company),
                    Permission::wildcard(Read, Company),
                    Permission::wildcard(Update, Company),
                    Permission::wildcard(Delete, Company),
                    // System configuration
                    p(System, Create, Company),
                    p(System, Update, Company),
                    // User permissions
                    p(Permissions, Create, Company),
                    p(Permissions, Update, Company),
                    p(Permissions, Delete, Company),
                ],
            )
            .with_role(
                Role::HrAdmin,
                vec![
                    p(Employees, Create, Company),
                    p(Employees, Read, Company),
                    p(Employees, Update, Company),
                    p(Employees, Delete, Company),
                    p(Absences, Read, Company),
                    p(Absences, Approve, Company),
                    p(Performance, Create, Company),
                    p(Performance, Read, Company),
                    p(Performance, Update, Company),
                    p(Analytics, Read, Company),
                    p(Reports, Create, Company),
                    p(Announcements, Create, Company),
                    p(Announcements, Update, Company),
                    p(Announcements, Delete, Company),
                    p(Departments, Read, Company),
                    p(Departments, Update, Company),
                ],
            )
            .with_role(
                Role::DeptManager,
                vec![
                    p(Employees, Read, Department),
                    p(Employees, Update, Department),
                    p(Absences, Read, Department),
                    p(Absences, Approve, Department),
                    p(Performance, Create, Department),
                    p(Performance, Read, Department),
                    p(Performance, Update, Department),
                    p(Goals, Create, Department),
                    p(Goals, Read, Department),
                    p(Goals, Update, Department),
                    p(Timeclock, Read, Department),
                    p(Analytics, Read, Department),
                    p(Announcements, Create, Department),
                    p(Announcements, Update, Department),
                ],
            )
            .with_role(
                Role::Employee,
                vec![
                    p(Employees, Read, Own),
                    p(Employees, Update, Own),
                    p(Absences, Create, Own),
                    p(Absences, Read, Own),
                    p(Absences, Update, Own),
                    p(Performance, Read, Own),
                    p(Goals, Read, Own),
                    p(Goals, Update, Own),
                    p(Timeclock, Create, Own),
                    p(Timeclock, Read, Own),
                    // Company-wide announcements are readable by everyone
                    p(Announcements, Read, Company),
                ],
            )
    }
}
