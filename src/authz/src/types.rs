//! Core authorization types

use crate::error::AuthzError;
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action being performed on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Approve,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Approve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Approve => "approve",
        }
    }
}

impl FromStr for Action {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| AuthzError::InvalidInput(format!("unknown action '{}'", s)))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protected category of data or operation
///
/// Identifiers the client does not know about parse into `Other`. Only
/// wildcard grants ever match them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Resource {
    Employees,
    Absences,
    Performance,
    Goals,
    Timeclock,
    Analytics,
    Reports,
    Announcements,
    Departments,
    System,
    Permissions,
    Other(String),
}

impl Resource {
    /// Every resource the application gates
    pub const KNOWN: [Resource; 11] = [
        Resource::Employees,
        Resource::Absences,
        Resource::Performance,
        Resource::Goals,
        Resource::Timeclock,
        Resource::Analytics,
        Resource::Reports,
        Resource::Announcements,
        Resource::Departments,
        Resource::System,
        Resource::Permissions,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Resource::Employees => "employees",
            Resource::Absences => "absences",
            Resource::Performance => "performance",
            Resource::Goals => "goals",
            Resource::Timeclock => "timeclock",
            Resource::Analytics => "analytics",
            Resource::Reports => "reports",
            Resource::Announcements => "announcements",
            Resource::Departments => "departments",
            Resource::System => "system",
            Resource::Permissions => "permissions",
            Resource::Other(name) => name,
        }
    }

    /// Whether this is one of the resources in [`Resource::KNOWN`]
    pub fn is_known(&self) -> bool {
        !matches!(self, Resource::Other(_))
    }
}

impl FromStr for Resource {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AuthzError::InvalidInput("resource cannot be empty".to_string()));
        }
        if s == "*" {
            return Err(AuthzError::InvalidInput(
                "'*' is a pattern, not a resource".to_string(),
            ));
        }

        Ok(Resource::KNOWN
            .into_iter()
            .find(|r| r.as_str() == s)
            .unwrap_or_else(|| Resource::Other(s.to_string())))
    }
}

impl TryFrom<String> for Resource {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.as_str().to_string()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource side of a permission entry, `"*"` or a resource name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourcePattern {
    Any,
    Named(Resource),
}

impl ResourcePattern {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, ResourcePattern::Any)
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            ResourcePattern::Any => true,
            ResourcePattern::Named(named) => named == resource,
        }
    }
}

impl FromStr for ResourcePattern {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            Ok(ResourcePattern::Any)
        } else {
            s.parse().map(ResourcePattern::Named)
        }
    }
}

impl TryFrom<String> for ResourcePattern {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourcePattern> for String {
    fn from(pattern: ResourcePattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for ResourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourcePattern::Any => f.write_str("*"),
            ResourcePattern::Named(resource) => write!(f, "{}", resource),
        }
    }
}

/// Action side of a permission entry, `"*"` or an action name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ActionPattern {
    Any,
    Exact(Action),
}

impl ActionPattern {
    pub fn matches(&self, action: Action) -> bool {
        match self {
            ActionPattern::Any => true,
            ActionPattern::Exact(exact) => *exact == action,
        }
    }
}

impl FromStr for ActionPattern {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            Ok(ActionPattern::Any)
        } else {
            s.parse().map(ActionPattern::Exact)
        }
    }
}

impl TryFrom<String> for ActionPattern {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActionPattern> for String {
    fn from(pattern: ActionPattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for ActionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionPattern::Any => f.write_str("*"),
            ActionPattern::Exact(action) => write!(f, "{}", action),
        }
    }
}

/// A single grant: `action` on `resource`, bounded to `scope`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub resource: ResourcePattern,
    pub action: ActionPattern,
    pub scope: Scope,
}

impl Permission {
    /// Grant on a named resource
    pub fn new(resource: Resource, action: Action, scope: Scope) -> Self {
        Self {
            resource: ResourcePattern::Named(resource),
            action: ActionPattern::Exact(action),
            scope,
        }
    }

    /// Grant on every resource
    pub fn wildcard(action: Action, scope: Scope) -> Self {
        Self {
            resource: ResourcePattern::Any,
            action: ActionPattern::Exact(action),
            scope,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.resource, self.action, self.scope)
    }
}
