//! Authorization decision types

use crate::types::Permission;
use hrm_core::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a permission check, with the reason behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the request is allowed
    pub allowed: bool,

    /// Reason for the decision
    pub reason: DecisionReason,
}

impl Decision {
    /// Allowed by a wildcard-resource grant
    pub fn wildcard(permission: Permission) -> Self {
        Self {
            allowed: true,
            reason: DecisionReason::WildcardGrant { permission },
        }
    }

    /// Allowed by a grant on the named resource
    pub fn grant(permission: Permission) -> Self {
        Self {
            allowed: true,
            reason: DecisionReason::Grant { permission },
        }
    }

    /// Denied, no actor
    pub fn unauthenticated() -> Self {
        Self {
            allowed: false,
            reason: DecisionReason::Unauthenticated,
        }
    }

    /// Denied, the role has nothing matching
    pub fn no_match(role: Role) -> Self {
        Self {
            allowed: false,
            reason: DecisionReason::NoMatchingPermission { role },
        }
    }

    /// Denied, the request could not be parsed
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: DecisionReason::InvalidRequest {
                error: error.into(),
            },
        }
    }

    /// The grant that allowed the request, if any
    pub fn matched(&self) -> Option<&Permission> {
        match &self.reason {
            DecisionReason::WildcardGrant { permission } | DecisionReason::Grant { permission } => {
                Some(permission)
            }
            _ => None,
        }
    }
}

/// Reason for an authorization decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionReason {
    /// A `*` resource entry matched the action
    WildcardGrant { permission: Permission },

    /// A resource entry matched action and covered the scope
    Grant { permission: Permission },

    /// No actor was available
    Unauthenticated,

    /// The actor's role has no entry that satisfies the request
    NoMatchingPermission { role: Role },

    /// Resource, action or scope did not parse
    InvalidRequest { error: String },
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::WildcardGrant { permission } => {
                write!(f, "allowed by wildcard grant {}", permission)
            }
            DecisionReason::Grant { permission } => write!(f, "allowed by grant {}", permission),
            DecisionReason::Unauthenticated => f.write_str("denied: no authenticated actor"),
            DecisionReason::NoMatchingPermission { role } => {
                write!(f, "denied: role {} has no matching permission", role)
            }
            DecisionReason::InvalidRequest { error } => write!(f, "denied: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Scope;
    use crate::types::{Action, Resource};

    #[test]
    fn test_allow_decision() {
        let permission = Permission::new(Resource::Goals, Action::Read, Scope::Own);
        let decision = Decision::grant(permission.clone());

        assert!(decision.allowed);
        assert_eq!(decision.matched(), Some(&permission));
        assert_eq!(decision.reason.to_string(), "allowed by grant goals:read@own");
    }

    #[test]
    fn test_deny_decisions() {
        let decision = Decision::no_match(Role::Employee);
        assert!(!decision.allowed);
        assert!(decision.matched().is_none());

        assert!(!Decision::unauthenticated().allowed);
        assert!(!Decision::invalid("unknown action 'write'").allowed);
    }

    #[test]
    fn test_reason_serialization() {
        let json = serde_json::to_value(Decision::no_match(Role::DeptManager)).unwrap();
        assert_eq!(json["allowed"], false);
        assert_eq!(json["reason"]["type"], "no_matching_permission");
        assert_eq!(json["reason"]["role"], "dept_manager");
    }
}
