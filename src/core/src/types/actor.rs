//! Actor (current user) context

use super::role::Role;
use crate::{DepartmentId, UserId};
use serde::{Deserialize, Serialize};

/// Presence status reported by the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActorStatus {
    Active,
    Remote,
    Inactive,
    OutOfOffice,
    OnLeave,
}

/// The authenticated user making a permission request
///
/// The backend is inconsistent about field casing, so the snake_case
/// spellings are accepted alongside camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Backend user identifier
    pub id: UserId,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub name: String,

    /// Role driving every permission decision
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActorStatus>,

    #[serde(default, alias = "department_id", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,

    #[serde(default, alias = "department_name", skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,

    #[serde(default, alias = "manager_id", skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<UserId>,

    /// Bearer token of the current login, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Actor {
    /// Create an actor with only an id and a role
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: String::new(),
            name: String::new(),
            role,
            status: None,
            department_id: None,
            department_name: None,
            manager_id: None,
            token: None,
        }
    }

    /// Set name and email
    pub fn with_identity(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.name = name.into();
        self.email = email.into();
        self
    }

    /// Attach the actor to a department
    pub fn with_department(
        mut self,
        id: impl Into<DepartmentId>,
        name: impl Into<String>,
    ) -> Self {
        self.department_id = Some(id.into());
        self.department_name = Some(name.into());
        self
    }

    /// Set the actor's manager
    pub fn with_manager(mut self, manager_id: impl Into<UserId>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    pub fn with_status(mut self, status: ActorStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Body returned by the login and register endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    pub user: Actor,
    pub token: String,
}
