//! Pure permission evaluation
//!
//! Functions of the table, the role and the request only. Safe to call from
//! any number of threads, and safe to memoize per
//! `(role, resource, action, scope)` for the lifetime of a table.

use super::decision::Decision;
use crate::scope::Scope;
use crate::table::PermissionTable;
use crate::error::Result;
use crate::types::{Action, ActionPattern, Resource};
use hrm_core::{Actor, Role};
use tracing::debug;

/// Evaluate a request for a role
///
/// 1. A wildcard-resource entry whose action matches allows, whatever the
///    requested scope.
/// 2. Otherwise an entry must name the resource, carry exactly the
///    requested action and cover the requested scope. `"*"` actions only
///    widen wildcard-resource entries.
pub fn decide_for_role(
    table: &PermissionTable,
    role: Role,
    resource: &Resource,
    action: Action,
    scope: Scope,
) -> Decision {
    let permissions = table.permissions_for(role);

    if let Some(wildcard) = permissions
        .iter()
        .find(|p| p.resource.is_wildcard() && p.action.matches(action))
    {
        return Decision::wildcard(wildcard.clone());
    }

    permissions
        .iter()
        .find(|p| {
            !p.resource.is_wildcard()
                && p.resource.matches(resource)
                && p.action == ActionPattern::Exact(action)
                && p.scope.covers(scope)
        })
        .map(|p| Decision::grant(p.clone()))
        .unwrap_or_else(|| Decision::no_match(role))
}

/// Evaluate a request for an optional actor; no actor is always denied
pub fn decide(
    table: &PermissionTable,
    resource: &Resource,
    action: Action,
    scope: Scope,
    actor: Option<&Actor>,
) -> Decision {
    let Some(actor) = actor else {
        return Decision::unauthenticated();
    };

    let decision = decide_for_role(table, actor.role, resource, action, scope);
    debug!(
        "Decision for user {} ({}): {}:{}@{} -> {}",
        actor.id,
        actor.role,
        resource,
        action,
        scope,
        if decision.allowed { "ALLOW" } else { "DENY" }
    );
    decision
}

/// Whether `actor` may perform `action` on `resource` at `scope`
pub fn has_permission(
    table: &PermissionTable,
    resource: &Resource,
    action: Action,
    scope: Scope,
    actor: Option<&Actor>,
) -> bool {
    decide(table, resource, action, scope, actor).allowed
}

/// Parse a request given as raw strings
pub fn parse_request(
    resource: &str,
    action: &str,
    scope: &str,
) -> Result<(Resource, Action, Scope)> {
    let resource = resource.parse::<Resource>()?;
    let action = action.parse::<Action>()?;
    let scope = scope.parse::<Scope>()?;
    Ok((resource, action, scope))
}

/// Evaluate a request given as raw strings, e.g. from a server payload
///
/// Any identifier that fails to parse denies the request.
pub fn decide_str(
    table: &PermissionTable,
    resource: &str,
    action: &str,
    scope: &str,
    actor: Option<&Actor>,
) -> Decision {
    match parse_request(resource, action, scope) {
        Ok((resource, action, scope)) => decide(table, &resource, action, scope, actor),
        Err(e) => {
            debug!("Denying unparseable request: {}", e);
            Decision::invalid(e.to_string())
        }
    }
}

/// String form of [`has_permission`]; parse failures deny
pub fn has_permission_str(
    table: &PermissionTable,
    resource: &str,
    action: &str,
    scope: &str,
    actor: Option<&Actor>,
) -> bool {
    decide_str(table, resource, action, scope, actor).allowed
}
