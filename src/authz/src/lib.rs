//! # HRM Authorization Engine
//!
//! Role-based permission checks for the HR management application.
//!
//! ## Features
//!
//! - **Static permission table** mapping each role to resource/action/scope grants
//! - **Scope breadth rule**: company grants cover department and own requests,
//!   department grants cover own requests
//! - **Fail closed**: no actor, unknown role or unparseable input denies
//! - **Snapshot-bound caching** of decisions, cleared whenever the actor changes
//!
//! The engine gates what the UI shows. It is not a security boundary; the
//! backend must enforce the same rules.
//!
//! ## Example
//!
//! ```rust
//! use hrm_authz::{Action, Authorizer, Resource, Scope};
//! use hrm_core::{Actor, Role};
//! use std::sync::Arc;
//!
//! let actor = Some(Actor::new("u-1", Role::DeptManager).with_department("d-1", "Sales"));
//! let authz = Authorizer::with_provider(Arc::new(actor));
//!
//! assert!(authz.has_permission(&Resource::Absences, Action::Approve, Scope::Department));
//! assert!(!authz.has_permission(&Resource::Absences, Action::Approve, Scope::Company));
//! assert!(authz.can_approve_leave());
//! ```

pub mod types;
pub mod scope;
pub mod table;
pub mod engine;
pub mod predicates;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use types::{Action, ActionPattern, Permission, Resource, ResourcePattern};
pub use scope::{Scope, ScopeResolver, Target};
pub use table::PermissionTable;
pub use engine::evaluate::{decide, has_permission, has_permission_str};
pub use engine::{Authorizer, Decision, DecisionReason, EngineConfig};
pub use config::AuthzConfig;
pub use error::{AuthzError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
