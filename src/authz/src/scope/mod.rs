/// Organizational scope of permissions
///
/// This module provides the scope breadth ordering used by the evaluator
/// and a resolver that derives the scope of a request from the actor and
/// the target record.
///
/// # Examples
///
/// ```
/// use hrm_authz::scope::Scope;
///
/// assert!(Scope::Company.covers(Scope::Own));
/// assert!(Scope::Department.covers(Scope::Own));
/// assert!(!Scope::Own.covers(Scope::Department));
/// ```

mod types;
mod resolver;


pub use types::Scope;
pub use resolver::{ScopeResolver, Target};
