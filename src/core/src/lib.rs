//! # HRM Core
//!
//! Shared actor and session types for the HRM platform.
//! This package keeps the authorization engine independent of how the host
//! application stores its login state.

pub mod types;
pub mod traits;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{role_display_name, Actor, ActorStatus, AuthResponse, Role};
pub use traits::ActorProvider;
pub use session::SessionStore;

// Identifiers assigned by the backend
pub type UserId = String;
pub type DepartmentId = String;
