//! Shared types for the HRM platform

pub mod role;
pub mod actor;

// Re-export commonly used types
pub use role::{role_display_name, Role};
pub use actor::{Actor, ActorStatus, AuthResponse};
