//! Shared traits for the HRM platform

pub mod provider;

// Re-export commonly used traits
pub use provider::ActorProvider;
