//! Persisted login state
//!
//! Keeps the login record as the JSON text the host application persists,
//! and parses it on every lookup. An unreadable record is treated exactly
//! like a missing one.

use crate::error::{CoreError, Result};
use crate::traits::ActorProvider;
use crate::types::{Actor, AuthResponse, Role};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// In-memory credential store backing the ambient actor lookup
#[derive(Debug, Default)]
pub struct SessionStore {
    /// Raw persisted record
    record: RwLock<Option<String>>,

    /// Bumped on every mutation
    version: AtomicU64,
}

impl SessionStore {
    /// Create an empty (logged out) store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw persisted record
    ///
    /// The text is stored as-is; it is only validated when read.
    pub fn load_json(json: impl Into<String>) -> Self {
        let store = Self::new();
        store.replace(Some(json.into()));
        store
    }

    /// Seed the store from a file containing a persisted record
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::not_found(format!("session file {}: {}", path.display(), e))
        })?;
        debug!("Loaded session record from {}", path.display());
        Ok(Self::load_json(json))
    }

    /// Persist a login or register response
    pub fn save(&self, response: &AuthResponse) -> Result<()> {
        let actor = response.user.clone().with_token(response.token.clone());
        let json = serde_json::to_string(&actor)?;
        self.replace(Some(json));
        info!("Session saved for user {} ({})", actor.id, actor.role);
        Ok(())
    }

    /// Drop the login record
    pub fn logout(&self) {
        self.replace(None);
        info!("Session cleared");
    }

    /// Apply a role change made through the user management API
    pub fn update_role(&self, role: Role) -> Result<()> {
        let mut actor = self
            .current_actor()
            .ok_or_else(|| CoreError::not_found("no readable session to update"))?;
        let previous = actor.role;
        actor.role = role;

        let json = serde_json::to_string(&actor)?;
        self.replace(Some(json));
        info!("Role for user {} changed from {} to {}", actor.id, previous, role);
        Ok(())
    }

    /// A readable record exists and carries a token
    pub fn is_authenticated(&self) -> bool {
        self.current_actor()
            .map(|actor| actor.token.is_some())
            .unwrap_or(false)
    }

    /// Raw persisted record, if any
    pub fn raw_record(&self) -> Option<String> {
        self.record.read().clone()
    }

    fn replace(&self, record: Option<String>) {
        *self.record.write() = record;
        self.version.fetch_add(1, Ordering::AcqRel);
    }
}

impl ActorProvider for SessionStore {
    fn current_actor(&self) -> Option<Actor> {
        let record = self.record.read();
        let json = record.as_deref()?;

        match serde_json::from_str::<Actor>(json) {
            Ok(actor) => Some(actor),
            Err(e) => {
                warn!("Ignoring unreadable session record: {}", e);
                None
            }
        }
    }

    fn snapshot_version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn login_response(role: Role) -> AuthResponse {
        AuthResponse {
            message: "Login successful".to_string(),
            user: Actor::new("u-42", role)
                .with_identity("Ada", "ada@example.com")
                .with_department("d-1", "Engineering"),
            token: "token-abc".to_string(),
        }
    }

    #[test]
    fn test_empty_store() {
        let store = SessionStore::new();
        assert!(store.current_actor().is_none());
        assert!(!store.is_authenticated());
        assert_eq!(store.snapshot_version(), 0);
    }

    #[test]
    fn test_save_and_read() {
        let store = SessionStore::new();
        store.save(&login_response(Role::Employee)).unwrap();

        let actor = store.current_actor().unwrap();
        assert_eq!(actor.id, "u-42");
        assert_eq!(actor.role, Role::Employee);
        assert_eq!(actor.department_id.as_deref(), Some("d-1"));
        assert_eq!(actor.token.as_deref(), Some("token-abc"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_corrupt_record_is_unauthenticated() {
        let store = SessionStore::load_json("{not json");
        assert!(store.current_actor().is_none());
        assert!(!store.is_authenticated());

        let store = SessionStore::load_json(r#"{"id":"u-1","role":"admin","token":"t"}"#);
        assert!(store.current_actor().is_none());
    }

    #[test]
    fn test_record_without_token() {
        let store = SessionStore::load_json(r#"{"id":"u-1","role":"employee"}"#);
        assert!(store.current_actor().is_some());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_update_role_bumps_version() {
        let store = SessionStore::new();
        store.save(&login_response(Role::Employee)).unwrap();
        let before = store.snapshot_version();

        store.update_role(Role::DeptManager).unwrap();

        assert!(store.snapshot_version() > before);
        let actor = store.current_actor().unwrap();
        assert_eq!(actor.role, Role::DeptManager);
        assert_eq!(actor.token.as_deref(), Some("token-abc"));
    }

    #[test]
    fn test_update_role_without_session() {
        let store = SessionStore::new();
        let result = store.update_role(Role::HrAdmin);
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn test_logout() {
        let store = SessionStore::new();
        store.save(&login_response(Role::HrAdmin)).unwrap();
        store.logout();

        assert!(store.current_actor().is_none());
        assert!(store.raw_record().is_none());
        assert_eq!(store.snapshot_version(), 2);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"id":"u-7","name":"Lin","email":"lin@example.com","role":"system_admin","token":"t-7","isAuthenticated":true}}"#
        )
        .unwrap();

        let store = SessionStore::load_file(file.path()).unwrap();
        let actor = store.current_actor().unwrap();
        assert_eq!(actor.role, Role::SystemAdmin);
        assert!(store.is_authenticated());

        let missing = SessionStore::load_file("/nonexistent/session.json");
        assert!(matches!(missing, Err(CoreError::NotFound(_))));
    }
}
