//! Ambient actor lookup

use crate::types::Actor;
use std::sync::Arc;

/// Source of the current actor
///
/// Lookups are local reads and must not block on the network. `None` means
/// unauthenticated, and callers deny everything in that case.
pub trait ActorProvider: Send + Sync {
    /// Snapshot of the current actor, if one is logged in
    fn current_actor(&self) -> Option<Actor>;

    /// Changes whenever the underlying actor snapshot changes
    ///
    /// Anything memoized from a snapshot must be dropped once this moves.
    fn snapshot_version(&self) -> u64 {
        0
    }
}

/// A fixed snapshot, never changes
impl ActorProvider for Option<Actor> {
    fn current_actor(&self) -> Option<Actor> {
        self.clone()
    }
}

impl<T: ActorProvider + ?Sized> ActorProvider for Arc<T> {
    fn current_actor(&self) -> Option<Actor> {
        (**self).current_actor()
    }

    fn snapshot_version(&self) -> u64 {
        (**self).snapshot_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_fixed_snapshot() {
        let provider = Some(Actor::new("u-1", Role::Employee));
        assert_eq!(provider.current_actor().unwrap().id, "u-1");
        assert_eq!(provider.snapshot_version(), 0);

        let nobody: Option<Actor> = None;
        assert!(nobody.current_actor().is_none());
    }

    #[test]
    fn test_arc_delegation() {
        let provider: Arc<dyn ActorProvider> = Arc::new(Some(Actor::new("u-2", Role::HrAdmin)));
        assert_eq!(provider.current_actor().unwrap().role, Role::HrAdmin);
    }
}
