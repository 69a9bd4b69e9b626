//! Authorization service
//!
//! Binds the permission table to an actor provider, with optional decision
//! caching and metrics.

pub mod decision;
pub mod evaluate;
pub mod cache;
pub mod metrics;

pub use decision::{Decision, DecisionReason};
pub use cache::{CacheConfig, CacheKey, CacheStats, DecisionCache};
pub use metrics::{EngineMetrics, MetricsCollector};

use crate::predicates;
use crate::scope::{Scope, ScopeResolver, Target};
use crate::table::PermissionTable;
use crate::types::{Action, Permission, Resource};
use hrm_core::{Actor, ActorProvider};

use std::sync::Arc;
use tracing::{debug, info};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Memoize decisions per (role, resource, action, scope)
    pub enable_cache: bool,

    /// Cache configuration
    pub cache_config: CacheConfig,

    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_cache: true,
            cache_config: CacheConfig::default(),
            enable_metrics: true,
        }
    }
}

/// Answers "may the current actor do this?" for view code
///
/// This is a UX convenience for hiding and disabling features. The backend
/// must enforce the same rules; nothing here is a security boundary.
///
/// # Architecture
///
/// ```text
/// ActorProvider → [Cache] → evaluate(table, role, request) → bool
///                    ↓                                         ↓
///             snapshot version                             [Metrics]
/// ```
pub struct Authorizer {
    /// Immutable role → permission table
    table: Arc<PermissionTable>,

    /// Source of the ambient actor
    provider: Arc<dyn ActorProvider>,

    /// Derives scopes for target-based checks
    scope_resolver: ScopeResolver,

    /// Decision cache tied to the provider's snapshot version
    cache: Option<DecisionCache>,

    /// Decision counters
    metrics: Option<MetricsCollector>,
}

impl Authorizer {
    /// Create an authorizer over `table` reading the actor from `provider`
    pub fn new(
        config: EngineConfig,
        table: Arc<PermissionTable>,
        provider: Arc<dyn ActorProvider>,
    ) -> Self {
        let cache = config
            .enable_cache
            .then(|| DecisionCache::new(config.cache_config.clone()));
        let metrics = config.enable_metrics.then(MetricsCollector::new);

        info!(
            "Authorizer initialized with cache={}, metrics={}, {} permission entries",
            config.enable_cache,
            config.enable_metrics,
            table.len()
        );

        Self {
            table,
            provider,
            scope_resolver: ScopeResolver::new(),
            cache,
            metrics,
        }
    }

    /// Builtin table and default configuration
    pub fn with_provider(provider: Arc<dyn ActorProvider>) -> Self {
        Self::new(EngineConfig::default(), PermissionTable::builtin(), provider)
    }

    /// Replace the scope resolver used by target-based checks
    pub fn with_scope_resolver(mut self, resolver: ScopeResolver) -> Self {
        self.scope_resolver = resolver;
        self
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Snapshot of the ambient actor
    pub fn current_actor(&self) -> Option<Actor> {
        self.provider.current_actor()
    }

    /// Check against the ambient actor
    pub fn has_permission(&self, resource: &Resource, action: Action, scope: Scope) -> bool {
        let actor = self.current_actor();
        self.has_permission_for(resource, action, scope, actor.as_ref())
    }

    /// Check against an explicit actor; `None` is unauthenticated
    pub fn has_permission_for(
        &self,
        resource: &Resource,
        action: Action,
        scope: Scope,
        actor: Option<&Actor>,
    ) -> bool {
        let Some(actor) = actor else {
            debug!("Denying {}:{}@{} for unauthenticated caller", resource, action, scope);
            self.record(false, false);
            return false;
        };

        let allowed = match &self.cache {
            Some(cache) => {
                cache.sync_version(self.provider.snapshot_version());

                let key = CacheKey {
                    role: actor.role,
                    resource: resource.clone(),
                    action,
                    scope,
                };

                if let Some(allowed) = cache.get(&key) {
                    if let Some(metrics) = &self.metrics {
                        metrics.record_cache_hit();
                    }
                    allowed
                } else {
                    if let Some(metrics) = &self.metrics {
                        metrics.record_cache_miss();
                    }
                    let allowed =
                        evaluate::has_permission(&self.table, resource, action, scope, Some(actor));
                    cache.put(key, allowed);
                    allowed
                }
            }
            None => evaluate::has_permission(&self.table, resource, action, scope, Some(actor)),
        };

        self.record(allowed, true);
        allowed
    }

    fn record(&self, allowed: bool, authenticated: bool) {
        if let Some(metrics) = &self.metrics {
            if authenticated {
                metrics.record_decision(allowed);
            } else {
                metrics.record_unauthenticated();
            }
        }
    }

    /// Check a request given as raw strings; parse failures deny
    pub fn has_permission_str(&self, resource: &str, action: &str, scope: &str) -> bool {
        match evaluate::parse_request(resource, action, scope) {
            Ok((resource, action, scope)) => self.has_permission(&resource, action, scope),
            Err(e) => {
                debug!("Denying unparseable request: {}", e);
                self.record(false, self.current_actor().is_some());
                false
            }
        }
    }

    /// String form of [`Authorizer::decide`]; parse failures deny
    pub fn decide_str(&self, resource: &str, action: &str, scope: &str) -> Decision {
        match evaluate::parse_request(resource, action, scope) {
            Ok((resource, action, scope)) => self.decide(&resource, action, scope),
            Err(e) => {
                debug!("Denying unparseable request: {}", e);
                self.record(false, self.current_actor().is_some());
                Decision::invalid(e.to_string())
            }
        }
    }

    /// Full decision with reason against the ambient actor, bypassing the cache
    pub fn decide(&self, resource: &Resource, action: Action, scope: Scope) -> Decision {
        let actor = self.current_actor();
        self.decide_for(resource, action, scope, actor.as_ref())
    }

    /// Full decision with reason against an explicit actor, bypassing the cache
    pub fn decide_for(
        &self,
        resource: &Resource,
        action: Action,
        scope: Scope,
        actor: Option<&Actor>,
    ) -> Decision {
        let decision = evaluate::decide(&self.table, resource, action, scope, actor);
        self.record(decision.allowed, actor.is_some());
        decision
    }

    /// Check against a concrete record, deriving the scope from ownership
    pub fn authorize_target(&self, resource: &Resource, action: Action, target: &Target) -> bool {
        let actor = self.current_actor();
        self.authorize_target_for(resource, action, target, actor.as_ref())
    }

    /// [`Authorizer::authorize_target`] for an explicit actor
    pub fn authorize_target_for(
        &self,
        resource: &Resource,
        action: Action,
        target: &Target,
        actor: Option<&Actor>,
    ) -> bool {
        let scope = match actor {
            Some(actor) => self.scope_resolver.resolve(actor, target),
            None => Scope::Company,
        };
        self.has_permission_for(resource, action, scope, actor)
    }

    /// Every permission granted to the ambient actor's role
    pub fn current_permissions(&self) -> Vec<Permission> {
        self.current_actor()
            .map(|actor| self.table.permissions_for(actor.role).to_vec())
            .unwrap_or_default()
    }

    pub fn is_system_admin(&self) -> bool {
        self.is_system_admin_for(self.current_actor().as_ref())
    }

    pub fn is_system_admin_for(&self, actor: Option<&Actor>) -> bool {
        predicates::is_system_admin(actor)
    }

    pub fn is_hr_admin(&self) -> bool {
        self.is_hr_admin_for(self.current_actor().as_ref())
    }

    pub fn is_hr_admin_for(&self, actor: Option<&Actor>) -> bool {
        predicates::is_hr_admin(actor)
    }

    pub fn is_department_manager(&self) -> bool {
        self.is_department_manager_for(self.current_actor().as_ref())
    }

    pub fn is_department_manager_for(&self, actor: Option<&Actor>) -> bool {
        predicates::is_department_manager(actor)
    }

    pub fn is_employee(&self) -> bool {
        self.is_employee_for(self.current_actor().as_ref())
    }

    pub fn is_employee_for(&self, actor: Option<&Actor>) -> bool {
        predicates::is_employee(actor)
    }

    pub fn can_manage_users(&self) -> bool {
        self.can_manage_users_for(self.current_actor().as_ref())
    }

    /// HR admins and system admins
    pub fn can_manage_users_for(&self, actor: Option<&Actor>) -> bool {
        predicates::can_manage_users(actor)
    }

    pub fn can_approve_leave(&self) -> bool {
        self.can_approve_leave_for(self.current_actor().as_ref())
    }

    /// `absences:approve@department`
    pub fn can_approve_leave_for(&self, actor: Option<&Actor>) -> bool {
        self.has_permission_for(&Resource::Absences, Action::Approve, Scope::Department, actor)
    }

    pub fn can_view_company_analytics(&self) -> bool {
        self.can_view_company_analytics_for(self.current_actor().as_ref())
    }

    /// `analytics:read@company`
    pub fn can_view_company_analytics_for(&self, actor: Option<&Actor>) -> bool {
        self.has_permission_for(&Resource::Analytics, Action::Read, Scope::Company, actor)
    }

    pub fn can_create_announcements(&self, scope: Scope) -> bool {
        self.can_create_announcements_for(scope, self.current_actor().as_ref())
    }

    pub fn can_create_announcements_for(&self, scope: Scope, actor: Option<&Actor>) -> bool {
        self.has_permission_for(&Resource::Announcements, Action::Create, scope, actor)
    }

    /// Drop every cached decision
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            info!("Decision cache invalidated");
        }
    }

    /// Get engine metrics
    pub fn metrics(&self) -> Option<EngineMetrics> {
        self.metrics.as_ref().map(MetricsCollector::snapshot)
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(DecisionCache::stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrm_core::Role;

    fn authorizer(actor: Option<Actor>, config: EngineConfig) -> Authorizer {
        Authorizer::new(config, PermissionTable::builtin(), Arc::new(actor))
    }

    #[test]
    fn test_engine_creation() {
        let engine = authorizer(None, EngineConfig::default());
        assert!(engine.cache.is_some());
        assert!(engine.metrics.is_some());

        let engine = authorizer(
            None,
            EngineConfig {
                enable_cache: false,
                enable_metrics: false,
                ..Default::default()
            },
        );
        assert!(engine.cache_stats().is_none());
        assert!(engine.metrics().is_none());
    }

    #[test]
    fn test_cache_hit_on_repeat() {
        let engine = authorizer(Some(Actor::new("u-1", Role::HrAdmin)), EngineConfig::default());

        assert!(engine.has_permission(&Resource::Employees, Action::Delete, Scope::Company));
        assert!(engine.has_permission(&Resource::Employees, Action::Delete, Scope::Company));

        let stats = engine.cache_stats().unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);

        let metrics = engine.metrics().unwrap();
        assert_eq!(metrics.total_requests, 2);
        assert_eq!(metrics.allowed_decisions, 2);
    }

    #[test]
    fn test_unauthenticated_metrics() {
        let engine = authorizer(None, EngineConfig::default());
        assert!(!engine.has_permission(&Resource::Announcements, Action::Read, Scope::Company));

        let metrics = engine.metrics().unwrap();
        assert_eq!(metrics.unauthenticated_requests, 1);
        assert_eq!(metrics.denied_decisions, 1);
        assert_eq!(engine.cache_stats().unwrap().entries, 0);
    }

    #[test]
    fn test_current_permissions() {
        let engine = authorizer(Some(Actor::new("u-1", Role::Employee)), EngineConfig::default());
        assert_eq!(engine.current_permissions().len(), 11);

        let engine = authorizer(None, EngineConfig::default());
        assert!(engine.current_permissions().is_empty());
    }

    #[test]
    fn test_predicates_for_explicit_actor() {
        let engine = authorizer(None, EngineConfig::default());
        let manager = Actor::new("u-2", Role::DeptManager);
        let admin = Actor::new("u-3", Role::SystemAdmin);

        assert!(engine.can_approve_leave_for(Some(&manager)));
        assert!(!engine.can_view_company_analytics_for(Some(&manager)));
        assert!(engine.can_create_announcements_for(Scope::Department, Some(&manager)));
        assert!(!engine.can_create_announcements_for(Scope::Company, Some(&manager)));
        assert!(engine.is_department_manager_for(Some(&manager)));

        assert!(engine.can_manage_users_for(Some(&admin)));
        assert!(engine.is_system_admin_for(Some(&admin)));
        assert!(!engine.can_approve_leave_for(Some(&admin)));

        assert!(!engine.is_employee_for(None));
        assert!(!engine.can_approve_leave());
    }

    #[test]
    fn test_string_checks_are_counted() {
        let engine = authorizer(Some(Actor::new("u-1", Role::Employee)), EngineConfig::default());

        assert!(engine.has_permission_str("goals", "read", "own"));
        assert!(engine.has_permission_str("goals", "read", "own"));
        assert!(!engine.has_permission_str("goals", "sign", "own"));
        assert!(!engine.decide_str("goals", "read", "company").allowed);
        assert!(!engine.decide_str("", "read", "own").allowed);

        let metrics = engine.metrics().unwrap();
        assert_eq!(metrics.total_requests, 5);
        assert_eq!(metrics.allowed_decisions, 2);
        assert_eq!(metrics.denied_decisions, 3);

        let stats = engine.cache_stats().unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_unauthenticated_string_checks_are_counted() {
        let engine = authorizer(None, EngineConfig::default());

        assert!(!engine.has_permission_str("goals", "read", "own"));
        assert!(!engine.decide_str("goals", "nope", "own").allowed);
        assert!(!engine.decide(&Resource::Goals, Action::Read, Scope::Own).allowed);

        let metrics = engine.metrics().unwrap();
        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.unauthenticated_requests, 3);
    }
}
