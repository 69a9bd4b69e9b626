//! File configuration
//!
//! ```toml
//! # Optional, the builtin table is used when absent
//! permissions_file = "/etc/hrm/permissions.json"
//!
//! [engine]
//! enable_cache = true
//! cache_capacity = 4096
//! enable_metrics = true
//! ```

use crate::engine::{CacheConfig, EngineConfig};
use crate::error::{AuthzError, Result};
use crate::table::PermissionTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Complete authorization configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthzConfig {
    /// JSON permission table replacing the builtin grants
    #[serde(default)]
    pub permissions_file: Option<PathBuf>,

    #[serde(default)]
    pub engine: EngineSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSection {
    #[serde(default = "default_true")]
    pub enable_cache: bool,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_true")]
    pub enable_metrics: bool,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            enable_cache: true,
            cache_capacity: default_cache_capacity(),
            enable_metrics: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    CacheConfig::default().capacity
}

impl AuthzConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: AuthzConfig =
            toml::from_str(text).map_err(|e| AuthzError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// A relative `permissions_file` is resolved against the config file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AuthzError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_toml(&text)?;
        if let (Some(file), Some(dir)) = (config.permissions_file.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = dir.join(&*file);
            }
        }

        info!("Loaded authorization config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.engine.enable_cache && self.engine.cache_capacity == 0 {
            return Err(AuthzError::Configuration(
                "cache_capacity must be positive when the cache is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Engine settings
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            enable_cache: self.engine.enable_cache,
            cache_config: CacheConfig {
                capacity: self.engine.cache_capacity,
            },
            enable_metrics: self.engine.enable_metrics,
        }
    }

    /// The configured table, or the builtin one
    pub fn permission_table(&self) -> Result<Arc<PermissionTable>> {
        match &self.permissions_file {
            Some(path) => Ok(Arc::new(PermissionTable::from_file(path)?)),
            None => Ok(PermissionTable::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AuthzConfig::from_toml("").unwrap();
        assert!(config.permissions_file.is_none());
        assert!(config.engine.enable_cache);
        assert_eq!(config.engine.cache_capacity, 4_096);

        let table = config.permission_table().unwrap();
        assert!(Arc::ptr_eq(&table, &PermissionTable::builtin()));
    }

    #[test]
    fn test_engine_section() {
        let config = AuthzConfig::from_toml(
            r#"
            [engine]
            enable_cache = false
            enable_metrics = false
            "#,
        )
        .unwrap();

        let engine = config.engine_config();
        assert!(!engine.enable_cache);
        assert!(!engine.enable_metrics);
    }

    #[test]
    fn test_invalid_config() {
        let result = AuthzConfig::from_toml("[engine]\ncache_capacity = 0\n");
        assert!(matches!(result, Err(AuthzError::Configuration(_))));

        let result = AuthzConfig::from_toml("engine = 5");
        assert!(matches!(result, Err(AuthzError::Configuration(_))));
    }

    #[test]
    fn test_load_with_relative_table() {
        let dir = tempfile::tempdir().unwrap();

        let mut table = std::fs::File::create(dir.path().join("permissions.json")).unwrap();
        write!(
            table,
            r#"{{"employee":[{{"resource":"goals","action":"read","scope":"own"}}]}}"#
        )
        .unwrap();

        let config_path = dir.path().join("authz.toml");
        std::fs::write(&config_path, "permissions_file = \"permissions.json\"\n").unwrap();

        let config = AuthzConfig::load(&config_path).unwrap();
        let table = config.permission_table().unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = AuthzConfig::load("/nonexistent/authz.toml");
        assert!(matches!(result, Err(AuthzError::Configuration(_))));
    }
}
