//! Configuration service implementation.
//!
//! Loads the root configuration from the configuration file
//! (`~/.config/neonkit/neonkit.toml`) and caches it.

use crate::paths::NeonkitPaths;
use neonkit_core::{NeonkitConfig, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// Reads `neonkit.toml` once and caches the result to avoid repeated file
/// I/O. An absent or malformed file falls back to defaults; configuration
/// is never load-bearing for correctness.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    cached: Arc<RwLock<Option<NeonkitConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading from the platform default location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(NeonkitPaths::config_file()?))
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get(&self) -> NeonkitConfig {
        {
            let read_lock = self.cached.read().unwrap_or_else(|p| p.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|error| {
            tracing::warn!(path = %self.path.display(), %error, "falling back to default config");
            NeonkitConfig::default()
        });

        {
            let mut write_lock = self.cached.write().unwrap_or_else(|p| p.into_inner());
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.cached.write().unwrap_or_else(|p| p.into_inner());
        *write_lock = None;
    }

    /// Loads the configuration file; an absent file yields defaults.
    fn load(&self) -> Result<NeonkitConfig> {
        if !self.path.exists() {
            return Ok(NeonkitConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }
}
