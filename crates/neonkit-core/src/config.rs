//! Configuration model for the neonkit client libraries.
//!
//! All fields carry serde defaults so a partial (or absent) configuration
//! file still yields a complete, usable configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default quiet period for debounced draft writes, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1_000;

/// Default draft retention window, in days. Drafts older than this are
/// treated as nonexistent and purged on the next read.
pub const DEFAULT_RETENTION_DAYS: i64 = 7;

/// Default storage key prefix for draft records.
pub const DEFAULT_NAMESPACE: &str = "neonkit:draft:";

/// Tuning knobs for [`crate::draft::DraftStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Quiet period for trailing-edge debounced saves, in milliseconds.
    pub debounce_ms: u64,
    /// Retention window after which a draft expires, in days.
    pub retention_days: i64,
    /// Prefix prepended to every draft's storage key.
    pub namespace: String,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            retention_days: DEFAULT_RETENTION_DAYS,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl DraftConfig {
    /// The debounce quiet period as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The retention window as a [`chrono::Duration`].
    ///
    /// A `retention_days` value outside chrono's representable range
    /// falls back to the default window; a well-formed but absurd config
    /// file must not panic the draft layer.
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::try_days(self.retention_days)
            .unwrap_or_else(|| chrono::Duration::days(DEFAULT_RETENTION_DAYS))
    }
}

/// Root configuration for the neonkit client libraries.
///
/// This is the shape of `neonkit.toml`; see
/// `neonkit_infrastructure::ConfigService` for loading.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NeonkitConfig {
    /// Draft persistence settings.
    pub draft: DraftConfig,
}
