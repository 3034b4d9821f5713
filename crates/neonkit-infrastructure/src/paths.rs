//! Unified path management for neonkit files on disk.
//!
//! All neonkit configuration and draft data live under platform-standard
//! directories so behavior is consistent across Linux, macOS, and Windows.

use neonkit_core::{NeonkitError, Result};
use std::path::PathBuf;

/// Unified path resolution for neonkit.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/neonkit/           # Config directory
/// └── neonkit.toml             # Client library configuration
///
/// ~/.local/share/neonkit/      # Data directory
/// └── drafts/                  # Draft records (FileStorage)
/// ```
pub struct NeonkitPaths;

impl NeonkitPaths {
    /// Returns the neonkit configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the config directory (e.g. `~/.config/neonkit/`)
    /// - `Err(_)`: The platform config directory could not be determined
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("neonkit"))
            .ok_or_else(|| NeonkitError::config("cannot determine config directory"))
    }

    /// Returns the path of the configuration file, `neonkit.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("neonkit.toml"))
    }

    /// Returns the neonkit data directory, used for draft records.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the data directory (e.g. `~/.local/share/neonkit/`)
    /// - `Err(_)`: The platform data directory could not be determined
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| dir.join("neonkit"))
            .ok_or_else(|| NeonkitError::config("cannot determine data directory"))
    }

    /// Returns the default root directory for draft storage.
    pub fn draft_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("drafts"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_config_dir() {
        let dir = NeonkitPaths::config_dir().unwrap();
        let file = NeonkitPaths::config_file().unwrap();
        assert_eq!(file.parent().unwrap(), dir);
        assert_eq!(file.file_name().unwrap(), "neonkit.toml");
    }

    #[test]
    fn test_draft_dir_lives_in_data_dir() {
        let data = NeonkitPaths::data_dir().unwrap();
        let drafts = NeonkitPaths::draft_dir().unwrap();
        assert!(drafts.starts_with(&data));
    }
}
