//! Path management for Atlas
//!
//! Resolves where settings, the key-value storage blob and the audit log live.
//!
//! ## Path Resolution Order
//!
//! 1. `ATLAS_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `atlas`
//!    (`~/.config/atlas` on Linux, `~/Library/Application Support/atlas` on
//!    macOS, `%APPDATA%\atlas` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::AtlasError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ATLAS_DATA_DIR";

/// Manages all paths used by Atlas
#[derive(Debug, Clone)]
pub struct AtlasPaths {
    /// Base directory for all Atlas data
    base_dir: PathBuf,
}

impl AtlasPaths {
    /// Create a new AtlasPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, AtlasError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AtlasPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the key-value storage blob
    pub fn storage_file(&self) -> PathBuf {
        self.base_dir.join("storage.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the default export directory
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), AtlasError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AtlasError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }

    /// Check if any merchant data has been stored yet
    pub fn is_initialized(&self) -> bool {
        self.storage_file().exists()
    }
}

/// Resolve the default data directory path based on platform
fn resolve_default_path() -> Result<PathBuf, AtlasError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| AtlasError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("atlas"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AtlasPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);

        let paths = AtlasPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AtlasPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AtlasPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.storage_file(), temp_dir.path().join("storage.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }
}
