//! Unified path management for likeboard files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/likeboard/         # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── session.json             # Persisted credential and profile
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for likeboard.
///
/// An explicit base directory overrides the platform default, which keeps
/// tests away from the real home directory.
#[derive(Debug, Clone, Default)]
pub struct LikeboardPaths {
    base_dir: Option<PathBuf>,
}

impl LikeboardPaths {
    const APP_DIR: &'static str = "likeboard";
    const CONFIG_FILE: &'static str = "config.toml";
    const SESSION_FILE: &'static str = "session.json";

    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the likeboard configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/likeboard/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(Self::CONFIG_FILE))
    }

    /// Default location of the durable session store.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(Self::SESSION_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_override() {
        let paths = LikeboardPaths::new(Some(PathBuf::from("/tmp/lb")));
        assert_eq!(paths.config_file().unwrap(), PathBuf::from("/tmp/lb/config.toml"));
        assert_eq!(paths.session_file().unwrap(), PathBuf::from("/tmp/lb/session.json"));
    }
}
