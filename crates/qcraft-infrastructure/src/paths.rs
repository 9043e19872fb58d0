//! Unified path management for qcraft files.
//!
//! All client-side state lives under one configuration directory:
//!
//! ```text
//! ~/.config/qcraft/
//! ├── config.toml      # backend configuration
//! ├── history.json     # iteration history (the local-storage mirror)
//! └── session.json     # current refinement session state
//! ```

use qcraft_core::error::{QcraftError, Result};
use std::path::PathBuf;

/// Resolves qcraft file locations, optionally rooted at a custom base
/// directory (used by tests and the `QCRAFT_HOME` override).
#[derive(Debug, Clone)]
pub struct QcraftPaths {
    base_dir: PathBuf,
}

impl QcraftPaths {
    /// Creates a path resolver rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates a resolver at the platform default location.
    ///
    /// `QCRAFT_HOME` wins when set; otherwise the platform config directory
    /// (e.g. `~/.config/qcraft`).
    pub fn default_location() -> Result<Self> {
        if let Ok(home) = std::env::var("QCRAFT_HOME") {
            return Ok(Self::new(home));
        }
        let config_dir = dirs::config_dir()
            .ok_or_else(|| QcraftError::config("Cannot determine config directory"))?;
        Ok(Self::new(config_dir.join("qcraft")))
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    pub fn history_file(&self) -> PathBuf {
        self.base_dir.join("history.json")
    }

    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_base_dir() {
        let paths = QcraftPaths::new("/tmp/qcraft-test");
        assert_eq!(
            paths.history_file(),
            PathBuf::from("/tmp/qcraft-test/history.json")
        );
        assert_eq!(
            paths.session_file(),
            PathBuf::from("/tmp/qcraft-test/session.json")
        );
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/qcraft-test/config.toml")
        );
    }
}
