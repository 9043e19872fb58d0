//! Backend configuration for qcraft.
//!
//! Resolution order: `QCRAFT_BACKEND_URL` environment variable, then
//! `~/.config/qcraft/config.toml`, then the development default.

use qcraft_core::error::Result;
use qcraft_infrastructure::QcraftPaths;
use serde::Deserialize;
use std::fs;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Root structure of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigRoot {
    #[serde(default)]
    backend: BackendSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BackendSection {
    #[serde(default)]
    base_url: Option<String>,
}

/// Where the refinement backend lives.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // Endpoint paths are joined with a leading slash.
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Loads configuration from the environment and the config file.
    ///
    /// A missing config file is not an error; a present but unparsable one
    /// is.
    pub fn load() -> Result<Self> {
        if let Ok(url) = std::env::var("QCRAFT_BACKEND_URL") {
            if !url.trim().is_empty() {
                return Ok(Self::new(url.trim()));
            }
        }

        let config_file = QcraftPaths::default_location()?.config_file();
        if config_file.exists() {
            let content = fs::read_to_string(&config_file)?;
            let root: ConfigRoot = toml::from_str(&content)?;
            if let Some(base_url) = root.backend.base_url {
                return Ok(Self::new(base_url));
            }
        }

        Ok(Self::new(DEFAULT_BASE_URL))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = BackendConfig::new("http://example.com/");
        assert_eq!(config.endpoint("/select-personas"), "http://example.com/select-personas");
    }

    #[test]
    fn config_file_section_parses() {
        let root: ConfigRoot = toml::from_str(
            r#"
            [backend]
            base_url = "http://backend:9000"
            "#,
        )
        .unwrap();
        assert_eq!(root.backend.base_url.as_deref(), Some("http://backend:9000"));
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let root: ConfigRoot = toml::from_str("").unwrap();
        assert!(root.backend.base_url.is_none());
    }
}
