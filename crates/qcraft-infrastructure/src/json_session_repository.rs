//! JSON-file-backed SessionStateRepository implementation.

use crate::paths::QcraftPaths;
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use qcraft_core::error::Result;
use qcraft_core::session::{RefinementState, SessionStateRepository};
use std::path::PathBuf;

/// Persists the current refinement session as one JSON file so a later
/// invocation can iterate on the previous result.
pub struct JsonSessionStateRepository {
    file: AtomicJsonFile<RefinementState>,
}

impl JsonSessionStateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    /// Creates a repository at the default location
    /// (`~/.config/qcraft/session.json`).
    pub fn default_location() -> Result<Self> {
        let paths = QcraftPaths::default_location()?;
        Ok(Self::new(paths.session_file()))
    }
}

#[async_trait]
impl SessionStateRepository for JsonSessionStateRepository {
    async fn load(&self) -> Result<Option<RefinementState>> {
        self.file.load()
    }

    async fn save(&self, state: &RefinementState) -> Result<()> {
        self.file.save(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn state_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonSessionStateRepository::new(temp_dir.path().join("session.json"));

        assert!(repo.load().await.unwrap().is_none());

        let mut state = RefinementState::new();
        state.reset_for_submit("Why do cats purr?");
        state.fail("network down");
        repo.save(&state).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }
}
