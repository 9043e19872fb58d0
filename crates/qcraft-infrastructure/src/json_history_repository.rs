//! JSON-file-backed HistoryRepository implementation.

use crate::dto::HistoryFile;
use crate::paths::QcraftPaths;
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use qcraft_core::error::Result;
use qcraft_core::iteration::{HistoryRepository, Iteration};
use std::path::PathBuf;

/// Stores the iteration history in a single JSON file.
///
/// This is the local-storage analog of the browser client: one key, the
/// whole array, rewritten on every append. Writes are atomic and
/// lock-guarded (see [`AtomicJsonFile`]); there is no eviction and no size
/// bound.
pub struct JsonHistoryRepository {
    file: AtomicJsonFile<HistoryFile>,
}

impl JsonHistoryRepository {
    /// Creates a repository backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    /// Creates a repository at the default location
    /// (`~/.config/qcraft/history.json`).
    pub fn default_location() -> Result<Self> {
        let paths = QcraftPaths::default_location()?;
        Ok(Self::new(paths.history_file()))
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn load(&self) -> Result<Vec<Iteration>> {
        let entries = self
            .file
            .load()?
            .map(HistoryFile::into_entries)
            .unwrap_or_default();
        tracing::debug!(count = entries.len(), "loaded iteration history");
        Ok(entries)
    }

    async fn append(&self, entry: &Iteration) -> Result<()> {
        let entry = entry.clone();
        self.file.update(HistoryFile::empty(), move |history| {
            history.entries_mut().push(entry);
            Ok(())
        })?;
        tracing::debug!("appended iteration to history");
        Ok(())
    }
}
