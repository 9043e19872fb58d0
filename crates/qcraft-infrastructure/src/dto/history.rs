//! On-disk format for the iteration history file.
//!
//! The current format is a versioned envelope; the legacy format (a bare
//! JSON array, as a straight localStorage export would be) is still accepted
//! on load and upgraded on the next save.

use qcraft_core::iteration::Iteration;
use serde::{Deserialize, Serialize};

pub const HISTORY_FORMAT_VERSION: u32 = 1;

/// Either the versioned envelope or a legacy bare array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryFile {
    Versioned {
        version: u32,
        entries: Vec<Iteration>,
    },
    Legacy(Vec<Iteration>),
}

impl HistoryFile {
    pub fn empty() -> Self {
        HistoryFile::Versioned {
            version: HISTORY_FORMAT_VERSION,
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<Iteration>) -> Self {
        HistoryFile::Versioned {
            version: HISTORY_FORMAT_VERSION,
            entries,
        }
    }

    pub fn into_entries(self) -> Vec<Iteration> {
        match self {
            HistoryFile::Versioned { entries, .. } => entries,
            HistoryFile::Legacy(entries) => entries,
        }
    }

    pub fn entries_mut(&mut self) -> &mut Vec<Iteration> {
        // Upgrade in place so the next save writes the envelope.
        if let HistoryFile::Legacy(entries) = self {
            *self = HistoryFile::from_entries(std::mem::take(entries));
        }
        match self {
            HistoryFile::Versioned { entries, .. } => entries,
            HistoryFile::Legacy(_) => unreachable!("legacy form upgraded above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_bare_array_still_loads() {
        let json = r#"[
            {
                "original": "q",
                "refined": "r",
                "personas": ["Ethicist"],
                "final_answer": "a",
                "timestamp": 1700000000000
            }
        ]"#;
        let file: HistoryFile = serde_json::from_str(json).unwrap();
        let entries = file.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].original, "q");
    }

    #[test]
    fn envelope_loads_and_upgrade_is_stable() {
        let json = r#"{"version": 1, "entries": []}"#;
        let mut file: HistoryFile = serde_json::from_str(json).unwrap();
        assert!(file.entries_mut().is_empty());
        assert!(matches!(file, HistoryFile::Versioned { version: 1, .. }));
    }
}
