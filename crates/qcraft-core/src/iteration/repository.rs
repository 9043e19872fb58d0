//! History repository trait.
//!
//! Defines the interface for persisting iteration history.

use super::model::Iteration;
use crate::error::Result;

/// An abstract repository for the append-only iteration history.
///
/// The in-memory history owned by the application is the source of truth;
/// storage is a mirror that is loaded once at startup and rewritten on every
/// append. Implementations decide the on-disk format and its versioning.
#[async_trait::async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Retrieves all recorded iterations, oldest first.
    async fn load(&self) -> Result<Vec<Iteration>>;

    /// Appends one completed iteration and flushes the mirror.
    async fn append(&self, entry: &Iteration) -> Result<()>;
}
