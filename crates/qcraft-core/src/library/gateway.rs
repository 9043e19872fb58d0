//! Remote gateway trait for the community library.

use super::model::{LibraryEntry, NewLibraryEntry, SubmitReceipt};
use crate::error::Result;

/// Client for the community-library endpoints.
///
/// Single-attempt requests with no idempotency key; resubmitting after a
/// failure can create duplicate entries server-side. That is accepted as
/// out of scope for the client.
#[async_trait::async_trait]
pub trait LibraryGateway: Send + Sync {
    /// `POST /api/library/submit`
    async fn submit(&self, entry: &NewLibraryEntry) -> Result<SubmitReceipt>;

    /// `GET /api/library/entries`
    async fn entries(&self) -> Result<Vec<LibraryEntry>>;

    /// `GET /api/library/entry/{id}`
    async fn entry(&self, id: i64) -> Result<LibraryEntry>;

    /// `POST /api/library/upvote`
    async fn upvote(&self, entry_id: i64) -> Result<()>;

    /// `POST /api/library/comment`
    async fn comment(&self, entry_id: i64, comment: &str, author: &str) -> Result<()>;
}
