//! Session state repository trait.

use super::state::RefinementState;
use crate::error::Result;

/// Persistence for the current [`RefinementState`].
///
/// Lets a one-shot front end pick up where the previous invocation left off
/// (in particular, `iterate` needs the previous refined question and the
/// held persona list).
#[async_trait::async_trait]
pub trait SessionStateRepository: Send + Sync {
    /// Loads the persisted state, if any.
    async fn load(&self) -> Result<Option<RefinementState>>;

    /// Replaces the persisted state.
    async fn save(&self, state: &RefinementState) -> Result<()>;
}
