//! Shared construction of the layered services.
//!
//! Every subcommand is one process invocation, so the session state is
//! loaded from disk before the command runs and saved back afterwards.

use anyhow::{Context, Result};
use qcraft_application::RefinementSession;
use qcraft_core::iteration::HistoryRepository;
use qcraft_core::session::{RefinementState, SessionStateRepository};
use qcraft_infrastructure::{JsonHistoryRepository, JsonSessionStateRepository};
use qcraft_interaction::{BackendConfig, EmailJsClient, LibraryApiClient, RefineApiClient};
use std::sync::Arc;

pub struct App {
    pub config: BackendConfig,
    pub history: Arc<dyn HistoryRepository>,
    pub sessions: JsonSessionStateRepository,
}

impl App {
    pub fn open() -> Result<Self> {
        let config = BackendConfig::load().context("Failed to load backend configuration")?;
        let history: Arc<dyn HistoryRepository> = Arc::new(
            JsonHistoryRepository::default_location()
                .context("Failed to open the history store")?,
        );
        let sessions = JsonSessionStateRepository::default_location()
            .context("Failed to open the session store")?;
        Ok(Self {
            config,
            history,
            sessions,
        })
    }

    /// Builds a refinement session, resuming saved state when present.
    pub async fn refinement_session(&self) -> Result<RefinementSession> {
        let gateway = Arc::new(RefineApiClient::new(self.config.clone()));
        let session = match self.sessions.load().await? {
            Some(state) => RefinementSession::with_state(gateway, Arc::clone(&self.history), state),
            None => RefinementSession::new(gateway, Arc::clone(&self.history)),
        };
        Ok(session)
    }

    pub async fn save_session(&self, state: &RefinementState) -> Result<()> {
        self.sessions
            .save(state)
            .await
            .context("Failed to save session state")?;
        Ok(())
    }

    /// Loads the saved session state, if any.
    pub async fn load_session(&self) -> Result<Option<RefinementState>> {
        Ok(self.sessions.load().await?)
    }

    pub fn library_client(&self) -> LibraryApiClient {
        LibraryApiClient::new(self.config.clone())
    }

    pub fn email_client(&self) -> EmailJsClient {
        EmailJsClient::new(self.config.clone())
    }
}
