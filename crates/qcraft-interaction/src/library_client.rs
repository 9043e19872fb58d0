//! REST client for the community-library endpoints.

use crate::config::BackendConfig;
use async_trait::async_trait;
use chrono::Utc;
use qcraft_core::error::{QcraftError, Result};
use qcraft_core::library::{LibraryEntry, LibraryGateway, NewLibraryEntry, SubmitReceipt};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const LIBRARY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct EntriesEnvelope {
    #[serde(default)]
    entries: Vec<LibraryEntry>,
}

/// Reqwest-backed implementation of [`LibraryGateway`].
#[derive(Clone)]
pub struct LibraryApiClient {
    client: Client,
    config: BackendConfig,
}

impl LibraryApiClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QcraftError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl LibraryGateway for LibraryApiClient {
    async fn submit(&self, entry: &NewLibraryEntry) -> Result<SubmitReceipt> {
        tracing::info!(question = %entry.original_question, "submitting to library");
        let response = self
            .client
            .post(self.config.endpoint("/api/library/submit"))
            .json(entry)
            .timeout(LIBRARY_TIMEOUT)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<SubmitReceipt>().await?)
    }

    async fn entries(&self) -> Result<Vec<LibraryEntry>> {
        let response = self
            .client
            .get(self.config.endpoint("/api/library/entries"))
            .timeout(LIBRARY_TIMEOUT)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let envelope = response.json::<EntriesEnvelope>().await?;
        Ok(envelope.entries)
    }

    async fn entry(&self, id: i64) -> Result<LibraryEntry> {
        let response = self
            .client
            .get(self.config.endpoint(&format!("/api/library/entry/{}", id)))
            .timeout(LIBRARY_TIMEOUT)
            .send()
            .await?;
        if response.status().as_u16() == 404 {
            return Err(QcraftError::not_found("library entry", id.to_string()));
        }
        let response = Self::check_status(response).await?;
        Ok(response.json::<LibraryEntry>().await?)
    }

    async fn upvote(&self, entry_id: i64) -> Result<()> {
        let response = self
            .client
            .post(self.config.endpoint("/api/library/upvote"))
            .json(&json!({ "entryId": entry_id }))
            .timeout(LIBRARY_TIMEOUT)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn comment(&self, entry_id: i64, comment: &str, author: &str) -> Result<()> {
        let response = self
            .client
            .post(self.config.endpoint("/api/library/comment"))
            .json(&json!({
                "entryId": entry_id,
                "comment": comment,
                "author": author,
                "date": Utc::now().to_rfc3339(),
            }))
            .timeout(LIBRARY_TIMEOUT)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
