//! Email relay client.
//!
//! Credentials come from the refinement backend
//! (`GET /api/emailjs-credentials`); delivery goes straight to the EmailJS
//! REST API with those credentials and a flat template-parameter object.

use crate::config::BackendConfig;
use async_trait::async_trait;
use qcraft_core::error::{QcraftError, Result};
use qcraft_core::share::{EmailCredentials, EmailGateway};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
const EMAIL_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-backed implementation of [`EmailGateway`].
#[derive(Clone)]
pub struct EmailJsClient {
    client: Client,
    config: BackendConfig,
    send_url: String,
}

impl EmailJsClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            send_url: EMAILJS_SEND_URL.to_string(),
        }
    }
}

#[async_trait]
impl EmailGateway for EmailJsClient {
    async fn fetch_credentials(&self) -> Result<EmailCredentials> {
        let response = self
            .client
            .get(self.config.endpoint("/api/emailjs-credentials"))
            .timeout(EMAIL_TIMEOUT)
            .send()
            .await?;

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

        Ok(response.json::<EmailCredentials>().await?)
    }

    async fn send(
        &self,
        credentials: &EmailCredentials,
        template_id: &str,
        template_params: Value,
    ) -> Result<()> {
        let service_id = credentials
            .emailjs_service_id
            .as_deref()
            .ok_or_else(|| QcraftError::config("Email credentials are incomplete"))?;
        let user_id = credentials
            .emailjs_user_id
            .as_deref()
            .ok_or_else(|| QcraftError::config("Email credentials are incomplete"))?;

        let body = json!({
            "service_id": service_id,
            "template_id": template_id,
            "user_id": user_id,
            "template_params": template_params,
        });

        let response = self
            .client
            .post(&self.send_url)
            .json(&body)
            .timeout(EMAIL_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // EmailJS answers plain text, not JSON, on errors.
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QcraftError::Http {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(template = template_id, "email dispatched");
        Ok(())
    }
}
