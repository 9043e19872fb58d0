//! Email share and feedback service.
//!
//! Relay credentials are fetched from the backend once per process and
//! cached. When the backend carries no usable credentials, sharing and
//! feedback degrade to a configuration error instead of blocking the rest
//! of the client.

use qcraft_core::error::{QcraftError, Result};
use qcraft_core::iteration::Iteration;
use qcraft_core::session::RefinementState;
use qcraft_core::share::{EmailCredentials, EmailGateway};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::OnceCell;

const UNAVAILABLE: &str = "Email sharing is not available right now. Please try again later.";

/// Sends share and feedback emails through the relay gateway.
pub struct ShareService {
    gateway: Arc<dyn EmailGateway>,
    credentials: OnceCell<EmailCredentials>,
}

impl ShareService {
    pub fn new(gateway: Arc<dyn EmailGateway>) -> Self {
        Self {
            gateway,
            credentials: OnceCell::new(),
        }
    }

    async fn credentials(&self) -> Result<&EmailCredentials> {
        self.credentials
            .get_or_try_init(|| async { self.gateway.fetch_credentials().await })
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "email credentials unavailable");
                QcraftError::config(UNAVAILABLE)
            })
    }

    /// Emails one recorded refinement to `recipient` via the share template.
    pub async fn share_iteration(&self, recipient: &str, iteration: &Iteration) -> Result<()> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(QcraftError::invalid_input(
                "Please enter a recipient email address.",
            ));
        }

        let credentials = self.credentials().await?;
        if !credentials.can_share() {
            return Err(QcraftError::config(UNAVAILABLE));
        }
        let template_id = credentials
            .emailjs_template_id_share
            .as_deref()
            .ok_or_else(|| QcraftError::config(UNAVAILABLE))?;

        let params = json!({
            "to_email": recipient,
            "question": iteration.original,
            "refinedQuestion": iteration.refined,
            "finalAnswer": iteration.final_answer,
            "conversationJourney": iteration.conversation_journey,
            "refinementRationale": iteration.refinement_rationale,
            "harmonyPrinciple": iteration.harmony_principle,
            "newDimensions": iteration.new_dimensions,
            "individualInsights": iteration.individual_answers.to_plain_text(),
        });
        self.gateway.send(credentials, template_id, params).await
    }

    /// Sends a star-rating plus comment about the current session through
    /// the feedback template.
    pub async fn send_feedback(
        &self,
        rating: u8,
        comment: &str,
        state: &RefinementState,
    ) -> Result<()> {
        if rating == 0 {
            return Err(QcraftError::invalid_input(
                "Please provide a star rating before submitting feedback.",
            ));
        }
        if rating > 5 {
            return Err(QcraftError::invalid_input(
                "Star ratings go from 1 to 5.",
            ));
        }

        let credentials = self.credentials().await?;
        if !credentials.can_send_feedback() {
            return Err(QcraftError::config(UNAVAILABLE));
        }
        let template_id = credentials
            .emailjs_template_id_feedback
            .as_deref()
            .ok_or_else(|| QcraftError::config(UNAVAILABLE))?;

        let params = json!({
            "rating": rating,
            "comment": comment,
            "question": state.question,
            "refinedQuestion": state.refined_question,
            "finalAnswer": state.best_answer,
        });
        self.gateway.send(credentials, template_id, params).await
    }
}
