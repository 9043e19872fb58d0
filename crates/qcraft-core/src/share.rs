//! Email sharing domain: relay credentials and the delivery gateway.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// EmailJS credentials served by `GET /api/emailjs-credentials`.
///
/// Any field may be null when the backend is not configured for email;
/// sharing then degrades to an unavailable-feature error rather than
/// blocking the rest of the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailCredentials {
    #[serde(default)]
    pub emailjs_user_id: Option<String>,
    #[serde(default)]
    pub emailjs_service_id: Option<String>,
    #[serde(default)]
    pub emailjs_template_id_feedback: Option<String>,
    #[serde(default)]
    pub emailjs_template_id_share: Option<String>,
}

impl EmailCredentials {
    fn base_usable(&self) -> bool {
        self.emailjs_user_id.as_deref().is_some_and(|s| !s.is_empty())
            && self
                .emailjs_service_id
                .as_deref()
                .is_some_and(|s| !s.is_empty())
    }

    /// Whether the share template can be used.
    pub fn can_share(&self) -> bool {
        self.base_usable()
            && self
                .emailjs_template_id_share
                .as_deref()
                .is_some_and(|s| !s.is_empty())
    }

    /// Whether the feedback template can be used.
    pub fn can_send_feedback(&self) -> bool {
        self.base_usable()
            && self
                .emailjs_template_id_feedback
                .as_deref()
                .is_some_and(|s| !s.is_empty())
    }
}

/// Client for the email relay (credentials fetch + delivery).
#[async_trait::async_trait]
pub trait EmailGateway: Send + Sync {
    /// Fetches relay credentials from the refinement backend.
    async fn fetch_credentials(&self) -> Result<EmailCredentials>;

    /// Delivers one templated email through the relay.
    ///
    /// `template_params` is the flat key/value object the template expects.
    async fn send(
        &self,
        credentials: &EmailCredentials,
        template_id: &str,
        template_params: Value,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_disables_only_that_feature() {
        let credentials: EmailCredentials = serde_json::from_str(
            r#"{
                "emailjs_user_id": "u",
                "emailjs_service_id": "s",
                "emailjs_template_id_share": "t",
                "emailjs_template_id_feedback": null
            }"#,
        )
        .unwrap();
        assert!(credentials.can_share());
        assert!(!credentials.can_send_feedback());
    }

    #[test]
    fn all_null_decodes_and_is_unusable() {
        let credentials: EmailCredentials = serde_json::from_str("{}").unwrap();
        assert!(!credentials.can_share());
        assert!(!credentials.can_send_feedback());
    }
}
