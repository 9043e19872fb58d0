//! REST client for the two refinement endpoints.
//!
//! Each call is one attempt against the configured backend; failures map to
//! the shared error taxonomy (transport -> `Network`, non-2xx -> `Http`,
//! undecodable body -> `Serialization`, missing fields -> `Api`). The
//! `individual_answers` union is resolved here, once, into its tagged form.

use crate::config::BackendConfig;
use async_trait::async_trait;
use qcraft_core::error::{QcraftError, Result};
use qcraft_core::gateway::{RefineGateway, RefinementOutcome};
use qcraft_core::iteration::ExpertAnswers;
use qcraft_core::persona::Persona;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;

const PERSONA_TIMEOUT: Duration = Duration::from_secs(30);
const IMPROVE_TIMEOUT: Duration = Duration::from_secs(120);

/// Reqwest-backed implementation of [`RefineGateway`].
#[derive(Clone)]
pub struct RefineApiClient {
    client: Client,
    config: BackendConfig,
}

impl RefineApiClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn post_json(&self, path: &str, body: Value, timeout: Duration) -> Result<Value> {
        let url = self.config.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .timeout(timeout)
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

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl RefineGateway for RefineApiClient {
    async fn select_personas(&self, text: &str) -> Result<Vec<Persona>> {
        tracing::debug!(chars = text.len(), "selecting personas");
        let body = json!({ "text": text });
        let value = self
            .post_json("/select-personas", body, PERSONA_TIMEOUT)
            .await?;
        decode_personas(value)
    }

    async fn improve_question(
        &self,
        text: &str,
        personas: &[Persona],
    ) -> Result<RefinementOutcome> {
        tracing::debug!(personas = personas.len(), "improving question");
        let body = json!({ "text": text, "personas": personas });
        let value = self
            .post_json("/improve-question", body, IMPROVE_TIMEOUT)
            .await?;
        decode_outcome(value)
    }
}

/// Decodes the persona-selection response, insisting on a `selectedPersonas`
/// array.
fn decode_personas(value: Value) -> Result<Vec<Persona>> {
    let personas = value
        .get("selectedPersonas")
        .filter(|v| v.is_array())
        .cloned()
        .ok_or_else(|| QcraftError::api("Invalid persona data received from server"))?;
    let personas: Vec<Persona> = serde_json::from_value(personas)?;
    Ok(personas)
}

/// Decodes the improvement response.
///
/// Narrative fields default to empty when absent; `individual_answers` is
/// resolved from any of its three wire shapes.
fn decode_outcome(value: Value) -> Result<RefinementOutcome> {
    let Value::Object(mut map) = value else {
        return Err(QcraftError::api("Improvement response is not an object"));
    };

    let individual_answers = map
        .remove("individual_answers")
        .map(ExpertAnswers::from_value)
        .unwrap_or_default();

    let mut text_field = |key: &str| -> String {
        match map.remove(key) {
            Some(Value::String(text)) => text,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    };

    Ok(RefinementOutcome {
        improved_question: text_field("improved_question"),
        rationale: text_field("rationale"),
        final_answer: text_field("final_answer"),
        summary: text_field("summary"),
        harmony_principle: text_field("harmony_principle"),
        new_dimensions: text_field("new_dimensions"),
        individual_answers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcraft_core::iteration::ExpertAnswer;

    #[test]
    fn decode_personas_accepts_selected_personas_array() {
        let value = json!({
            "selectedPersonas": [
                {"name": "Ada", "role": "Ethicist", "rationale": "relevant"},
                {"name": "Grace", "role": "Engineer"}
            ]
        });
        let personas = decode_personas(value).unwrap();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas[0].role, "Ethicist");
        assert_eq!(personas[1].rationale, "");
    }

    #[test]
    fn decode_personas_rejects_missing_field() {
        let err = decode_personas(json!({"personas": []})).unwrap_err();
        assert!(matches!(err, QcraftError::Api(_)));
    }

    #[test]
    fn decode_personas_rejects_non_array() {
        let err = decode_personas(json!({"selectedPersonas": "nope"})).unwrap_err();
        assert!(matches!(err, QcraftError::Api(_)));
    }

    #[test]
    fn decode_outcome_reads_all_fields() {
        let value = json!({
            "improved_question": "X",
            "rationale": "because",
            "final_answer": "Y",
            "summary": "journey",
            "harmony_principle": "balance",
            "new_dimensions": "angles",
            "individual_answers": [{"name": "Ada", "answer": "42"}]
        });
        let outcome = decode_outcome(value).unwrap();
        assert_eq!(outcome.improved_question, "X");
        assert_eq!(outcome.final_answer, "Y");
        assert_eq!(
            outcome.individual_answers,
            ExpertAnswers::Answers(vec![ExpertAnswer {
                name: "Ada".to_string(),
                answer: "42".to_string(),
            }])
        );
    }

    #[test]
    fn decode_outcome_tolerates_missing_and_null_fields() {
        let value = json!({
            "improved_question": "X",
            "final_answer": "Y",
            "new_dimensions": null
        });
        let outcome = decode_outcome(value).unwrap();
        assert_eq!(outcome.new_dimensions, "");
        assert!(outcome.individual_answers.is_empty());
    }

    #[test]
    fn decode_outcome_resolves_keyed_object_answers() {
        let value = json!({
            "improved_question": "X",
            "final_answer": "Y",
            "individual_answers": {"Ada": "42", "Grace": "43"}
        });
        let outcome = decode_outcome(value).unwrap();
        match outcome.individual_answers {
            ExpertAnswers::Answers(pairs) => assert_eq!(pairs.len(), 2),
            other => panic!("expected pairs, got {:?}", other),
        }
    }

    #[test]
    fn decode_outcome_keeps_raw_string_answers() {
        let value = json!({
            "improved_question": "X",
            "final_answer": "Y",
            "individual_answers": "one blob of prose"
        });
        let outcome = decode_outcome(value).unwrap();
        assert_eq!(
            outcome.individual_answers,
            ExpertAnswers::Raw("one blob of prose".to_string())
        );
    }
}
