//! Remote gateway trait for the refinement backend.
//!
//! The application layer talks to the backend exclusively through
//! [`RefineGateway`], which keeps the two-call pipeline testable with mock
//! implementations.

use crate::error::Result;
use crate::iteration::ExpertAnswers;
use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// The improvement endpoint's result, with `individual_answers` already
/// resolved into its tagged form at the network boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementOutcome {
    #[serde(default)]
    pub improved_question: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub final_answer: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub harmony_principle: String,
    #[serde(default)]
    pub new_dimensions: String,
    #[serde(default)]
    pub individual_answers: ExpertAnswers,
}

/// Client for the two refinement endpoints.
///
/// Each call is a single attempt: no retry, no backoff, no cancellation.
/// The persona call must complete before the improvement call is issued,
/// because the improvement body carries the persona list.
#[async_trait::async_trait]
pub trait RefineGateway: Send + Sync {
    /// `POST /select-personas` - picks expert personas for a question.
    async fn select_personas(&self, text: &str) -> Result<Vec<Persona>>;

    /// `POST /improve-question` - refines the question and synthesizes the
    /// answer material using the given personas.
    async fn improve_question(
        &self,
        text: &str,
        personas: &[Persona],
    ) -> Result<RefinementOutcome>;
}
