//! Session state model.
//!
//! [`RefinementState`] holds the in-progress refinement cycle plus the UI
//! flags around it. It is reset at the start of each submission, populated
//! incrementally by the two sequential network responses, and frozen into an
//! [`crate::iteration::Iteration`] once both responses succeed.

use crate::gateway::RefinementOutcome;
use crate::iteration::{ExpertAnswers, Iteration};
use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// The currently-in-progress refinement cycle and its UI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementState {
    /// Client-side correlation id for logs; not sent to the backend.
    pub session_id: String,
    /// The question text currently being refined.
    pub question: String,
    /// Personas chosen by the last persona-selection call. Reused verbatim
    /// by `iterate` so the persona panel stays stable across iterations.
    #[serde(default)]
    pub selected_personas: Vec<Persona>,
    #[serde(default)]
    pub refined_question: String,
    #[serde(default)]
    pub refinement_rationale: String,
    #[serde(default)]
    pub best_answer: String,
    #[serde(default)]
    pub conversation_journey: String,
    #[serde(default)]
    pub harmony_principle: String,
    #[serde(default)]
    pub new_dimensions: String,
    #[serde(default)]
    pub individual_answers: ExpertAnswers,
    /// Completed cycles in this session.
    #[serde(default)]
    pub iteration_count: u32,
    /// Persona-selection call in flight.
    #[serde(default)]
    pub is_loading_personas: bool,
    /// Improvement call in flight; drives the cosmetic stage ticker.
    #[serde(default)]
    pub is_processing_question: bool,
    /// Index into [`crate::session::STAGES`], advanced by the ticker.
    #[serde(default)]
    pub current_stage: usize,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success_message: Option<String>,
}

impl RefinementState {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            question: String::new(),
            selected_personas: Vec::new(),
            refined_question: String::new(),
            refinement_rationale: String::new(),
            best_answer: String::new(),
            conversation_journey: String::new(),
            harmony_principle: String::new(),
            new_dimensions: String::new(),
            individual_answers: ExpertAnswers::default(),
            iteration_count: 0,
            is_loading_personas: false,
            is_processing_question: false,
            current_stage: 0,
            error: None,
            success_message: None,
        }
    }

    /// Clears prior refinement output and starts the persona-loading phase.
    pub fn reset_for_submit(&mut self, question: &str) {
        self.question = question.to_string();
        self.refined_question.clear();
        self.refinement_rationale.clear();
        self.best_answer.clear();
        self.conversation_journey.clear();
        self.harmony_principle.clear();
        self.new_dimensions.clear();
        self.individual_answers = ExpertAnswers::default();
        self.is_loading_personas = true;
        self.is_processing_question = false;
        self.current_stage = 0;
        self.error = None;
        self.success_message = None;
    }

    /// Stores the selected personas and moves into the processing phase.
    pub fn apply_personas(&mut self, personas: Vec<Persona>) {
        self.selected_personas = personas;
        self.is_loading_personas = false;
        self.is_processing_question = true;
    }

    /// Stores the improvement result and ends the processing phase.
    pub fn apply_outcome(&mut self, outcome: RefinementOutcome, message: &str) {
        self.refined_question = outcome.improved_question;
        self.refinement_rationale = outcome.rationale;
        self.best_answer = outcome.final_answer;
        self.conversation_journey = outcome.summary;
        self.harmony_principle = outcome.harmony_principle;
        self.new_dimensions = outcome.new_dimensions;
        self.individual_answers = outcome.individual_answers;
        self.is_processing_question = false;
        self.iteration_count += 1;
        self.success_message = Some(message.to_string());
        self.error = None;
    }

    /// Records a failure message and clears every in-flight flag.
    pub fn fail(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.success_message = None;
        self.is_loading_personas = false;
        self.is_processing_question = false;
    }

    pub fn has_personas(&self) -> bool {
        !self.selected_personas.is_empty()
    }

    /// Role names of the selected personas, in selection order.
    pub fn persona_roles(&self) -> Vec<String> {
        self.selected_personas
            .iter()
            .map(Persona::role_label)
            .collect()
    }

    /// Freezes the current output fields into a history entry.
    ///
    /// Callers must have checked the recording invariant (non-empty refined
    /// question and final answer) before this.
    pub fn to_iteration(&self, timestamp: i64) -> Iteration {
        Iteration {
            original: self.question.clone(),
            refined: self.refined_question.clone(),
            personas: self.persona_roles(),
            final_answer: self.best_answer.clone(),
            conversation_journey: self.conversation_journey.clone(),
            refinement_rationale: self.refinement_rationale.clone(),
            harmony_principle: self.harmony_principle.clone(),
            new_dimensions: self.new_dimensions.clone(),
            individual_answers: self.individual_answers.clone(),
            timestamp,
        }
    }
}

impl Default for RefinementState {
    fn default() -> Self {
        Self::new()
    }
}
