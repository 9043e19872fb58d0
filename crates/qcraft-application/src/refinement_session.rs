//! The refinement session service.
//!
//! [`RefinementSession`] owns the two-call pipeline (persona selection,
//! then question improvement) plus the session state it mutates. History
//! recording happens here, on call completion: exactly one entry is
//! appended per successful cycle, and none on failure.

use crate::stage_ticker::StageTicker;
use chrono::Utc;
use qcraft_core::error::{QcraftError, Result};
use qcraft_core::gateway::{RefineGateway, RefinementOutcome};
use qcraft_core::iteration::HistoryRepository;
use qcraft_core::persona::Persona;
use qcraft_core::session::RefinementState;
use std::sync::Arc;
use tokio::sync::RwLock;

const SUBMIT_SUCCESS: &str = "Your question was refined successfully!";
const ITERATE_SUCCESS: &str = "Question iterated successfully!";

/// Runs refinement cycles against an injected gateway and history store.
pub struct RefinementSession {
    gateway: Arc<dyn RefineGateway>,
    history: Arc<dyn HistoryRepository>,
    state: Arc<RwLock<RefinementState>>,
    ticker: StageTicker,
}

impl RefinementSession {
    pub fn new(gateway: Arc<dyn RefineGateway>, history: Arc<dyn HistoryRepository>) -> Self {
        Self::with_state(gateway, history, RefinementState::new())
    }

    /// Resumes a session restored from storage.
    pub fn with_state(
        gateway: Arc<dyn RefineGateway>,
        history: Arc<dyn HistoryRepository>,
        state: RefinementState,
    ) -> Self {
        Self {
            gateway,
            history,
            state: Arc::new(RwLock::new(state)),
            ticker: StageTicker::new(),
        }
    }

    pub fn ticker(&self) -> &StageTicker {
        &self.ticker
    }

    /// Shared handle to the session state, for observers.
    pub fn state_handle(&self) -> Arc<RwLock<RefinementState>> {
        Arc::clone(&self.state)
    }

    /// A snapshot of the current state.
    pub async fn snapshot(&self) -> RefinementState {
        self.state.read().await.clone()
    }

    /// Runs a full refinement cycle for a freshly submitted question.
    ///
    /// On failure the state carries the banner message, no history entry is
    /// written, and the error is returned to the caller.
    pub async fn submit(&self, question: &str) -> Result<()> {
        let question = question.trim().to_string();
        if question.is_empty() {
            return Err(QcraftError::invalid_input(
                "Please enter a question before submitting.",
            ));
        }

        self.state.write().await.reset_for_submit(&question);
        tracing::info!(question = %question, "refinement cycle started");

        let result = self.run_cycle(&question, None, SUBMIT_SUCCESS).await;
        self.finish(result).await
    }

    /// Refines the previous refined question once more, reusing the
    /// personas already selected in this session.
    pub async fn iterate(&self) -> Result<()> {
        let (text, personas) = {
            let mut state = self.state.write().await;
            if state.refined_question.trim().is_empty() {
                return Err(QcraftError::invalid_input(
                    "Nothing to iterate on yet. Submit a question first.",
                ));
            }
            if !state.has_personas() {
                return Err(QcraftError::invalid_input(
                    "No personas available for iteration. Please submit the question again.",
                ));
            }
            state.error = None;
            state.success_message = None;
            state.is_processing_question = true;
            state.current_stage = 0;
            (state.refined_question.clone(), state.selected_personas.clone())
        };
        tracing::info!(iteration_input = %text, "iteration started");

        let result = self.run_cycle(&text, Some(personas), ITERATE_SUCCESS).await;
        self.finish(result).await
    }

    /// The shared pipeline body. `personas` is `None` for a fresh submit
    /// (a selection call is made) and `Some` for an iteration (reuse).
    async fn run_cycle(
        &self,
        text: &str,
        personas: Option<Vec<Persona>>,
        success_message: &str,
    ) -> Result<()> {
        let personas = match personas {
            Some(personas) => personas,
            None => {
                let personas = self.gateway.select_personas(text).await?;
                if personas.is_empty() {
                    return Err(QcraftError::api(
                        "Persona selection returned no personas",
                    ));
                }
                self.state.write().await.apply_personas(personas.clone());
                personas
            }
        };

        self.ticker.start(self.state_handle());
        let outcome = self.gateway.improve_question(text, &personas).await;
        self.ticker.stop();
        let outcome = outcome?;

        if outcome.improved_question.trim().is_empty() || outcome.final_answer.trim().is_empty() {
            return Err(QcraftError::api(
                "Improvement response is missing the refined question or final answer",
            ));
        }

        self.record(text, outcome, success_message).await
    }

    /// Applies a successful outcome to the state and appends exactly one
    /// history entry for it.
    async fn record(
        &self,
        input: &str,
        outcome: RefinementOutcome,
        success_message: &str,
    ) -> Result<()> {
        let iteration = {
            let mut state = self.state.write().await;
            // The text the backend refined is this cycle's original. On an
            // iteration that is the previous refined question.
            state.question = input.to_string();
            state.apply_outcome(outcome, success_message);
            state.to_iteration(Utc::now().timestamp_millis())
        };
        self.history.append(&iteration).await?;
        tracing::info!(
            refined = %iteration.refined,
            count = self.state.read().await.iteration_count,
            "refinement cycle recorded"
        );
        Ok(())
    }

    /// On failure, stops the ticker and writes the banner message.
    async fn finish(&self, result: Result<()>) -> Result<()> {
        if let Err(err) = &result {
            self.ticker.stop();
            self.state.write().await.fail(&err.banner_message());
            tracing::warn!(error = %err, "refinement cycle failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use qcraft_core::iteration::{ExpertAnswers, Iteration};
    use qcraft_core::persona::Persona;
    use std::sync::Mutex;

    fn persona(role: &str) -> Persona {
        Persona {
            role: role.to_string(),
            ..serde_json::from_str("{}").unwrap()
        }
    }

    fn outcome(refined: &str, answer: &str) -> RefinementOutcome {
        RefinementOutcome {
            improved_question: refined.to_string(),
            rationale: "rationale".to_string(),
            final_answer: answer.to_string(),
            summary: "summary".to_string(),
            harmony_principle: "harmony".to_string(),
            new_dimensions: "dimensions".to_string(),
            individual_answers: ExpertAnswers::default(),
        }
    }

    struct MockGateway {
        personas: Result<Vec<Persona>>,
        outcome: Result<RefinementOutcome>,
        improve_inputs: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn happy(personas: Vec<Persona>, outcome: RefinementOutcome) -> Self {
            Self {
                personas: Ok(personas),
                outcome: Ok(outcome),
                improve_inputs: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RefineGateway for MockGateway {
        async fn select_personas(&self, _text: &str) -> Result<Vec<Persona>> {
            self.personas.clone()
        }

        async fn improve_question(
            &self,
            text: &str,
            _personas: &[Persona],
        ) -> Result<RefinementOutcome> {
            self.improve_inputs.lock().unwrap().push(text.to_string());
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct MockHistory {
        entries: Mutex<Vec<Iteration>>,
    }

    #[async_trait]
    impl HistoryRepository for MockHistory {
        async fn load(&self) -> Result<Vec<Iteration>> {
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn append(&self, iteration: &Iteration) -> Result<()> {
            self.entries.lock().unwrap().push(iteration.clone());
            Ok(())
        }
    }

    fn session(gateway: MockGateway) -> (RefinementSession, Arc<MockHistory>) {
        let history = Arc::new(MockHistory::default());
        let session = RefinementSession::new(
            Arc::new(gateway),
            Arc::clone(&history) as Arc<dyn HistoryRepository>,
        );
        (session, history)
    }

    #[tokio::test]
    async fn submit_records_exactly_one_iteration() {
        let gateway = MockGateway::happy(
            vec![persona("Ethicist"), persona("Biologist")],
            outcome("Why do cats purr, really?", "Because contentment."),
        );
        let (session, history) = session(gateway);

        session.submit("Why do cats purr?").await.unwrap();

        let entries = history.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].original, "Why do cats purr?");
        assert_eq!(entries[0].refined, "Why do cats purr, really?");
        assert_eq!(entries[0].final_answer, "Because contentment.");
        assert_eq!(entries[0].personas, vec!["Ethicist", "Biologist"]);

        let state = session.snapshot().await;
        assert_eq!(state.iteration_count, 1);
        assert!(!state.is_processing_question);
        assert!(state.success_message.is_some());
    }

    #[tokio::test]
    async fn blank_question_is_rejected_without_network_calls() {
        let gateway = MockGateway::happy(vec![persona("P")], outcome("r", "a"));
        let (session, history) = session(gateway);

        let err = session.submit("   ").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(history.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_improvement_records_nothing_and_sets_banner() {
        let gateway = MockGateway {
            personas: Ok(vec![persona("P")]),
            outcome: Err(QcraftError::Network("connection refused".to_string())),
            improve_inputs: Mutex::new(Vec::new()),
        };
        let (session, history) = session(gateway);

        let err = session.submit("q").await.unwrap_err();
        assert!(matches!(err, QcraftError::Network(_)));
        assert!(history.entries.lock().unwrap().is_empty());

        let state = session.snapshot().await;
        assert!(state.error.as_deref().unwrap().starts_with("Something went wrong"));
        assert!(!state.is_processing_question);
        assert_eq!(state.iteration_count, 0);
    }

    #[tokio::test]
    async fn incomplete_improvement_body_records_nothing() {
        let gateway = MockGateway::happy(vec![persona("P")], outcome("", ""));
        let (session, history) = session(gateway);

        let err = session.submit("q").await.unwrap_err();
        assert!(matches!(err, QcraftError::Api(_)));
        assert!(history.entries.lock().unwrap().is_empty());
        assert_eq!(session.snapshot().await.iteration_count, 0);
    }

    #[tokio::test]
    async fn iterate_reuses_personas_and_feeds_the_refined_question_back() {
        let gateway = MockGateway::happy(
            vec![persona("Ethicist")],
            outcome("refined v1", "answer"),
        );
        let (session, history) = session(gateway);

        session.submit("original").await.unwrap();
        session.iterate().await.unwrap();

        let entries = history.entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        // The second cycle's original is the first cycle's refined output.
        assert_eq!(entries[1].original, "refined v1");
        assert_eq!(entries[1].personas, vec!["Ethicist"]);

        let state = session.snapshot().await;
        assert_eq!(state.iteration_count, 2);
        assert_eq!(state.question, "refined v1");
    }

    #[tokio::test]
    async fn iterate_without_a_prior_cycle_is_rejected() {
        let gateway = Arc::new(MockGateway::happy(vec![persona("P")], outcome("r", "a")));
        let history = Arc::new(MockHistory::default());
        let session = RefinementSession::new(
            Arc::clone(&gateway) as Arc<dyn RefineGateway>,
            Arc::clone(&history) as Arc<dyn HistoryRepository>,
        );

        let err = session.iterate().await.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(history.entries.lock().unwrap().is_empty());
        assert!(gateway.improve_inputs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_persona_list_is_an_api_error() {
        let gateway = MockGateway::happy(Vec::new(), outcome("r", "a"));
        let (session, history) = session(gateway);

        let err = session.submit("q").await.unwrap_err();
        assert!(matches!(err, QcraftError::Api(_)));
        assert!(history.entries.lock().unwrap().is_empty());
    }
}
