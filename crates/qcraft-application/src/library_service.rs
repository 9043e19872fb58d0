//! Community library service.
//!
//! Builds library submissions out of a finished refinement cycle and
//! forwards reads, upvotes and comments to the library gateway.

use qcraft_core::error::{QcraftError, Result};
use qcraft_core::library::{LibraryEntry, LibraryGateway, NewLibraryEntry, SubmitReceipt};
use qcraft_core::session::RefinementState;
use std::sync::Arc;

/// Publishes refinements to, and browses, the community library.
pub struct LibraryService {
    gateway: Arc<dyn LibraryGateway>,
}

impl LibraryService {
    pub fn new(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self { gateway }
    }

    /// Publishes the session's current refinement.
    ///
    /// Requires a completed cycle: both the refined question and the best
    /// answer must be present.
    pub async fn publish_from_state(&self, state: &RefinementState) -> Result<SubmitReceipt> {
        if state.refined_question.trim().is_empty() || state.best_answer.trim().is_empty() {
            return Err(QcraftError::invalid_input(
                "Nothing to publish yet. Refine a question first.",
            ));
        }

        let roles = state.persona_roles();
        let entry = NewLibraryEntry {
            original_question: state.question.clone(),
            refined_question: state.refined_question.clone(),
            expert_personas: roles.clone(),
            category: "General".to_string(),
            tags: Vec::new(),
            impact: "User-contributed transformation".to_string(),
            author: "Anonymous".to_string(),
            individual_answers: state.individual_answers.normalized_pairs(&roles),
            best_answer: Some(state.best_answer.clone()),
            harmony_principle: state.harmony_principle.clone(),
            conversation_journey: state.conversation_journey.clone(),
            refinement_rationale: state.refinement_rationale.clone(),
            new_dimensions: state.new_dimensions.clone(),
        };
        self.gateway.submit(&entry).await
    }

    pub async fn entries(&self) -> Result<Vec<LibraryEntry>> {
        self.gateway.entries().await
    }

    pub async fn entry(&self, id: i64) -> Result<LibraryEntry> {
        self.gateway.entry(id).await
    }

    pub async fn upvote(&self, entry_id: i64) -> Result<()> {
        self.gateway.upvote(entry_id).await
    }

    pub async fn comment(&self, entry_id: i64, comment: &str, author: &str) -> Result<()> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(QcraftError::invalid_input(
                "Please write a comment before submitting.",
            ));
        }
        let author = if author.trim().is_empty() {
            "Anonymous"
        } else {
            author
        };
        self.gateway.comment(entry_id, comment, author).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use qcraft_core::gateway::RefinementOutcome;
    use qcraft_core::iteration::ExpertAnswers;
    use qcraft_core::persona::Persona;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGateway {
        submitted: Mutex<Vec<NewLibraryEntry>>,
        comments: Mutex<Vec<(i64, String, String)>>,
    }

    #[async_trait]
    impl LibraryGateway for RecordingGateway {
        async fn submit(&self, entry: &NewLibraryEntry) -> Result<SubmitReceipt> {
            self.submitted.lock().unwrap().push(entry.clone());
            Ok(SubmitReceipt {
                success: true,
                id: 42,
            })
        }

        async fn entries(&self) -> Result<Vec<LibraryEntry>> {
            Ok(Vec::new())
        }

        async fn entry(&self, id: i64) -> Result<LibraryEntry> {
            Err(QcraftError::not_found("library entry", id.to_string()))
        }

        async fn upvote(&self, _entry_id: i64) -> Result<()> {
            Ok(())
        }

        async fn comment(&self, entry_id: i64, comment: &str, author: &str) -> Result<()> {
            self.comments
                .lock()
                .unwrap()
                .push((entry_id, comment.to_string(), author.to_string()));
            Ok(())
        }
    }

    fn completed_state() -> RefinementState {
        let mut state = RefinementState::new();
        state.reset_for_submit("Why do cats purr?");
        state.apply_personas(vec![Persona {
            role: "Feline Biologist".to_string(),
            ..serde_json::from_str("{}").unwrap()
        }]);
        state.apply_outcome(
            RefinementOutcome {
                improved_question: "What does purring do for cats?".to_string(),
                rationale: "rationale".to_string(),
                final_answer: "It regulates and soothes.".to_string(),
                summary: "summary".to_string(),
                harmony_principle: "harmony".to_string(),
                new_dimensions: "dimensions".to_string(),
                individual_answers: ExpertAnswers::Raw("Purring is self-repair.".to_string()),
            },
            "ok",
        );
        state
    }

    #[tokio::test]
    async fn publish_builds_a_normalized_submission() {
        let gateway = Arc::new(RecordingGateway::default());
        let service = LibraryService::new(Arc::clone(&gateway) as Arc<dyn LibraryGateway>);

        let receipt = service.publish_from_state(&completed_state()).await.unwrap();
        assert_eq!(receipt.id, 42);

        let submitted = gateway.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        let entry = &submitted[0];
        assert_eq!(entry.original_question, "Why do cats purr?");
        assert_eq!(entry.refined_question, "What does purring do for cats?");
        assert_eq!(entry.expert_personas, vec!["Feline Biologist"]);
        // Raw answer text is attributed to the first persona role.
        assert_eq!(entry.individual_answers.len(), 1);
        assert_eq!(entry.individual_answers[0].name, "Feline Biologist");
        assert_eq!(entry.best_answer.as_deref(), Some("It regulates and soothes."));
        assert_eq!(entry.category, "General");
        assert_eq!(entry.author, "Anonymous");
    }

    #[tokio::test]
    async fn publish_requires_a_completed_cycle() {
        let gateway = Arc::new(RecordingGateway::default());
        let service = LibraryService::new(Arc::clone(&gateway) as Arc<dyn LibraryGateway>);

        let err = service
            .publish_from_state(&RefinementState::new())
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(gateway.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_comments_are_rejected_and_authors_default() {
        let gateway = Arc::new(RecordingGateway::default());
        let service = LibraryService::new(Arc::clone(&gateway) as Arc<dyn LibraryGateway>);

        let err = service.comment(1, "   ", "me").await.unwrap_err();
        assert!(err.is_invalid_input());

        service.comment(1, "nice", "").await.unwrap();
        let comments = gateway.comments.lock().unwrap();
        assert_eq!(comments[0], (1, "nice".to_string(), "Anonymous".to_string()));
    }
}
