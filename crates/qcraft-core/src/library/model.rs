//! Community library domain models.
//!
//! Wire field names are camelCase to match the library endpoints.

use crate::iteration::ExpertAnswer;
use serde::{Deserialize, Serialize};

fn default_category() -> String {
    "General".to_string()
}

fn default_impact() -> String {
    "User-contributed transformation".to_string()
}

fn default_author() -> String {
    "Anonymous".to_string()
}

/// A submission to `POST /api/library/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLibraryEntry {
    pub original_question: String,
    pub refined_question: String,
    /// Persona role names, in selection order
    pub expert_personas: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_impact")]
    pub impact: String,
    #[serde(default = "default_author")]
    pub author: String,
    /// Normalized `{name, answer}` pairs
    #[serde(default)]
    pub individual_answers: Vec<ExpertAnswer>,
    #[serde(default)]
    pub best_answer: Option<String>,
    #[serde(default)]
    pub harmony_principle: String,
    #[serde(default)]
    pub conversation_journey: String,
    #[serde(default)]
    pub refinement_rationale: String,
    #[serde(default)]
    pub new_dimensions: String,
}

/// A stored library entry as returned by the backend.
///
/// The server adds identifiers and counters; fields the client does not
/// care about (podcast metadata and the like) are simply not modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: i64,
    #[serde(default)]
    pub original_question: String,
    #[serde(default)]
    pub refined_question: String,
    #[serde(default)]
    pub expert_personas: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub individual_answers: Vec<ExpertAnswer>,
    #[serde(default)]
    pub best_answer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub comments: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub comment_list: Vec<LibraryComment>,
}

/// One comment on a library entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryComment {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub entry_id: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Acknowledgement returned by the submit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    #[serde(default)]
    pub success: bool,
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_serializes_with_camel_case_keys() {
        let entry = NewLibraryEntry {
            original_question: "q".to_string(),
            refined_question: "r".to_string(),
            expert_personas: vec!["Ethicist".to_string()],
            category: default_category(),
            tags: Vec::new(),
            impact: default_impact(),
            author: default_author(),
            individual_answers: Vec::new(),
            best_answer: Some("a".to_string()),
            harmony_principle: String::new(),
            conversation_journey: String::new(),
            refinement_rationale: String::new(),
            new_dimensions: String::new(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["originalQuestion"], "q");
        assert_eq!(value["expertPersonas"][0], "Ethicist");
        assert_eq!(value["bestAnswer"], "a");
    }

    #[test]
    fn entry_decodes_with_server_extras() {
        let entry: LibraryEntry = serde_json::from_str(
            r#"{
                "id": 1712000000,
                "originalQuestion": "q",
                "refinedQuestion": "r",
                "expertPersonas": [],
                "votes": 3,
                "views": 10,
                "status": "user",
                "podcast": {"title": "ignored"}
            }"#,
        )
        .unwrap();
        assert_eq!(entry.id, 1_712_000_000);
        assert_eq!(entry.votes, 3);
        assert!(entry.comment_list.is_empty());
    }
}
