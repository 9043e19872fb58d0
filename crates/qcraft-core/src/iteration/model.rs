//! Iteration domain model.
//!
//! An [`Iteration`] is one completed refinement cycle: the question as
//! submitted, the improved question the backend produced, and the synthesized
//! answer material that came with it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One expert's answer, paired with the expert's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertAnswer {
    pub name: String,
    pub answer: String,
}

/// The per-persona answers attached to a refinement result.
///
/// The improvement endpoint returns `individual_answers` in one of three
/// shapes: an array of `{name, answer}` objects, a keyed object mapping
/// names to answers, or a raw string. The shape is resolved once, at the
/// network boundary, via [`ExpertAnswers::from_value`]; downstream code only
/// ever sees this tagged form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpertAnswers {
    /// Structured `{name, answer}` pairs, in backend order.
    Answers(Vec<ExpertAnswer>),
    /// Unstructured text the backend sent instead of pairs.
    Raw(String),
}

impl Default for ExpertAnswers {
    fn default() -> Self {
        ExpertAnswers::Answers(Vec::new())
    }
}

impl ExpertAnswers {
    /// Resolves any of the three wire shapes into the tagged form.
    ///
    /// A string that itself parses as a JSON array or object (the backend
    /// occasionally double-encodes) is unwrapped first. Anything that cannot
    /// be given structure is kept as `Raw` rather than dropped.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => ExpertAnswers::Answers(Vec::new()),
            Value::String(text) => {
                if let Ok(parsed) = serde_json::from_str::<Value>(&text) {
                    if parsed.is_array() || parsed.is_object() {
                        return Self::from_value(parsed);
                    }
                }
                ExpertAnswers::Raw(text)
            }
            Value::Array(items) => {
                let answers = items.into_iter().map(answer_from_item).collect();
                ExpertAnswers::Answers(answers)
            }
            Value::Object(map) => {
                let answers = map
                    .into_iter()
                    .map(|(name, value)| ExpertAnswer {
                        name,
                        answer: value_to_text(value),
                    })
                    .collect();
                ExpertAnswers::Answers(answers)
            }
            other => ExpertAnswers::Raw(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ExpertAnswers::Answers(answers) => answers.is_empty(),
            ExpertAnswers::Raw(text) => text.is_empty(),
        }
    }

    /// Flattens the answers into display text, one expert per paragraph.
    pub fn to_plain_text(&self) -> String {
        match self {
            ExpertAnswers::Answers(answers) => answers
                .iter()
                .map(|a| format!("{}: {}", a.name, a.answer))
                .collect::<Vec<_>>()
                .join("\n\n"),
            ExpertAnswers::Raw(text) => text.clone(),
        }
    }

    /// Normalizes into `{name, answer}` pairs for a library submission.
    ///
    /// Raw text is paired with the first known role, matching how the
    /// library endpoint itself normalizes stringly answers.
    pub fn normalized_pairs(&self, roles: &[String]) -> Vec<ExpertAnswer> {
        match self {
            ExpertAnswers::Answers(answers) => answers.clone(),
            ExpertAnswers::Raw(text) if text.is_empty() => Vec::new(),
            ExpertAnswers::Raw(text) => {
                // A raw payload that parses as JSON gets one more chance.
                if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                    if parsed.is_array() || parsed.is_object() {
                        return Self::from_value(parsed).normalized_pairs(roles);
                    }
                }
                let name = roles
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Expert".to_string());
                vec![ExpertAnswer {
                    name,
                    answer: text.clone(),
                }]
            }
        }
    }
}

fn answer_from_item(item: Value) -> ExpertAnswer {
    match item {
        Value::Object(map) => {
            let name = map
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Expert")
                .to_string();
            let answer = map
                .get("answer")
                .map(|v| value_to_text(v.clone()))
                .unwrap_or_default();
            ExpertAnswer { name, answer }
        }
        other => ExpertAnswer {
            name: "Expert".to_string(),
            answer: value_to_text(other),
        },
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// One completed refinement cycle.
///
/// Appended to history only when both `refined` and `final_answer` are
/// non-empty. The `timestamp` (epoch milliseconds) doubles as the entry's
/// identifier within a session; it is not globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    /// The question text as submitted
    pub original: String,
    /// The improved question returned by the backend
    pub refined: String,
    /// Role names of the personas used, in selection order
    #[serde(default)]
    pub personas: Vec<String>,
    /// The synthesized best answer
    pub final_answer: String,
    /// Narrative summary of how the personas converged
    #[serde(default)]
    pub conversation_journey: String,
    /// Why the question was reshaped the way it was
    #[serde(default)]
    pub refinement_rationale: String,
    /// The unifying principle the backend identified
    #[serde(default)]
    pub harmony_principle: String,
    /// Suggested further angles of inquiry
    #[serde(default)]
    pub new_dimensions: String,
    /// Per-persona answers in resolved form
    #[serde(default)]
    pub individual_answers: ExpertAnswers,
    /// Creation time, epoch milliseconds
    pub timestamp: i64,
}
