//! Persona domain model.
//!
//! Represents the expert viewpoints the backend selects for a question.
//! Each persona carries the full narrative profile returned by the
//! persona-selection endpoint; the `role` string is what gets recorded in
//! iteration history and library submissions.

use serde::{Deserialize, Serialize};

/// A named expert viewpoint returned by the persona-selection endpoint.
///
/// All narrative fields default to empty strings so a persona still decodes
/// when the backend omits parts of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Display name of the persona
    #[serde(default)]
    pub name: String,
    /// Role or title describing the persona's expertise
    #[serde(default)]
    pub role: String,
    /// Background description
    #[serde(default)]
    pub background: String,
    /// Areas of core expertise
    #[serde(default)]
    pub core_expertise: Vec<String>,
    /// How the persona approaches problems
    #[serde(default)]
    pub cognitive_approach: String,
    /// What drives the persona
    #[serde(default)]
    pub values_and_motivations: String,
    /// Communication style characteristics
    #[serde(default)]
    pub communication_style: String,
    /// One distinguishing trait
    #[serde(default)]
    pub notable_trait: String,
    /// Why the backend picked this persona for the question
    #[serde(default)]
    pub rationale: String,
}

impl Persona {
    /// The role name recorded in history, falling back to a generic label
    /// when the backend left the role empty.
    pub fn role_label(&self) -> String {
        if self.role.is_empty() {
            "Expert".to_string()
        } else {
            self.role.clone()
        }
    }
}
