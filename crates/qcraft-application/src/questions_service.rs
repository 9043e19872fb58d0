//! Read-side service over the iteration history.
//!
//! Groups stored iterations by original question and renders the grouped
//! view as a plain-text report for the terminal.

use indexmap::IndexMap;
use minijinja::{Environment, context};
use qcraft_core::error::{QcraftError, Result};
use qcraft_core::iteration::{HistoryRepository, Iteration, filter_groups, group_by_original};
use serde::Serialize;
use std::sync::Arc;

const REPORT_TEMPLATE: &str = r#"{% if groups %}{% for group in groups %}Question: {{ group.original }}
Refinements: {{ group.count }}
{% for item in group.iterations %}  {{ item.index }}. {{ item.refined }}
     Experts: {{ item.personas }}
     Answer: {{ item.final_answer }}
{% endfor %}
{% endfor %}{% else %}No refinement history yet.
{% endif %}"#;

#[derive(Debug, Serialize)]
struct IterationView {
    index: usize,
    refined: String,
    personas: String,
    final_answer: String,
}

#[derive(Debug, Serialize)]
struct GroupView {
    original: String,
    count: usize,
    iterations: Vec<IterationView>,
}

/// Queries and formats the refinement history.
pub struct QuestionsService {
    history: Arc<dyn HistoryRepository>,
}

impl QuestionsService {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    /// Loads history and groups it by original question, optionally
    /// filtered by a case-insensitive substring over the group keys.
    pub async fn grouped(&self, search: Option<&str>) -> Result<IndexMap<String, Vec<Iteration>>> {
        let history = self.history.load().await?;
        let groups = group_by_original(&history);
        Ok(match search {
            Some(pattern) if !pattern.is_empty() => filter_groups(&groups, pattern),
            _ => groups,
        })
    }

    /// Renders grouped history as a plain-text report.
    pub fn render_report(groups: &IndexMap<String, Vec<Iteration>>) -> Result<String> {
        let view: Vec<GroupView> = groups
            .iter()
            .map(|(original, iterations)| GroupView {
                original: original.clone(),
                count: iterations.len(),
                iterations: iterations
                    .iter()
                    .enumerate()
                    .map(|(i, iteration)| IterationView {
                        index: i + 1,
                        refined: iteration.refined.clone(),
                        personas: iteration.personas.join(", "),
                        final_answer: iteration.final_answer.clone(),
                    })
                    .collect(),
            })
            .collect();

        let mut env = Environment::new();
        env.add_template("history_report", REPORT_TEMPLATE)
            .map_err(|e| QcraftError::internal(format!("report template: {}", e)))?;
        let template = env
            .get_template("history_report")
            .map_err(|e| QcraftError::internal(format!("report template: {}", e)))?;
        template
            .render(context! { groups => view })
            .map_err(|e| QcraftError::internal(format!("report render: {}", e)))
    }
}
