//! Pure grouping and query functions over iteration history.

use super::model::Iteration;
use indexmap::IndexMap;

/// Groups history entries by exact-match `original` text.
///
/// Keys appear in first-submission order, and each group preserves the
/// submission order of its iterations. Every iteration lands in exactly one
/// group.
pub fn group_by_original(history: &[Iteration]) -> IndexMap<String, Vec<Iteration>> {
    let mut groups: IndexMap<String, Vec<Iteration>> = IndexMap::new();
    for iteration in history {
        groups
            .entry(iteration.original.clone())
            .or_insert_with(Vec::new)
            .push(iteration.clone());
    }
    groups
}

/// Filters groups whose key contains `pattern`, case-insensitively.
///
/// Plain substring match; no fuzzy matching, no normalization beyond case
/// folding. An empty pattern keeps every group.
pub fn filter_groups(
    groups: &IndexMap<String, Vec<Iteration>>,
    pattern: &str,
) -> IndexMap<String, Vec<Iteration>> {
    let needle = pattern.to_lowercase();
    groups
        .iter()
        .filter(|(key, _)| key.to_lowercase().contains(&needle))
        .map(|(key, iterations)| (key.clone(), iterations.clone()))
        .collect()
}
