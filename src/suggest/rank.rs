//! Deduplication, filtering, and ranking of suggestion lists.

use std::collections::HashSet;

use super::{pad_sort, Suggestion, SuggestionKind};

/// Scoring weights for prefix ranking.
///
/// The match-class weights are strictly decreasing and dominate the kind
/// weights, so an exact-label match always outranks a prefix match and a
/// prefix match always outranks a substring match, regardless of kind; kind
/// only breaks ties within a match class.
#[derive(Debug, Clone, Copy)]
pub struct RankingWeights {
    pub exact: i64,
    pub prefix: i64,
    pub contains: i64,
}

impl RankingWeights {
    pub fn kind_weight(&self, kind: SuggestionKind) -> i64 {
        match kind {
            SuggestionKind::Method => 50,
            SuggestionKind::Table => 40,
            SuggestionKind::Column => 30,
            SuggestionKind::Helper => 20,
            SuggestionKind::Keyword => 10,
            SuggestionKind::Value => 5,
            SuggestionKind::Snippet => 0,
        }
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            exact: 1000,
            prefix: 100,
            contains: 10,
        }
    }
}

/// Collapse duplicates by `(label, kind)`, keeping the first occurrence.
pub fn deduplicate(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen: HashSet<(String, SuggestionKind)> = HashSet::new();
    let mut result = Vec::with_capacity(suggestions.len());

    for s in suggestions {
        let key = (s.label.clone(), s.kind);
        if seen.insert(key) {
            result.push(s);
        }
    }

    result
}

/// Optional narrowing applied before ranking.
#[derive(Debug, Clone, Default)]
pub struct SuggestionFilter {
    pub kinds: Vec<SuggestionKind>,
    pub prefix: Option<String>,
    pub limit: Option<usize>,
}

/// Filter by kind, loose prefix/substring match, and count limit.
pub fn filter_suggestions(suggestions: Vec<Suggestion>, filter: &SuggestionFilter) -> Vec<Suggestion> {
    let mut result = suggestions;

    if !filter.kinds.is_empty() {
        result.retain(|s| filter.kinds.contains(&s.kind));
    }

    if let Some(prefix) = &filter.prefix {
        if !prefix.is_empty() {
            let prefix = prefix.to_lowercase();
            result.retain(|s| {
                let label = s.label.to_lowercase();
                label.starts_with(&prefix) || label.contains(&prefix)
            });
        }
    }

    if let Some(limit) = filter.limit {
        if limit > 0 {
            result.truncate(limit);
        }
    }

    result
}

/// Rank suggestions against the typed prefix.
///
/// Without a prefix: stable sort by the assigned `sort` key, label as the
/// fallback. With one: score each candidate (exact > prefix > substring,
/// plus a per-kind weight), sort descending, tie-break alphabetically.
pub fn rank_suggestions(suggestions: Vec<Suggestion>, prefix: &str) -> Vec<Suggestion> {
    rank_suggestions_with(suggestions, prefix, RankingWeights::default())
}

/// [`rank_suggestions`] with explicit weights.
pub fn rank_suggestions_with(
    suggestions: Vec<Suggestion>,
    prefix: &str,
    weights: RankingWeights,
) -> Vec<Suggestion> {
    if prefix.is_empty() {
        let mut sorted = suggestions;
        sorted.sort_by(|a, b| a.sort.cmp(&b.sort).then_with(|| a.label.cmp(&b.label)));
        return sorted;
    }

    let lower_prefix = prefix.to_lowercase();

    let mut scored: Vec<(i64, Suggestion)> = suggestions
        .into_iter()
        .map(|s| {
            let label = s.label.to_lowercase();
            let mut score = 0;

            if label == lower_prefix {
                score += weights.exact;
            } else if label.starts_with(&lower_prefix) {
                score += weights.prefix;
            } else if label.contains(&lower_prefix) {
                score += weights.contains;
            }

            score += weights.kind_weight(s.kind);
            (score, s)
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.label.cmp(&b.1.label)));
    scored.into_iter().map(|(_, s)| s).collect()
}

/// Concatenate lists and deduplicate.
pub fn merge_suggestions(lists: Vec<Vec<Suggestion>>) -> Vec<Suggestion> {
    let all: Vec<Suggestion> = lists.into_iter().flatten().collect();
    deduplicate(all)
}

/// Move the named labels to the front, in the given order, leaving the rest
/// in their `sort`-key order.
pub fn prioritize(suggestions: Vec<Suggestion>, labels: &[&str]) -> Vec<Suggestion> {
    let priority = |label: &str| -> usize {
        labels
            .iter()
            .position(|l| *l == label)
            .map(|i| labels.len() - i)
            .unwrap_or(0)
    };

    let mut sorted = suggestions;
    sorted.sort_by(|a, b| {
        priority(&b.label)
            .cmp(&priority(&a.label))
            .then_with(|| a.sort.cmp(&b.sort))
    });
    sorted
}

/// Reassign sort keys to match the current order.
pub fn assign_sort_keys(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    suggestions
        .into_iter()
        .enumerate()
        .map(|(i, mut s)| {
            s.sort = pad_sort(i);
            s
        })
        .collect()
}
