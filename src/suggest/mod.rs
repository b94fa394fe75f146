//! Suggestion generation: candidates from the method graph, the schema,
//! and the static helper catalog, plus ranking and deduplication.

pub mod helpers;
pub mod methods;
pub mod rank;
pub mod tables;
pub mod values;

pub use helpers::{
    find_helper, helper_category, helper_names, is_helper, suggest_aggregate_helpers,
    suggest_condition_helpers, suggest_helpers, suggest_sort_helpers, HelperCategory, HelperDef,
};
pub use methods::{suggest_db_methods, suggest_methods};
pub use rank::{
    deduplicate, filter_suggestions, merge_suggestions, prioritize, rank_suggestions,
    RankingWeights, SuggestionFilter,
};
pub use tables::{suggest_all_columns, suggest_columns, suggest_table_columns, suggest_tables};
pub use values::suggest_values;

use crate::cursor::{action_for_intent, CursorIntent, PostInsertAction};

/// What kind of thing a suggestion names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    Method,
    Table,
    Column,
    Helper,
    Keyword,
    Value,
    Snippet,
}

/// One completion candidate, ready for an editor adapter to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Label shown in the completion list.
    pub label: String,
    pub kind: SuggestionKind,
    /// Text to insert; may contain numbered placeholders when `snippet`.
    pub insert: String,
    /// Short signature or type text.
    pub detail: String,
    /// Longer documentation.
    pub doc: String,
    /// Stable ordering key used when no prefix is being typed.
    pub sort: String,
    /// Cursor behavior after insertion.
    pub cursor: CursorIntent,
    /// Whether `insert` uses placeholder syntax.
    pub snippet: bool,
    /// Post-insert action for the editor adapter.
    pub action: PostInsertAction,
}

impl Suggestion {
    /// Construct with the action derived from the intent; generators that
    /// need a different action set it explicitly afterwards.
    pub fn new(
        label: impl Into<String>,
        kind: SuggestionKind,
        insert: impl Into<String>,
        cursor: CursorIntent,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            insert: insert.into(),
            detail: String::new(),
            doc: String::new(),
            sort: String::new(),
            cursor,
            snippet: false,
            action: action_for_intent(cursor),
        }
    }

    /// The intent to act on: the assigned one, falling back to a default
    /// derived from the suggestion's kind and label.
    pub fn effective_intent(&self) -> CursorIntent {
        if self.cursor != CursorIntent::None {
            return self.cursor;
        }

        match self.kind {
            SuggestionKind::Method => crate::cursor::method_intent(&self.label),
            SuggestionKind::Table => CursorIntent::ChainDot,
            SuggestionKind::Helper => CursorIntent::StayInside,
            _ => CursorIntent::None,
        }
    }
}

/// Zero-padded sort key, so lexicographic order matches numeric order.
pub(crate) fn pad_sort(index: usize) -> String {
    format!("{index:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_action_from_intent() {
        let s = Suggestion::new("from", SuggestionKind::Method, "from(", CursorIntent::StayInside);
        assert_eq!(s.action, PostInsertAction::RetriggerCompletion);

        let s = Suggestion::new("execute", SuggestionKind::Method, "execute()", CursorIntent::Complete);
        assert_eq!(s.action, PostInsertAction::None);
    }

    #[test]
    fn test_effective_intent_prefers_assigned() {
        let s = Suggestion::new("from", SuggestionKind::Method, "from(", CursorIntent::StayInside);
        assert_eq!(s.effective_intent(), CursorIntent::StayInside);
    }

    #[test]
    fn test_effective_intent_falls_back_by_kind() {
        let s = Suggestion::new("users", SuggestionKind::Table, "users", CursorIntent::None);
        assert_eq!(s.effective_intent(), CursorIntent::ChainDot);

        let s = Suggestion::new("eq", SuggestionKind::Helper, "eq", CursorIntent::None);
        assert_eq!(s.effective_intent(), CursorIntent::StayInside);

        let s = Suggestion::new("execute", SuggestionKind::Method, "execute", CursorIntent::None);
        assert_eq!(s.effective_intent(), CursorIntent::Complete);

        let s = Suggestion::new("1", SuggestionKind::Value, "1", CursorIntent::None);
        assert_eq!(s.effective_intent(), CursorIntent::None);
    }

    #[test]
    fn test_pad_sort() {
        assert_eq!(pad_sort(0), "0000");
        assert_eq!(pad_sort(42), "0042");
    }
}
