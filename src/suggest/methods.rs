//! Method suggestions from the method graph.

use crate::cursor::CursorIntent;
use crate::state::{ChainState, METHOD_GRAPH};

use super::{pad_sort, Suggestion, SuggestionKind};

/// Suggest every method reachable from the state's chain stage,
/// deduplicated by name, each tagged with a cursor intent derived from its
/// signature: terminal methods complete the chain, methods with arguments
/// keep the cursor inside, argument-less methods chain straight into the
/// next dot.
pub fn suggest_methods(state: &ChainState) -> Vec<Suggestion> {
    let methods = METHOD_GRAPH.unique_methods_for(state.kind);
    let mut suggestions = Vec::with_capacity(methods.len());

    for (i, def) in methods.iter().enumerate() {
        let (insert, cursor) = if def.terminal {
            (format!("{}()", def.name), CursorIntent::Complete)
        } else if def.has_args() {
            (format!("{}(", def.name), CursorIntent::StayInside)
        } else {
            (format!("{}()", def.name), CursorIntent::ChainDot)
        };

        let mut s = Suggestion::new(def.name, SuggestionKind::Method, insert, cursor);
        s.detail = def.detail();
        s.doc = def.doc.to_string();
        s.sort = pad_sort(i);
        suggestions.push(s);
    }

    suggestions
}

/// The five entry methods on the root `db` object.
///
/// Curated rather than graph-derived: `select`'s overloads collapse to one
/// entry and `execute` inserts a raw-SQL template snippet.
pub fn suggest_db_methods() -> Vec<Suggestion> {
    let mut select = Suggestion::new(
        "select",
        SuggestionKind::Method,
        "select(",
        CursorIntent::StayInside,
    );
    select.detail = "(columns?)".to_string();
    select.doc = "Start a SELECT query".to_string();
    select.sort = pad_sort(0);

    let mut insert = Suggestion::new(
        "insert",
        SuggestionKind::Method,
        "insert(",
        CursorIntent::StayInside,
    );
    insert.detail = "(table)".to_string();
    insert.doc = "Start an INSERT query".to_string();
    insert.sort = pad_sort(1);

    let mut update = Suggestion::new(
        "update",
        SuggestionKind::Method,
        "update(",
        CursorIntent::StayInside,
    );
    update.detail = "(table)".to_string();
    update.doc = "Start an UPDATE query".to_string();
    update.sort = pad_sort(2);

    let mut delete = Suggestion::new(
        "delete",
        SuggestionKind::Method,
        "delete(",
        CursorIntent::StayInside,
    );
    delete.detail = "(table)".to_string();
    delete.doc = "Start a DELETE query".to_string();
    delete.sort = pad_sort(3);

    let mut execute = Suggestion::new(
        "execute",
        SuggestionKind::Method,
        "execute(sql`$1`)$0",
        CursorIntent::StayInside,
    );
    execute.detail = "(sql)".to_string();
    execute.doc = "Execute raw SQL".to_string();
    execute.sort = pad_sort(4);
    execute.snippet = true;

    vec![select, insert, update, delete, execute]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::PostInsertAction;
    use crate::state::{resolve_context, ChainKind};

    fn state_at(source: &str) -> ChainState {
        resolve_context(source, source.chars().count()).state
    }

    #[test]
    fn test_db_methods_exact_set() {
        let labels: Vec<String> = suggest_db_methods().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["select", "insert", "update", "delete", "execute"]);
    }

    #[test]
    fn test_select_stage_suggests_from() {
        let state = state_at("db.select().");
        assert_eq!(state.kind, ChainKind::Select);

        let suggestions = suggest_methods(&state);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "from");
        assert_eq!(suggestions[0].insert, "from(");
        assert_eq!(suggestions[0].cursor, CursorIntent::StayInside);
        assert_eq!(suggestions[0].action, PostInsertAction::RetriggerCompletion);
    }

    #[test]
    fn test_select_from_stage_methods() {
        let state = state_at("db.select().from(users).");
        let labels: Vec<String> = suggest_methods(&state).into_iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "where", "orderBy", "groupBy", "having", "limit", "offset", "leftJoin",
                "rightJoin", "innerJoin", "fullJoin", "execute",
            ]
        );
    }

    #[test]
    fn test_terminal_method_completes() {
        let state = state_at("db.select().from(users).");
        let execute = suggest_methods(&state)
            .into_iter()
            .find(|s| s.label == "execute")
            .unwrap();
        assert_eq!(execute.insert, "execute()");
        assert_eq!(execute.cursor, CursorIntent::Complete);
        assert_eq!(execute.action, PostInsertAction::None);
    }

    #[test]
    fn test_argless_method_chains() {
        let state = state_at("db.insert(users).values().");
        let returning = suggest_methods(&state)
            .into_iter()
            .find(|s| s.label == "returning")
            .unwrap();
        assert_eq!(returning.insert, "returning()");
        assert_eq!(returning.cursor, CursorIntent::ChainDot);
        assert_eq!(returning.action, PostInsertAction::RetriggerCompletion);
    }

    #[test]
    fn test_no_methods_after_terminal() {
        let state = state_at("db.select().from(users).execute().");
        assert!(suggest_methods(&state).is_empty());
    }

    #[test]
    fn test_no_duplicate_labels() {
        let state = state_at("db.");
        let suggestions = suggest_methods(&state);
        let mut labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), suggestions.len());
    }

    #[test]
    fn test_sort_keys_follow_graph_order() {
        let state = state_at("db.select().from(users).");
        let suggestions = suggest_methods(&state);
        let mut sorted = suggestions.clone();
        sorted.sort_by(|a, b| a.sort.cmp(&b.sort));
        assert_eq!(suggestions, sorted);
    }
}
