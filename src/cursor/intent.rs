//! Cursor intents: what the editor should do after inserting a suggestion.
//!
//! An intent is a declaration of behavior, not text. The suggestion layer
//! never hand-codes "insert this string and hope the cursor lands right";
//! it tags each suggestion with an intent, and the editor adapter maps the
//! intent to concrete cursor placement and retriggering.

/// Where the cursor should land after insertion, and whether completion
/// should fire again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIntent {
    /// Snippet-driven: open a parenthesis and position inside it.
    OpenParen,
    /// Snippet-driven: close a parenthesis and position after it.
    CloseParen,
    /// Ensure a trailing `.` after a just-closed `)` and retrigger, so the
    /// next chain method can be picked immediately.
    ChainDot,
    /// Place the cursor inside just-inserted parentheses and retrigger, so
    /// argument suggestions appear without an extra keystroke.
    StayInside,
    /// Insert as-is; the chain is finished.
    Complete,
    /// No cursor movement.
    None,
}

/// Structured post-insert action recognized by the editor adapter.
///
/// Replaces a loose command string at the boundary: the adapter matches on
/// this enum rather than comparing magic strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostInsertAction {
    /// Immediately re-invoke completion at the new cursor position.
    RetriggerCompletion,
    /// Nothing to do.
    #[default]
    None,
}

/// Whether an intent asks the editor to re-open completion after insert.
pub fn should_trigger_suggest(intent: CursorIntent) -> bool {
    matches!(intent, CursorIntent::ChainDot | CursorIntent::StayInside)
}

/// The post-insert action implied by an intent.
pub fn action_for_intent(intent: CursorIntent) -> PostInsertAction {
    if should_trigger_suggest(intent) {
        PostInsertAction::RetriggerCompletion
    } else {
        PostInsertAction::None
    }
}

/// Human-readable description of an intent, for diagnostics and docs.
pub fn intent_description(intent: CursorIntent) -> &'static str {
    match intent {
        CursorIntent::OpenParen => "Open parenthesis and position cursor inside",
        CursorIntent::CloseParen => "Close parenthesis and position cursor after",
        CursorIntent::ChainDot => "Add dot for method chaining",
        CursorIntent::StayInside => "Keep cursor inside for argument input",
        CursorIntent::Complete => "No further action needed",
        CursorIntent::None => "No cursor movement",
    }
}

/// Default intent for a method suggestion, by name.
pub fn method_intent(method_name: &str) -> CursorIntent {
    match method_name {
        "execute" | "toSQL" => CursorIntent::Complete,
        "returning" => CursorIntent::ChainDot,
        _ => CursorIntent::StayInside,
    }
}

/// Default intent for a table suggestion.
pub fn table_intent(close_parenthesis: bool) -> CursorIntent {
    if close_parenthesis {
        CursorIntent::ChainDot
    } else {
        CursorIntent::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_trigger_suggest() {
        assert!(should_trigger_suggest(CursorIntent::ChainDot));
        assert!(should_trigger_suggest(CursorIntent::StayInside));
        assert!(!should_trigger_suggest(CursorIntent::Complete));
        assert!(!should_trigger_suggest(CursorIntent::None));
        assert!(!should_trigger_suggest(CursorIntent::OpenParen));
        assert!(!should_trigger_suggest(CursorIntent::CloseParen));
    }

    #[test]
    fn test_action_for_intent() {
        assert_eq!(
            action_for_intent(CursorIntent::StayInside),
            PostInsertAction::RetriggerCompletion
        );
        assert_eq!(action_for_intent(CursorIntent::Complete), PostInsertAction::None);
    }

    #[test]
    fn test_method_intent_defaults() {
        assert_eq!(method_intent("execute"), CursorIntent::Complete);
        assert_eq!(method_intent("toSQL"), CursorIntent::Complete);
        assert_eq!(method_intent("returning"), CursorIntent::ChainDot);
        assert_eq!(method_intent("where"), CursorIntent::StayInside);
        assert_eq!(method_intent("from"), CursorIntent::StayInside);
    }

    #[test]
    fn test_table_intent() {
        assert_eq!(table_intent(true), CursorIntent::ChainDot);
        assert_eq!(table_intent(false), CursorIntent::None);
    }
}
