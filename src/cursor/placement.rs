//! Mapping cursor intents to concrete insertion behavior.

use super::intent::{CursorIntent, PostInsertAction};

/// Concrete outcome of inserting a suggestion: the final text, where the
/// cursor lands inside it, and whether completion fires again.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertResult {
    pub text: String,
    /// Cursor offset relative to the start of the inserted text.
    pub cursor_offset: usize,
    pub action: PostInsertAction,
}

/// Compute where the cursor lands for `text` inserted under `intent`.
pub fn compute_insert_result(text: &str, intent: CursorIntent) -> InsertResult {
    let len = text.chars().count();
    let mut cursor_offset = len;
    let mut action = PostInsertAction::None;

    match intent {
        CursorIntent::StayInside => {
            if text.ends_with('(') {
                cursor_offset = len;
                action = PostInsertAction::RetriggerCompletion;
            } else if text.ends_with(')') {
                cursor_offset = len - 1;
                action = PostInsertAction::RetriggerCompletion;
            }
        }
        CursorIntent::ChainDot => {
            action = PostInsertAction::RetriggerCompletion;
        }
        CursorIntent::OpenParen | CursorIntent::CloseParen => {
            action = PostInsertAction::RetriggerCompletion;
        }
        CursorIntent::Complete | CursorIntent::None => {}
    }

    InsertResult {
        text: text.to_string(),
        cursor_offset,
        action,
    }
}

/// Whether a trailing `.` should be appended after inserting `text`.
pub fn should_add_dot_after(text: &str, intent: CursorIntent) -> bool {
    intent == CursorIntent::ChainDot && !text.ends_with('.') && text.ends_with(')')
}

/// `text` with the chaining dot appended when the intent calls for one.
pub fn adjust_text_for_intent(text: &str, intent: CursorIntent) -> String {
    if should_add_dot_after(text, intent) {
        format!("{text}.")
    } else {
        text.to_string()
    }
}

/// Absolute cursor position after inserting at `original_position`.
pub fn cursor_position_after_insert(original_position: usize, cursor_offset: usize) -> usize {
    original_position + cursor_offset
}
