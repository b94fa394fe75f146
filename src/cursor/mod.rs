//! Cursor behavior after suggestion insertion: intents, placement, and
//! snippet generation.

pub mod intent;
pub mod placement;
pub mod snippet;

pub use intent::{
    action_for_intent, intent_description, method_intent, should_trigger_suggest, table_intent,
    CursorIntent, PostInsertAction,
};
pub use placement::{
    adjust_text_for_intent, compute_insert_result, cursor_position_after_insert,
    should_add_dot_after, InsertResult,
};
pub use snippet::{call_snippet, method_snippet, simple_snippet, values_row_snippet};
