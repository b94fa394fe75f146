//! Typed value suggestions for helper-call argument positions.
//!
//! When the cursor sits after the comma in `eq(users.id, `, the column's
//! type picks a handful of plausible literal candidates, always followed by
//! a `param()` placeholder for parameterized execution.

use crate::cursor::CursorIntent;
use crate::schema::{SchemaColumn, TypeKind};

use super::{Suggestion, SuggestionKind};

/// Suggest literal values for a comparison against `column`.
pub fn suggest_values(column: &SchemaColumn) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    match column.type_kind() {
        TypeKind::Number => {
            for (i, n) in ["1", "10", "100"].into_iter().enumerate() {
                suggestions.push(value_suggestion(n, i));
            }
        }
        TypeKind::String => {
            suggestions.push(value_suggestion("\"test@example.com\"", 0));
        }
        TypeKind::Boolean => {
            suggestions.push(value_suggestion("true", 0));
            suggestions.push(value_suggestion("false", 1));
        }
        TypeKind::Date => {
            suggestions.push(value_suggestion("now()", 0));
        }
        TypeKind::Unknown => {}
    }

    let mut param = Suggestion::new(
        "param()",
        SuggestionKind::Helper,
        "param($0)",
        CursorIntent::StayInside,
    );
    param.detail = "Parameter".to_string();
    param.doc = "Bind a query parameter instead of a literal".to_string();
    param.sort = "9".to_string();
    param.snippet = true;
    suggestions.push(param);

    suggestions
}

fn value_suggestion(literal: &str, index: usize) -> Suggestion {
    let mut s = Suggestion::new(literal, SuggestionKind::Value, literal, CursorIntent::None);
    s.sort = index.to_string();
    s
}
