//! The completion engine: one pure function from `(text, cursor, schema)`
//! to an ordered suggestion list.
//!
//! Every request reparses the text before the cursor, recomputes the chain
//! state, picks generators for the trigger, deduplicates, and ranks.
//! Identical inputs always produce identical output; nothing is cached or
//! mutated between calls.

pub mod hover;
pub mod signature;


pub use hover::{hover, HoverDoc};
pub use signature::{signature_help, ParameterInfo, SignatureInfo};

use tracing::debug;

use crate::schema::Schema;
use crate::state::{
    count_top_level_commas, detect_trigger, find_enclosing_call, first_argument_text,
    resolve_context, split_column_ref, ChainKind, CompletionContext, CompletionTrigger,
};
use crate::suggest::{
    deduplicate, is_helper, rank_suggestions, suggest_all_columns, suggest_columns,
    suggest_condition_helpers, suggest_db_methods, suggest_methods, suggest_sort_helpers,
    suggest_tables, suggest_values, Suggestion, SuggestionKind,
};

/// Compute the ordered completion list for `source` at `position`.
///
/// `position` is a character offset; offsets past the end of the text are
/// treated as end-of-text. This is the entry point editor adapters call on
/// every trigger character or identifier keystroke.
pub fn complete(source: &str, position: usize, schema: &Schema) -> Vec<Suggestion> {
    let ctx = resolve_context(source, position);
    let trigger = detect_trigger(source, position.min(source.chars().count()));

    debug!(
        ?trigger,
        kind = ?ctx.state.kind,
        prefix = %ctx.prefix,
        "completion request"
    );

    let suggestions = match trigger {
        CompletionTrigger::Dot => after_dot(&ctx),
        CompletionTrigger::OpenParen | CompletionTrigger::Comma => inside_call(&ctx, schema),
        CompletionTrigger::Identifier | CompletionTrigger::None => all_suggestions(&ctx, schema),
    };

    let suggestions = deduplicate(suggestions);
    rank_suggestions(suggestions, &ctx.prefix)
}

/// A reusable engine bound to one schema.
///
/// Thin convenience over [`complete`]; the schema is the only state and it
/// is never mutated.
pub struct CompletionEngine {
    schema: Schema,
}

impl CompletionEngine {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Complete at `position`, returning the character offset where the
    /// insertion should start (the beginning of the typed prefix) and the
    /// ordered suggestions.
    pub fn complete(&self, source: &str, position: usize) -> (usize, Vec<Suggestion>) {
        let position = position.min(source.chars().count());
        let ctx = resolve_context(source, position);
        let start = position.saturating_sub(ctx.prefix.chars().count());
        (start, complete(source, position, &self.schema))
    }

    /// Documentation for the word under the cursor, if any.
    pub fn hover(&self, word: &str) -> Option<HoverDoc> {
        hover(word, &self.schema)
    }

    /// Signature help for the call enclosing the cursor, if any.
    pub fn signature_help(&self, text_before: &str) -> Option<SignatureInfo> {
        signature_help(text_before, &self.schema)
    }
}

/// Suggestions after a `.` trigger: entry methods on `db`, chain methods
/// everywhere else.
fn after_dot(ctx: &CompletionContext) -> Vec<Suggestion> {
    if ctx.state.kind == ChainKind::Db {
        return suggest_db_methods();
    }
    suggest_methods(&ctx.state)
}

/// Suggestions inside an open call, dispatched on the enclosing method.
fn inside_call(ctx: &CompletionContext, schema: &Schema) -> Vec<Suggestion> {
    let text = &ctx.text_before;
    let Some(method) = find_enclosing_call(text) else {
        return Vec::new();
    };

    match method.as_str() {
        "from" | "insert" | "update" | "delete" => suggest_tables(schema, true),

        "where" | "having" => {
            let mut out = suggest_condition_helpers();
            out.extend(suggest_columns(schema, &ctx.state.tables));
            out
        }

        "orderBy" => {
            let mut out = suggest_sort_helpers();
            out.extend(suggest_columns(schema, &ctx.state.tables));
            out
        }

        "groupBy" | "select" => {
            if ctx.state.tables.is_empty() {
                suggest_all_columns(schema)
            } else {
                suggest_columns(schema, &ctx.state.tables)
            }
        }

        "values" => values_row_suggestions(ctx, schema),

        "leftJoin" | "rightJoin" | "innerJoin" | "fullJoin" => {
            if count_top_level_commas(text) == 0 {
                suggest_tables(schema, false)
            } else {
                let mut out = suggest_condition_helpers();
                out.extend(suggest_columns(schema, &ctx.state.tables));
                out
            }
        }

        name if is_helper(name) => helper_argument_suggestions(ctx, schema, name),

        _ => Vec::new(),
    }
}

/// Inside a helper call: columns for the first argument, typed values once
/// a resolvable `table.column` has been compared against.
fn helper_argument_suggestions(
    ctx: &CompletionContext,
    schema: &Schema,
    helper: &str,
) -> Vec<Suggestion> {
    if takes_value_argument(helper) && count_top_level_commas(&ctx.text_before) >= 1 {
        if let Some(first_arg) = first_argument_text(&ctx.text_before) {
            if let Some((table, column)) = split_column_ref(&first_arg) {
                if let Some(col) = schema.column(table, column) {
                    return suggest_values(col);
                }
            }
        }
    }

    suggest_columns(schema, &ctx.state.tables)
}

/// Helpers whose trailing arguments are literal values to compare against.
fn takes_value_argument(helper: &str) -> bool {
    matches!(
        helper,
        "eq" | "ne" | "gt" | "gte" | "lt" | "lte" | "like" | "ilike" | "inArray" | "notInArray"
    )
}

/// Row-object snippet for `values(`, built from the bound table.
fn values_row_suggestions(ctx: &CompletionContext, schema: &Schema) -> Vec<Suggestion> {
    let Some(table) = ctx.state.tables.first().and_then(|name| schema.table(name)) else {
        return Vec::new();
    };

    let mut row = Suggestion::new(
        format!("{{ {} row }}", table.name),
        SuggestionKind::Snippet,
        crate::cursor::values_row_snippet(table, false),
        crate::cursor::CursorIntent::StayInside,
    );
    row.detail = "row object".to_string();
    row.doc = format!("Insert a row into {}", table.name);
    row.sort = "0000".to_string();
    row.snippet = true;

    vec![row]
}

/// Suggestions without a trigger character: infer from the chain state.
fn all_suggestions(ctx: &CompletionContext, schema: &Schema) -> Vec<Suggestion> {
    // Strip the identifier being typed; what precedes it decides the
    // context ("db.sel" completes like "db.").
    let base_len = ctx.text_before.chars().count() - ctx.prefix.chars().count();
    let base: String = ctx.text_before.chars().take(base_len).collect();

    if base.ends_with("db.") {
        return suggest_db_methods();
    }

    if ctx.state.in_arg {
        return inside_call(ctx, schema);
    }

    if ctx.state.kind != ChainKind::Db && ctx.state.kind != ChainKind::Terminal {
        return suggest_methods(&ctx.state);
    }

    Vec::new()
}
