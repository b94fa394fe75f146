//! Completion-context resolution.
//!
//! Bridges the parser and state machine to the suggestion layer: given the
//! full text and a cursor offset, produce the [`ChainState`] at the cursor
//! plus the textual facts the generators need (prefix being typed, trigger
//! character, enclosing call, active argument index).

use crate::parser::{context_at_position, TokenKind};
use crate::schema::Schema;

use super::graph::{ArgKind, ChainKind};
use super::machine::process_ast;

/// The builder's state at the completion position.
///
/// Derived, not authoritative: recomputed fresh from the AST on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainState {
    pub kind: ChainKind,
    pub tables: Vec<String>,
    pub columns: Vec<String>,
    /// Unmatched open parentheses before the cursor.
    pub depth: usize,
    pub in_arg: bool,
    pub arg_index: usize,
    pub arg_kind: ArgKind,
    pub method: Option<String>,
    pub incomplete: bool,
}

/// Everything the suggestion layer needs about one completion request.
#[derive(Debug, Clone)]
pub struct CompletionContext {
    pub state: ChainState,
    pub position: usize,
    pub line: usize,
    pub column: usize,
    /// Identifier fragment being typed at the cursor, if any.
    pub prefix: String,
    pub text_before: String,
    pub text_after: String,
}

/// The input event that caused a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTrigger {
    Dot,
    OpenParen,
    Comma,
    Identifier,
    None,
}

/// Classify the character immediately before the cursor.
pub fn detect_trigger(source: &str, position: usize) -> CompletionTrigger {
    if position == 0 {
        return CompletionTrigger::None;
    }

    let chars: Vec<char> = source.chars().collect();
    let Some(&ch) = chars.get(position - 1) else {
        return CompletionTrigger::None;
    };

    match ch {
        '.' => CompletionTrigger::Dot,
        '(' => CompletionTrigger::OpenParen,
        ',' => CompletionTrigger::Comma,
        c if c.is_ascii_alphabetic() || c == '_' || c == '$' => CompletionTrigger::Identifier,
        _ => CompletionTrigger::None,
    }
}

/// Resolve the full completion context at `position`.
pub fn resolve_context(source: &str, position: usize) -> CompletionContext {
    let ctx = context_at_position(source, position);
    let machine = process_ast(ctx.result.ast.as_ref());

    let text_before: String = source.chars().take(position).collect();
    let text_after: String = source.chars().skip(position).collect();

    // The typed prefix is the last identifier only when it touches the
    // cursor; an identifier followed by whitespace is not being typed.
    let cursor_in_prefix = text_before.chars().count();
    let prefix = match &ctx.last_token {
        Some(t) if t.kind == TokenKind::Identifier && t.end == cursor_in_prefix => t.value.clone(),
        _ => String::new(),
    };

    let line = text_before.matches('\n').count() + 1;
    let column = text_before
        .rsplit('\n')
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0)
        + 1;

    let depth = unmatched_open_parens(&text_before);
    let in_arg = ctx.in_call || depth > 0;

    let mut arg_index = 0;
    let mut arg_kind = ArgKind::None;

    if in_arg {
        arg_index = count_top_level_commas(&text_before);
        if let Some(method) = &machine.method {
            // The machine has already moved to the method's return stage;
            // its definition lives at the stage it was called from.
            let from = machine.history.last().map(|t| t.from).unwrap_or(machine.kind);
            let def = crate::state::METHOD_GRAPH
                .find_method(from, method)
                .or_else(|| crate::state::METHOD_GRAPH.find_method_anywhere(method));
            if let Some(def) = def {
                if def.has_args() {
                    let idx = arg_index.min(def.args.len() - 1);
                    arg_kind = def.args[idx];
                }
            }
        }
    }

    CompletionContext {
        state: ChainState {
            kind: machine.kind,
            tables: machine.tables,
            columns: machine.columns,
            depth,
            in_arg,
            arg_index,
            arg_kind,
            method: machine.method,
            incomplete: ctx.result.incomplete,
        },
        position,
        line,
        column,
        prefix,
        text_before,
        text_after,
    }
}

/// Name of the call the cursor is inside, found by scanning backwards past
/// balanced parentheses to the nearest unmatched `(` and reading the
/// identifier before it.
pub fn find_enclosing_call(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut depth = 0usize;
    let mut open_at = None;

    for i in (0..chars.len()).rev() {
        match chars[i] {
            ')' => depth += 1,
            '(' => {
                if depth == 0 {
                    open_at = Some(i);
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    let open_at = open_at?;
    let mut start = open_at;
    for i in (0..open_at).rev() {
        let ch = chars[i];
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
            start = i;
        } else {
            break;
        }
    }

    if start < open_at {
        Some(chars[start..open_at].iter().collect())
    } else {
        None
    }
}

/// Count commas between the nearest unmatched `(` and the end of `text`,
/// ignoring commas nested in deeper parentheses.
pub fn count_top_level_commas(text: &str) -> usize {
    let mut depth = 0usize;
    let mut count = 0usize;

    for ch in text.chars().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            ',' if depth == 0 => count += 1,
            _ => {}
        }
    }

    count
}

/// Number of `(` before the cursor that have no matching `)`.
///
/// Stray closers are tolerated; the count never goes negative.
pub fn unmatched_open_parens(text: &str) -> usize {
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

/// First top-level argument text of the call the cursor is inside.
pub fn first_argument_text(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut depth = 0usize;
    let mut open_at = None;

    for i in (0..chars.len()).rev() {
        match chars[i] {
            ')' => depth += 1,
            '(' => {
                if depth == 0 {
                    open_at = Some(i);
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    let open_at = open_at?;
    let mut arg = String::new();
    let mut inner_depth = 0usize;

    for &ch in &chars[open_at + 1..] {
        match ch {
            '(' => {
                inner_depth += 1;
                arg.push(ch);
            }
            ')' => {
                if inner_depth == 0 {
                    break;
                }
                inner_depth -= 1;
                arg.push(ch);
            }
            ',' if inner_depth == 0 => break,
            _ => arg.push(ch),
        }
    }

    let trimmed = arg.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split a `table.column` reference into its parts.
pub fn split_column_ref(text: &str) -> Option<(&str, &str)> {
    let (table, column) = text.split_once('.')?;
    let is_ident = |s: &str| {
        !s.is_empty()
            && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    };
    if is_ident(table) && is_ident(column) {
        Some((table, column))
    } else {
        None
    }
}

/// All `table.column` labels for the given tables, deduplicated, in table
/// then declaration order.
pub fn columns_for_tables(schema: &Schema, table_names: &[String]) -> Vec<String> {
    let mut columns = Vec::new();

    for name in table_names {
        if let Some(table) = schema.table(name) {
            for col in &table.columns {
                let label = format!("{}.{}", table.name, col.name);
                if !columns.contains(&label) {
                    columns.push(label);
                }
            }
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::sample_schema;

    #[test]
    fn test_detect_trigger() {
        assert_eq!(detect_trigger("db.", 3), CompletionTrigger::Dot);
        assert_eq!(detect_trigger("from(", 5), CompletionTrigger::OpenParen);
        assert_eq!(detect_trigger("eq(a,", 5), CompletionTrigger::Comma);
        assert_eq!(detect_trigger("sel", 3), CompletionTrigger::Identifier);
        assert_eq!(detect_trigger("a ", 2), CompletionTrigger::None);
        assert_eq!(detect_trigger("", 0), CompletionTrigger::None);
    }

    #[test]
    fn test_resolve_context_after_dot() {
        let ctx = resolve_context("db.", 3);
        assert_eq!(ctx.state.kind, ChainKind::Db);
        assert!(ctx.prefix.is_empty());
        assert!(!ctx.state.in_arg);
    }

    #[test]
    fn test_resolve_context_prefix() {
        let ctx = resolve_context("db.sel", 6);
        assert_eq!(ctx.prefix, "sel");

        // Cursor in the middle of an identifier: only the typed part counts.
        let ctx = resolve_context("db.select", 6);
        assert_eq!(ctx.prefix, "sel");

        // An identifier separated from the cursor by whitespace is not a
        // prefix.
        let ctx = resolve_context("db.sel ", 7);
        assert_eq!(ctx.prefix, "");
    }

    #[test]
    fn test_resolve_context_inside_call() {
        let ctx = resolve_context("db.select().from(", 17);
        assert_eq!(ctx.state.kind, ChainKind::SelectFrom);
        assert!(ctx.state.in_arg);
        assert_eq!(ctx.state.arg_index, 0);
        assert_eq!(ctx.state.arg_kind, ArgKind::Table);
        assert_eq!(ctx.state.method.as_deref(), Some("from"));
    }

    #[test]
    fn test_resolve_context_second_argument() {
        let text = "db.select().from(users).leftJoin(posts, ";
        let ctx = resolve_context(text, text.chars().count());
        assert!(ctx.state.in_arg);
        assert_eq!(ctx.state.arg_index, 1);
        assert_eq!(ctx.state.arg_kind, ArgKind::Condition);
    }

    #[test]
    fn test_resolve_context_line_column() {
        let ctx = resolve_context("db.\nselect", 10);
        assert_eq!(ctx.line, 2);
        assert_eq!(ctx.column, 7);
    }

    #[test]
    fn test_find_enclosing_call() {
        assert_eq!(find_enclosing_call("db.select().from(").as_deref(), Some("from"));
        assert_eq!(find_enclosing_call("where(eq(users.id, ").as_deref(), Some("eq"));
        assert_eq!(find_enclosing_call("where(eq(users.id, 1), ").as_deref(), Some("where"));
        assert_eq!(find_enclosing_call("db.select()"), None);
        assert_eq!(find_enclosing_call(""), None);
    }

    #[test]
    fn test_count_top_level_commas() {
        assert_eq!(count_top_level_commas("leftJoin(posts"), 0);
        assert_eq!(count_top_level_commas("leftJoin(posts, "), 1);
        assert_eq!(count_top_level_commas("where(eq(a, b), gt(c, d), "), 2);
        assert_eq!(count_top_level_commas("no parens, here"), 0);
    }

    #[test]
    fn test_unmatched_open_parens() {
        assert_eq!(unmatched_open_parens("db.select()"), 0);
        assert_eq!(unmatched_open_parens("from("), 1);
        assert_eq!(unmatched_open_parens("where(eq("), 2);
        assert_eq!(unmatched_open_parens("where(eq(a, b), gt("), 2);
    }

    #[test]
    fn test_first_argument_text() {
        assert_eq!(
            first_argument_text("eq(users.id, ").as_deref(),
            Some("users.id")
        );
        assert_eq!(
            first_argument_text("between(users.id, 1, ").as_deref(),
            Some("users.id")
        );
        assert_eq!(first_argument_text("eq(").as_deref(), None);
        assert_eq!(
            first_argument_text("where(eq(users.id, 1), ").as_deref(),
            Some("eq(users.id, 1)")
        );
    }

    #[test]
    fn test_split_column_ref() {
        assert_eq!(split_column_ref("users.id"), Some(("users", "id")));
        assert_eq!(split_column_ref("users"), None);
        assert_eq!(split_column_ref("users."), None);
        assert_eq!(split_column_ref("1.5"), None);
    }

    #[test]
    fn test_columns_for_tables() {
        let schema = sample_schema();
        let cols = columns_for_tables(&schema, &["users".to_string()]);
        assert_eq!(cols, vec!["users.id", "users.email", "users.active"]);

        let cols = columns_for_tables(&schema, &["users".to_string(), "missing".to_string()]);
        assert_eq!(cols.len(), 3);
    }
}
