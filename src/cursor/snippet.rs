//! Snippet generation with numbered placeholders.
//!
//! Snippets use the `${n:placeholder}` / `$0` convention understood by the
//! usual editor completion protocols. A suggestion carrying one sets its
//! `snippet` flag so the adapter enables placeholder expansion.

use crate::schema::SchemaTable;
use crate::state::graph::{ArgKind, MethodDef};

/// Placeholder text for an argument position.
fn placeholder(arg: ArgKind, index: usize) -> String {
    match arg {
        ArgKind::Table => "table".to_string(),
        ArgKind::Column => "column".to_string(),
        ArgKind::Columns => "columns".to_string(),
        ArgKind::Condition => "condition".to_string(),
        ArgKind::Expression => "expr".to_string(),
        ArgKind::Value => "value".to_string(),
        ArgKind::Values => "values".to_string(),
        ArgKind::Number => "n".to_string(),
        ArgKind::Sql => "sql".to_string(),
        ArgKind::None => format!("arg{}", index + 1),
    }
}

/// Full call snippet for a method: `name(${1:table}, ${2:condition})$0`.
pub fn method_snippet(def: &MethodDef) -> String {
    if !def.has_args() {
        return format!("{}()", def.name);
    }

    let args: Vec<String> = def
        .args
        .iter()
        .enumerate()
        .map(|(i, arg)| format!("${{{}:{}}}", i + 1, placeholder(*arg, i)))
        .collect();

    format!("{}({})$0", def.name, args.join(", "))
}

/// Minimal call snippet: `name($1)$0`.
pub fn simple_snippet(method_name: &str) -> String {
    format!("{method_name}($1)$0")
}

/// Call snippet with explicit placeholder names.
pub fn call_snippet(method_name: &str, placeholders: &[&str]) -> String {
    if placeholders.is_empty() {
        return format!("{method_name}()$0");
    }

    let args: Vec<String> = placeholders
        .iter()
        .enumerate()
        .map(|(i, p)| format!("${{{}:{}}}", i + 1, p))
        .collect();

    format!("{}({})$0", method_name, args.join(", "))
}

/// Row-object snippet for `values(`: one `column: placeholder` pair per
/// column, the first value as the active tab stop. Primary-key columns are
/// skipped unless requested, since they are usually generated.
pub fn values_row_snippet(table: &SchemaTable, include_primary: bool) -> String {
    let items: Vec<String> = table
        .columns
        .iter()
        .filter(|c| include_primary || !c.primary_key)
        .enumerate()
        .map(|(i, col)| {
            let value = col.type_kind().placeholder();
            if i == 0 {
                format!("{}: ${{1:{}}}", col.name, value)
            } else {
                format!("{}: {}", col.name, value)
            }
        })
        .collect();

    format!("{{ {} }}", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::sample_schema;
    use crate::state::{ChainKind, METHOD_GRAPH};

    #[test]
    fn test_method_snippet_no_args() {
        let execute = METHOD_GRAPH.find_method(ChainKind::Query, "execute").unwrap();
        assert_eq!(method_snippet(execute), "execute()");
    }

    #[test]
    fn test_method_snippet_single_arg() {
        let from = METHOD_GRAPH.find_method(ChainKind::Select, "from").unwrap();
        assert_eq!(method_snippet(from), "from(${1:table})$0");
    }

    #[test]
    fn test_method_snippet_two_args() {
        let join = METHOD_GRAPH.find_method(ChainKind::SelectFrom, "leftJoin").unwrap();
        assert_eq!(method_snippet(join), "leftJoin(${1:table}, ${2:condition})$0");
    }

    #[test]
    fn test_simple_snippet() {
        assert_eq!(simple_snippet("eq"), "eq($1)$0");
    }

    #[test]
    fn test_call_snippet() {
        assert_eq!(call_snippet("execute", &[]), "execute()$0");
        assert_eq!(
            call_snippet("between", &["column", "min", "max"]),
            "between(${1:column}, ${2:min}, ${3:max})$0"
        );
    }

    #[test]
    fn test_values_row_snippet_skips_primary_key() {
        let schema = sample_schema();
        let users = schema.table("users").unwrap();

        let snippet = values_row_snippet(users, false);
        assert_eq!(snippet, "{ email: ${1:\"\"}, active: false }");

        let snippet = values_row_snippet(users, true);
        assert!(snippet.starts_with("{ id: ${1:0}"));
    }
}
