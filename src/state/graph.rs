//! The method graph: the static table of valid builder transitions.
//!
//! For every chain stage this records which methods may be called, what
//! their arguments expect, and which stage the builder moves to. The graph
//! is built once by a pure factory and shared read-only; nothing mutates it
//! after construction.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// The builder's logical stage within a method chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    /// The root `db` object.
    Db,
    /// After `select(...)`, before `from`.
    Select,
    /// After `from(...)`.
    SelectFrom,
    /// After `insert(...)`, before `values`.
    Insert,
    /// After `values(...)`.
    InsertValues,
    /// After `update(...)`, before `set`.
    Update,
    /// After `set(...)`.
    UpdateSet,
    /// After `delete(...)`, before `where`.
    Delete,
    /// After `delete(...).where(...)`.
    DeleteWhere,
    /// A refinable select query (after `where`, `orderBy`, ...).
    Query,
    /// After `returning()`.
    Returning,
    /// After a terminal method such as `execute()`.
    Terminal,
    /// No meaningful chain value.
    Void,
}

/// What a method argument position expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Table,
    Column,
    Columns,
    Expression,
    Condition,
    Value,
    Values,
    Number,
    Sql,
    None,
}

impl ArgKind {
    /// Lowercase label used in signature details.
    pub fn label(&self) -> &'static str {
        match self {
            ArgKind::Table => "table",
            ArgKind::Column => "column",
            ArgKind::Columns => "columns",
            ArgKind::Expression => "expression",
            ArgKind::Condition => "condition",
            ArgKind::Value => "value",
            ArgKind::Values => "values",
            ArgKind::Number => "number",
            ArgKind::Sql => "sql",
            ArgKind::None => "none",
        }
    }
}

/// One edge of the state-transition graph.
#[derive(Debug, Clone)]
pub struct MethodDef {
    /// Method name as typed in the DSL.
    pub name: &'static str,
    /// Expected argument kinds, in order. `[ArgKind::None]` means no
    /// required arguments.
    pub args: &'static [ArgKind],
    /// Stage the chain moves to after this call.
    pub returns: ChainKind,
    /// One-line documentation.
    pub doc: &'static str,
    /// Whether this method ends the chain.
    pub terminal: bool,
}

impl MethodDef {
    /// Whether the method takes at least one real argument.
    pub fn has_args(&self) -> bool {
        !self.args.is_empty() && self.args[0] != ArgKind::None
    }

    /// The first argument kind, or `ArgKind::None`.
    pub fn first_arg(&self) -> ArgKind {
        self.args.first().copied().unwrap_or(ArgKind::None)
    }

    /// Parenthesized signature text, e.g. `(table, condition)`.
    pub fn detail(&self) -> String {
        if !self.has_args() {
            return "()".to_string();
        }
        let labels: Vec<&str> = self.args.iter().map(|a| a.label()).collect();
        format!("({})", labels.join(", "))
    }
}

const fn method(
    name: &'static str,
    args: &'static [ArgKind],
    returns: ChainKind,
    doc: &'static str,
) -> MethodDef {
    MethodDef {
        name,
        args,
        returns,
        doc,
        terminal: false,
    }
}

const fn terminal_method(
    name: &'static str,
    args: &'static [ArgKind],
    doc: &'static str,
) -> MethodDef {
    MethodDef {
        name,
        args,
        returns: ChainKind::Terminal,
        doc,
        terminal: true,
    }
}

/// The immutable transition table, keyed by chain stage.
#[derive(Debug)]
pub struct MethodGraph {
    nodes: HashMap<ChainKind, Vec<MethodDef>>,
}

impl MethodGraph {
    /// Build the graph. Pure; called once through [`METHOD_GRAPH`].
    pub fn new() -> Self {
        use ArgKind::*;
        use ChainKind::*;

        let mut nodes = HashMap::new();

        nodes.insert(
            Db,
            vec![
                method("select", &[None], Select, "Start a SELECT query"),
                method("select", &[Columns], Select, "Start a SELECT query with specific columns"),
                method("insert", &[Table], Insert, "Start an INSERT query"),
                method("update", &[Table], Update, "Start an UPDATE query"),
                method("delete", &[Table], Delete, "Start a DELETE query"),
                terminal_method("execute", &[Sql], "Execute raw SQL"),
            ],
        );

        nodes.insert(
            Select,
            vec![method("from", &[Table], SelectFrom, "Specify the table to select from")],
        );

        nodes.insert(
            SelectFrom,
            vec![
                method("where", &[Condition], Query, "Filter results with a condition"),
                method("orderBy", &[Columns], Query, "Order results by columns"),
                method("groupBy", &[Columns], Query, "Group results by columns"),
                method("having", &[Condition], Query, "Filter groups with a condition"),
                method("limit", &[Number], Query, "Limit the number of results"),
                method("offset", &[Number], Query, "Offset the results"),
                method("leftJoin", &[Table, Condition], SelectFrom, "Left join another table"),
                method("rightJoin", &[Table, Condition], SelectFrom, "Right join another table"),
                method("innerJoin", &[Table, Condition], SelectFrom, "Inner join another table"),
                method("fullJoin", &[Table, Condition], SelectFrom, "Full outer join another table"),
                terminal_method("execute", &[None], "Execute the query"),
            ],
        );

        nodes.insert(
            Query,
            vec![
                method("where", &[Condition], Query, "Filter results with a condition"),
                method("orderBy", &[Columns], Query, "Order results by columns"),
                method("groupBy", &[Columns], Query, "Group results by columns"),
                method("having", &[Condition], Query, "Filter groups with a condition"),
                method("limit", &[Number], Query, "Limit the number of results"),
                method("offset", &[Number], Query, "Offset the results"),
                terminal_method("execute", &[None], "Execute the query"),
            ],
        );

        nodes.insert(
            Insert,
            vec![method("values", &[Values], InsertValues, "Provide values to insert")],
        );

        nodes.insert(
            InsertValues,
            vec![
                method("returning", &[None], Returning, "Return inserted rows"),
                method("onConflictDoNothing", &[None], InsertValues, "Ignore conflicts"),
                method("onConflictDoUpdate", &[Value], InsertValues, "Update on conflict"),
                terminal_method("execute", &[None], "Execute the insert"),
            ],
        );

        nodes.insert(
            Update,
            vec![method("set", &[Values], UpdateSet, "Set values to update")],
        );

        nodes.insert(
            UpdateSet,
            vec![
                method("where", &[Condition], UpdateSet, "Filter rows to update"),
                method("returning", &[None], Returning, "Return updated rows"),
                terminal_method("execute", &[None], "Execute the update"),
            ],
        );

        nodes.insert(
            Delete,
            vec![method("where", &[Condition], DeleteWhere, "Filter rows to delete")],
        );

        nodes.insert(
            DeleteWhere,
            vec![
                method("returning", &[None], Returning, "Return deleted rows"),
                terminal_method("execute", &[None], "Execute the delete"),
            ],
        );

        nodes.insert(Returning, vec![terminal_method("execute", &[None], "Execute the query")]);

        nodes.insert(Terminal, vec![]);
        nodes.insert(Void, vec![]);

        Self { nodes }
    }

    /// All method definitions valid at `kind`, including overloads.
    pub fn methods_for(&self, kind: ChainKind) -> &[MethodDef] {
        self.nodes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Methods valid at `kind`, deduplicated by name (first overload wins).
    pub fn unique_methods_for(&self, kind: ChainKind) -> Vec<&MethodDef> {
        let mut seen = Vec::new();
        let mut unique = Vec::new();

        for def in self.methods_for(kind) {
            if !seen.contains(&def.name) {
                seen.push(def.name);
                unique.push(def);
            }
        }

        unique
    }

    /// Look up a method by name at `kind`.
    pub fn find_method(&self, kind: ChainKind, name: &str) -> Option<&MethodDef> {
        self.methods_for(kind).iter().find(|m| m.name == name)
    }

    /// Look up a method by name at any stage, searching stages in chain
    /// order. Used by hover and signature help, where the chain context of
    /// the word is unknown.
    pub fn find_method_anywhere(&self, name: &str) -> Option<&MethodDef> {
        const STAGE_ORDER: [ChainKind; 13] = [
            ChainKind::Db,
            ChainKind::Select,
            ChainKind::SelectFrom,
            ChainKind::Query,
            ChainKind::Insert,
            ChainKind::InsertValues,
            ChainKind::Update,
            ChainKind::UpdateSet,
            ChainKind::Delete,
            ChainKind::DeleteWhere,
            ChainKind::Returning,
            ChainKind::Terminal,
            ChainKind::Void,
        ];

        STAGE_ORDER
            .iter()
            .find_map(|kind| self.find_method(*kind, name))
    }

    /// Stage after calling `name` at `kind`; unchanged when `name` is not
    /// valid there.
    pub fn next_state(&self, kind: ChainKind, name: &str) -> ChainKind {
        self.find_method(kind, name).map(|m| m.returns).unwrap_or(kind)
    }

    /// Whether `name` ends the chain at `kind`.
    pub fn is_terminal_method(&self, kind: ChainKind, name: &str) -> bool {
        self.find_method(kind, name).map(|m| m.terminal).unwrap_or(false)
    }
}

impl Default for MethodGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared read-only graph instance.
pub static METHOD_GRAPH: Lazy<MethodGraph> = Lazy::new(MethodGraph::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_methods() {
        let names: Vec<&str> = METHOD_GRAPH
            .unique_methods_for(ChainKind::Db)
            .iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["select", "insert", "update", "delete", "execute"]);
    }

    #[test]
    fn test_select_overloads_deduplicated() {
        let all = METHOD_GRAPH.methods_for(ChainKind::Db);
        let selects = all.iter().filter(|m| m.name == "select").count();
        assert_eq!(selects, 2);

        let unique = METHOD_GRAPH.unique_methods_for(ChainKind::Db);
        let selects = unique.iter().filter(|m| m.name == "select").count();
        assert_eq!(selects, 1);
    }

    #[test]
    fn test_next_state_transitions() {
        assert_eq!(METHOD_GRAPH.next_state(ChainKind::Db, "select"), ChainKind::Select);
        assert_eq!(METHOD_GRAPH.next_state(ChainKind::Select, "from"), ChainKind::SelectFrom);
        assert_eq!(METHOD_GRAPH.next_state(ChainKind::SelectFrom, "where"), ChainKind::Query);
        assert_eq!(METHOD_GRAPH.next_state(ChainKind::Insert, "values"), ChainKind::InsertValues);
        assert_eq!(METHOD_GRAPH.next_state(ChainKind::Update, "set"), ChainKind::UpdateSet);
        assert_eq!(METHOD_GRAPH.next_state(ChainKind::Delete, "where"), ChainKind::DeleteWhere);
    }

    #[test]
    fn test_next_state_unknown_method_is_noop() {
        assert_eq!(METHOD_GRAPH.next_state(ChainKind::Db, "bogus"), ChainKind::Db);
        assert_eq!(METHOD_GRAPH.next_state(ChainKind::Select, "where"), ChainKind::Select);
    }

    #[test]
    fn test_joins_keep_select_from_stage() {
        for join in ["leftJoin", "rightJoin", "innerJoin", "fullJoin"] {
            assert_eq!(
                METHOD_GRAPH.next_state(ChainKind::SelectFrom, join),
                ChainKind::SelectFrom,
                "{join}"
            );
        }
    }

    #[test]
    fn test_terminal_methods() {
        assert!(METHOD_GRAPH.is_terminal_method(ChainKind::Db, "execute"));
        assert!(METHOD_GRAPH.is_terminal_method(ChainKind::Query, "execute"));
        assert!(!METHOD_GRAPH.is_terminal_method(ChainKind::SelectFrom, "where"));
        assert!(!METHOD_GRAPH.is_terminal_method(ChainKind::Db, "bogus"));
    }

    #[test]
    fn test_terminal_and_void_have_no_methods() {
        assert!(METHOD_GRAPH.methods_for(ChainKind::Terminal).is_empty());
        assert!(METHOD_GRAPH.methods_for(ChainKind::Void).is_empty());
    }

    #[test]
    fn test_every_reachable_stage_has_an_entry() {
        for kind in [
            ChainKind::Db,
            ChainKind::Select,
            ChainKind::SelectFrom,
            ChainKind::Insert,
            ChainKind::InsertValues,
            ChainKind::Update,
            ChainKind::UpdateSet,
            ChainKind::Delete,
            ChainKind::DeleteWhere,
            ChainKind::Query,
            ChainKind::Returning,
            ChainKind::Terminal,
            ChainKind::Void,
        ] {
            assert!(METHOD_GRAPH.nodes.contains_key(&kind), "{kind:?}");
        }
    }

    #[test]
    fn test_method_detail() {
        let from = METHOD_GRAPH.find_method(ChainKind::Select, "from").unwrap();
        assert_eq!(from.detail(), "(table)");

        let join = METHOD_GRAPH.find_method(ChainKind::SelectFrom, "leftJoin").unwrap();
        assert_eq!(join.detail(), "(table, condition)");

        let execute = METHOD_GRAPH.find_method(ChainKind::Query, "execute").unwrap();
        assert_eq!(execute.detail(), "()");
    }

    #[test]
    fn test_find_method_anywhere() {
        assert!(METHOD_GRAPH.find_method_anywhere("orderBy").is_some());
        assert!(METHOD_GRAPH.find_method_anywhere("onConflictDoNothing").is_some());
        assert!(METHOD_GRAPH.find_method_anywhere("bogus").is_none());
    }
}
