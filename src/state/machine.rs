//! Chain-state recovery: symbolic execution of a builder expression.
//!
//! [`process_ast`] walks a parsed chain and replays each call against the
//! method graph to recover "what stage is the builder in, and what has it
//! bound so far". The state is recomputed fresh from the AST on every
//! completion request; nothing persists between keystrokes.
//!
//! Methods that are not valid for the current stage are no-op transitions,
//! not errors: a partially-typed chain is the normal case while editing.

use crate::parser::AstNode;

use super::graph::{ArgKind, ChainKind, METHOD_GRAPH};

/// One applied transition, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTransition {
    pub from: ChainKind,
    pub method: String,
    pub to: ChainKind,
}

/// The state threaded through a chain walk.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    /// Current chain stage.
    pub kind: ChainKind,
    /// Tables bound by table-kind arguments, in insertion order.
    pub tables: Vec<String>,
    /// Columns bound by column-kind arguments, in insertion order.
    pub columns: Vec<String>,
    /// Call nesting depth at the position of interest.
    pub depth: usize,
    /// Whether the walk is currently inside an argument list.
    pub in_arg: bool,
    /// Index of the argument position being filled.
    pub arg_index: usize,
    /// What the current argument position expects.
    pub arg_kind: ArgKind,
    /// Name of the most recently applied method.
    pub method: Option<String>,
    /// Applied transitions, oldest first.
    pub history: Vec<StateTransition>,
}

impl MachineState {
    /// The initial state: at the root `db` object, nothing bound.
    pub fn initial() -> Self {
        Self {
            kind: ChainKind::Db,
            tables: Vec::new(),
            columns: Vec::new(),
            depth: 0,
            in_arg: false,
            arg_index: 0,
            arg_kind: ArgKind::None,
            method: None,
            history: Vec::new(),
        }
    }

    /// Bind a table name, deduplicated, insertion order preserved.
    pub fn add_table(&mut self, name: &str) {
        if !self.tables.iter().any(|t| t.as_str() == name) {
            self.tables.push(name.to_string());
        }
    }

    /// Bind a column name, deduplicated, insertion order preserved.
    pub fn add_column(&mut self, name: &str) {
        if !self.columns.iter().any(|c| c.as_str() == name) {
            self.columns.push(name.to_string());
        }
    }

    /// Re-enter argument position `index` of the current method.
    pub fn enter_argument(&mut self, index: usize) {
        let Some(method) = &self.method else {
            return;
        };
        // The method has already transitioned us to its return stage, so
        // its definition is looked up via history.
        let from = self
            .history
            .last()
            .map(|t| t.from)
            .unwrap_or(self.kind);
        if let Some(def) = METHOD_GRAPH.find_method(from, method) {
            if index < def.args.len() {
                self.in_arg = true;
                self.arg_index = index;
                self.arg_kind = def.args[index];
            }
        }
    }

    /// Leave the current argument list.
    pub fn exit_argument(&mut self) {
        self.in_arg = false;
        self.arg_kind = ArgKind::None;
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Result of applying a method to a state.
#[derive(Debug, Clone)]
pub struct TransitionResult {
    pub state: MachineState,
    pub valid: bool,
}

/// Apply `method_name` to `state`.
///
/// Unknown or stage-invalid methods return the state unchanged with
/// `valid = false`.
pub fn transition(state: &MachineState, method_name: &str) -> TransitionResult {
    let Some(def) = METHOD_GRAPH.find_method(state.kind, method_name) else {
        return TransitionResult {
            state: state.clone(),
            valid: false,
        };
    };

    let mut next = state.clone();
    next.history.push(StateTransition {
        from: state.kind,
        method: method_name.to_string(),
        to: def.returns,
    });
    next.kind = def.returns;
    next.method = Some(method_name.to_string());

    if def.has_args() {
        next.in_arg = true;
        next.arg_index = 0;
        next.arg_kind = def.first_arg();
    } else {
        next.in_arg = false;
        next.arg_kind = ArgKind::None;
    }

    TransitionResult { state: next, valid: true }
}

/// Whether `method_name` is a valid transition from `state`.
pub fn is_valid_transition(state: &MachineState, method_name: &str) -> bool {
    METHOD_GRAPH.find_method(state.kind, method_name).is_some()
}

/// Recover the chain state from a parsed expression.
pub fn process_ast(ast: Option<&AstNode>) -> MachineState {
    let mut state = MachineState::initial();
    if let Some(node) = ast {
        process_node(node, &mut state);
    }
    state
}

fn process_node(node: &AstNode, state: &mut MachineState) {
    match node {
        AstNode::Identifier { name, .. } if name == "db" => {
            state.kind = ChainKind::Db;
        }

        AstNode::Call { callee, arguments, .. } => {
            let method_name = match callee.as_ref() {
                AstNode::Identifier { name, .. } => Some(name.clone()),
                AstNode::Member { object, property, .. } => {
                    process_node(object, state);
                    property.identifier_name().map(str::to_string)
                }
                _ => None,
            };

            let Some(name) = method_name else {
                return;
            };

            let result = transition(state, &name);
            if result.valid {
                *state = result.state;
            }

            // Bind bare identifier arguments into the state when the
            // method expects tables or columns.
            for arg in arguments {
                let inner = match arg {
                    AstNode::Argument { inner, .. } => inner.as_ref(),
                    other => other,
                };
                if let AstNode::Identifier { name, .. } = inner {
                    match state.arg_kind {
                        ArgKind::Table => state.add_table(name),
                        ArgKind::Column | ArgKind::Columns => state.add_column(name),
                        _ => {}
                    }
                }
            }

            state.exit_argument();
        }

        AstNode::Member { object, .. } => {
            process_node(object, state);
        }

        AstNode::Chain { nodes, .. } => {
            for node in nodes {
                process_node(node, state);
            }
        }

        _ => {}
    }
}
