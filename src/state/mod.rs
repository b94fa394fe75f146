//! Chain-state model: the method graph, the state machine that replays a
//! parsed chain against it, and completion-context resolution.

pub mod graph;
pub mod machine;
pub mod resolve;

pub use graph::{ArgKind, ChainKind, MethodDef, MethodGraph, METHOD_GRAPH};
pub use machine::{process_ast, transition, MachineState, StateTransition, TransitionResult};
pub use resolve::{
    columns_for_tables, count_top_level_commas, detect_trigger, find_enclosing_call,
    first_argument_text, resolve_context, split_column_ref, unmatched_open_parens, ChainState,
    CompletionContext, CompletionTrigger,
};
