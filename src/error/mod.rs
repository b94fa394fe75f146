//! Error handling for querysh.
//!
//! Completion is soft-failing by design: the engine reports problems through
//! `unknown` tokens, incomplete AST nodes, and no-op state transitions, never
//! through this module. The types here cover the shell around the engine:
//! configuration, schema files, and the interactive console.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, QueryshError, Result, SchemaError};
