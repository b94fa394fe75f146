//! Completion engine for a fluent SQL query-builder DSL.
//!
//! Given source text typed against a chained builder API
//! (`db.select().from(users).where(eq(users.id, 1))`) and a cursor offset,
//! the engine computes the contextually valid completions, their insertion
//! text, and how the cursor should behave after insertion. It is a pure
//! function of `(text, cursor, schema)`: no query execution, no database
//! connection, no persistent state.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `cursor`: Cursor intents, placement, and snippet generation
//! - `engine`: Completion orchestration, hover, and signature help
//! - `error`: Error types for the shell around the engine
//! - `parser`: Error-tolerant lexer and recursive-descent parser
//! - `repl`: Interactive console (reedline adapter)
//! - `schema`: Schema model and type classification
//! - `state`: Method graph, state machine, and context resolution
//! - `suggest`: Suggestion generators, ranking, and deduplication
//!
//! # Example
//!
//! ```
//! use querysh::engine::complete;
//! use querysh::schema::Schema;
//!
//! let schema = Schema::demo();
//! let suggestions = complete("db.", 3, &schema);
//! assert!(suggestions.iter().any(|s| s.label == "select"));
//! ```

pub mod cli;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod parser;
pub mod repl;
pub mod schema;
pub mod state;
pub mod suggest;

// Re-export commonly used types
pub use config::Config;
pub use engine::{complete, hover, signature_help, CompletionEngine};
pub use error::{QueryshError, Result};
pub use schema::Schema;
pub use state::{ChainState, CompletionTrigger};
pub use suggest::{Suggestion, SuggestionKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
