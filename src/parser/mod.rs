//! Lexing and parsing for the query-builder DSL.
//!
//! Both layers are error-tolerant by construction: the lexer turns
//! unrecognized characters into `Unknown` tokens and the parser turns
//! unfinished syntax into `Incomplete` nodes plus diagnostics. Completion
//! re-lexes and re-parses only the text before the cursor on every request.

pub mod ast;
pub mod lexer;
pub mod parse;

pub use ast::{AstNode, LiteralValue};
pub use lexer::{token_at_position, token_before_position, Lexer, Token, TokenKind};
pub use parse::{context_at_position, parse, parse_at_position, ParseContext, ParseDiagnostic, ParseResult};
