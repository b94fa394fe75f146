//! Syntax highlighter for builder chains in the console.

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::engine::CompletionEngine;
use crate::parser::{Lexer, TokenKind};
use crate::state::METHOD_GRAPH;
use crate::suggest::is_helper;

/// Token-driven highlighter: method names, helpers, schema tables, and
/// literals each get their own style.
pub struct DslHighlighter {
    engine: Arc<CompletionEngine>,
    enabled: bool,
}

impl DslHighlighter {
    pub fn new(engine: Arc<CompletionEngine>, enabled: bool) -> Self {
        Self { engine, enabled }
    }

    fn identifier_style(&self, name: &str) -> Style {
        if name == "db" {
            return Style::new().bold().fg(Color::LightBlue);
        }
        if METHOD_GRAPH.find_method_anywhere(name).is_some() {
            return Style::new().fg(Color::Blue);
        }
        if is_helper(name) {
            return Style::new().fg(Color::Cyan);
        }
        if self.engine.schema().table(name).is_some() {
            return Style::new().fg(Color::Magenta);
        }
        Style::new()
    }
}

impl Highlighter for DslHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if !self.enabled {
            styled.push((Style::new(), line.to_string()));
            return styled;
        }

        for token in Lexer::tokenize_with_whitespace(line) {
            if token.kind == TokenKind::Eof {
                break;
            }

            // Style the raw source slice, not the token value: string
            // tokens drop their quotes in `value`.
            let raw: String = line
                .chars()
                .skip(token.start)
                .take(token.end - token.start)
                .collect();

            let style = match token.kind {
                TokenKind::Identifier => self.identifier_style(&token.value),
                TokenKind::String | TokenKind::TemplateStart | TokenKind::TemplateEnd => {
                    Style::new().fg(Color::Green)
                }
                TokenKind::Number => Style::new().fg(Color::Yellow),
                TokenKind::Operator => Style::new().fg(Color::LightGray),
                TokenKind::Unknown => Style::new().fg(Color::Red),
                _ => Style::new(),
            };

            styled.push((style, raw));
        }

        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::sample_schema;

    fn create_highlighter(enabled: bool) -> DslHighlighter {
        let engine = Arc::new(CompletionEngine::new(sample_schema()));
        DslHighlighter::new(engine, enabled)
    }

    #[test]
    fn test_highlight_preserves_text() {
        let highlighter = create_highlighter(true);
        let line = "db.select().from(users).where(eq(users.id, 1))";
        let styled = highlighter.highlight(line, 0);
        assert_eq!(styled.raw_string(), line);
    }

    #[test]
    fn test_highlight_preserves_string_quotes() {
        let highlighter = create_highlighter(true);
        let line = "eq(users.email, \"a@b.c\")";
        let styled = highlighter.highlight(line, 0);
        assert_eq!(styled.raw_string(), line);
    }

    #[test]
    fn test_disabled_highlighter_passthrough() {
        let highlighter = create_highlighter(false);
        let styled = highlighter.highlight("db.select()", 0);
        assert_eq!(styled.raw_string(), "db.select()");
    }

    #[test]
    fn test_identifier_styles_differ() {
        let highlighter = create_highlighter(true);
        let method = highlighter.identifier_style("select");
        let helper = highlighter.identifier_style("eq");
        let table = highlighter.identifier_style("users");
        let plain = highlighter.identifier_style("wibble");

        assert_ne!(method, plain);
        assert_ne!(helper, plain);
        assert_ne!(table, plain);
    }
}
