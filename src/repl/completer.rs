//! Completer for reedline - bridges the completion engine to the console.

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use crate::config::SuggestionConfig;
use crate::cursor::CursorIntent;
use crate::engine::CompletionEngine;

/// Reedline completer backed by the query-builder completion engine.
pub struct BuilderCompleter {
    engine: Arc<CompletionEngine>,
    config: SuggestionConfig,
}

impl BuilderCompleter {
    pub fn new(engine: Arc<CompletionEngine>, config: SuggestionConfig) -> Self {
        Self { engine, config }
    }
}

/// Reduce a snippet body to plain text for a terminal editor: placeholder
/// defaults stay, tab-stop markers go.
///
/// `from(${1:table})$0` becomes `from(table)`.
pub(crate) fn strip_snippet_markers(insert: &str) -> String {
    let mut out = String::with_capacity(insert.len());
    let mut chars = insert.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }

        match chars.peek() {
            Some('{') => {
                chars.next();
                // ${n:default} -> default
                let mut body = String::new();
                for inner in chars.by_ref() {
                    if inner == '}' {
                        break;
                    }
                    body.push(inner);
                }
                if let Some((_, default)) = body.split_once(':') {
                    out.push_str(default);
                }
            }
            Some(c) if c.is_ascii_digit() => {
                while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
                    chars.next();
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

impl Completer for BuilderCompleter {
    /// Complete the input at the given cursor position.
    ///
    /// Reedline positions are byte offsets; the engine works in characters.
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let char_pos = line
            .char_indices()
            .take_while(|(i, _)| *i < pos)
            .count();

        let (start, suggestions) = self.engine.complete(line, char_pos);

        // Spans back to bytes for reedline.
        let start_byte = line
            .char_indices()
            .nth(start)
            .map(|(i, _)| i)
            .unwrap_or(line.len());

        let mut suggestions = suggestions;

        if self.config.limit > 0 {
            suggestions.truncate(self.config.limit);
        }

        if self.config.skip_exact_match {
            let typed = &line[start_byte..pos];
            if !typed.is_empty() {
                suggestions.retain(|s| s.label != typed);
            }
        }

        suggestions
            .into_iter()
            .map(|s| {
                let mut value = if s.snippet {
                    strip_snippet_markers(&s.insert)
                } else {
                    s.insert.clone()
                };

                // In a plain terminal there is no post-insert cursor
                // control; materialize the chaining dot directly.
                if s.cursor == CursorIntent::ChainDot && !value.ends_with('.') {
                    value.push('.');
                }

                let description = if s.detail.is_empty() {
                    None
                } else {
                    Some(s.detail.clone())
                };

                Suggestion {
                    value,
                    description,
                    style: None,
                    extra: None,
                    span: Span::new(start_byte, pos),
                    append_whitespace: false,
                    match_indices: None,
                }
            })
            .collect()
    }
}
