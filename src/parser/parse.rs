//! Error-tolerant recursive-descent parser for builder chains.
//!
//! The grammar is a deliberately small expression subset: primary
//! expressions (literals, identifiers, parenthesized expressions) followed
//! by any mix of `.identifier` member accesses and `(args...)` calls.
//! Anything the grammar cannot place becomes an [`AstNode::Incomplete`]
//! node plus a diagnostic; nothing ever aborts the parse.
//!
//! Completion always reparses only the text before the cursor
//! ([`parse_at_position`]). That makes unfinished trailing input the normal
//! case rather than an error, at the cost of re-lexing the prefix on every
//! keystroke.

use super::ast::{AstNode, LiteralValue};
use super::lexer::{Lexer, Token, TokenKind};

/// A non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseDiagnostic {
    pub message: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

/// Result of a parse: the tree (if any expression was found), the token
/// stream it came from, diagnostics, and whether anything was unfinished.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub ast: Option<AstNode>,
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseDiagnostic>,
    pub incomplete: bool,
}

/// Token-level context around the cursor, alongside the parse itself.
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub result: ParseResult,
    pub last_token: Option<Token>,
    pub in_call: bool,
    pub after_dot: bool,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseDiagnostic>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    fn current(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn is_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn add_error(&mut self, message: impl Into<String>, token: &Token) {
        self.errors.push(ParseDiagnostic {
            message: message.into(),
            start: token.start,
            end: token.end,
            line: token.line,
            column: token.column,
        });
    }

    fn parse_identifier(&mut self) -> Option<AstNode> {
        if !self.check(TokenKind::Identifier) {
            return None;
        }
        let token = self.advance();
        Some(AstNode::Identifier {
            name: token.value,
            start: token.start,
            end: token.end,
        })
    }

    fn parse_literal(&mut self) -> Option<AstNode> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::String => {
                self.advance();
                Some(AstNode::Literal {
                    value: LiteralValue::String(token.value.clone()),
                    raw: token.value,
                    start: token.start,
                    end: token.end,
                })
            }
            TokenKind::Number => {
                self.advance();
                let num = token.value.parse::<f64>().unwrap_or(0.0);
                Some(AstNode::Literal {
                    value: LiteralValue::Number(num),
                    raw: token.value,
                    start: token.start,
                    end: token.end,
                })
            }
            TokenKind::Identifier if token.value == "true" || token.value == "false" => {
                self.advance();
                Some(AstNode::Literal {
                    value: LiteralValue::Boolean(token.value == "true"),
                    raw: token.value,
                    start: token.start,
                    end: token.end,
                })
            }
            _ => None,
        }
    }

    fn parse_template(&mut self) -> Option<AstNode> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::TemplateStart | TokenKind::TemplateEnd => {
                self.advance();
                Some(AstNode::Template {
                    raw: token.value,
                    closed: token.kind == TokenKind::TemplateEnd,
                    start: token.start,
                    end: token.end,
                })
            }
            _ => None,
        }
    }

    /// Parse the comma-separated arguments of a call, consuming the opening
    /// and (when present) closing parenthesis. Each argument is wrapped in
    /// an [`AstNode::Argument`] carrying its position.
    fn parse_arguments(&mut self) -> Vec<AstNode> {
        let mut args = Vec::new();

        if !self.check(TokenKind::OpenParen) {
            return args;
        }
        let open = self.advance();

        while !self.is_eof() && !self.check(TokenKind::CloseParen) {
            let before = self.pos;
            if let Some(expr) = self.parse_expression() {
                args.push(AstNode::Argument {
                    index: args.len(),
                    start: expr.start(),
                    end: expr.end(),
                    inner: Box::new(expr),
                });
            }

            if self.check(TokenKind::Comma) {
                self.advance();
            } else if !self.check(TokenKind::CloseParen) {
                break;
            }

            // Guard against inputs the grammar cannot place at all.
            if self.pos == before {
                self.advance();
            }
        }

        if self.check(TokenKind::CloseParen) {
            self.advance();
        } else if self.is_eof() {
            self.add_error("Unclosed '('", &open);
        }

        args
    }

    fn parse_primary(&mut self) -> Option<AstNode> {
        if let Some(literal) = self.parse_literal() {
            return Some(literal);
        }

        if let Some(ident) = self.parse_identifier() {
            return Some(ident);
        }

        if let Some(template) = self.parse_template() {
            return Some(template);
        }

        if self.check(TokenKind::OpenParen) {
            self.advance();
            let expr = self.parse_expression();
            if self.check(TokenKind::CloseParen) {
                self.advance();
            }
            return expr;
        }

        None
    }

    /// Postfix loop: consume `.identifier` and `(args...)` in any order,
    /// building a left-to-right member/call spine. A tagged template
    /// (`` sql`...` ``) parses as a call with the template as the only
    /// argument.
    fn parse_call_or_member(&mut self, left: AstNode) -> AstNode {
        let mut result = left;

        while !self.is_eof() {
            if self.check(TokenKind::Dot) {
                let dot = self.advance();
                if let Some(prop) = self.parse_identifier() {
                    result = AstNode::Member {
                        start: result.start(),
                        end: prop.end(),
                        object: Box::new(result),
                        property: Box::new(prop),
                    };
                } else {
                    let at = self.current().start;
                    self.add_error("Expected identifier after '.'", &dot);
                    result = AstNode::Member {
                        start: result.start(),
                        end: at,
                        object: Box::new(result),
                        property: Box::new(AstNode::Incomplete {
                            name: None,
                            start: at,
                            end: at,
                        }),
                    };
                }
            } else if self.check(TokenKind::OpenParen) {
                let start_pos = self.current().start;
                let args = self.parse_arguments();
                let end_pos = if self.pos > 0 {
                    self.tokens[self.pos - 1].end
                } else {
                    start_pos
                };
                result = AstNode::Call {
                    start: result.start(),
                    end: end_pos,
                    callee: Box::new(result),
                    arguments: args,
                };
            } else if let Some(template) = self.parse_template() {
                let end = template.end();
                result = AstNode::Call {
                    start: result.start(),
                    end,
                    callee: Box::new(result),
                    arguments: vec![AstNode::Argument {
                        index: 0,
                        start: template.start(),
                        end,
                        inner: Box::new(template),
                    }],
                };
            } else {
                break;
            }
        }

        result
    }

    fn parse_expression(&mut self) -> Option<AstNode> {
        let Some(primary) = self.parse_primary() else {
            if self.check(TokenKind::Dot) {
                let dot = self.advance();
                return Some(AstNode::Incomplete {
                    name: None,
                    start: dot.start,
                    end: dot.end,
                });
            }
            return None;
        };

        Some(self.parse_call_or_member(primary))
    }

    fn parse_chain(&mut self) -> Option<AstNode> {
        let mut nodes = Vec::new();

        while !self.is_eof() {
            let before = self.pos;

            if let Some(expr) = self.parse_expression() {
                nodes.push(expr);
            }

            if self.is_eof() {
                break;
            }

            if !self.check(TokenKind::Dot) && !self.check(TokenKind::OpenParen) {
                if matches!(
                    self.current().kind,
                    TokenKind::Identifier | TokenKind::String | TokenKind::Number
                ) {
                    continue;
                }
                break;
            }

            // Never loop without consuming input.
            if self.pos == before {
                self.advance();
            }
        }

        match nodes.len() {
            0 => None,
            1 => nodes.pop(),
            _ => Some(AstNode::Chain {
                start: nodes[0].start(),
                end: nodes[nodes.len() - 1].end(),
                nodes,
            }),
        }
    }
}

/// Parse a full source string into a tolerant [`ParseResult`].
pub fn parse(source: &str) -> ParseResult {
    let tokens = Lexer::tokenize(source);
    let mut parser = Parser::new(tokens.clone());
    let ast = parser.parse_chain();

    let incomplete = match &ast {
        Some(node) => node.has_incomplete(),
        None => true,
    };

    ParseResult {
        ast,
        tokens,
        errors: parser.errors,
        incomplete,
    }
}

/// Parse only the text before `position` (in characters).
///
/// This is the completion entry point: everything after the cursor is
/// ignored, so unfinished or invalid trailing code never disturbs the
/// result.
pub fn parse_at_position(source: &str, position: usize) -> ParseResult {
    let before: String = source.chars().take(position).collect();
    parse(&before)
}

/// Parse before `position` and derive token-level cursor context.
pub fn context_at_position(source: &str, position: usize) -> ParseContext {
    let result = parse_at_position(source, position);

    let significant: Vec<&Token> = result
        .tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .collect();

    let last_token = significant.last().map(|t| (*t).clone());
    let second_last = significant
        .len()
        .checked_sub(2)
        .and_then(|i| significant.get(i))
        .map(|t| (*t).clone());

    let mut in_call = false;
    let mut after_dot = false;

    if let Some(last) = &last_token {
        if last.kind == TokenKind::OpenParen {
            in_call = true;
        }
        if last.kind == TokenKind::Dot {
            after_dot = true;
        }

        if let Some(prev) = &second_last {
            if prev.kind == TokenKind::OpenParen && last.kind != TokenKind::CloseParen {
                in_call = true;
            }
        }
    }

    ParseContext {
        result,
        last_token,
        in_call,
        after_dot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_chain() {
        let result = parse("db.select().from(users)");
        assert!(!result.incomplete);
        assert!(result.errors.is_empty());

        let ast = result.ast.unwrap();
        // Outermost node is the from(...) call.
        assert_eq!(ast.call_name(), Some("from"));
    }

    #[test]
    fn test_parse_nested_call_arguments() {
        let result = parse("db.select().from(users).where(eq(users.id, 1))");
        let ast = result.ast.unwrap();
        assert_eq!(ast.call_name(), Some("where"));

        let AstNode::Call { arguments, .. } = &ast else {
            panic!("expected call");
        };
        assert_eq!(arguments.len(), 1);

        let AstNode::Argument { inner, index, .. } = &arguments[0] else {
            panic!("expected argument wrapper");
        };
        assert_eq!(*index, 0);
        assert_eq!(inner.call_name(), Some("eq"));
    }

    #[test]
    fn test_parse_trailing_dot_is_incomplete() {
        let result = parse("db.");
        assert!(result.incomplete);
        assert_eq!(result.errors.len(), 1);

        let ast = result.ast.unwrap();
        let AstNode::Member { object, property, .. } = &ast else {
            panic!("expected member");
        };
        assert_eq!(object.identifier_name(), Some("db"));
        assert!(matches!(property.as_ref(), AstNode::Incomplete { .. }));
    }

    #[test]
    fn test_parse_unclosed_call() {
        let result = parse("db.select().from(");
        assert!(result.incomplete || !result.errors.is_empty());
        let ast = result.ast.unwrap();
        assert_eq!(ast.call_name(), Some("from"));
    }

    #[test]
    fn test_incomplete_propagates_through_arguments() {
        let result = parse("db.select().from(users).where(eq(users.");
        assert!(result.incomplete);
    }

    #[test]
    fn test_parse_never_panics_on_garbage() {
        for input in [
            "", ".", "..", "...", "()", ")(", "(((", ",,,", "db..", "@#$%",
            "db.select(.", "where(,)", "`unclosed", "'unclosed", "1e5..x",
        ] {
            let result = parse(input);
            // Tolerance: a result always comes back, tokens end with Eof.
            assert_eq!(result.tokens.last().unwrap().kind, TokenKind::Eof, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_literals() {
        let result = parse("eq(users.active, true)");
        let ast = result.ast.unwrap();
        let AstNode::Call { arguments, .. } = &ast else {
            panic!("expected call");
        };
        let AstNode::Argument { inner, .. } = &arguments[1] else {
            panic!("expected argument");
        };
        assert!(matches!(
            inner.as_ref(),
            AstNode::Literal { value: LiteralValue::Boolean(true), .. }
        ));
    }

    #[test]
    fn test_parse_number_literal() {
        let result = parse("limit(10)");
        let ast = result.ast.unwrap();
        let AstNode::Call { arguments, .. } = &ast else {
            panic!("expected call");
        };
        let AstNode::Argument { inner, .. } = &arguments[0] else {
            panic!("expected argument");
        };
        assert!(matches!(
            inner.as_ref(),
            AstNode::Literal { value: LiteralValue::Number(n), .. } if *n == 10.0
        ));
    }

    #[test]
    fn test_parse_tagged_template() {
        let result = parse("db.execute(sql`select 1`)");
        let ast = result.ast.unwrap();
        assert_eq!(ast.call_name(), Some("execute"));

        let AstNode::Call { arguments, .. } = &ast else {
            panic!("expected call");
        };
        let AstNode::Argument { inner, .. } = &arguments[0] else {
            panic!("expected argument");
        };
        // sql`...` is itself a call with the template as its argument.
        assert_eq!(inner.call_name(), Some("sql"));
    }

    #[test]
    fn test_chain_span_covers_children() {
        let result = parse("db.select() db.insert(users)");
        let ast = result.ast.unwrap();
        if let AstNode::Chain { nodes, start, end } = &ast {
            assert_eq!(*start, nodes[0].start());
            assert_eq!(*end, nodes[nodes.len() - 1].end());
        }
    }

    #[test]
    fn test_parse_at_position_ignores_trailing_garbage() {
        let source = "db.select().from(users) ###garbage###";
        let result = parse_at_position(source, 23);
        assert!(!result.incomplete);
        assert_eq!(result.ast.unwrap().call_name(), Some("from"));
    }

    #[test]
    fn test_context_after_dot() {
        let ctx = context_at_position("db.", 3);
        assert!(ctx.after_dot);
        assert!(!ctx.in_call);
    }

    #[test]
    fn test_context_inside_call() {
        let ctx = context_at_position("db.select().from(", 17);
        assert!(ctx.in_call);
        assert!(!ctx.after_dot);

        // Still inside while typing the first argument.
        let ctx = context_at_position("db.select().from(us", 19);
        assert!(ctx.in_call);
    }

    #[test]
    fn test_context_not_in_closed_call() {
        let ctx = context_at_position("db.select()", 11);
        assert!(!ctx.in_call);
        assert!(!ctx.after_dot);
    }

    #[test]
    fn test_parse_empty_source() {
        let result = parse("");
        assert!(result.ast.is_none());
        assert!(result.incomplete);
    }
}
