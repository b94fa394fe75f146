//! Error-tolerant lexer for the query-builder DSL.
//!
//! The lexer is designed for completion scenarios: it runs on every
//! keystroke against whatever half-typed text the user has produced.
//!
//! # Design Principles
//!
//! - **Never panic** - always return a valid token stream
//! - **Never reject input** - unrecognized characters become `Unknown` tokens
//! - **Always terminate** - a single left-to-right pass bounded by input length
//! - **Trailing Eof** - every stream ends with exactly one `Eof` token

/// Token types for the builder DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier (method name, table name, column name, etc.)
    Identifier,
    /// Dot separator
    Dot,
    /// Left parenthesis
    OpenParen,
    /// Right parenthesis
    CloseParen,
    /// Left bracket
    OpenBracket,
    /// Right bracket
    CloseBracket,
    /// Left brace
    OpenBrace,
    /// Right brace
    CloseBrace,
    /// Comma
    Comma,
    /// Colon
    Colon,
    /// String literal (single or double quoted)
    String,
    /// Number literal
    Number,
    /// Operator run, at most three characters
    Operator,
    /// Template literal opening, cut short by an embedded `${`
    TemplateStart,
    /// Template literal closed by a backtick
    TemplateEnd,
    /// Run of spaces/tabs
    Whitespace,
    /// Line break
    Newline,
    /// End of input
    Eof,
    /// Unrecognized character
    Unknown,
}

/// Token with source text and position information.
///
/// Offsets are character indices into the source; `line` and `column` are
/// 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    fn new(
        kind: TokenKind,
        value: impl Into<String>,
        start: usize,
        end: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
            line,
            column,
        }
    }

    /// Whether this token is an identifier.
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }
}

/// Characters that may form operator tokens.
const OPERATOR_CHARS: &str = "+-*/%=<>!&|^~?:";

/// Error-tolerant DSL lexer.
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer from input string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the input, dropping whitespace and newline tokens.
    pub fn tokenize(input: &str) -> Vec<Token> {
        Self::run(input, false)
    }

    /// Tokenize the input, keeping whitespace and newline tokens.
    pub fn tokenize_with_whitespace(input: &str) -> Vec<Token> {
        Self::run(input, true)
    }

    fn run(input: &str, keep_whitespace: bool) -> Vec<Token> {
        let mut lexer = Self::new(input);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            let is_blank = matches!(token.kind, TokenKind::Whitespace | TokenKind::Newline);
            if keep_whitespace || !is_blank {
                tokens.push(token);
            }
            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Get the next token.
    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let line = self.line;
        let column = self.column;

        if self.is_at_end() {
            return Token::new(TokenKind::Eof, "", start, start, line, column);
        }

        let ch = self.current_char();

        match ch {
            '\n' => {
                self.advance();
                Token::new(TokenKind::Newline, "\n", start, self.pos, line, column)
            }
            ' ' | '\t' | '\r' => self.scan_whitespace(start, line, column),
            '\'' | '"' => self.scan_string(ch, start, line, column),
            '`' => self.scan_template(start, line, column),
            '0'..='9' => self.scan_number(start, line, column),
            'a'..='z' | 'A'..='Z' | '_' | '$' => self.scan_identifier(start, line, column),
            '.' => self.single(TokenKind::Dot, ".", start, line, column),
            '(' => self.single(TokenKind::OpenParen, "(", start, line, column),
            ')' => self.single(TokenKind::CloseParen, ")", start, line, column),
            '[' => self.single(TokenKind::OpenBracket, "[", start, line, column),
            ']' => self.single(TokenKind::CloseBracket, "]", start, line, column),
            '{' => self.single(TokenKind::OpenBrace, "{", start, line, column),
            '}' => self.single(TokenKind::CloseBrace, "}", start, line, column),
            ',' => self.single(TokenKind::Comma, ",", start, line, column),
            // A leading colon is always punctuation; ':' still participates
            // in operator runs started by another operator character.
            ':' => self.single(TokenKind::Colon, ":", start, line, column),
            _ if OPERATOR_CHARS.contains(ch) => self.scan_operator(start, line, column),
            _ => {
                self.advance();
                Token::new(TokenKind::Unknown, ch.to_string(), start, self.pos, line, column)
            }
        }
    }

    fn single(
        &mut self,
        kind: TokenKind,
        value: &str,
        start: usize,
        line: usize,
        column: usize,
    ) -> Token {
        self.advance();
        Token::new(kind, value, start, self.pos, line, column)
    }

    /// Scan a string literal with backslash escapes.
    ///
    /// A missing closing quote is not an error; the string simply runs to
    /// the end of input.
    fn scan_string(&mut self, quote: char, start: usize, line: usize, column: usize) -> Token {
        self.advance(); // opening quote

        let mut value = String::new();

        while !self.is_at_end() && self.current_char() != quote {
            if self.current_char() == '\\' {
                self.advance();
                if !self.is_at_end() {
                    value.push(self.current_char());
                    self.advance();
                }
            } else {
                value.push(self.current_char());
                self.advance();
            }
        }

        if !self.is_at_end() && self.current_char() == quote {
            self.advance();
        }

        Token::new(TokenKind::String, value, start, self.pos, line, column)
    }

    /// Scan a template literal.
    ///
    /// Lexes up to an embedded `${` (yielding `TemplateStart`; the embedded
    /// expression is not this lexer's concern) or to the closing backtick
    /// (yielding `TemplateEnd`).
    fn scan_template(&mut self, start: usize, line: usize, column: usize) -> Token {
        self.advance(); // opening backtick

        let mut value = String::new();

        while !self.is_at_end() && self.current_char() != '`' {
            if self.current_char() == '\\' {
                self.advance();
                if !self.is_at_end() {
                    value.push(self.current_char());
                    self.advance();
                }
            } else if self.current_char() == '$' && self.peek_char() == Some('{') {
                break;
            } else {
                value.push(self.current_char());
                self.advance();
            }
        }

        if !self.is_at_end() && self.current_char() == '`' {
            self.advance();
            return Token::new(TokenKind::TemplateEnd, value, start, self.pos, line, column);
        }

        Token::new(TokenKind::TemplateStart, value, start, self.pos, line, column)
    }

    /// Scan a number: digits and dots only. No exponent or sign handling;
    /// the DSL subset does not need them.
    fn scan_number(&mut self, start: usize, line: usize, column: usize) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_ascii_digit() || ch == '.' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, value, start, self.pos, line, column)
    }

    /// Scan an identifier: `[A-Za-z_$][A-Za-z0-9_$]*`.
    fn scan_identifier(&mut self, start: usize, line: usize, column: usize) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Identifier, value, start, self.pos, line, column)
    }

    /// Scan a run of spaces/tabs/carriage returns.
    fn scan_whitespace(&mut self, start: usize, line: usize, column: usize) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch == ' ' || ch == '\t' || ch == '\r' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Whitespace, value, start, self.pos, line, column)
    }

    /// Scan an operator run, greedily consuming at most three characters.
    fn scan_operator(&mut self, start: usize, line: usize, column: usize) -> Token {
        let mut value = String::new();

        while !self.is_at_end() && OPERATOR_CHARS.contains(self.current_char()) {
            value.push(self.current_char());
            self.advance();
            if value.len() >= 3 {
                break;
            }
        }

        Token::new(TokenKind::Operator, value, start, self.pos, line, column)
    }

    fn current_char(&self) -> char {
        self.input.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        if self.current_char() == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

/// Find the token covering `position`, if any.
pub fn token_at_position(tokens: &[Token], position: usize) -> Option<&Token> {
    tokens.iter().find(|t| position >= t.start && position <= t.end)
}

/// Find the last token that ends at or before `position`.
pub fn token_before_position(tokens: &[Token], position: usize) -> Option<&Token> {
    let mut result = None;
    for token in tokens {
        if token.end <= position {
            result = Some(token);
        } else {
            break;
        }
    }
    result
}
