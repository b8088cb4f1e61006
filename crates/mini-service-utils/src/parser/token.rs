//! Token definitions for function source text.
//!
//! Only the tokens that matter for recognizing a function head carry their own
//! variant. Everything else (operators, literals, bodies) is kept coarse since
//! the parser only skips over it.

use std::fmt;

/// A token of JavaScript-family function source.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords that shape a function head
    Function,
    Async,

    // Names and literals
    Identifier(String),
    PrivateName(String),
    Number(String),
    String(String),
    Template(String),
    /// Regular expression literal, slashes and flags included
    Regex(String),

    // Punctuation used by parameter lists
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Colon,
    Question,
    Dot,
    DotDotDot, // ... for rest parameters
    Equal,
    Arrow,
    Star,

    /// Any other operator, kept verbatim
    Operator(String),

    // Special
    Eof,
    Error(String),
}

/// Source location information for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
            column: self.column.min(other.column),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Function => write!(f, "function"),
            Token::Async => write!(f, "async"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::PrivateName(name) => write!(f, "{}", name),
            Token::Number(text) => write!(f, "{}", text),
            Token::String(_) => write!(f, "\"<string>\""),
            Token::Template(_) => write!(f, "`...`"),
            Token::Regex(text) => write!(f, "{}", text),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::Question => write!(f, "?"),
            Token::Dot => write!(f, "."),
            Token::DotDotDot => write!(f, "..."),
            Token::Equal => write!(f, "="),
            Token::Arrow => write!(f, "=>"),
            Token::Star => write!(f, "*"),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Eof => write!(f, "EOF"),
            Token::Error(text) => write!(f, "ERROR: {}", text),
        }
    }
}

impl Token {
    /// Returns true if this token opens a bracketed group.
    pub fn is_opening(&self) -> bool {
        matches!(self, Token::LeftParen | Token::LeftBrace | Token::LeftBracket)
    }

    /// Returns true if this token closes a bracketed group.
    pub fn is_closing(&self) -> bool {
        matches!(self, Token::RightParen | Token::RightBrace | Token::RightBracket)
    }

    /// The name a property key or binding would get from this token.
    ///
    /// Keywords are valid method names (`async() {}`, `function() {}` as an
    /// object key), so they resolve to their own spelling.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            Token::Function => Some("function"),
            Token::Async => Some("async"),
            _ => None,
        }
    }
}
