//! Errors met while reading a function head

use crate::parser::lexer::LexError;
use crate::parser::token::{Span, Token};
use std::fmt;

/// Where parsing went wrong and why.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// Rendered description
    pub message: String,
}

/// Error categories
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: Vec<Token>, found: Token },
    /// Input ended inside the function head
    UnexpectedEof { expected: Vec<Token> },
    InvalidSyntax { reason: String },
    /// `(`, `[` or `{` never closed
    UnclosedDelimiter { open: Token },
    /// Reported by the lexer
    Lexical(LexError),
    /// Nesting or loop limit hit
    ParserLimitExceeded { message: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.span.line, self.span.column
        )
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub fn unexpected_token(expected: Vec<Token>, found: Token, span: Span) -> Self {
        let message = if expected.len() == 1 {
            format!("Expected {}, found {}", expected[0], found)
        } else {
            format!("Expected one of {}, found {}", join(&expected), found)
        };

        Self {
            kind: ParseErrorKind::UnexpectedToken { expected, found },
            span,
            message,
        }
    }

    pub fn unexpected_eof(expected: Vec<Token>, span: Span) -> Self {
        let message = if expected.len() == 1 {
            format!("Unexpected end of input, expected {}", expected[0])
        } else {
            format!("Unexpected end of input, expected one of {}", join(&expected))
        };

        Self {
            kind: ParseErrorKind::UnexpectedEof { expected },
            span,
            message,
        }
    }

    pub fn invalid_syntax(reason: impl Into<String>, span: Span) -> Self {
        let reason = reason.into();
        Self {
            message: reason.clone(),
            kind: ParseErrorKind::InvalidSyntax { reason },
            span,
        }
    }

    pub fn unclosed_delimiter(open: Token, span: Span) -> Self {
        Self {
            message: format!("Unclosed delimiter {}", open),
            kind: ParseErrorKind::UnclosedDelimiter { open },
            span,
        }
    }

    pub fn lexical(error: LexError) -> Self {
        Self {
            span: *error.span(),
            message: error.description(),
            kind: ParseErrorKind::Lexical(error),
        }
    }

    pub fn parser_limit_exceeded(message: impl Into<String>, span: Span) -> Self {
        let message = message.into();
        Self {
            kind: ParseErrorKind::ParserLimitExceeded {
                message: message.clone(),
            },
            span,
            message: format!("Limit exceeded: {}", message),
        }
    }
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
