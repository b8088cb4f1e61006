//! Recursive-descent parser for function source text.
//!
//! Parses only as far as a function head. Bodies, default values and
//! destructuring patterns are skipped by bracket balancing and recorded as
//! spans, so any body that tokenizes is accepted.

mod error;
mod expr;
pub mod guards;
mod pattern;
mod recovery;
mod stmt;

pub use error::{ParseError, ParseErrorKind};

use crate::parser::ast::Program;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Span, Token};
use guards::ProgressGuard;

/// Result of a loose parse: the tree plus every error that was recovered from.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub program: Program,
    pub errors: Vec<ParseError>,
    /// Statements discarded because of an error
    pub dropped: usize,
}

impl Parsed {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Position to rewind to when a speculative parse fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    pos: usize,
    errors: usize,
}

/// Parser state
pub struct Parser {
    /// Tokens from lexer
    tokens: Vec<(Token, Span)>,

    /// Current position in token stream
    pos: usize,

    /// Current nesting depth of parenthesized expressions
    pub(crate) depth: usize,

    /// Errors recovered from so far
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a new parser from source code.
    ///
    /// Lexing never fails here: bad characters become error tokens and the
    /// lexer diagnostics are kept as recovered errors.
    pub fn new(source: &str) -> Self {
        let (tokens, lex_errors) = Lexer::new(source).tokenize_loose();
        Self {
            tokens,
            pos: 0,
            depth: 0,
            errors: lex_errors.into_iter().map(ParseError::lexical).collect(),
        }
    }

    /// Parse the source, failing on the first error of any kind.
    pub fn parse(self) -> Result<Program, Vec<ParseError>> {
        let parsed = self.parse_loose();
        if parsed.errors.is_empty() {
            Ok(parsed.program)
        } else {
            Err(parsed.errors)
        }
    }

    /// Parse the source, recovering at statement boundaries.
    ///
    /// Errors inside a skipped body (unclosed braces or a missing final
    /// parenthesis) do not drop the statement they occur in.
    pub fn parse_loose(mut self) -> Parsed {
        let start = self.current_span();
        let mut statements = Vec::new();
        let mut dropped = 0;
        let mut guard = ProgressGuard::new("statements");

        while !self.at_eof() {
            if let Err(e) = guard.check(&self) {
                self.errors.push(e);
                break;
            }

            match stmt::parse_statement(&mut self) {
                Ok(statement) => statements.push(statement),
                Err(e) => {
                    self.errors.push(e);
                    dropped += 1;
                    recovery::sync_to_statement_boundary(&mut self);
                }
            }
        }

        let end = self.current_span();
        Parsed {
            program: Program::new(statements, self.combine_spans(&start, &end)),
            errors: self.errors,
            dropped,
        }
    }

    // ========================================================================
    // Token Navigation
    // ========================================================================

    /// Get current token
    #[inline]
    pub(crate) fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|(token, _)| token)
            .unwrap_or(&Token::Eof)
    }

    /// Get current token span
    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|(_, span)| *span)
            .unwrap_or_else(|| Span::new(0, 0, 1, 1))
    }

    /// Peek at the token after the current one
    #[inline]
    pub(crate) fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos + 1)
            .map(|(token, _)| token)
            .unwrap_or(&Token::Eof)
    }

    /// Advance to next token, returning the span of the consumed one
    #[inline]
    pub(crate) fn advance(&mut self) -> Span {
        let span = self.current_span();
        if !self.at_eof() {
            self.pos += 1;
        }
        span
    }

    /// Index of the current token
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Span of the last consumed token
    pub(crate) fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some((_, span)) => *span,
            None => self.current_span(),
        }
    }

    /// Check if current token matches
    #[inline]
    pub(crate) fn check(&self, token: &Token) -> bool {
        self.current() == token
    }

    /// Check if at end of file
    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Consume the expected token or fail
    pub(crate) fn expect(&mut self, token: Token) -> Result<Span, ParseError> {
        if self.check(&token) {
            Ok(self.advance())
        } else {
            Err(self.unexpected_token(&[token]))
        }
    }

    /// Build an error describing the current token
    pub(crate) fn unexpected_token(&self, expected: &[Token]) -> ParseError {
        if self.at_eof() {
            ParseError::unexpected_eof(expected.to_vec(), self.current_span())
        } else {
            ParseError::unexpected_token(expected.to_vec(), self.current().clone(), self.current_span())
        }
    }

    /// Record an error and keep going
    pub(crate) fn recover(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Combine two spans
    pub(crate) fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        start.merge(end)
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            errors: self.errors.len(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.errors.truncate(checkpoint.errors);
    }
}
