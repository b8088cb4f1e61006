//! Abstract Syntax Tree for function source text.
//!
//! The tree only goes as deep as a function head: the kind of function
//! expression and its parameter list. Function bodies and default values are
//! recorded by span and never parsed.
//!
//! Every AST node includes a `Span` for precise source location tracking.

use crate::parser::token::Span;

pub mod expression;
pub mod pattern;

pub use expression::*;
pub use pattern::*;

/// Root node: the wrapped function text
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements
    pub statements: Vec<Statement>,

    /// Span covering the entire program
    pub span: Span,
}

impl Program {
    /// Create a new program
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }

    /// Check if the program is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Get the number of top-level statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Expression followed by an optional semicolon
    Expression(ExpressionStatement),

    /// Lone semicolon
    Empty(Span),
}

impl Statement {
    pub fn span(&self) -> &Span {
        match self {
            Statement::Expression(stmt) => &stmt.span,
            Statement::Empty(span) => span,
        }
    }

    /// ESTree-style name of the statement kind
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Expression(_) => "ExpressionStatement",
            Statement::Empty(_) => "EmptyStatement",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

/// Identifier
///
/// Represents a name for a parameter, function or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}
