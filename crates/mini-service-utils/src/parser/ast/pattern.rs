//! Pattern AST nodes
//!
//! Patterns are the formal parameters of a function. Destructuring patterns
//! are kept as a whole: their inner bindings are not part of the signature.

use super::*;
use crate::parser::token::Span;

/// Pattern (a single formal parameter)
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Simple identifier: x
    Identifier(Identifier),

    /// Default value: x = 1, { a } = {}
    Assignment(AssignmentPattern),

    /// Rest parameter: ...args
    Rest(RestPattern),

    /// Object destructuring: { x, y: [z] }
    Object(ObjectPattern),

    /// Array destructuring: [x, , ...tail]
    Array(ArrayPattern),
}

impl Pattern {
    pub fn span(&self) -> &Span {
        match self {
            Pattern::Identifier(id) => &id.span,
            Pattern::Assignment(p) => &p.span,
            Pattern::Rest(p) => &p.span,
            Pattern::Object(p) => &p.span,
            Pattern::Array(p) => &p.span,
        }
    }

    /// ESTree-style name of the pattern kind
    pub fn kind(&self) -> &'static str {
        match self {
            Pattern::Identifier(_) => "Identifier",
            Pattern::Assignment(_) => "AssignmentPattern",
            Pattern::Rest(_) => "RestElement",
            Pattern::Object(_) => "ObjectPattern",
            Pattern::Array(_) => "ArrayPattern",
        }
    }
}

/// Pattern with a default value; the default is only kept as a span
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    pub left: Box<Pattern>,
    pub default: Span,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestPattern {
    pub argument: Box<Pattern>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    pub span: Span,
}
