//! Expression AST nodes
//!
//! Function-like expressions are modelled precisely. Anything else a source
//! text may contain is folded into [`Expression::Unsupported`] with the
//! ESTree name of what was found, which is enough to explain a rejection.

use super::*;
use crate::parser::token::Span;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Arrow function: (a, b) => a + b, async x => x
    Arrow(ArrowFunction),

    /// Function expression: function named(a) {}, async function* (a) {}
    Function(FunctionExpression),

    /// Call, which is also how method shorthand reads outside its object:
    /// name(a, b) { ... }
    Call(CallExpression),

    /// Identifier
    Identifier(Identifier),

    /// Any other expression, named by kind
    Unsupported(UnsupportedExpression),
}

impl Expression {
    /// Get the span of this expression
    pub fn span(&self) -> &Span {
        match self {
            Expression::Arrow(e) => &e.span,
            Expression::Function(e) => &e.span,
            Expression::Call(e) => &e.span,
            Expression::Identifier(e) => &e.span,
            Expression::Unsupported(e) => &e.span,
        }
    }

    /// ESTree-style name of the expression kind
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Arrow(_) => "ArrowFunctionExpression",
            Expression::Function(_) => "FunctionExpression",
            Expression::Call(_) => "CallExpression",
            Expression::Identifier(_) => "Identifier",
            Expression::Unsupported(e) => e.kind,
        }
    }
}

/// Arrow function: (x) => x + 1
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Pattern>,
    pub is_async: bool,
    /// Brace-delimited body, as opposed to a bare expression
    pub block_body: bool,
    pub span: Span,
}

/// Function expression: function name(a, b) { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    pub name: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

/// Call expression: callee(arguments)
///
/// When followed by a block, this is the text of an object method
/// (`name(a) { ... }`) and its arguments are the method's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Callee,
    pub arguments: Vec<Pattern>,
    pub is_async: bool,
    pub is_generator: bool,
    /// Span of the method body, when present
    pub body: Option<Span>,
    pub span: Span,
}

/// Callee of a call expression, which may be a method key
#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    /// name(...)
    Identifier(Identifier),
    /// 'quoted-name'(...) or 42(...)
    Literal(Span),
    /// [computed](...)
    Computed(Span),
}

impl Callee {
    pub fn span(&self) -> &Span {
        match self {
            Callee::Identifier(id) => &id.span,
            Callee::Literal(span) | Callee::Computed(span) => span,
        }
    }
}

/// Placeholder for an expression that is not a function head
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedExpression {
    pub kind: &'static str,
    pub span: Span,
}
