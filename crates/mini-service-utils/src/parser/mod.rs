//! Function source parsing.
//!
//! A [`lexer::Lexer`] turns source text into tokens, and the
//! [`parser::Parser`] reads the function head into a small [`ast`]: the
//! kind of function expression and its formal parameters.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Expression, Pattern, Program, Statement};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parsed, Parser};
pub use token::{Span, Token};
