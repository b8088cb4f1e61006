//! Parameter name extraction
//!
//! Reads the formal parameter names of a function from its source text,
//! without running it. The text is wrapped in parentheses so that every
//! function form parses as one expression:
//!
//! - `function name(a, b) {}`, `function* (a) {}`
//! - `(a, b) => a`, `a => a`
//! - method shorthand `name(a, b) {}`, read as a call whose arguments are the
//!   parameters
//! - the `async` variants of all of the above
//!
//! # Example
//!
//! ```ignore
//! let names = extract_params_from_source("(a, { b }, ...rest) => a")?;
//! assert_eq!(names, vec!["a", "param2", "rest"]);
//! ```

use crate::error::{Error, Result};
use crate::parser::ast::{Expression, Pattern, Statement};
use crate::parser::Parser;
use crate::value::Value;

/// One formal parameter of a function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// Plain identifier: `a`
    Named(String),
    /// Identifier with a default value: `a = 1`
    Defaulted(String),
    /// Rest parameter: `...rest`
    Rest(String),
    /// Destructuring pattern, named `param<N>` after its 1-based position
    Structured(String),
}

impl Parameter {
    pub fn name(&self) -> &str {
        match self {
            Parameter::Named(name)
            | Parameter::Defaulted(name)
            | Parameter::Rest(name)
            | Parameter::Structured(name) => name,
        }
    }

    pub fn into_name(self) -> String {
        match self {
            Parameter::Named(name)
            | Parameter::Defaulted(name)
            | Parameter::Rest(name)
            | Parameter::Structured(name) => name,
        }
    }
}

/// How a default value with a destructured target is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Defaults {
    /// `{ a } = {}` is named after its position
    Positional,
    /// `{ a } = {}` is rejected
    Strict,
}

/// Ordered parameter names of a function value.
///
/// Any value is accepted and coerced to its string form; values that are
/// not functions fail with `unsupported function <text>`.
pub fn extract_params(value: &Value) -> Result<Vec<String>> {
    extract_params_from_source(&value.to_string())
}

/// Ordered parameter names of a function's source text.
pub fn extract_params_from_source(source: &str) -> Result<Vec<String>> {
    Ok(parse_signature(source)?
        .into_iter()
        .map(Parameter::into_name)
        .collect())
}

/// Parameters of a function's source text, with their kind.
pub fn parse_signature(source: &str) -> Result<Vec<Parameter>> {
    read_signature(source, Defaults::Positional)
}

/// Like [`extract_params`], but fails on destructured defaults such as
/// `({ a } = {}) => a` and on destructured rest parameters.
#[deprecated(note = "destructured defaults are named by position; use `extract_params`")]
pub fn extract_params_strict(value: &Value) -> Result<Vec<String>> {
    let source = value.to_string();
    Ok(read_signature(&source, Defaults::Strict)?
        .into_iter()
        .map(Parameter::into_name)
        .collect())
}

fn read_signature(source: &str, defaults: Defaults) -> Result<Vec<Parameter>> {
    let unsupported = |reason: String| Error::UnsupportedFunction {
        source_text: source.to_string(),
        reason,
    };

    let wrapped = format!("({})", source);
    let parsed = Parser::new(&wrapped).parse_loose();

    if parsed.dropped > 0 {
        let reason = parsed
            .errors
            .iter()
            .map(|e| e.to_string())
            .next()
            .unwrap_or_default();
        return Err(unsupported(reason));
    }

    let statement = match parsed.program.statements.as_slice() {
        [Statement::Expression(statement)] => statement,
        [other] => {
            return Err(unsupported(format!(
                "expected an expression statement, found {}",
                other.kind()
            )))
        }
        statements => {
            return Err(unsupported(format!(
                "expected a single statement, found {}",
                statements.len()
            )))
        }
    };

    let params = match &statement.expression {
        Expression::Arrow(arrow) => &arrow.params,
        Expression::Function(function) => &function.params,
        Expression::Call(call) => &call.arguments,
        other => return Err(unsupported(format!("{} is not a function", other.kind()))),
    };

    params
        .iter()
        .enumerate()
        .map(|(index, param)| classify(param, index, defaults))
        .collect::<std::result::Result<_, _>>()
        .map_err(unsupported)
}

fn classify(
    param: &Pattern,
    index: usize,
    defaults: Defaults,
) -> std::result::Result<Parameter, String> {
    match param {
        Pattern::Identifier(id) => Ok(Parameter::Named(id.name.clone())),
        Pattern::Assignment(assign) => match &*assign.left {
            Pattern::Identifier(id) => Ok(Parameter::Defaulted(id.name.clone())),
            Pattern::Object(_) | Pattern::Array(_) if defaults == Defaults::Positional => {
                classify(&assign.left, index, defaults)
            }
            left => Err(unnamed(left, index)),
        },
        Pattern::Rest(rest) => match &*rest.argument {
            Pattern::Identifier(id) => Ok(Parameter::Rest(id.name.clone())),
            Pattern::Object(_) | Pattern::Array(_) if defaults == Defaults::Positional => {
                Ok(Parameter::Structured(positional(index)))
            }
            argument => Err(unnamed(argument, index)),
        },
        Pattern::Object(_) | Pattern::Array(_) => Ok(Parameter::Structured(positional(index))),
    }
}

fn positional(index: usize) -> String {
    format!("param{}", index + 1)
}

fn unnamed(pattern: &Pattern, index: usize) -> String {
    format!("{} at position {} has no name", pattern.kind(), index)
}
