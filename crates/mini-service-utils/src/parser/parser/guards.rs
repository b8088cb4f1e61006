//! Limits on parser loops and nesting
//!
//! Input is arbitrary text, so every loop must move forward and recursion
//! must stop somewhere.

use super::{ParseError, Parser};

/// Deepest nesting of parenthesized expressions accepted
pub const MAX_PARSE_DEPTH: usize = 64;

/// Fails a loop iteration that starts where the previous one did.
///
/// ```ignore
/// let mut guard = ProgressGuard::new("parameters");
/// while !parser.check(&Token::RightParen) {
///     guard.check(parser)?;
///     // ... consume at least one token ...
/// }
/// ```
pub struct ProgressGuard {
    name: &'static str,
    last: Option<usize>,
}

impl ProgressGuard {
    pub fn new(name: &'static str) -> Self {
        Self { name, last: None }
    }

    pub fn check(&mut self, parser: &Parser) -> Result<(), ParseError> {
        let position = parser.position();
        if self.last == Some(position) {
            return Err(ParseError::parser_limit_exceeded(
                format!("'{}' stalled at token {}", self.name, position),
                parser.current_span(),
            ));
        }
        self.last = Some(position);
        Ok(())
    }
}

/// Run `f` one nesting level deeper, failing once [`MAX_PARSE_DEPTH`] is reached.
pub fn nested<T>(
    parser: &mut Parser,
    name: &'static str,
    f: impl FnOnce(&mut Parser) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    if parser.depth >= MAX_PARSE_DEPTH {
        return Err(ParseError::parser_limit_exceeded(
            format!("{} nested deeper than {}", name, MAX_PARSE_DEPTH),
            parser.current_span(),
        ));
    }
    parser.depth += 1;
    let result = f(parser);
    parser.depth -= 1;
    result
}
