//! Formal parameter parsing
//!
//! Handles:
//! - Simple identifiers: `x`
//! - Defaults: `x = 1`, `{ a } = {}`
//! - Rest parameters: `...args`
//! - Object and array destructuring, recorded by span only

use super::guards::ProgressGuard;
use super::{recovery, ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::Token;

/// Parse a parenthesized parameter list: `(a, b = 1, ...rest)`.
pub fn parse_params(parser: &mut Parser) -> Result<Vec<Pattern>, ParseError> {
    parser.expect(Token::LeftParen)?;

    let mut params = Vec::new();
    let mut guard = ProgressGuard::new("parameters");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check(parser)?;

        let param = parse_param(parser)?;
        let is_rest = matches!(param, Pattern::Rest(_));
        params.push(param);

        if parser.check(&Token::Comma) {
            if is_rest {
                return Err(ParseError::invalid_syntax(
                    "Rest parameter must be last formal parameter",
                    parser.current_span(),
                ));
            }
            parser.advance();
        } else if !parser.check(&Token::RightParen) {
            return Err(parser.unexpected_token(&[Token::Comma, Token::RightParen]));
        }
    }

    parser.expect(Token::RightParen)?;
    Ok(params)
}

/// Parse one parameter, including a default value or a rest prefix.
fn parse_param(parser: &mut Parser) -> Result<Pattern, ParseError> {
    let start = parser.current_span();

    if parser.check(&Token::DotDotDot) {
        parser.advance();
        let argument = parse_binding(parser)?;
        let span = parser.combine_spans(&start, argument.span());
        return Ok(Pattern::Rest(RestPattern {
            argument: Box::new(argument),
            span,
        }));
    }

    let target = parse_binding(parser)?;

    if !parser.check(&Token::Equal) {
        return Ok(target);
    }
    parser.advance();

    let default = match recovery::skip_expression(parser) {
        Some(span) => span,
        None => {
            return Err(ParseError::invalid_syntax(
                "Missing default value",
                parser.current_span(),
            ))
        }
    };

    Ok(Pattern::Assignment(AssignmentPattern {
        span: parser.combine_spans(&start, &default),
        left: Box::new(target),
        default,
    }))
}

/// Parse a binding target: an identifier or a destructuring pattern.
fn parse_binding(parser: &mut Parser) -> Result<Pattern, ParseError> {
    let span = parser.current_span();

    match parser.current() {
        Token::Identifier(name) => {
            let identifier = Identifier::new(name.clone(), span);
            parser.advance();
            Ok(Pattern::Identifier(identifier))
        }
        // `async` is a contextual keyword and a valid binding name
        Token::Async => {
            parser.advance();
            Ok(Pattern::Identifier(Identifier::new("async", span)))
        }
        Token::LeftBrace => {
            let span = recovery::skip_balanced(parser)?;
            Ok(Pattern::Object(ObjectPattern { span }))
        }
        Token::LeftBracket => {
            let span = recovery::skip_balanced(parser)?;
            Ok(Pattern::Array(ArrayPattern { span }))
        }
        _ => Err(parser.unexpected_token(&[
            Token::Identifier("identifier".to_string()),
            Token::LeftBrace,
            Token::LeftBracket,
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(source: &str) -> Result<Vec<Pattern>, ParseError> {
        parse_params(&mut Parser::new(source))
    }

    #[test]
    fn test_simple_and_default_params() {
        let parsed = params("(a, b = [1, 2], c = (x, y) => x)").expect("params");
        assert_eq!(parsed.len(), 3);
        assert!(matches!(&parsed[0], Pattern::Identifier(id) if id.name == "a"));
        match &parsed[2] {
            Pattern::Assignment(assign) => {
                assert!(matches!(&*assign.left, Pattern::Identifier(id) if id.name == "c"));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_rest_and_destructuring() {
        let parsed = params("({ a, b }, [c], ...rest)").expect("params");
        let kinds: Vec<_> = parsed.iter().map(Pattern::kind).collect();
        assert_eq!(kinds, vec!["ObjectPattern", "ArrayPattern", "RestElement"]);
    }

    #[test]
    fn test_trailing_comma_and_empty() {
        assert_eq!(params("(a, b,)").expect("params").len(), 2);
        assert!(params("()").expect("params").is_empty());
    }

    #[test]
    fn test_invalid_params() {
        assert!(params("(...rest, a)").is_err());
        assert!(params("(a = )").is_err());
        assert!(params("(1)").is_err());
        assert!(params("(a b)").is_err());
        assert!(params("(a").is_err());
    }
}
