//! Expression parsing
//!
//! Recognizes the expression forms a function's source text can take:
//! arrow functions, function expressions, and calls (which is how method
//! shorthand reads once it is out of its object). Anything else becomes
//! [`Expression::Unsupported`] tagged with its kind.

use super::guards::nested;
use super::{pattern, recovery, ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::{Span, Token};

/// Parse an expression.
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    nested(parser, "expression", |parser| {
        let expression = parse_primary(parser)?;
        if ends_expression(parser.current()) {
            Ok(expression)
        } else {
            Ok(parse_continuation(parser, expression))
        }
    })
}

fn ends_expression(token: &Token) -> bool {
    matches!(token, Token::Eof | Token::Comma | Token::Semicolon) || token.is_closing()
}

/// A complete expression followed by more syntax, as in `fn()` or `a.b`.
fn parse_continuation(parser: &mut Parser, expression: Expression) -> Expression {
    let kind = match parser.current() {
        Token::LeftParen => "CallExpression",
        Token::Dot | Token::LeftBracket => "MemberExpression",
        Token::Equal => "AssignmentExpression",
        Token::Question => "ConditionalExpression",
        Token::Template(_) => "TaggedTemplateExpression",
        Token::Star => "BinaryExpression",
        Token::Operator(op) => operator_kind(op),
        _ => "UnknownExpression",
    };

    let start = *expression.span();
    let span = match recovery::skip_expression(parser) {
        Some(rest) => parser.combine_spans(&start, &rest),
        None => start,
    };
    unsupported(kind, span)
}

fn operator_kind(op: &str) -> &'static str {
    match op {
        "?." => "MemberExpression",
        "++" | "--" => "UpdateExpression",
        "&&" | "||" | "??" => "LogicalExpression",
        "==" | "===" | "!=" | "!==" | "<=" | ">=" => "BinaryExpression",
        op if op.ends_with('=') => "AssignmentExpression",
        _ => "BinaryExpression",
    }
}

/// Parse primary expression
fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.current_span();

    match parser.current().clone() {
        Token::LeftParen => parse_parenthesized(parser, start),
        Token::Function => parse_function(parser, false, start),
        Token::Async => parse_async(parser, start),

        // Generator method: *name(a) {}
        Token::Star => {
            parser.advance();
            parse_method(parser, false, true, start)
        }

        Token::Identifier(name) => match parser.peek().clone() {
            Token::Arrow => {
                parser.advance();
                let param = Pattern::Identifier(Identifier::new(name, start));
                finish_arrow(parser, vec![param], false, start)
            }
            Token::LeftParen => parse_method(parser, false, false, start),
            _ => {
                parser.advance();
                Ok(Expression::Identifier(Identifier::new(name, start)))
            }
        },

        Token::String(_) | Token::Number(_) | Token::PrivateName(_) => {
            if parser.peek() == &Token::LeftParen {
                parse_method(parser, false, false, start)
            } else {
                parser.advance();
                Ok(unsupported("Literal", start))
            }
        }

        // Either a computed method key or an array literal
        Token::LeftBracket => {
            let checkpoint = parser.checkpoint();
            let span = recovery::skip_balanced(parser)?;
            if parser.check(&Token::LeftParen) {
                parser.restore(checkpoint);
                parse_method(parser, false, false, start)
            } else {
                Ok(unsupported("ArrayExpression", span))
            }
        }

        Token::LeftBrace => {
            let span = recovery::skip_balanced(parser)?;
            Ok(unsupported("ObjectExpression", span))
        }

        Token::Template(_) => {
            parser.advance();
            Ok(unsupported("TemplateLiteral", start))
        }

        Token::Regex(_) => {
            parser.advance();
            Ok(unsupported("Literal", start))
        }

        found => Err(ParseError::invalid_syntax(
            format!("Expected expression, found {}", found),
            start,
        )),
    }
}

/// `( ... )`: an arrow parameter list or a parenthesized expression.
fn parse_parenthesized(parser: &mut Parser, start: Span) -> Result<Expression, ParseError> {
    let checkpoint = parser.checkpoint();
    if let Ok(params) = pattern::parse_params(parser) {
        if parser.check(&Token::Arrow) {
            return finish_arrow(parser, params, false, start);
        }
    }
    parser.restore(checkpoint);

    parser.expect(Token::LeftParen)?;
    if parser.check(&Token::RightParen) {
        return Err(ParseError::invalid_syntax(
            "Empty parentheses must be followed by =>",
            parser.current_span(),
        ));
    }

    let mut inner = parse_expression(parser)?;

    if parser.check(&Token::Comma) {
        while parser.check(&Token::Comma) {
            parser.advance();
            recovery::skip_expression(parser);
        }
        let end = parser.previous_span();
        inner = unsupported("SequenceExpression", parser.combine_spans(inner.span(), &end));
    }

    match parser.current() {
        Token::RightParen => {
            parser.advance();
        }
        // A trailing line comment can swallow the closing parenthesis
        Token::Eof => {
            let error = parser.unexpected_token(&[Token::RightParen]);
            parser.recover(error);
        }
        _ => return Err(parser.unexpected_token(&[Token::RightParen])),
    }

    Ok(inner)
}

/// `function [*] [name] (params) { body }`
fn parse_function(parser: &mut Parser, is_async: bool, start: Span) -> Result<Expression, ParseError> {
    parser.expect(Token::Function)?;

    let is_generator = parser.check(&Token::Star);
    if is_generator {
        parser.advance();
    }

    let name_span = parser.current_span();
    let name = match parser.current().clone() {
        Token::Identifier(name) => Some(name),
        Token::Async => Some("async".to_string()),
        _ => None,
    }
    .map(|name| {
        parser.advance();
        Identifier::new(name, name_span)
    });

    let params = pattern::parse_params(parser)?;
    let body = recovery::skip_block(parser)?;

    Ok(Expression::Function(FunctionExpression {
        name,
        params,
        is_async,
        is_generator,
        span: parser.combine_spans(&start, &body),
    }))
}

/// Everything that can follow `async`, with `start` on the `async` token.
fn parse_async(parser: &mut Parser, start: Span) -> Result<Expression, ParseError> {
    // `async => x` names its parameter `async`
    if parser.peek() == &Token::Arrow {
        parser.advance();
        let param = Pattern::Identifier(Identifier::new("async", start));
        return finish_arrow(parser, vec![param], false, start);
    }

    match parser.peek().clone() {
        Token::Function => {
            parser.advance();
            parse_function(parser, true, start)
        }

        Token::LeftParen => {
            let checkpoint = parser.checkpoint();
            parser.advance();
            if let Ok(params) = pattern::parse_params(parser) {
                if parser.check(&Token::Arrow) {
                    return finish_arrow(parser, params, true, start);
                }
            }
            parser.restore(checkpoint);
            // A call to something named `async`, or the `async(a) {}` method
            parse_method(parser, false, false, start)
        }

        Token::Star => {
            parser.advance();
            parser.advance();
            parse_method(parser, true, true, start)
        }

        next if next.as_name().is_some() => {
            parser.advance();
            if parser.peek() == &Token::Arrow {
                let param_span = parser.advance();
                let name = next.as_name().unwrap_or_default().to_string();
                let param = Pattern::Identifier(Identifier::new(name, param_span));
                finish_arrow(parser, vec![param], true, start)
            } else {
                parse_method(parser, true, false, start)
            }
        }

        Token::String(_) | Token::Number(_) | Token::PrivateName(_) | Token::LeftBracket => {
            parser.advance();
            parse_method(parser, true, false, start)
        }

        _ => {
            parser.advance();
            Ok(Expression::Identifier(Identifier::new("async", start)))
        }
    }
}

/// `key(args) [{ body }]`, with the current token on the key.
fn parse_method(
    parser: &mut Parser,
    is_async: bool,
    is_generator: bool,
    start: Span,
) -> Result<Expression, ParseError> {
    let key_span = parser.current_span();
    let callee = match parser.current().clone() {
        Token::LeftBracket => Callee::Computed(recovery::skip_balanced(parser)?),
        Token::String(_) | Token::Number(_) | Token::PrivateName(_) => {
            Callee::Literal(parser.advance())
        }
        token => match token.as_name() {
            Some(name) => {
                parser.advance();
                Callee::Identifier(Identifier::new(name, key_span))
            }
            None => {
                return Err(ParseError::invalid_syntax(
                    format!("Expected method name, found {}", token),
                    key_span,
                ))
            }
        },
    };

    let arguments = pattern::parse_params(parser)?;
    let body = if parser.check(&Token::LeftBrace) {
        Some(recovery::skip_block(parser)?)
    } else {
        None
    };

    let end = parser.previous_span();
    Ok(Expression::Call(CallExpression {
        callee,
        arguments,
        is_async,
        is_generator,
        body,
        span: parser.combine_spans(&start, &end),
    }))
}

/// Consume `=>` and the arrow body.
fn finish_arrow(
    parser: &mut Parser,
    params: Vec<Pattern>,
    is_async: bool,
    start: Span,
) -> Result<Expression, ParseError> {
    parser.expect(Token::Arrow)?;

    let block_body = parser.check(&Token::LeftBrace);
    if block_body {
        recovery::skip_block(parser)?;
    } else if recovery::skip_expression(parser).is_none() {
        let error = ParseError::invalid_syntax("Missing arrow function body", parser.current_span());
        parser.recover(error);
    }

    let end = parser.previous_span();
    Ok(Expression::Arrow(ArrowFunction {
        params,
        is_async,
        block_body,
        span: parser.combine_spans(&start, &end),
    }))
}

fn unsupported(kind: &'static str, span: Span) -> Expression {
    Expression::Unsupported(UnsupportedExpression { kind, span })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Expression {
        let mut parser = Parser::new(source);
        parse_expression(&mut parser).expect("expression")
    }

    #[test]
    fn test_async_forms() {
        match parse("async (a, b) => a") {
            Expression::Arrow(arrow) => {
                assert!(arrow.is_async);
                assert_eq!(arrow.params.len(), 2);
                assert!(!arrow.block_body);
            }
            other => panic!("expected arrow, got {:?}", other),
        }
        match parse("async(a, b)") {
            Expression::Call(call) => {
                assert!(!call.is_async);
                assert!(call.body.is_none());
                assert!(matches!(&call.callee, Callee::Identifier(id) if id.name == "async"));
            }
            other => panic!("expected call, got {:?}", other),
        }
        match parse("async *stream(source) { yield source }") {
            Expression::Call(call) => assert!(call.is_async && call.is_generator),
            other => panic!("expected call, got {:?}", other),
        }
        assert_eq!(parse("async").kind(), "Identifier");
    }

    #[test]
    fn test_continuations() {
        assert_eq!(parse("a ?? b").kind(), "LogicalExpression");
        assert_eq!(parse("a += 1").kind(), "AssignmentExpression");
        assert_eq!(parse("a ? b : c").kind(), "ConditionalExpression");
        assert_eq!(parse("tag`x`").kind(), "TaggedTemplateExpression");
    }

    #[test]
    fn test_arrow_body_stops_at_enclosing_delimiter() {
        let mut parser = Parser::new("a => f(a, 1)) rest");
        let expression = parse_expression(&mut parser).expect("arrow");
        assert_eq!(expression.kind(), "ArrowFunctionExpression");
        assert!(parser.check(&Token::RightParen));
    }

    #[test]
    fn test_missing_arrow_body_is_recovered() {
        let mut parser = Parser::new("(a) =>");
        let expression = parse_expression(&mut parser).expect("arrow");
        assert_eq!(expression.kind(), "ArrowFunctionExpression");
        assert_eq!(parser.errors.len(), 1);
    }

    #[test]
    fn test_deep_nesting_is_limited() {
        let source = format!("{}a{}", "(".repeat(200), ")".repeat(200));
        let mut parser = Parser::new(&source);
        assert!(parse_expression(&mut parser).is_err());
    }
}
