//! Skipping and error recovery.
//!
//! Everything the parser does not need to understand (bodies, default
//! values, destructuring patterns, trailing expressions) is stepped over by
//! matching brackets instead of being parsed.

use super::{ParseError, Parser};
use crate::parser::token::{Span, Token};

/// Skip tokens until the end of the current statement.
///
/// Stops after a top-level `;` or at EOF. Brackets are balanced so a
/// statement boundary inside a body is not mistaken for the end.
pub fn sync_to_statement_boundary(parser: &mut Parser) {
    let mut depth = 0usize;

    while !parser.at_eof() {
        match parser.current() {
            Token::Semicolon if depth == 0 => {
                parser.advance();
                return;
            }
            token if token.is_opening() => depth += 1,
            token if token.is_closing() => depth = depth.saturating_sub(1),
            _ => {}
        }
        parser.advance();
    }
}

/// Skip a balanced group starting at the current opening token.
///
/// Used for destructuring patterns and computed keys, which sit in the
/// function head, so a missing closer is an error.
pub fn skip_balanced(parser: &mut Parser) -> Result<Span, ParseError> {
    let open = parser.current().clone();
    let start = parser.current_span();
    let mut stack = match closer_for(&open) {
        Some(close) => vec![close],
        None => return Err(parser.unexpected_token(&[Token::LeftBrace, Token::LeftBracket])),
    };
    parser.advance();

    while let Some(expected) = stack.last().cloned() {
        let token = parser.current().clone();
        if token == Token::Eof {
            return Err(ParseError::unclosed_delimiter(open, start));
        }
        if token == expected {
            stack.pop();
        } else if let Some(close) = closer_for(&token) {
            stack.push(close);
        } else if token.is_closing() {
            return Err(parser.unexpected_token(&[expected]));
        }
        parser.advance();
    }

    let end = parser.previous_span();
    Ok(parser.combine_spans(&start, &end))
}

/// Skip a function body starting at `{`.
///
/// Only braces are counted. An unclosed body is recorded and the rest of the
/// input is taken as the body.
pub fn skip_block(parser: &mut Parser) -> Result<Span, ParseError> {
    let start = parser.expect(Token::LeftBrace)?;
    let mut depth = 1usize;

    while depth > 0 {
        if parser.at_eof() {
            parser.recover(ParseError::unclosed_delimiter(Token::LeftBrace, start));
            break;
        }
        match parser.current() {
            Token::LeftBrace => depth += 1,
            Token::RightBrace => depth -= 1,
            _ => {}
        }
        parser.advance();
    }

    let end = parser.previous_span();
    Ok(parser.combine_spans(&start, &end))
}

/// Skip an expression whose structure does not matter.
///
/// Stops before a top-level `,`, `;` or closing bracket. Returns `None` when
/// nothing was consumed.
pub fn skip_expression(parser: &mut Parser) -> Option<Span> {
    let start = parser.current_span();
    let from = parser.checkpoint();
    let mut depth = 0usize;

    loop {
        match parser.current() {
            Token::Eof => break,
            Token::Comma | Token::Semicolon if depth == 0 => break,
            token if token.is_closing() => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            token if token.is_opening() => depth += 1,
            _ => {}
        }
        parser.advance();
    }

    if parser.checkpoint().pos == from.pos {
        return None;
    }
    let end = parser.previous_span();
    Some(parser.combine_spans(&start, &end))
}

fn closer_for(token: &Token) -> Option<Token> {
    match token {
        Token::LeftParen => Some(Token::RightParen),
        Token::LeftBrace => Some(Token::RightBrace),
        Token::LeftBracket => Some(Token::RightBracket),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_balanced_nested() {
        let mut parser = Parser::new("{ a, b: [c, { d }] } = x");
        let span = skip_balanced(&mut parser).expect("balanced");
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 20);
        assert!(parser.check(&Token::Equal));
    }

    #[test]
    fn test_skip_balanced_unclosed() {
        let mut parser = Parser::new("[a, { b ]");
        assert!(skip_balanced(&mut parser).is_err());
    }

    #[test]
    fn test_skip_block_records_unclosed() {
        let mut parser = Parser::new("{ if (x) { return 1 }");
        let span = skip_block(&mut parser).expect("loose block");
        assert_eq!(span.start, 0);
        assert!(parser.at_eof());
        assert_eq!(parser.errors.len(), 1);
    }

    #[test]
    fn test_skip_expression_stops_at_delimiters() {
        let mut parser = Parser::new("f(1, 2) + [3, 4], next");
        let span = skip_expression(&mut parser).expect("consumed");
        assert_eq!(span.start, 0);
        assert!(parser.check(&Token::Comma));

        let mut parser = Parser::new(")");
        assert!(skip_expression(&mut parser).is_none());
    }

    #[test]
    fn test_sync_to_statement_boundary() {
        let mut parser = Parser::new("a { ; } b; c");
        sync_to_statement_boundary(&mut parser);
        assert_eq!(parser.current(), &Token::Identifier("c".into()));
    }
}
