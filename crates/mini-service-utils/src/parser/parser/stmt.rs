//! Statement parsing

use super::{expr, ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::Token;

/// Parse a statement: an expression with an optional `;`, or a lone `;`.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.current_span();

    if parser.check(&Token::Semicolon) {
        parser.advance();
        return Ok(Statement::Empty(start));
    }

    let expression = expr::parse_expression(parser)?;

    match parser.current() {
        Token::Semicolon => {
            parser.advance();
        }
        Token::Eof => {}
        _ => return Err(parser.unexpected_token(&[Token::Semicolon])),
    }

    let end = parser.previous_span();
    Ok(Statement::Expression(ExpressionStatement {
        expression,
        span: parser.combine_spans(&start, &end),
    }))
}
