//! Calculator grammar shared by the unit tests.

#![allow(clippy::unwrap_used)]

use tdop_ir::{Error, FileLocation, Location, NodeRef, Position, Result, Token};
use tdop_lexer::ListLexer;

use crate::operators::{binary_factory, infix, infix_r, literal, prefix, unary_factory};
use crate::{ParseEntry, ParseTable, Parser};

/// Tokens for space-separated words, located by column in file `t`.
///
/// Integers become `NUM` tokens carrying an `i64`; every other word is a
/// token of that type.
pub(crate) fn tokens(src: &str) -> ListLexer {
    let mut col = 1;
    let mut out = Vec::new();
    for word in src.split(' ') {
        let len = u32::try_from(word.chars().count()).unwrap();
        if !word.is_empty() {
            let location = Location::from(FileLocation::span(
                "t",
                Position::new(1, col),
                Position::new(1, col + len),
            ));
            out.push(match word.parse::<i64>() {
                Ok(n) => Token::new("NUM", location).with_value(n),
                Err(_) => Token::new(word, location),
            });
        }
        col += len + 1;
    }
    ListLexer::new(out)
}

/// `( expr )`.
pub(crate) fn group<A>(parser: &mut Parser<A>, _open: Token) -> Result<NodeRef> {
    let inner = parser.expression(0)?;
    match parser.next_token() {
        Some(close) if close.is(")") => Ok(inner),
        Some(other) => {
            Err(Error::UnexpectedToken(other.kind().to_string()).at(other.location.clone()))
        }
        None => Err(Error::ExpectedToken),
    }
}

/// `print expr ;`
pub(crate) fn print<A>(parser: &mut Parser<A>, _keyword: Token) -> Result<NodeRef> {
    let value = parser.expression(0)?;
    match parser.next_token() {
        Some(end) if end.is(";") => Ok(value),
        Some(other) => {
            Err(Error::UnexpectedToken(other.kind().to_string()).at(other.location.clone()))
        }
        None => Err(Error::ExpectedToken),
    }
}

/// `+ -` at 10 (prefix at 100), `*` at 20, right-associative `**` at 30,
/// parentheses and a `print expr ;` statement.
pub(crate) fn calculator() -> ParseTable {
    let additive = || {
        ParseEntry::new(10)
            .with_first(prefix(unary_factory, 100))
            .with_next(infix(binary_factory))
    };
    ParseTable::new()
        .with("NUM", ParseEntry::new(0).with_first(literal()))
        .with("+", additive())
        .with("-", additive())
        .with("*", ParseEntry::new(20).with_next(infix(binary_factory)))
        .with("**", ParseEntry::new(30).with_next(infix_r(binary_factory)))
        .with("(", ParseEntry::new(0).with_first(group))
        .with(")", ParseEntry::new(0))
        .with(";", ParseEntry::new(0))
        .with("print", ParseEntry::new(0).with_stmt(print))
}

pub(crate) fn parser(src: &str) -> Parser {
    Parser::new(calculator(), tokens(src))
}

pub(crate) fn parse(src: &str) -> NodeRef {
    parser(src).expression(0).unwrap()
}
