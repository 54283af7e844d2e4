//! Ready-made parse callbacks.
//!
//! ```ignore
//! let table = ParseTable::new()
//!     .with("NUM", ParseEntry::new(0).with_first(literal()))
//!     .with("-", ParseEntry::new(10)
//!         .with_first(prefix(unary_factory, 100))
//!         .with_next(infix(binary_factory)))
//!     .with("^", ParseEntry::new(30).with_next(infix_r(binary_factory)));
//! ```

use std::sync::Arc;

use tdop_ir::{BinaryOperator, NodeRef, Result, Token, TokenNode, UnaryOperator};

use crate::Parser;

/// `first` callback turning the token into a [`TokenNode`] leaf.
pub fn literal<A>() -> impl Fn(&mut Parser<A>, Token) -> Result<NodeRef> + Clone {
    |_, token| Ok(TokenNode::new(token).into_ref())
}

/// `first` callback for a prefix operator: parses the operand at `power`
/// and combines it with `factory(parser, op, operand)`.
pub fn prefix<A, F>(factory: F, power: i32) -> impl Fn(&mut Parser<A>, Token) -> Result<NodeRef>
where
    F: Fn(&mut Parser<A>, Token, NodeRef) -> Result<NodeRef>,
{
    move |parser, op| {
        let operand = parser.expression(power)?;
        factory(parser, op, operand)
    }
}

/// Left-associative `next` callback: the right operand is parsed at the
/// operator's own power, so `a - b - c` groups as `(a - b) - c`.
pub fn infix<A, F>(factory: F) -> impl Fn(&mut Parser<A>, NodeRef, Token) -> Result<NodeRef>
where
    F: Fn(&mut Parser<A>, NodeRef, NodeRef, Token) -> Result<NodeRef>,
{
    move |parser, left, op| {
        let power = parser.power_of(&op)?;
        let right = parser.expression(power)?;
        factory(parser, left, right, op)
    }
}

/// Right-associative `next` callback: the right operand is parsed at one
/// less than the operator's power, so `a ^ b ^ c` groups as `a ^ (b ^ c)`.
pub fn infix_r<A, F>(factory: F) -> impl Fn(&mut Parser<A>, NodeRef, Token) -> Result<NodeRef>
where
    F: Fn(&mut Parser<A>, NodeRef, NodeRef, Token) -> Result<NodeRef>,
{
    move |parser, left, op| {
        let power = parser.power_of(&op)?;
        let right = parser.expression(power - 1)?;
        factory(parser, left, right, op)
    }
}

/// Builds a [`UnaryOperator`] spanning the operator through the operand.
pub fn unary_factory<A>(_: &mut Parser<A>, op: Token, operand: NodeRef) -> Result<NodeRef> {
    Ok(Arc::new(UnaryOperator::new(op, operand)?))
}

/// Builds a [`BinaryOperator`] spanning the left through the right operand.
pub fn binary_factory<A>(
    _: &mut Parser<A>,
    left: NodeRef,
    right: NodeRef,
    op: Token,
) -> Result<NodeRef> {
    Ok(Arc::new(BinaryOperator::new(op, left, right)?))
}
