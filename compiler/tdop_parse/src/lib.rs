//! Pratt parser runtime.
//!
//! A grammar is a [`ParseTable`] mapping token types to [`ParseEntry`]s:
//! a binding power plus up to three callbacks (`first` at the head of an
//! expression, `next` after a left operand, `stmt` at the head of a
//! statement). The [`Parser`] pulls tokens from a stack of
//! [`TokenStream`]s and dispatches them through the table on top of its
//! table stack.
//!
//! The [`operators`] module builds the common callbacks: literals,
//! prefix operators, left- and right-associative infix operators.
//!
//! [`TokenStream`]: tdop_lexer::TokenStream

pub mod operators;
mod parser;
mod push_back;
mod render;
mod table;

pub use parser::Parser;
pub use push_back::PushBackLexer;
pub use render::{sexpr, visualize, write_tree, Joiner, Profile};
pub use table::{FirstFn, NextFn, ParseEntry, ParseTable, StmtFn};

#[cfg(test)]
mod test_helpers;
