//! Data contracts shared by the tdop scanner, lexer and parser engines.
//!
//! - [`Rune`] and [`Char`]: positioned characters with reserved sentinels.
//! - [`Location`]: polymorphic source span (file or argument-list based).
//! - [`Error`]: the toolkit error taxonomy with location wrapping.
//! - [`Token`]: lexer output, itself a leaf AST node.
//! - [`Node`]: the AST node contract plus the bundled node shapes.

mod error;
mod location;
mod node;
mod rune;
mod token;

pub use error::{Error, Result};
pub use location::{ArgLocation, ArgPosition, CustomLocation, FileLocation, Location, Position};
pub use node::{
    strip_annotations, AnnotatedNode, BinaryOperator, Node, NodeRef, TokenNode, UnaryOperator,
};
pub use rune::{Char, Rune};
pub use token::{Token, Value};
