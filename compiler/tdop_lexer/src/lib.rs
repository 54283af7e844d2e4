//! Backtracking lexer runtime.
//!
//! Characters flow from a [`Scanner`] into a [`BackTracker`], which keeps
//! enough history for recognizers to read speculatively and roll back. The
//! [`Lexer`] drives the classify/recognize loop over that buffer and
//! produces [`Token`]s through the [`TokenStream`] contract.
//!
//! Token sources other than the lexer itself:
//!
//! - [`ListLexer`]: replays a prepared list of tokens.
//! - [`AsyncLexer`]: runs any token source on a background thread and
//!   hands tokens over through a bounded channel.
//!
//! [`Scanner`]: tdop_scan::Scanner
//! [`Token`]: tdop_ir::Token

mod async_stream;
mod backtrack;
mod lexer;
mod stream;

pub use async_stream::{
    token_channel, AsyncLexer, AsyncOptions, AsyncTokenStream, TokenSender, DEFAULT_CAPACITY,
};
pub use backtrack::{BackTracker, Budget};
pub use lexer::{recognizer, CharStream, Classifier, Lexer, LexerState, Recognizer};
pub use stream::{ListLexer, TokenStream};
