//! Top-down operator precedence toolkit.
//!
//! The pipeline runs bytes through three engines:
//!
//! ```text
//! Read ─▶ FileScanner ─▶ Lexer ─▶ Parser ─▶ NodeRef
//!          (scan)        (lexer)   (parse)
//! ```
//!
//! Each engine lives in its own crate and is re-exported here:
//!
//! - [`scan`]: positioned characters from bytes or argument lists.
//! - [`lexer`]: the backtracking character buffer and the
//!   classify/recognize engine, plus token streams.
//! - [`parse`]: parse tables, the Pratt engine and tree rendering.
//!
//! The shared data contracts ([`Char`], [`Location`], [`Token`],
//! [`Node`], [`Error`]) are re-exported at the top level.
//!
//! # Example
//!
//! ```ignore
//! let table = ParseTable::new()
//!     .with("NUM", ParseEntry::new(0).with_first(operators::literal()))
//!     .with("+", ParseEntry::new(10).with_next(operators::infix(operators::binary_factory)));
//! let lexer = Lexer::new(FileScanner::new(source, Location::file("calc")), classify);
//! let tree = Parser::new(table, lexer).expression(0)?;
//! println!("{}", visualize(&tree, Profile::ROUNDED));
//! ```

use std::sync::Once;

pub use tdop_ir::{
    strip_annotations, AnnotatedNode, ArgLocation, ArgPosition, BinaryOperator, Char,
    CustomLocation, Error, FileLocation, Location, Node, NodeRef, Position, Result, Rune, Token,
    TokenNode, UnaryOperator, Value,
};
pub use tdop_lexer::{Lexer, LexerState, ListLexer, TokenStream};
pub use tdop_parse::{
    operators, sexpr, visualize, ParseEntry, ParseTable, Parser, Profile, PushBackLexer,
};
pub use tdop_scan::{FileScanner, Scanner};
pub use tdop_stack::{ensure_sufficient_stack, Stack};

/// Character scanners.
pub mod scan {
    pub use tdop_scan::*;
}

/// Backtracking lexer runtime.
pub mod lexer {
    pub use tdop_lexer::*;
}

/// Pratt parser runtime.
pub mod parse {
    pub use tdop_parse::*;
}

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Call once at startup. Controlled by `RUST_LOG`:
///
/// ```bash
/// RUST_LOG=tdop_lexer=trace cargo test
/// RUST_LOG=tdop_parse=debug,tdop_scan=debug my-tool input.txt
/// ```
///
/// Does nothing when `RUST_LOG` is unset, so embedding applications keep
/// control of their own subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed by the host application wins.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
