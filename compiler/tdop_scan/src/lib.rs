//! Character scanners.
//!
//! A [`Scanner`] yields positioned characters ([`Char`]) one at a time.
//! The building blocks compose leaf-first:
//!
//! - [`FileScanner`]: decodes a byte stream to runes, normalizes line
//!   endings according to a [`LineStyle`] and tracks tab-expanded columns.
//! - [`MemoizingScanner`]: records a scanner and replays it cyclically.
//! - [`ChainingScanner`]: concatenates scanners, swallowing inner EOFs.
//! - [`argument_scanner`]: a chain over command-line style arguments.
//!
//! # Errors
//!
//! `next_char` returns `Err` for I/O and encoding failures; the rune that
//! accompanies an error is always EOF at the error's location.

mod args;
mod chain;
mod file_scanner;
mod line_style;
mod memo;

pub use args::{argument_scanner, ArgumentScannerOptions};
pub use chain::ChainingScanner;
pub use file_scanner::{EncodingErrorHandler, FileScanner, FileScannerOptions, BUFFER_SIZE};
pub use line_style::{Disposition, LineStyle};
pub use memo::MemoizingScanner;

use tdop_ir::{Char, Result};

/// Source of positioned characters.
pub trait Scanner {
    /// Produce the next character.
    ///
    /// After the first EOF every further call yields EOF again.
    fn next_char(&mut self) -> Result<Char>;
}

impl<S: Scanner + ?Sized> Scanner for Box<S> {
    fn next_char(&mut self) -> Result<Char> {
        (**self).next_char()
    }
}

impl<S: Scanner + ?Sized> Scanner for &mut S {
    fn next_char(&mut self) -> Result<Char> {
        (**self).next_char()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
