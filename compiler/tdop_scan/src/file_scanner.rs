//! Byte-stream scanner.
//!
//! Decodes UTF-8 from any [`Read`] source through a fixed 4 KiB buffer.
//! `start` is the next unread byte and `end` is one past the last valid
//! byte; `start == end` means the buffer is drained.
//!
//! # Decoding
//!
//! ASCII bytes take a fast path. A byte with the high bit set triggers a
//! refill until at least [`UTF8_MAX`] bytes are buffered (or the source is
//! exhausted), then one rune is decoded. An undecodable byte is consumed
//! alone, decodes as [`Rune::ERR`] and takes one column; it is reported as
//! [`Error::BadEncoding`] unless the configured handler swallows it, in
//! which case U+FFFD is produced instead.
//!
//! # I/O Errors
//!
//! A read failure is deferred: bytes already buffered are delivered first,
//! then the error is returned once, then EOF forever. No read is attempted
//! after the source reported EOF or an error. A failure hit while looking
//! past a CR ends the line as if input had ended there; the error follows
//! the newline.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use smallvec::{smallvec, SmallVec};
use tdop_ir::{Char, Error, Location, Result, Rune};
use tracing::{debug, trace};

use crate::{Disposition, LineStyle, Scanner};

/// Size of the decode buffer.
pub const BUFFER_SIZE: usize = 4096;

/// Longest UTF-8 sequence.
const UTF8_MAX: usize = 4;

/// Decides the fate of an encoding error.
///
/// Returning `None` swallows the error (the scanner substitutes U+FFFD);
/// returning `Some` surfaces that error from `next_char`.
pub type EncodingErrorHandler = Arc<dyn Fn(Error) -> Option<Error> + Send + Sync>;

/// Construction options for [`FileScanner`].
#[derive(Clone)]
pub struct FileScannerOptions {
    pub tab_stop: u32,
    pub line_style: LineStyle,
    pub encoding_error_handler: Option<EncodingErrorHandler>,
}

impl FileScannerOptions {
    #[must_use]
    pub fn with_tab_stop(mut self, tab_stop: u32) -> Self {
        self.tab_stop = tab_stop;
        self
    }

    #[must_use]
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    #[must_use]
    pub fn with_encoding_error_handler(
        mut self,
        handler: impl Fn(Error) -> Option<Error> + Send + Sync + 'static,
    ) -> Self {
        self.encoding_error_handler = Some(Arc::new(handler));
        self
    }
}

impl Default for FileScannerOptions {
    fn default() -> Self {
        FileScannerOptions {
            tab_stop: 8,
            line_style: LineStyle::Unknown,
            encoding_error_handler: None,
        }
    }
}

impl fmt::Debug for FileScannerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileScannerOptions")
            .field("tab_stop", &self.tab_stop)
            .field("line_style", &self.line_style)
            .field("encoding_error_handler", &self.encoding_error_handler.is_some())
            .finish()
    }
}

/// Scanner over a byte source.
pub struct FileScanner<R> {
    /// `None` once the source reported EOF or an error.
    source: Option<R>,
    buf: Box<[u8; BUFFER_SIZE]>,
    start: usize,
    end: usize,
    /// Read failure waiting for the buffer to drain.
    pending: Option<io::Error>,
    /// Error to return before anything else, raised while ending a line.
    deferred: Option<Error>,
    location: Location,
    /// Rune held back by line-ending processing, or `Rune::SENTINEL`.
    saved: Rune,
    style: LineStyle,
    tab_stop: u32,
    on_encoding_error: Option<EncodingErrorHandler>,
}

impl<R: Read> FileScanner<R> {
    /// Scanner with default options.
    pub fn new(source: R, location: Location) -> Self {
        Self::with_options(source, location, FileScannerOptions::default())
    }

    pub fn with_options(source: R, location: Location, options: FileScannerOptions) -> Self {
        FileScanner {
            source: Some(source),
            buf: Box::new([0; BUFFER_SIZE]),
            start: 0,
            end: 0,
            pending: None,
            deferred: None,
            location,
            saved: Rune::SENTINEL,
            style: options.line_style,
            tab_stop: options.tab_stop,
            on_encoding_error: options.encoding_error_handler,
        }
    }

    /// The line style in effect; changes once when starting from `Unknown`.
    pub fn line_style(&self) -> LineStyle {
        self.style
    }

    /// Location of the most recently returned character.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Shift unread bytes to the front and read once from the source.
    fn fill(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        loop {
            match source.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    trace!(location = %self.location, "source exhausted");
                    self.source = None;
                }
                Ok(n) => {
                    trace!(bytes = n, "buffer filled");
                    self.end += n;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    debug!(error = %err, buffered = self.end - self.start, "read failed; deferring");
                    self.pending = Some(err);
                    self.source = None;
                }
            }
            return;
        }
    }

    /// Decode one rune. `Ok(Rune::EOF)` at end of input, `Ok(Rune::ERR)`
    /// for an undecodable byte; `Err` only for read failures.
    fn decode(&mut self) -> Result<Rune> {
        if self.start == self.end {
            self.fill();
            if self.start == self.end {
                return match self.pending.take() {
                    Some(err) => Err(err.into()),
                    None => Ok(Rune::EOF),
                };
            }
        }

        let first = self.buf[self.start];
        if first.is_ascii() {
            self.start += 1;
            return Ok(Rune::from(char::from(first)));
        }

        while self.end - self.start < UTF8_MAX && self.source.is_some() {
            self.fill();
        }
        let window = &self.buf[self.start..self.end.min(self.start + UTF8_MAX)];
        match decode_utf8(window) {
            Some(c) => {
                self.start += c.len_utf8();
                Ok(Rune::from(c))
            }
            None => {
                self.start += 1;
                Ok(Rune::ERR)
            }
        }
    }

    /// Account for an undecodable byte: it occupies one column whether or
    /// not the error surfaces.
    fn bad_encoding(&mut self) -> Result<Char> {
        self.location.incr(Rune::ERR, self.tab_stop);
        let err = Error::BadEncoding.at(self.location.clone());
        debug!(error = %err, "undecodable byte");
        let surfaced = match &self.on_encoding_error {
            Some(handler) => handler(err),
            None => Some(err),
        };
        match surfaced {
            Some(err) => Err(err),
            None => Ok(Char::new(Rune::REPLACEMENT, self.location.clone())),
        }
    }

    /// Run the line-ending state machine starting from a CR or LF.
    fn end_line(&mut self, first: Rune) -> Rune {
        let mut seq: SmallVec<[Rune; 2]> = smallvec![first];
        let mut failed = false;
        loop {
            let (disposition, next) = self.style.accept(&seq);
            if next != self.style {
                debug!(from = ?self.style, to = ?next, "line style detected");
                self.style = next;
            }
            match disposition {
                Disposition::More => match self.decode() {
                    Ok(next) => seq.push(next),
                    Err(err) => {
                        // The line ends here; the error comes out next.
                        self.deferred = Some(err);
                        failed = true;
                        seq.push(Rune::EOF);
                    }
                },
                Disposition::Newline => return Rune::NEWLINE,
                Disposition::NewlineSave | Disposition::Space => {
                    if let Some(&extra) = seq.get(1).filter(|_| !failed) {
                        self.saved = extra;
                    }
                    return if disposition == Disposition::Space {
                        Rune::SPACE
                    } else {
                        Rune::NEWLINE
                    };
                }
            }
        }
    }
}

impl FileScanner<File> {
    /// Open `path` for scanning; locations are named after the path.
    pub fn open(path: impl AsRef<Path>, options: FileScannerOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let location = Location::file(path.display().to_string());
        Ok(Self::with_options(file, location, options))
    }
}

impl<R: Read> Scanner for FileScanner<R> {
    fn next_char(&mut self) -> Result<Char> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        let mut rune = if self.saved == Rune::SENTINEL {
            self.decode()?
        } else {
            std::mem::replace(&mut self.saved, Rune::SENTINEL)
        };
        if rune == Rune::CARRIAGE_RETURN || rune == Rune::NEWLINE {
            rune = self.end_line(rune);
        }
        if rune == Rune::ERR {
            return self.bad_encoding();
        }
        self.location.incr(rune, self.tab_stop);
        Ok(Char::new(rune, self.location.clone()))
    }
}

/// Decode the first character of `window`, which starts with a non-ASCII byte.
fn decode_utf8(window: &[u8]) -> Option<char> {
    let valid = match std::str::from_utf8(window) {
        Ok(text) => text,
        Err(err) => std::str::from_utf8(&window[..err.valid_up_to()]).ok()?,
    };
    valid.chars().next()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
