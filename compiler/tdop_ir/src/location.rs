//! Source locations.
//!
//! A [`Location`] is an inclusive-exclusive span. Two concrete shapes are
//! bundled: [`FileLocation`] (file name plus line/column) and
//! [`ArgLocation`] (argument index plus character index, for command-line
//! style inputs). Third-party shapes plug in through [`CustomLocation`].
//!
//! Scanners own a location and advance it one rune at a time with
//! [`Location::incr`]; every emitted character carries a snapshot.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{Error, Result, Rune};

/// Line/column pair; both 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

/// A span inside a named file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileLocation {
    pub file: Arc<str>,
    pub begin: Position,
    pub end: Position,
}

impl FileLocation {
    /// Empty span at line 1, column 1.
    pub fn new(file: impl Into<Arc<str>>) -> Self {
        FileLocation {
            file: file.into(),
            begin: Position::default(),
            end: Position::default(),
        }
    }

    pub fn span(file: impl Into<Arc<str>>, begin: Position, end: Position) -> Self {
        FileLocation {
            file: file.into(),
            begin,
            end,
        }
    }

    /// Advance past `rune`, expanding tabs to `tab_stop`.
    pub fn incr(&mut self, rune: Rune, tab_stop: u32) {
        match rune {
            Rune::EOF => self.begin = self.end,
            Rune::NEWLINE => {
                self.begin = self.end;
                self.end.line += 1;
                self.end.col = 1;
            }
            Rune::TAB => {
                let stop = tab_stop.max(1);
                self.begin = self.end;
                self.end.col += 1 + stop - self.end.col % stop;
            }
            Rune::FORM_FEED if self.begin.col <= 1 => {}
            _ => {
                self.begin = self.end;
                self.end.col += 1;
            }
        }
    }

    fn same_file(&self, other: &FileLocation) -> Result<()> {
        if self.file == other.file {
            Ok(())
        } else {
            Err(Error::SplitLocation)
        }
    }
}

impl fmt::Display for FileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (b, e) = (self.begin, self.end);
        if b == e || (b.line == e.line && e.col == b.col + 1) {
            write!(f, "{}:{}:{}", self.file, b.line, b.col)
        } else if b.line == e.line {
            write!(f, "{}:{}:{}-{}", self.file, b.line, b.col, e.col)
        } else {
            write!(f, "{}:{}:{}-{}:{}", self.file, b.line, b.col, e.line, e.col)
        }
    }
}

/// Argument index plus character index within that argument.
///
/// Index 0 is reserved for joiner text placed between arguments; real
/// arguments are numbered from 1. Character indices are 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgPosition {
    pub arg: u32,
    pub char: u32,
}

impl ArgPosition {
    pub const fn new(arg: u32, char: u32) -> Self {
        ArgPosition { arg, char }
    }
}

/// A span inside an argument list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArgLocation {
    pub begin: ArgPosition,
    pub end: ArgPosition,
}

impl ArgLocation {
    /// Empty span at the first character of argument `arg`.
    pub const fn new(arg: u32) -> Self {
        let start = ArgPosition::new(arg, 1);
        ArgLocation {
            begin: start,
            end: start,
        }
    }

    pub const fn span(begin: ArgPosition, end: ArgPosition) -> Self {
        ArgLocation { begin, end }
    }

    /// Newlines and tabs are ordinary characters here; EOF never advances.
    pub fn incr(&mut self, rune: Rune) {
        self.begin = self.end;
        if !rune.is_eof() {
            self.end.char += 1;
        }
    }
}

impl fmt::Display for ArgLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (b, e) = (self.begin, self.end);
        if b == e || (b.arg == e.arg && e.char == b.char + 1) {
            write!(f, "{}:{}", b.arg, b.char)
        } else if b.arg == e.arg {
            write!(f, "{}:{}-{}", b.arg, b.char, e.char)
        } else {
            write!(f, "{}:{}-{}:{}", b.arg, b.char, e.arg, e.char)
        }
    }
}

/// Extension point for location shapes the toolkit does not bundle.
///
/// Implementations are immutable; [`incr`](Self::incr) returns the
/// advanced location instead of mutating in place.
pub trait CustomLocation: fmt::Debug + fmt::Display + Send + Sync + 'static {
    fn thru(&self, other: &Location) -> Result<Location>;
    fn thru_end(&self, other: &Location) -> Result<Location>;
    fn incr(&self, rune: Rune, tab_stop: u32) -> Location;
    fn as_any(&self) -> &dyn Any;
}

/// A span in some source.
#[derive(Clone, Debug)]
pub enum Location {
    File(FileLocation),
    Arg(ArgLocation),
    Custom(Arc<dyn CustomLocation>),
}

impl Location {
    /// Empty span at the start of `file`.
    pub fn file(file: impl Into<Arc<str>>) -> Self {
        Location::File(FileLocation::new(file))
    }

    /// Empty span at the start of argument `arg`.
    pub fn arg(arg: u32) -> Self {
        Location::Arg(ArgLocation::new(arg))
    }

    /// Span from the start of `self` to the start of `other`.
    pub fn thru(&self, other: &Location) -> Result<Location> {
        match (self, other) {
            (Location::File(a), Location::File(b)) => {
                a.same_file(b)?;
                Ok(Location::File(FileLocation::span(a.file.clone(), a.begin, b.begin)))
            }
            (Location::Arg(a), Location::Arg(b)) => {
                Ok(Location::Arg(ArgLocation::span(a.begin, b.begin)))
            }
            (Location::Custom(a), _) => a.thru(other),
            _ => Err(Error::SplitLocation),
        }
    }

    /// Span from the start of `self` to the end of `other`.
    pub fn thru_end(&self, other: &Location) -> Result<Location> {
        match (self, other) {
            (Location::File(a), Location::File(b)) => {
                a.same_file(b)?;
                Ok(Location::File(FileLocation::span(a.file.clone(), a.begin, b.end)))
            }
            (Location::Arg(a), Location::Arg(b)) => {
                Ok(Location::Arg(ArgLocation::span(a.begin, b.end)))
            }
            (Location::Custom(a), _) => a.thru_end(other),
            _ => Err(Error::SplitLocation),
        }
    }

    /// Advance past one rune.
    pub fn incr(&mut self, rune: Rune, tab_stop: u32) {
        match self {
            Location::File(loc) => loc.incr(rune, tab_stop),
            Location::Arg(loc) => loc.incr(rune),
            Location::Custom(loc) => *self = loc.incr(rune, tab_stop),
        }
    }

    /// `thru_end` over optional operands; a missing operand yields `None`.
    pub fn span_opt(first: Option<&Location>, last: Option<&Location>) -> Result<Option<Location>> {
        match (first, last) {
            (Some(first), Some(last)) => first.thru_end(last).map(Some),
            _ => Ok(None),
        }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Location::File(a), Location::File(b)) => a == b,
            (Location::Arg(a), Location::Arg(b)) => a == b,
            (Location::Custom(a), Location::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(loc) => loc.fmt(f),
            Location::Arg(loc) => loc.fmt(f),
            Location::Custom(loc) => loc.fmt(f),
        }
    }
}

impl From<FileLocation> for Location {
    fn from(loc: FileLocation) -> Self {
        Location::File(loc)
    }
}

impl From<ArgLocation> for Location {
    fn from(loc: ArgLocation) -> Self {
        Location::Arg(loc)
    }
}
