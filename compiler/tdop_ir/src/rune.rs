//! Runes and positioned characters.

use std::fmt;

use crate::Location;

/// One Unicode scalar value, or one of three reserved sentinels.
///
/// The sentinels live above `char::MAX` so they can never collide with
/// decoded input.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rune(u32);

impl Rune {
    /// End of input.
    pub const EOF: Rune = Rune(0x11_0000);
    /// Decode failure propagated inside a scanner.
    pub const ERR: Rune = Rune(0x11_0001);
    /// "No saved rune".
    pub const SENTINEL: Rune = Rune(0x11_0002);

    pub const NEWLINE: Rune = Rune('\n' as u32);
    pub const CARRIAGE_RETURN: Rune = Rune('\r' as u32);
    pub const TAB: Rune = Rune('\t' as u32);
    pub const FORM_FEED: Rune = Rune('\u{c}' as u32);
    pub const SPACE: Rune = Rune(' ' as u32);
    pub const REPLACEMENT: Rune = Rune(char::REPLACEMENT_CHARACTER as u32);

    #[inline]
    pub const fn from_char(c: char) -> Self {
        Rune(c as u32)
    }

    /// The scalar value, or `None` for a sentinel.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    #[inline]
    pub const fn is_eof(self) -> bool {
        self.0 == Self::EOF.0
    }

    /// True for the three reserved values.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 > char::MAX as u32
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<char> for Rune {
    fn from(c: char) -> Self {
        Rune::from_char(c)
    }
}

impl PartialEq<char> for Rune {
    fn eq(&self, other: &char) -> bool {
        self.0 == *other as u32
    }
}

impl fmt::Debug for Rune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Rune::EOF => f.write_str("EOF"),
            Rune::ERR => f.write_str("ERR"),
            Rune::SENTINEL => f.write_str("SENTINEL"),
            _ => match self.as_char() {
                Some(c) => write!(f, "{c:?}"),
                None => write!(f, "U+{:X}", self.0),
            },
        }
    }
}

impl fmt::Display for Rune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_char() {
            Some(c) => write!(f, "{c}"),
            None => fmt::Debug::fmt(self, f),
        }
    }
}

/// A rune together with the span it occupies.
///
/// The location is `None` only for characters manufactured without a
/// source, such as the EOF returned by an empty chain of scanners.
#[derive(Clone, Debug, PartialEq)]
pub struct Char {
    pub rune: Rune,
    pub location: Option<Location>,
}

impl Char {
    pub fn new(rune: impl Into<Rune>, location: Location) -> Self {
        Char {
            rune: rune.into(),
            location: Some(location),
        }
    }

    /// EOF with no location.
    pub const fn eof() -> Self {
        Char {
            rune: Rune::EOF,
            location: None,
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rune.is_eof()
    }
}

impl fmt::Display for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{loc}: {:?}", self.rune),
            None => write!(f, "{:?}", self.rune),
        }
    }
}
