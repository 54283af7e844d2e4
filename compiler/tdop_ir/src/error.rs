//! Toolkit error taxonomy.
//!
//! Errors fall into four groups:
//! - input faults: [`Error::BadEncoding`], [`Error::Io`]
//! - location composition: [`Error::SplitLocation`]
//! - parser programmer errors: [`Error::NoTable`]
//! - parser input errors: [`Error::ExpectedToken`], [`Error::UnknownTokenType`],
//!   [`Error::UnexpectedToken`]
//!
//! Any of them may be wrapped once with a location prefix via [`Error::at`].

use std::error::Error as StdError;
use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::Location;

/// Result alias used across the toolkit.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every error the scanner, lexer and parser engines can raise.
///
/// `Clone` so that buffered scanner results can be replayed verbatim.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// `thru`/`thru_end` operands of differing shapes or files.
    #[error("location spans differing sources")]
    SplitLocation,

    /// Input bytes are not valid UTF-8.
    #[error("bad encoding")]
    BadEncoding,

    /// Input ran out where a sub-expression was required.
    #[error("expected token")]
    ExpectedToken,

    /// Token type absent from the current parse table.
    #[error("unknown token type {0:?}")]
    UnknownTokenType(String),

    /// Token type present but lacking the required first/next/stmt slot.
    #[error("unexpected {0:?} token")]
    UnexpectedToken(String),

    /// The parse-table stack is empty.
    #[error("no parse table")]
    NoTable,

    /// Failure reading the byte source.
    #[error(transparent)]
    Io(Arc<io::Error>),

    /// An error with a location prefix.
    #[error("{location}: {source}")]
    Located {
        location: Location,
        source: Box<Error>,
    },

    /// Grammar-supplied failure raised from a callback.
    #[error(transparent)]
    Custom(Arc<dyn StdError + Send + Sync>),
}

impl Error {
    /// Wrap a grammar-specific error.
    pub fn custom(error: impl StdError + Send + Sync + 'static) -> Self {
        Error::Custom(Arc::new(error))
    }

    /// Attach a location prefix.
    ///
    /// No-op when `location` is `None` or when the chain already carries a
    /// location.
    #[must_use]
    pub fn at(self, location: impl Into<Option<Location>>) -> Self {
        match location.into() {
            Some(location) if self.location().is_none() => Error::Located {
                location,
                source: Box::new(self),
            },
            _ => self,
        }
    }

    /// The innermost location recorded anywhere in the cause chain.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Error::Located { location, source } => source.location().or(Some(location)),
            Error::Custom(inner) => {
                let mut cause: Option<&(dyn StdError + 'static)> = Some(&**inner);
                while let Some(err) = cause {
                    if let Some(located) = err.downcast_ref::<Error>().and_then(Error::location) {
                        return Some(located);
                    }
                    cause = err.source();
                }
                None
            }
            _ => None,
        }
    }

    /// The error with every location wrapper removed.
    pub fn root(&self) -> &Error {
        match self {
            Error::Located { source, .. } => source.root(),
            _ => self,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self.root(), Error::Io(_))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}
