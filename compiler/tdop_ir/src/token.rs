//! Tokens: the unit passed from lexer to parser.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{Location, Node};

/// Opaque semantic value carried by a token.
///
/// Blanket-implemented for every `'static` type that can be printed and
/// shared across threads. Recover the concrete type with
/// [`Token::value_as`].
pub trait Value: Any + fmt::Debug + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + fmt::Display + Send + Sync> Value for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A lexical token.
///
/// Cloning is cheap: every heap field is reference counted, so grammar
/// code can freely attach the same token to several AST wrappers.
#[derive(Clone, Debug)]
pub struct Token {
    pub kind: Arc<str>,
    pub location: Option<Location>,
    pub value: Option<Arc<dyn Value>>,
    pub text: Option<Arc<str>>,
}

impl Token {
    pub fn new(kind: impl Into<Arc<str>>, location: impl Into<Option<Location>>) -> Self {
        Token {
            kind: kind.into(),
            location: location.into(),
            value: None,
            text: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Value) -> Self {
        self.value = Some(Arc::new(value));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The semantic value, if present and of type `T`.
    pub fn value_as<T: Any>(&self) -> Option<&T> {
        self.value.as_deref()?.as_any().downcast_ref::<T>()
    }

    /// Whether this token is of type `kind`.
    #[inline]
    pub fn is(&self, kind: &str) -> bool {
        &*self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{loc}: ")?;
        }
        write!(f, "{} token", self.kind)?;
        if let Some(value) = &self.value {
            write!(f, ": {value}")?;
        }
        Ok(())
    }
}

impl Node for Token {
    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn token(&self) -> Option<&Token> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
