//! Token source contract and the list-backed source.

use std::collections::VecDeque;

use tdop_ir::Token;

/// Anything that yields tokens until it returns `None`.
///
/// Once a stream has returned `None` it is exhausted; callers do not poll it
/// again.
pub trait TokenStream {
    fn next_token(&mut self) -> Option<Token>;
}

impl<T: TokenStream + ?Sized> TokenStream for Box<T> {
    fn next_token(&mut self) -> Option<Token> {
        (**self).next_token()
    }
}

impl<T: TokenStream + ?Sized> TokenStream for &mut T {
    fn next_token(&mut self) -> Option<Token> {
        (**self).next_token()
    }
}

/// Replays a prepared list of tokens in order, then `None` forever.
#[derive(Clone, Debug, Default)]
pub struct ListLexer {
    tokens: VecDeque<Token>,
}

impl ListLexer {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        ListLexer {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Tokens not yet returned.
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl TokenStream for ListLexer {
    fn next_token(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}

impl FromIterator<Token> for ListLexer {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter)
    }
}
