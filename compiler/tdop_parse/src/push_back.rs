//! One-shot token push-back over any token source.

use std::collections::VecDeque;

use tdop_ir::Token;
use tdop_lexer::TokenStream;

/// Token source with push-back.
///
/// Pushed tokens are returned before anything from the wrapped source. The
/// wrapped source is never polled again after it returns `None`.
#[derive(Debug)]
pub struct PushBackLexer<T> {
    source: T,
    pushed: VecDeque<Token>,
    exhausted: bool,
}

impl<T: TokenStream> PushBackLexer<T> {
    pub fn new(source: T) -> Self {
        PushBackLexer {
            source,
            pushed: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Make `token` the next one returned.
    pub fn push_back(&mut self, token: Token) {
        self.pushed.push_front(token);
    }

    /// Whether the wrapped source has run dry.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn into_inner(self) -> T {
        self.source
    }
}

impl<T: TokenStream> TokenStream for PushBackLexer<T> {
    fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.pushed.pop_front() {
            return Some(token);
        }
        if self.exhausted {
            return None;
        }
        let token = self.source.next_token();
        self.exhausted = token.is_none();
        token
    }
}
