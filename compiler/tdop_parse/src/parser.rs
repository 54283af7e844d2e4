//! The Pratt expression and statement engine.
//!
//! # Expressions
//!
//! `expression(rbp)` reads a token and calls its `first` callback to get
//! the left operand. It then keeps reading: each token whose binding power
//! exceeds `rbp` is handed to its `next` callback along with the operand
//! built so far; the first token that does not bind tightly enough is
//! pushed back and ends the expression.
//!
//! A `next` callback parses its right operand with `expression(power)` for
//! left associativity or `expression(power - 1)` for right associativity.
//!
//! # Token Sources
//!
//! Tokens come from the push-back stack first, then from the stream stack
//! top-down. A stream that runs dry is popped, so pushing a stream splices
//! its tokens in ahead of the rest of the input.

use std::fmt;
use std::rc::Rc;

use tdop_ir::{Error, Location, NodeRef, Result, Token};
use tdop_lexer::TokenStream;
use tdop_stack::{ensure_sufficient_stack, Stack};
use tracing::{debug, trace};

use crate::ParseTable;

/// Pratt parser over a stack of token streams.
///
/// `A` is application state the grammar callbacks can stack; it defaults
/// to `()`.
pub struct Parser<A = ()> {
    app_state: Stack<A>,
    tables: Stack<Rc<ParseTable<A>>>,
    streams: Stack<Box<dyn TokenStream>>,
    pushed: Stack<Token>,
    current: Option<Token>,
}

impl<A> Parser<A> {
    pub fn new(table: impl Into<Rc<ParseTable<A>>>, source: impl TokenStream + 'static) -> Self {
        Parser {
            app_state: Stack::new(),
            tables: Stack::with(table.into()),
            streams: Stack::with(Box::new(source)),
            pushed: Stack::new(),
            current: None,
        }
    }

    /// Seed the application-state stack.
    #[must_use]
    pub fn with_app_state(mut self, state: A) -> Self {
        self.app_state.push(state);
        self
    }

    // === Expressions and Statements ===

    /// Parse an expression whose operators all bind tighter than `rbp`.
    pub fn expression(&mut self, rbp: i32) -> Result<NodeRef> {
        ensure_sufficient_stack(|| self.expression_inner(rbp))
    }

    fn expression_inner(&mut self, rbp: i32) -> Result<NodeRef> {
        let last = self.current_location();
        let Some(token) = self.next_token() else {
            return Err(Error::ExpectedToken.at(last));
        };

        let table = self.table()?;
        let entry = table.get(token.kind()).ok_or_else(|| unknown(&token))?;
        let Some(first) = entry.first.clone() else {
            return Err(unexpected(&token));
        };
        trace!(kind = token.kind(), rbp, "first");
        let mut node = first(self, token)?;

        while let Some(token) = self.next_token() {
            let table = self.table()?;
            let entry = table.get(token.kind()).ok_or_else(|| unknown(&token))?;
            if rbp >= entry.power {
                self.push_back(token);
                break;
            }
            let Some(next) = entry.next.clone() else {
                return Err(unexpected(&token));
            };
            trace!(kind = token.kind(), power = entry.power, rbp, "next");
            node = next(self, node, token)?;
        }
        Ok(node)
    }

    /// Parse one statement; `Ok(None)` once the input is exhausted.
    pub fn statement(&mut self) -> Result<Option<NodeRef>> {
        let Some(token) = self.next_token() else {
            return Ok(None);
        };
        let table = self.table()?;
        let entry = table.get(token.kind()).ok_or_else(|| unknown(&token))?;
        let Some(stmt) = entry.stmt.clone() else {
            return Err(unexpected(&token));
        };
        trace!(kind = token.kind(), "stmt");
        stmt(self, token).map(Some)
    }

    /// Parse statements until the input is exhausted, stopping at the
    /// first error.
    pub fn statements(&mut self) -> Result<Vec<NodeRef>> {
        let mut nodes = Vec::new();
        while let Some(node) = self.statement()? {
            nodes.push(node);
        }
        Ok(nodes)
    }

    /// Binding power of `token`'s type in the current table.
    pub fn power_of(&self, token: &Token) -> Result<i32> {
        let table = self.tables.top().ok_or(Error::NoTable)?;
        table
            .get(token.kind())
            .map(|entry| entry.power)
            .ok_or_else(|| unknown(token))
    }

    // === Tokens ===

    /// Next token from the push-back stack or the stream stack.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = match self.pushed.pop() {
            Some(token) => Some(token),
            None => self.pull(),
        };
        self.current.clone_from(&token);
        token
    }

    fn pull(&mut self) -> Option<Token> {
        while let Some(stream) = self.streams.top_mut() {
            if let Some(token) = stream.next_token() {
                return Some(token);
            }
            self.streams.pop();
            debug!(remaining = self.streams.len(), "token stream exhausted");
        }
        None
    }

    /// The token most recently returned by [`next_token`](Self::next_token).
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn current_location(&self) -> Option<Location> {
        self.current.as_ref().and_then(|token| token.location.clone())
    }

    /// Make `token` the next one returned. Pushed tokens come back in LIFO
    /// order.
    pub fn push_back(&mut self, token: Token) {
        trace!(kind = token.kind(), "push back");
        self.pushed.push(token);
    }

    // === Tables ===

    /// The table in effect.
    pub fn table(&self) -> Result<Rc<ParseTable<A>>> {
        self.tables.top().cloned().ok_or(Error::NoTable)
    }

    pub fn push_table(&mut self, table: impl Into<Rc<ParseTable<A>>>) {
        self.tables.push(table.into());
        debug!(depth = self.tables.len(), "parse table pushed");
    }

    pub fn pop_table(&mut self) -> Option<Rc<ParseTable<A>>> {
        let table = self.tables.pop();
        debug!(depth = self.tables.len(), "parse table popped");
        table
    }

    pub fn set_table(
        &mut self,
        table: impl Into<Rc<ParseTable<A>>>,
    ) -> Option<Rc<ParseTable<A>>> {
        self.tables.set(table.into())
    }

    // === Streams ===

    /// Read from `stream` until it runs dry, then resume the current one.
    pub fn push_stream(&mut self, stream: impl TokenStream + 'static) {
        self.streams.push(Box::new(stream));
        debug!(depth = self.streams.len(), "token stream pushed");
    }

    pub fn pop_stream(&mut self) -> Option<Box<dyn TokenStream>> {
        self.streams.pop()
    }

    pub fn set_stream(
        &mut self,
        stream: impl TokenStream + 'static,
    ) -> Option<Box<dyn TokenStream>> {
        self.streams.set(Box::new(stream))
    }

    pub fn stream_depth(&self) -> usize {
        self.streams.len()
    }

    // === Application State ===

    pub fn app_state(&self) -> Option<&A> {
        self.app_state.top()
    }

    pub fn app_state_mut(&mut self) -> Option<&mut A> {
        self.app_state.top_mut()
    }

    pub fn push_app_state(&mut self, state: A) {
        self.app_state.push(state);
    }

    pub fn pop_app_state(&mut self) -> Option<A> {
        self.app_state.pop()
    }

    pub fn set_app_state(&mut self, state: A) -> Option<A> {
        self.app_state.set(state)
    }
}

fn unknown(token: &Token) -> Error {
    Error::UnknownTokenType(token.kind().to_string()).at(token.location.clone())
}

fn unexpected(token: &Token) -> Error {
    Error::UnexpectedToken(token.kind().to_string()).at(token.location.clone())
}

impl<A> fmt::Debug for Parser<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("tables", &self.tables.len())
            .field("streams", &self.streams.len())
            .field("pushed", &self.pushed.len())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
