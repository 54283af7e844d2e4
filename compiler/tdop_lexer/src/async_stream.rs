//! Background token production.
//!
//! A producer thread drives any [`TokenStream`] and forwards its tokens
//! through a bounded channel; the consumer side is itself a
//! [`TokenStream`], so it can be handed straight to a parser.
//!
//! # Cancellation
//!
//! Dropping the [`AsyncTokenStream`] closes the channel. The producer's next
//! [`push`](TokenSender::push) fails and the producer stops. A producer
//! blocked inside its own source is not interrupted.

use std::fmt;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use tdop_ir::{Result, Token};
use tracing::{debug, warn};

use crate::TokenStream;

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 20;

/// Options for [`AsyncLexer`].
#[derive(Clone, Debug)]
pub struct AsyncOptions {
    /// Tokens buffered before the producer blocks.
    pub capacity: usize,
    pub thread_name: String,
}

impl AsyncOptions {
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

impl Default for AsyncOptions {
    fn default() -> Self {
        AsyncOptions {
            capacity: DEFAULT_CAPACITY,
            thread_name: "tdop-lexer".to_string(),
        }
    }
}

/// Producer half of a token channel.
#[derive(Clone)]
pub struct TokenSender {
    tx: Sender<Token>,
}

impl TokenSender {
    /// Send a token, blocking while the channel is full.
    ///
    /// Fails, handing the token back, once the consumer is gone.
    pub fn push(&self, token: Token) -> std::result::Result<(), Token> {
        self.tx.send(token).map_err(channel::SendError::into_inner)
    }
}

impl fmt::Debug for TokenSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSender")
            .field("queued", &self.tx.len())
            .finish()
    }
}

/// Consumer half of a token channel.
///
/// Yields tokens in the order they were pushed and `None` once every sender
/// has been dropped and the channel is drained.
pub struct AsyncTokenStream {
    rx: Receiver<Token>,
    producer: Option<JoinHandle<()>>,
}

impl AsyncTokenStream {
    /// Tokens waiting in the channel.
    pub fn queued(&self) -> usize {
        self.rx.len()
    }

    fn join_producer(&mut self) {
        if let Some(handle) = self.producer.take() {
            if handle.join().is_err() {
                warn!("token producer panicked");
            }
        }
    }
}

impl TokenStream for AsyncTokenStream {
    fn next_token(&mut self) -> Option<Token> {
        match self.rx.recv() {
            Ok(token) => Some(token),
            Err(_) => {
                self.join_producer();
                None
            }
        }
    }
}

impl fmt::Debug for AsyncTokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncTokenStream")
            .field("queued", &self.rx.len())
            .field("producer", &self.producer.is_some())
            .finish()
    }
}

/// A bounded token channel with no producer attached.
///
/// `capacity` 0 makes every push a rendezvous with the consumer.
pub fn token_channel(capacity: usize) -> (TokenSender, AsyncTokenStream) {
    let (tx, rx) = channel::bounded(capacity);
    (
        TokenSender { tx },
        AsyncTokenStream { rx, producer: None },
    )
}

/// Spawns token sources onto background threads.
#[derive(Clone, Debug, Default)]
pub struct AsyncLexer {
    options: AsyncOptions,
}

impl AsyncLexer {
    pub fn new(options: AsyncOptions) -> Self {
        AsyncLexer { options }
    }

    /// Build a source on a fresh thread and stream its tokens back.
    ///
    /// The source is constructed inside the producer thread, so it need not
    /// be `Send`; only the factory crosses threads.
    pub fn spawn<F, T>(&self, factory: F) -> Result<AsyncTokenStream>
    where
        F: FnOnce() -> T + Send + 'static,
        T: TokenStream,
    {
        let (sender, mut stream) = token_channel(self.options.capacity);
        let handle = thread::Builder::new()
            .name(self.options.thread_name.clone())
            .spawn(move || produce(factory(), &sender))?;
        stream.producer = Some(handle);
        Ok(stream)
    }
}

fn produce(mut source: impl TokenStream, sender: &TokenSender) {
    debug!("token producer started");
    let mut sent = 0usize;
    while let Some(token) = source.next_token() {
        if sender.push(token).is_err() {
            debug!(sent, "consumer gone; producer stopping");
            return;
        }
        sent += 1;
    }
    debug!(sent, "token producer finished");
}
