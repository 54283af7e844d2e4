//! The classify/recognize engine.
//!
//! Each round of the inner loop asks the current [`Classifier`] which
//! [`Recognizer`]s apply at the current input position and tries them in
//! order. Every attempt starts from the same position: the character
//! buffer is rewound before each recognizer runs, committed after the
//! first one that succeeds, and committed past a single character when
//! none does (after the classifier's error hook has seen it).
//!
//! A recognizer that succeeds without pushing a token consumed whitespace
//! or a comment; the loop simply runs another round. A recognizer must
//! consume at least one character when it succeeds.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tdop_ir::Token;
use tdop_scan::Scanner;
use tdop_stack::Stack;
use tracing::{trace, warn};

use crate::{BackTracker, Budget, TokenStream};

/// The character buffer recognizers read from.
pub type CharStream = BackTracker<Box<dyn Scanner>>;

/// Consumes a prefix of the input and pushes tokens for it.
///
/// Returning `false` reports no match; the engine then discards whatever
/// the recognizer read. Closures of the right shape are recognizers.
pub trait Recognizer<A> {
    fn recognize(&self, state: &mut LexerState<A>, chars: &mut CharStream) -> bool;
}

impl<A, F> Recognizer<A> for F
where
    F: Fn(&mut LexerState<A>, &mut CharStream) -> bool,
{
    fn recognize(&self, state: &mut LexerState<A>, chars: &mut CharStream) -> bool {
        self(state, chars)
    }
}

/// Wrap a closure as a shareable recognizer.
pub fn recognizer<A, F>(f: F) -> Rc<dyn Recognizer<A>>
where
    F: Fn(&mut LexerState<A>, &mut CharStream) -> bool + 'static,
{
    Rc::new(f)
}

/// Chooses the recognizers to try at the current input position.
///
/// The classifier may read ahead freely; the buffer is rewound before any
/// recognizer runs.
pub trait Classifier<A> {
    /// Ordered candidates for the input at the cursor. An empty list sends
    /// the character to [`error`](Self::error).
    fn classify(&self, state: &mut LexerState<A>, chars: &mut CharStream)
        -> Vec<Rc<dyn Recognizer<A>>>;

    /// Called when no candidate matched. The engine discards everything
    /// read before the cursor once this returns.
    ///
    /// The default skips one character and logs it.
    fn error(&self, state: &mut LexerState<A>, chars: &mut CharStream) {
        let _ = state;
        skip_char(chars);
    }
}

impl<A, F> Classifier<A> for F
where
    F: Fn(&mut LexerState<A>, &mut CharStream) -> Vec<Rc<dyn Recognizer<A>>>,
{
    fn classify(
        &self,
        state: &mut LexerState<A>,
        chars: &mut CharStream,
    ) -> Vec<Rc<dyn Recognizer<A>>> {
        self(state, chars)
    }
}

fn skip_char(chars: &mut CharStream) {
    match chars.next_char() {
        Ok(c) if c.is_eof() => {}
        Ok(c) => warn!(%c, "no recognizer matched; skipping"),
        Err(err) => warn!(error = %err, "skipping unreadable input"),
    }
}

/// Engine state visible to classifiers and recognizers.
///
/// Holds the application-state stack, the classifier stack and the queue
/// of tokens produced but not yet handed out.
pub struct LexerState<A = ()> {
    app_state: Stack<A>,
    classifiers: Stack<Rc<dyn Classifier<A>>>,
    queue: VecDeque<Token>,
}

impl<A> LexerState<A> {
    fn new(classifier: Rc<dyn Classifier<A>>) -> Self {
        LexerState {
            app_state: Stack::new(),
            classifiers: Stack::with(classifier),
            queue: VecDeque::new(),
        }
    }

    /// Queue a token for output.
    pub fn push(&mut self, token: Token) {
        trace!(kind = token.kind(), "token recognized");
        self.queue.push_back(token);
    }

    /// Tokens queued but not yet returned.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    // === Application state ===

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

    /// Replace the top application state, returning the previous one.
    pub fn set_app_state(&mut self, state: A) -> Option<A> {
        self.app_state.set(state)
    }

    // === Classifiers ===

    pub fn classifier(&self) -> Option<&Rc<dyn Classifier<A>>> {
        self.classifiers.top()
    }

    /// Switch lexical mode until the matching [`pop_classifier`](Self::pop_classifier).
    pub fn push_classifier(&mut self, classifier: Rc<dyn Classifier<A>>) {
        trace!(depth = self.classifiers.len() + 1, "classifier pushed");
        self.classifiers.push(classifier);
    }

    pub fn pop_classifier(&mut self) -> Option<Rc<dyn Classifier<A>>> {
        trace!(depth = self.classifiers.len(), "classifier popped");
        self.classifiers.pop()
    }

    pub fn set_classifier(
        &mut self,
        classifier: Rc<dyn Classifier<A>>,
    ) -> Option<Rc<dyn Classifier<A>>> {
        self.classifiers.set(classifier)
    }

    pub fn classifier_depth(&self) -> usize {
        self.classifiers.len()
    }
}

impl<A> fmt::Debug for LexerState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexerState")
            .field("app_state_depth", &self.app_state.len())
            .field("classifier_depth", &self.classifiers.len())
            .field("queue", &self.queue)
            .finish()
    }
}

/// Token source driven by a classifier over a character scanner.
///
/// `A` is the application state recognizers can stack; it defaults to `()`
/// for grammars that do not need one.
pub struct Lexer<A = ()> {
    chars: CharStream,
    state: LexerState<A>,
}

impl<A: 'static> Lexer<A> {
    pub fn new(source: impl Scanner + 'static, classifier: impl Classifier<A> + 'static) -> Self {
        Self::with_classifier(source, Rc::new(classifier))
    }

    pub fn with_classifier(
        source: impl Scanner + 'static,
        classifier: Rc<dyn Classifier<A>>,
    ) -> Self {
        let source: Box<dyn Scanner> = Box::new(source);
        Lexer {
            chars: BackTracker::new(source),
            state: LexerState::new(classifier),
        }
    }

    /// Seed the application-state stack.
    #[must_use]
    pub fn with_app_state(mut self, state: A) -> Self {
        self.state.push_app_state(state);
        self
    }

    pub fn state(&self) -> &LexerState<A> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LexerState<A> {
        &mut self.state
    }

    /// The raw character buffer.
    pub fn char_stream(&mut self) -> &mut CharStream {
        &mut self.chars
    }

    /// One classify/recognize round.
    fn step(&mut self) {
        self.chars.set_max(Budget::TrackAll);

        let Some(classifier) = self.state.classifier().cloned() else {
            skip_char(&mut self.chars);
            self.chars.accept(0);
            return;
        };

        let candidates = classifier.classify(&mut self.state, &mut self.chars);
        for (index, candidate) in candidates.iter().enumerate() {
            self.chars.backtrack();
            if candidate.recognize(&mut self.state, &mut self.chars) {
                let consumed = self.chars.pos().map_or(0, |p| p + 1);
                trace!(index, consumed, "recognizer matched");
                self.chars.accept(0);
                return;
            }
        }

        self.chars.backtrack();
        if self.chars.next_char().is_ok_and(|c| c.is_eof()) {
            self.chars.accept(0);
            return;
        }
        self.chars.backtrack();

        trace!(candidates = candidates.len(), "no recognizer matched");
        classifier.error(&mut self.state, &mut self.chars);
        if self.chars.pos().is_none() {
            skip_char(&mut self.chars);
        }
        self.chars.accept(0);
    }
}

impl<A: 'static> TokenStream for Lexer<A> {
    fn next_token(&mut self) -> Option<Token> {
        while self.state.queue.is_empty() && self.chars.more() {
            self.step();
        }
        self.state.queue.pop_front()
    }
}

impl<A> fmt::Debug for Lexer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("buffered", &self.chars.len())
            .field("state", &self.state)
            .finish()
    }
}
