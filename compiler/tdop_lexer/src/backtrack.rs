//! Push-back buffer over a character scanner.
//!
//! The history is a deque of every result read from the source since the
//! last commit, and `cursor` is the index of the next entry to replay.
//! `cursor == history.len()` means the next read goes to the source.
//!
//! ```text
//!   history:  [ r0 r1 r2 r3 ]
//!                     ^cursor       next() replays r2
//! ```
//!
//! Results are stored verbatim, errors included, so a replay returns the
//! same `Result` the first read did.

use std::collections::VecDeque;

use tdop_ir::{Char, Result};
use tdop_scan::Scanner;
use tracing::trace;

/// How much history a [`BackTracker`] keeps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Budget {
    /// Keep everything read since the last [`accept`](BackTracker::accept).
    #[default]
    TrackAll,
    /// Keep at most this many entries, dropping the oldest. `Max(0)`
    /// disables history entirely.
    Max(usize),
}

/// Bounded or unbounded push-back over any [`Scanner`].
pub struct BackTracker<S> {
    /// `None` once the source has produced EOF.
    source: Option<S>,
    history: VecDeque<Result<Char>>,
    cursor: usize,
    budget: Budget,
    /// The source's EOF, returned forever once the source is gone.
    last: Char,
}

impl<S: Scanner> BackTracker<S> {
    /// Wrap `source` with unbounded history.
    pub fn new(source: S) -> Self {
        Self::with_budget(source, Budget::TrackAll)
    }

    pub fn with_budget(source: S, budget: Budget) -> Self {
        BackTracker {
            source: Some(source),
            history: VecDeque::new(),
            cursor: 0,
            budget,
            last: Char::eof(),
        }
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Change the history budget, trimming the oldest entries to fit.
    pub fn set_max(&mut self, budget: Budget) {
        self.budget = budget;
        match budget {
            Budget::TrackAll => {}
            Budget::Max(0) => {
                self.history.clear();
                self.cursor = 0;
            }
            Budget::Max(max) => self.trim(max),
        }
    }

    fn trim(&mut self, max: usize) {
        let excess = self.history.len().saturating_sub(max);
        if excess > 0 {
            trace!(excess, max, "trimming history");
            self.history.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }

    /// Commit consumed input, keeping only the last `leave` characters
    /// before the cursor. Entries after the cursor are kept for replay.
    pub fn accept(&mut self, leave: usize) {
        let drop = self.cursor.saturating_sub(leave);
        self.history.drain(..drop);
        self.cursor -= drop;
    }

    /// Rewind the cursor to the oldest retained character.
    pub fn backtrack(&mut self) {
        self.cursor = 0;
    }

    /// Step the cursor back `n` characters, stopping at the oldest one.
    pub fn rewind(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    /// Number of retained characters.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Index of the last character returned within the retained history;
    /// `None` when the cursor sits at the oldest entry.
    pub fn pos(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    /// Whether another character other than EOF can be produced.
    pub fn more(&self) -> bool {
        match self.history.get(self.cursor) {
            Some(Ok(c)) => !c.is_eof(),
            Some(Err(_)) => true,
            None => self.source.is_some(),
        }
    }

    /// The wrapped scanner, if it has not reached EOF yet.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }
}

impl<S: Scanner> Scanner for BackTracker<S> {
    fn next_char(&mut self) -> Result<Char> {
        if let Some(saved) = self.history.get(self.cursor) {
            self.cursor += 1;
            return saved.clone();
        }

        let Some(source) = self.source.as_mut() else {
            return Ok(self.last.clone());
        };
        let result = source.next_char();
        if let Ok(c) = &result {
            if c.is_eof() {
                trace!(location = ?c.location, "source reached EOF");
                self.last = c.clone();
                self.source = None;
            }
        }

        match self.budget {
            Budget::Max(0) => {}
            Budget::Max(max) => {
                self.history.push_back(result.clone());
                self.trim(max);
                self.cursor = self.history.len();
            }
            Budget::TrackAll => {
                self.history.push_back(result.clone());
                self.cursor = self.history.len();
            }
        }
        result
    }
}
