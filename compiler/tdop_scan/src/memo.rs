//! Record-and-replay scanner.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tdop_ir::{Char, Result};

use crate::Scanner;

struct Recording {
    source: Box<dyn Scanner>,
    chars: Vec<Char>,
    replaying: bool,
}

/// Records a scanner's output and, once EOF has been seen, replays it
/// forever: `r0 .. rn-1, EOF, r0 .. rn-1, EOF, ...`.
///
/// Clones share one recording but each keeps its own replay index, so a
/// single memoized scanner can appear several times in a chain. The
/// recording is `Rc`-based, which keeps shared memoizers on one thread.
#[derive(Clone)]
pub struct MemoizingScanner {
    recording: Rc<RefCell<Recording>>,
    index: usize,
}

impl MemoizingScanner {
    pub fn new(source: impl Scanner + 'static) -> Self {
        MemoizingScanner {
            recording: Rc::new(RefCell::new(Recording {
                source: Box::new(source),
                chars: Vec::new(),
                replaying: false,
            })),
            index: 0,
        }
    }

    /// Whether the source has been drained and replay has begun.
    pub fn is_replaying(&self) -> bool {
        self.recording.borrow().replaying
    }
}

impl Scanner for MemoizingScanner {
    fn next_char(&mut self) -> Result<Char> {
        let mut rec = self.recording.borrow_mut();
        if let Some(c) = rec.chars.get(self.index).cloned() {
            self.index += 1;
            if rec.replaying && self.index == rec.chars.len() {
                self.index = 0;
            }
            return Ok(c);
        }

        // Errors are passed through without being recorded.
        let c = rec.source.next_char()?;
        rec.chars.push(c.clone());
        if c.is_eof() {
            rec.replaying = true;
            self.index = 0;
        } else {
            self.index += 1;
        }
        Ok(c)
    }
}

impl fmt::Debug for MemoizingScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rec = self.recording.borrow();
        f.debug_struct("MemoizingScanner")
            .field("recorded", &rec.chars.len())
            .field("replaying", &rec.replaying)
            .field("index", &self.index)
            .finish()
    }
}
