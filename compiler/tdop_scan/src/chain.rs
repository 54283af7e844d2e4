//! Concatenation of scanners.

use tdop_ir::{Char, Result};
use tracing::trace;

use crate::Scanner;

/// Reads each scanner to EOF in turn.
///
/// Intermediate EOFs are swallowed; the EOF of the last scanner is
/// latched and returned from then on. A non-EOF error propagates without
/// moving to the next scanner.
pub struct ChainingScanner {
    scanners: Vec<Box<dyn Scanner>>,
    index: usize,
    last: Char,
}

impl ChainingScanner {
    pub fn new(scanners: Vec<Box<dyn Scanner>>) -> Self {
        ChainingScanner {
            scanners,
            index: 0,
            last: Char::eof(),
        }
    }

    /// Append a scanner to the end of the chain.
    pub fn push(&mut self, scanner: impl Scanner + 'static) {
        self.scanners.push(Box::new(scanner));
    }

    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }
}

impl Scanner for ChainingScanner {
    fn next_char(&mut self) -> Result<Char> {
        while let Some(scanner) = self.scanners.get_mut(self.index) {
            let c = scanner.next_char()?;
            if !c.is_eof() {
                return Ok(c);
            }
            trace!(index = self.index, "chained scanner exhausted");
            self.last = c;
            self.index += 1;
        }
        Ok(self.last.clone())
    }
}
