//! Line-ending state machine.
//!
//! The scanner feeds a style the CR/LF run it has seen so far (one or two
//! runes) and gets back what to emit plus the style to use from then on.
//! Each concrete style accepts only its own terminator; a foreign CR or LF
//! is treated as a space.

use tdop_ir::Rune;

/// What the scanner should emit for a line-ending run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Emit `\n`.
    Newline,
    /// Emit `\n` and keep the second rune for the next call.
    NewlineSave,
    /// Emit U+0020; keep the second rune if the run was two long.
    Space,
    /// Read one more rune and ask again.
    More,
}

/// Line-ending convention of an input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// `\n`
    Unix,
    /// `\r`
    Mac,
    /// `\r\n`
    Dos,
    /// Auto-detect; the first terminator seen fixes the style.
    #[default]
    Unknown,
    /// No line structure: CR and LF both read as spaces.
    None,
}

impl LineStyle {
    /// Classify a run of one or two runes starting with CR or LF.
    pub fn accept(self, seq: &[Rune]) -> (Disposition, LineStyle) {
        use Disposition::{More, Newline, NewlineSave, Space};

        const CR: Rune = Rune::CARRIAGE_RETURN;
        const LF: Rune = Rune::NEWLINE;

        match (self, seq) {
            (LineStyle::Unknown, [LF]) => (Newline, LineStyle::Unix),
            (LineStyle::Unknown, [CR]) => (More, LineStyle::Unknown),
            (LineStyle::Unknown, [CR, LF]) => (Newline, LineStyle::Dos),
            (LineStyle::Unknown, [CR, _]) => (NewlineSave, LineStyle::Mac),

            (LineStyle::Unix, [LF]) | (LineStyle::Mac, [CR]) => (Newline, self),

            (LineStyle::Dos, [CR]) => (More, self),
            (LineStyle::Dos, [CR, LF]) => (Newline, self),

            _ => (Space, self),
        }
    }
}
