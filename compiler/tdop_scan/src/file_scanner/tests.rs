use std::collections::VecDeque;

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tdop_ir::{FileLocation, Position};

fn scanner(bytes: &[u8]) -> FileScanner<&[u8]> {
    FileScanner::new(bytes, Location::file("x"))
}

/// Runes up to and including the first EOF; errors are skipped.
fn runes(scanner: &mut impl Scanner) -> Vec<Rune> {
    let mut out = Vec::new();
    for _ in 0..100_000 {
        if let Ok(c) = scanner.next_char() {
            out.push(c.rune);
            if c.is_eof() {
                break;
            }
        }
    }
    out
}

fn end_of(c: &Char) -> (u32, u32) {
    match &c.location {
        Some(Location::File(FileLocation { end, .. })) => (end.line, end.col),
        other => panic!("unexpected location {other:?}"),
    }
}

/// Reader that plays back a script of read results.
struct Scripted(VecDeque<io::Result<Vec<u8>>>);

impl Read for Scripted {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.pop_front() {
            None => Ok(0),
            Some(Err(err)) => Err(err),
            Some(Ok(bytes)) => {
                buf[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
        }
    }
}

/// Reader that hands out one byte per call.
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.split_first() {
            None => Ok(0),
            Some((&b, rest)) => {
                buf[0] = b;
                self.0 = rest;
                Ok(1)
            }
        }
    }
}

// === Positions ===

#[test]
fn tab_and_newline_positions() {
    let options = FileScannerOptions::default().with_tab_stop(4);
    let mut s = FileScanner::with_options(&b"a\tb\nc"[..], Location::file("x"), options);
    let mut seen = Vec::new();
    for _ in 0..6 {
        let c = s.next_char().unwrap();
        seen.push((c.rune, end_of(&c)));
    }
    assert_eq!(
        seen,
        vec![
            (Rune::from('a'), (1, 2)),
            (Rune::TAB, (1, 5)),
            (Rune::from('b'), (1, 6)),
            (Rune::NEWLINE, (2, 1)),
            (Rune::from('c'), (2, 2)),
            (Rune::EOF, (2, 2)),
        ]
    );
}

#[test]
fn multibyte_runes_advance_one_column() {
    let mut s = scanner("h\u{e9}\u{1F600}!".as_bytes());
    let mut cols = Vec::new();
    for _ in 0..4 {
        cols.push(end_of(&s.next_char().unwrap()).1);
    }
    assert_eq!(cols, vec![2, 3, 4, 5]);
}

// === Line Endings ===

#[test]
fn dos_line_endings_under_unknown() {
    let mut s = scanner(b"x\r\ny\r\nz");
    assert_eq!(s.next_char().unwrap().rune, Rune::from('x'));
    assert_eq!(s.next_char().unwrap().rune, Rune::NEWLINE);
    assert_eq!(s.line_style(), LineStyle::Dos);
    let rest = runes(&mut s);
    assert_eq!(
        rest,
        vec![Rune::from('y'), Rune::NEWLINE, Rune::from('z'), Rune::EOF]
    );
}

#[test]
fn each_terminator_yields_one_newline() {
    let cases: [(&[u8], usize, LineStyle); 4] = [
        (b"\n", 1, LineStyle::Unix),
        (b"\r", 1, LineStyle::Mac),
        (b"\r\n", 1, LineStyle::Dos),
        (b"\r\r", 2, LineStyle::Mac),
    ];
    for (input, newlines, style) in cases {
        let mut s = scanner(input);
        let out = runes(&mut s);
        assert_eq!(out.len(), newlines + 1, "input {input:?}");
        assert!(out[..newlines].iter().all(|&r| r == Rune::NEWLINE));
        assert_eq!(out[newlines], Rune::EOF);
        assert_eq!(s.line_style(), style, "input {input:?}");
    }
}

#[test]
fn mac_style_keeps_rune_after_cr() {
    let mut s = scanner(b"a\rb");
    assert_eq!(
        runes(&mut s),
        vec![Rune::from('a'), Rune::NEWLINE, Rune::from('b'), Rune::EOF]
    );
}

#[test]
fn none_style_turns_line_breaks_into_spaces() {
    let options = FileScannerOptions::default().with_line_style(LineStyle::None);
    let mut s = FileScanner::with_options(&b"a\r\nb"[..], Location::file("x"), options);
    assert_eq!(
        runes(&mut s),
        vec![Rune::from('a'), Rune::SPACE, Rune::SPACE, Rune::from('b'), Rune::EOF]
    );
}

// === Encoding Errors ===

#[test]
fn bad_byte_without_handler_is_located_error() {
    let mut s = scanner(&[0x80, b'b', b'u', b'f']);
    let err = s.next_char().unwrap_err();
    assert!(matches!(err.root(), Error::BadEncoding));
    assert_eq!(err.location().map(ToString::to_string), Some("x:1:1".to_string()));
    assert_eq!(s.next_char().unwrap().rune, Rune::from('b'));
}

#[test]
fn swallowing_handler_substitutes_replacement() {
    let options = FileScannerOptions::default().with_encoding_error_handler(|_| None);
    let mut s = FileScanner::with_options(&[0x80, b'b', b'u', b'f'][..], Location::file("x"), options);
    let c = s.next_char().unwrap();
    assert_eq!(c.rune, Rune::REPLACEMENT);
    assert_eq!(end_of(&c), (1, 2));
    assert_eq!(s.next_char().unwrap().rune, Rune::from('b'));
}

#[test]
fn handler_may_surface_its_own_error() {
    let options = FileScannerOptions::default()
        .with_encoding_error_handler(|_| Some(Error::custom(std::fmt::Error)));
    let mut s = FileScanner::with_options(&[0xFF][..], Location::file("x"), options);
    assert!(matches!(s.next_char(), Err(Error::Custom(_))));
    assert!(s.next_char().unwrap().is_eof());
}

#[test]
fn truncated_sequence_reports_each_byte() {
    let mut s = scanner(&[b'a', 0xE2, 0x82]);
    assert_eq!(s.next_char().unwrap().rune, Rune::from('a'));
    assert!(s.next_char().is_err());
    assert!(s.next_char().is_err());
    assert!(s.next_char().unwrap().is_eof());
}

#[test]
fn bad_byte_takes_a_column() {
    let mut s = scanner(&[0x80, b'b']);
    assert!(s.next_char().is_err());
    assert_eq!(end_of(&s.next_char().unwrap()), (1, 3));
}

#[test]
fn bad_byte_after_carriage_return_follows_the_newline() {
    let mut s = scanner(&[b'a', b'\r', 0x80, b'b']);
    assert_eq!(s.next_char().unwrap().rune, Rune::from('a'));
    assert_eq!(s.next_char().unwrap().rune, Rune::NEWLINE);
    let err = s.next_char().unwrap_err();
    assert!(matches!(err.root(), Error::BadEncoding));
    assert_eq!(err.location().map(ToString::to_string), Some("x:2:1".to_string()));
    let b = s.next_char().unwrap();
    assert_eq!(b.rune, Rune::from('b'));
    assert_eq!(end_of(&b), (2, 3));
}

// === Buffering ===

#[test]
fn sequences_split_across_reads_decode() {
    let text = "\u{e9}t\u{e9}\u{1F600}";
    let mut s = FileScanner::new(Trickle(text.as_bytes()), Location::file("x"));
    let expected: Vec<Rune> = text.chars().map(Rune::from).chain([Rune::EOF]).collect();
    assert_eq!(runes(&mut s), expected);
}

#[test]
fn sequences_straddling_the_buffer_boundary_decode() {
    let text = format!("{}{}", "a", "\u{e9}".repeat(BUFFER_SIZE));
    let mut s = scanner(text.as_bytes());
    let out = runes(&mut s);
    assert_eq!(out.len(), BUFFER_SIZE + 2);
    assert!(out[1..=BUFFER_SIZE].iter().all(|&r| r == Rune::from('\u{e9}')));
}

#[test]
fn io_error_is_deferred_until_buffer_drains() {
    let script = VecDeque::from([Ok(b"ab".to_vec()), Err(io::Error::other("boom"))]);
    let mut s = FileScanner::new(Scripted(script), Location::file("x"));
    assert_eq!(s.next_char().unwrap().rune, Rune::from('a'));
    assert_eq!(s.next_char().unwrap().rune, Rune::from('b'));
    let err = s.next_char().unwrap_err();
    assert!(err.is_io());
    assert!(s.next_char().unwrap().is_eof());
    assert!(s.next_char().unwrap().is_eof());
}

#[test]
fn io_error_after_carriage_return_keeps_the_newline() {
    let script = VecDeque::from([Ok(b"a\r".to_vec()), Err(io::Error::other("boom"))]);
    let mut s = FileScanner::new(Scripted(script), Location::file("x"));
    assert_eq!(s.next_char().unwrap().rune, Rune::from('a'));
    assert_eq!(s.next_char().unwrap().rune, Rune::NEWLINE);
    assert!(s.next_char().unwrap_err().is_io());
    assert!(s.next_char().unwrap().is_eof());
}

#[test]
fn interrupted_reads_are_retried() {
    let script = VecDeque::from([
        Err(io::Error::from(io::ErrorKind::Interrupted)),
        Ok(b"z".to_vec()),
    ]);
    let mut s = FileScanner::new(Scripted(script), Location::file("x"));
    assert_eq!(runes(&mut s), vec![Rune::from('z'), Rune::EOF]);
}

#[test]
fn open_missing_file_is_io_error() {
    let result = FileScanner::open("/definitely/not/here.tdop", FileScannerOptions::default());
    assert!(result.is_err_and(|err| err.is_io()));
}

#[test]
fn eof_location_matches_last_end() {
    let mut s = scanner(b"ab");
    let _ = runes(&mut s);
    let eof = s.next_char().unwrap();
    assert_eq!(
        eof.location,
        Some(Location::File(FileLocation::span(
            "x",
            Position::new(1, 3),
            Position::new(1, 3)
        )))
    );
}

proptest! {
    #[test]
    fn eof_is_returned_forever(text in "\\PC{0,64}") {
        let mut s = scanner(text.as_bytes());
        let out = runes(&mut s);
        prop_assert_eq!(out.last().copied(), Some(Rune::EOF));
        for _ in 0..5 {
            let c = s.next_char();
            prop_assert!(c.is_ok_and(|c| c.is_eof()));
        }
    }

    #[test]
    fn text_without_line_breaks_round_trips(text in "[^\r\n]{0,64}") {
        let mut s = scanner(text.as_bytes());
        let out: String = runes(&mut s).into_iter().filter_map(Rune::as_char).collect();
        prop_assert_eq!(out, text);
    }
}
