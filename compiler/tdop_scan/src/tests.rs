use std::collections::VecDeque;
use std::io::Cursor;

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tdop_ir::{ArgLocation, Error, Location, Rune};

/// Scanner that plays back a fixed script, then EOF forever.
struct Script(VecDeque<Result<Char>>);

impl Script {
    fn text(text: &str) -> Self {
        let loc = Location::file("script");
        Script(text.chars().map(|c| Ok(Char::new(c, loc.clone()))).collect())
    }
}

impl Scanner for Script {
    fn next_char(&mut self) -> Result<Char> {
        self.0.pop_front().unwrap_or_else(|| Ok(Char::eof()))
    }
}

fn text_of(scanner: &mut impl Scanner, limit: usize) -> String {
    (0..limit)
        .map(|_| match scanner.next_char() {
            Ok(c) => c.rune.as_char().unwrap_or('$'),
            Err(_) => '!',
        })
        .collect()
}

fn arg_of(c: &Char) -> ArgLocation {
    match &c.location {
        Some(Location::Arg(loc)) => *loc,
        other => panic!("expected argument location, got {other:?}"),
    }
}

// === Memoizing ===

#[test]
fn memo_replays_cyclically() {
    let mut memo = MemoizingScanner::new(Script::text("ab"));
    assert!(!memo.is_replaying());
    assert_eq!(text_of(&mut memo, 9), "ab$ab$ab$");
    assert!(memo.is_replaying());
}

#[test]
fn memo_of_empty_source_is_eof_forever() {
    let mut memo = MemoizingScanner::new(Script::text(""));
    assert_eq!(text_of(&mut memo, 3), "$$$");
}

#[test]
fn memo_clones_share_recording_but_not_position() {
    let mut first = MemoizingScanner::new(Script::text("xy"));
    let mut second = first.clone();
    assert_eq!(text_of(&mut first, 2), "xy");
    // The second clone replays what the first learned, then learns EOF.
    assert_eq!(text_of(&mut second, 4), "xy$x");
    assert_eq!(text_of(&mut first, 3), "$xy");
}

#[test]
fn memo_passes_errors_through_unrecorded() {
    let loc = Location::file("script");
    let script = Script(VecDeque::from([
        Ok(Char::new('a', loc.clone())),
        Err(Error::BadEncoding),
        Ok(Char::new('b', loc)),
    ]));
    let mut memo = MemoizingScanner::new(script);
    assert_eq!(text_of(&mut memo, 4), "a!b$");
    assert_eq!(text_of(&mut memo, 3), "ab$");
}

// === Chaining ===

#[test]
fn chain_swallows_inner_eofs() {
    let mut chain = ChainingScanner::new(Vec::new());
    chain.push(Script::text("ab"));
    chain.push(Script::text(""));
    chain.push(Script::text("c"));
    assert_eq!(chain.len(), 3);
    assert_eq!(text_of(&mut chain, 5), "abc$$");
}

#[test]
fn empty_chain_is_eof_without_location() {
    let mut chain = ChainingScanner::new(Vec::new());
    assert!(chain.is_empty());
    assert_eq!(chain.next_char().unwrap(), Char::eof());
}

#[test]
fn chain_latches_last_eof_location() {
    let mut chain = ChainingScanner::new(Vec::new());
    chain.push(FileScanner::new(Cursor::new(b"q".to_vec()), Location::file("one")));
    chain.push(FileScanner::new(Cursor::new(b"r".to_vec()), Location::file("two")));
    assert_eq!(text_of(&mut chain, 2), "qr");
    let eof = chain.next_char().unwrap();
    assert!(eof.is_eof());
    assert_eq!(eof.location.map(|l| l.to_string()), Some("two:1:2".to_string()));
}

#[test]
fn chain_propagates_errors_without_advancing() {
    let mut chain = ChainingScanner::new(Vec::new());
    chain.push(Script(VecDeque::from([Err(Error::BadEncoding)])));
    chain.push(Script::text("z"));
    assert!(chain.next_char().is_err());
    assert_eq!(text_of(&mut chain, 2), "z$");
}

// === Arguments ===

#[test]
fn arguments_are_joined_with_spaces() {
    let mut scanner = argument_scanner(["o", "n", "e"], ArgumentScannerOptions::default());
    let mut seen = Vec::new();
    for _ in 0..6 {
        let c = scanner.next_char().unwrap();
        seen.push((c.rune, arg_of(&c).begin.arg));
    }
    assert_eq!(
        seen,
        vec![
            (Rune::from('o'), 1),
            (Rune::SPACE, 0),
            (Rune::from('n'), 2),
            (Rune::SPACE, 0),
            (Rune::from('e'), 3),
            (Rune::EOF, 3),
        ]
    );
}

#[test]
fn argument_characters_are_numbered_from_one() {
    let mut scanner = argument_scanner(["ab"], ArgumentScannerOptions::default());
    let a = scanner.next_char().unwrap();
    let b = scanner.next_char().unwrap();
    assert_eq!(arg_of(&a).begin.char, 1);
    assert_eq!(arg_of(&b).begin.char, 2);
    assert_eq!(b.location.map(|l| l.to_string()), Some("1:2".to_string()));
}

#[test]
fn custom_joiner_and_line_breaks_inside_arguments() {
    let options = ArgumentScannerOptions::default().with_joiner(", ");
    let mut scanner = argument_scanner(["a\tb", "c\nd"], options);
    assert_eq!(text_of(&mut scanner, 10), "a\tb, c\nd$$");
}

#[test]
fn no_arguments_is_eof() {
    let mut scanner = argument_scanner(Vec::<String>::new(), ArgumentScannerOptions::default());
    assert!(scanner.next_char().unwrap().is_eof());
}

proptest! {
    #[test]
    fn memo_replay_period_is_length_plus_one(text in "[a-z]{0,16}", laps in 1usize..4) {
        let mut memo = MemoizingScanner::new(Script::text(&text));
        let period = text.len() + 1;
        let out = text_of(&mut memo, period * laps);
        let lap = format!("{text}$");
        prop_assert_eq!(out, lap.repeat(laps));
    }

    #[test]
    fn argument_text_matches_join(args in prop::collection::vec("[a-z ]{0,6}", 0..5)) {
        let joined = args.join(" ");
        let mut scanner = argument_scanner(&args, ArgumentScannerOptions::default());
        let out = text_of(&mut scanner, joined.chars().count() + 1);
        prop_assert_eq!(out, format!("{joined}$"));
    }
}
