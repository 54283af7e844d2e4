use super::*;
use crate::operators::literal;
use pretty_assertions::assert_eq;

#[test]
fn builder_collects_entries() {
    let table: ParseTable = ParseTable::new()
        .with("NUM", ParseEntry::new(0).with_first(literal()))
        .with("+", ParseEntry::new(10));
    assert_eq!(table.len(), 2);
    assert!(table.contains("NUM"));
    assert!(!table.contains("-"));
    assert_eq!(table.get("+").map(|e| e.power), Some(10));
}

#[test]
fn later_entry_replaces_earlier() {
    let mut table: ParseTable = ParseTable::new().with("+", ParseEntry::new(10));
    let replaced = table.insert("+", ParseEntry::new(30));
    assert_eq!(replaced.map(|e| e.power), Some(10));
    assert_eq!(table.get("+").map(|e| e.power), Some(30));
    assert!(table.remove("+").is_some());
    assert!(table.is_empty());
}

#[test]
fn entry_slots_start_empty() {
    let entry: ParseEntry = ParseEntry::new(5);
    assert!(entry.first.is_none() && entry.next.is_none() && entry.stmt.is_none());
    assert_eq!(
        format!("{entry:?}"),
        "ParseEntry { power: 5, first: false, next: false, stmt: false }"
    );
}

#[test]
fn debug_lists_sorted_kinds() {
    let table: ParseTable = ParseTable::new()
        .with("b", ParseEntry::new(0))
        .with("a", ParseEntry::new(0));
    assert_eq!(format!("{table:?}"), "ParseTable { kinds: [\"a\", \"b\"] }");
}

#[test]
fn clones_share_callbacks() {
    let table: ParseTable = ParseTable::new().with("NUM", ParseEntry::new(0).with_first(literal()));
    let copy = table.clone();
    let (a, b) = (table.get("NUM").unwrap(), copy.get("NUM").unwrap());
    assert!(Rc::ptr_eq(a.first.as_ref().unwrap(), b.first.as_ref().unwrap()));
}
