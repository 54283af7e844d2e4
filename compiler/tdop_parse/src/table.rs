//! Parse entries and tables.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tdop_ir::{NodeRef, Result, Token};

use crate::Parser;

/// Called when a token starts an expression (nud).
pub type FirstFn<A> = Rc<dyn Fn(&mut Parser<A>, Token) -> Result<NodeRef>>;

/// Called with the left operand when a token follows one (led).
pub type NextFn<A> = Rc<dyn Fn(&mut Parser<A>, NodeRef, Token) -> Result<NodeRef>>;

/// Called when a token starts a statement.
pub type StmtFn<A> = Rc<dyn Fn(&mut Parser<A>, Token) -> Result<NodeRef>>;

/// How the parser treats one token type.
///
/// A missing callback makes the token unexpected in that position.
pub struct ParseEntry<A = ()> {
    /// Left binding power; higher binds tighter.
    pub power: i32,
    pub first: Option<FirstFn<A>>,
    pub next: Option<NextFn<A>>,
    pub stmt: Option<StmtFn<A>>,
}

impl<A> ParseEntry<A> {
    /// Entry with binding power `power` and no callbacks.
    pub fn new(power: i32) -> Self {
        ParseEntry {
            power,
            first: None,
            next: None,
            stmt: None,
        }
    }

    #[must_use]
    pub fn with_first(
        mut self,
        first: impl Fn(&mut Parser<A>, Token) -> Result<NodeRef> + 'static,
    ) -> Self {
        self.first = Some(Rc::new(first));
        self
    }

    #[must_use]
    pub fn with_next(
        mut self,
        next: impl Fn(&mut Parser<A>, NodeRef, Token) -> Result<NodeRef> + 'static,
    ) -> Self {
        self.next = Some(Rc::new(next));
        self
    }

    #[must_use]
    pub fn with_stmt(
        mut self,
        stmt: impl Fn(&mut Parser<A>, Token) -> Result<NodeRef> + 'static,
    ) -> Self {
        self.stmt = Some(Rc::new(stmt));
        self
    }
}

impl<A> Clone for ParseEntry<A> {
    fn clone(&self) -> Self {
        ParseEntry {
            power: self.power,
            first: self.first.clone(),
            next: self.next.clone(),
            stmt: self.stmt.clone(),
        }
    }
}

impl<A> fmt::Debug for ParseEntry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseEntry")
            .field("power", &self.power)
            .field("first", &self.first.is_some())
            .field("next", &self.next.is_some())
            .field("stmt", &self.stmt.is_some())
            .finish()
    }
}

/// Token type to parse entry.
pub struct ParseTable<A = ()> {
    entries: FxHashMap<String, ParseEntry<A>>,
}

impl<A> ParseTable<A> {
    pub fn new() -> Self {
        ParseTable {
            entries: FxHashMap::default(),
        }
    }

    /// Add an entry, builder style. A later entry for the same type wins.
    #[must_use]
    pub fn with(mut self, kind: impl Into<String>, entry: ParseEntry<A>) -> Self {
        self.insert(kind, entry);
        self
    }

    /// Add or replace an entry, returning the one replaced.
    pub fn insert(
        &mut self,
        kind: impl Into<String>,
        entry: ParseEntry<A>,
    ) -> Option<ParseEntry<A>> {
        self.entries.insert(kind.into(), entry)
    }

    pub fn remove(&mut self, kind: &str) -> Option<ParseEntry<A>> {
        self.entries.remove(kind)
    }

    pub fn get(&self, kind: &str) -> Option<&ParseEntry<A>> {
        self.entries.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A> Default for ParseTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for ParseTable<A> {
    fn clone(&self) -> Self {
        ParseTable {
            entries: self.entries.clone(),
        }
    }
}

impl<A> fmt::Debug for ParseTable<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("ParseTable").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
