//! Text renderings of a syntax tree.
//!
//! [`sexpr`] gives a compact canonical form for comparing trees;
//! [`visualize`] draws the tree one node per line.

use std::fmt::{self, Write};

use tdop_ir::{strip_annotations, Node, NodeRef, Token};
use tdop_stack::ensure_sufficient_stack;

/// Render `node` as an s-expression.
///
/// Leaves render as their token's text, else its value, else its type.
/// Interior nodes render as `(head child...)`. Annotations are ignored, so
/// two trees that differ only in labels render identically.
pub fn sexpr(node: &NodeRef) -> String {
    let mut out = String::new();
    write_sexpr(&mut out, node);
    out
}

fn write_sexpr(out: &mut String, node: &NodeRef) {
    let node = strip_annotations(node);
    let children = node.children();
    if children.is_empty() {
        out.push_str(&head(&**node));
        return;
    }
    out.push('(');
    out.push_str(&head(&**node));
    for child in &children {
        out.push(' ');
        ensure_sufficient_stack(|| write_sexpr(out, child));
    }
    out.push(')');
}

fn head(node: &dyn Node) -> String {
    match node.token() {
        Some(token) => atom(token),
        None => node.to_string(),
    }
}

fn atom(token: &Token) -> String {
    if let Some(text) = token.text() {
        return text.to_string();
    }
    match token.value.as_deref() {
        Some(value) => value.to_string(),
        None => token.kind().to_string(),
    }
}

/// The line-drawing pieces of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Joiner {
    /// Marks the root.
    Start,
    /// Marks the last child of a node.
    Last,
    /// Marks every other child.
    Branch,
    /// Continues a branch past the children of an earlier sibling.
    Skip,
    /// Leads from a joiner into the node text.
    Into,
}

/// A glyph set for [`visualize`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Profile {
    pub start: &'static str,
    pub last: &'static str,
    pub branch: &'static str,
    pub skip: &'static str,
    pub into: &'static str,
}

impl Profile {
    pub const ASCII: Profile = Profile {
        start: "+",
        last: "`",
        branch: "|",
        skip: "|",
        into: "-",
    };

    pub const ROUNDED: Profile = Profile {
        start: "\u{256d}",
        last: "\u{2570}",
        branch: "\u{251c}",
        skip: "\u{2502}",
        into: "\u{2500}",
    };

    pub const SQUARE: Profile = Profile {
        start: "\u{250c}",
        last: "\u{2514}",
        branch: "\u{251c}",
        skip: "\u{2502}",
        into: "\u{2500}",
    };

    pub fn glyph(&self, joiner: Joiner) -> &'static str {
        match joiner {
            Joiner::Start => self.start,
            Joiner::Last => self.last,
            Joiner::Branch => self.branch,
            Joiner::Skip => self.skip,
            Joiner::Into => self.into,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::ASCII
    }
}

/// Draw `node` and its descendants, one per line:
///
/// ```text
/// +- x:1:3: + token
/// |- L: x:1:1: NUM token: 1
/// `- R: x:1:5: NUM token: 2
/// ```
pub fn visualize(node: &NodeRef, profile: Profile) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_tree(&mut out, node, profile);
    out
}

/// [`visualize`] into any writer.
pub fn write_tree(out: &mut impl Write, node: &NodeRef, profile: Profile) -> fmt::Result {
    write_node(out, "", Joiner::Start, node, profile)?;
    write_children(out, "", node, profile)
}

fn write_node(
    out: &mut impl Write,
    prefix: &str,
    joiner: Joiner,
    node: &NodeRef,
    profile: Profile,
) -> fmt::Result {
    writeln!(
        out,
        "{prefix}{}{} {node}",
        profile.glyph(joiner),
        profile.glyph(Joiner::Into)
    )
}

fn write_children(
    out: &mut impl Write,
    prefix: &str,
    node: &NodeRef,
    profile: Profile,
) -> fmt::Result {
    let children = node.children();
    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == count;
        let joiner = if last { Joiner::Last } else { Joiner::Branch };
        write_node(out, prefix, joiner, child, profile)?;

        let mut nested = String::from(prefix);
        if last {
            nested.push_str("  ");
        } else {
            nested.push_str(profile.glyph(Joiner::Skip));
            nested.push(' ');
        }
        ensure_sufficient_stack(|| write_children(out, &nested, child, profile))?;
    }
    Ok(())
}
