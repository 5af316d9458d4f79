//! AST types for starmatch patterns.

use std::ops::Range;

/// A parsed and validated pattern.
///
/// The original characters are kept alongside the branches: the rescan
/// search mode walks them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub source: Vec<char>,
    pub branches: Vec<Branch>,
}

impl Pattern {
    /// True when the pattern contains at least one `|`.
    pub fn has_alternation(&self) -> bool {
        self.branches.len() > 1
    }

    /// Number of starred items across all branches.
    pub fn star_count(&self) -> usize {
        self.branches
            .iter()
            .flat_map(|b| &b.items)
            .filter(|item| item.repeat == Repeat::ZeroOrMore)
            .count()
    }
}

/// One `|`-separated alternative.
///
/// `span` is the character range of the branch within [`Pattern::source`].
/// The empty pattern is a single branch with no items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub span: Range<usize>,
    pub items: Vec<Item>,
}

/// One atom with its repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub atom: Atom,
    pub repeat: Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    Literal(char),
    /// `.`
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    /// `*`
    ZeroOrMore,
}

pub const WILDCARD: char = '.';
pub const STAR: char = '*';
pub const SEPARATOR: char = '|';
