//! Parser and validator for starmatch pattern strings.

use std::iter::{Enumerate, Peekable};
use std::str::Chars;

use log::trace;

use super::ast::*;
use super::atom::atom_of;

/// Errors that can occur while parsing a pattern.
///
/// Every variant carries the character offset of the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `*` at the start of the pattern or directly after a `|`.
    LeadingStar { at: usize },
    /// A `*` directly after another `*`.
    RepeatedStar { at: usize },
    /// An empty alternative in a pattern containing `|`.
    EmptyBranch { at: usize },
}

impl PatternError {
    pub fn offset(&self) -> usize {
        match *self {
            Self::LeadingStar { at } | Self::RepeatedStar { at } | Self::EmptyBranch { at } => at,
        }
    }
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeadingStar { at } => {
                write!(f, "'*' at offset {at} does not follow a literal or '.'")
            }
            Self::RepeatedStar { at } => write!(f, "Repeated '*' at offset {at}"),
            Self::EmptyBranch { at } => write!(f, "Empty alternative at offset {at}"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Parse a pattern string into a [`Pattern`].
pub fn parse(input: &str) -> Result<Pattern, PatternError> {
    let source: Vec<char> = input.chars().collect();
    let branches = Parser {
        chars: input.chars().enumerate().peekable(),
        len: source.len(),
        alternation: source.contains(&SEPARATOR),
    }
    .parse_branches()?;
    trace!("parsed {input:?} into {} branch(es)", branches.len());
    Ok(Pattern { source, branches })
}

struct Parser<'a> {
    chars: Peekable<Enumerate<Chars<'a>>>,
    len: usize,
    alternation: bool,
}

impl Parser<'_> {
    fn parse_branches(&mut self) -> Result<Vec<Branch>, PatternError> {
        let mut branches = Vec::new();
        let mut start = 0;
        loop {
            branches.push(self.parse_branch(start)?);
            match self.chars.next() {
                Some((at, SEPARATOR)) => start = at + 1,
                _ => break,
            }
        }
        Ok(branches)
    }

    /// Parse items up to the next `|` or end of input.  The separator itself
    /// is left for the caller.
    fn parse_branch(&mut self, start: usize) -> Result<Branch, PatternError> {
        let mut items = Vec::new();
        loop {
            let (at, c) = match self.chars.peek() {
                None | Some((_, SEPARATOR)) => break,
                Some(&(at, c)) => (at, c),
            };
            // A star is always consumed by the atom before it, so one seen
            // here opens the branch.
            if c == STAR {
                return Err(PatternError::LeadingStar { at });
            }
            self.chars.next();
            let atom = atom_of(c);
            let repeat = self.parse_repeat()?;
            items.push(Item { atom, repeat });
        }

        let end = self.chars.peek().map_or(self.len, |&(at, _)| at);
        if items.is_empty() && self.alternation {
            return Err(PatternError::EmptyBranch { at: start });
        }
        Ok(Branch {
            span: start..end,
            items,
        })
    }

    fn parse_repeat(&mut self) -> Result<Repeat, PatternError> {
        if self.chars.next_if(|&(_, c)| c == STAR).is_none() {
            return Ok(Repeat::Once);
        }
        match self.chars.peek() {
            Some(&(at, STAR)) => Err(PatternError::RepeatedStar { at }),
            _ => Ok(Repeat::ZeroOrMore),
        }
    }
}
