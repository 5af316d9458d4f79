//! Single-character membership tests for pattern atoms.

use super::ast::{Atom, WILDCARD};

/// The atom a raw pattern character stands for.
pub fn atom_of(pat: char) -> Atom {
    if pat == WILDCARD {
        Atom::Any
    } else {
        Atom::Literal(pat)
    }
}

/// Test whether subject character `ch` is matched by `atom`.
pub fn atom_matches(atom: Atom, ch: char) -> bool {
    match atom {
        Atom::Literal(c) => c == ch,
        Atom::Any => true,
    }
}

/// Test whether `ch` is matched by the raw pattern character `pat`.
///
/// `.` is the only special case; `|` and `*` compare by equality.
pub fn raw_matches(pat: char, ch: char) -> bool {
    atom_matches(atom_of(pat), ch)
}
