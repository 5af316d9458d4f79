//! starmatch pattern engine.
//!
//! A pattern matches only if it consumes the entire subject.
//!
//! # Pattern syntax
//!
//! | Token | Meaning                                                   |
//! |-------|-----------------------------------------------------------|
//! | `c`   | The literal character `c` (any Unicode scalar value)      |
//! | `.`   | Any single character                                      |
//! | `X*`  | Zero or more of the literal or `.` before it              |
//! | `A\|B` | Alternation between whole-pattern branches               |
//!
//! There is no escaping: `.`, `*` and `|` are always operators. A `*` must
//! follow a literal or `.`, and alternatives must be non-empty.

pub mod ast;
pub mod atom;
pub mod config;
pub mod matcher;
pub mod parser;

pub use ast::{Atom, Branch, Item, Pattern, Repeat};
pub use config::{Alternation, Config};
pub use matcher::{MatchError, is_match};
pub use parser::{PatternError, parse};
