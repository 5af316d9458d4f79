//! A small backtracking matcher for patterns made of literal characters,
//! the wildcard `.`, the star `*` and alternation `|`.
//!
//! Matching is always full-string: the pattern must consume the whole
//! subject.
//!
//! # Example
//!
//! ```rust
//! use starmatch::{Error, Matcher, PatternError, matches};
//!
//! assert_eq!(matches("abbbbba", "ab*a"), Ok(true));
//! assert_eq!(matches("abb", "ab*a"), Ok(false));
//! assert_eq!(matches("foo", "bar|fo*"), Ok(true));
//!
//! // Malformed patterns are rejected up front.
//! assert_eq!(
//!     matches("a", "a**"),
//!     Err(Error::InvalidPattern(PatternError::RepeatedStar { at: 2 }))
//! );
//!
//! // A compiled matcher can be reused, and shared between threads.
//! let m = Matcher::new(".*ab*.*").unwrap();
//! assert_eq!(m.try_is_match("xabyabbbz"), Ok(true));
//! ```

mod error;
pub mod pattern;

pub use error::Error;
pub use pattern::{Alternation, Config, MatchError, Pattern, PatternError};

/// A parsed pattern together with its search configuration.
#[derive(Debug, Clone)]
pub struct Matcher {
    text: String,
    pattern: Pattern,
    config: Config,
}

impl Matcher {
    /// Parse `pattern` with the default [`Config`].
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Self::with_config(pattern, Config::default())
    }

    pub fn with_config(pattern: &str, config: Config) -> Result<Self, PatternError> {
        Ok(Self {
            text: pattern.to_string(),
            pattern: crate::pattern::parse(pattern)?,
            config,
        })
    }

    /// Test whether the pattern consumes the whole of `subject`.
    ///
    /// Fails only when the search exceeds the configured budget.
    pub fn try_is_match(&self, subject: &str) -> Result<bool, MatchError> {
        let subject: Vec<char> = subject.chars().collect();
        pattern::is_match(&self.pattern, &self.config, &subject)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Test whether `pattern` matches the whole of `subject` under the default
/// [`Config`].
pub fn matches(subject: &str, pattern: &str) -> Result<bool, Error> {
    matches_with(subject, pattern, Config::default())
}

pub fn matches_with(subject: &str, pattern: &str, config: Config) -> Result<bool, Error> {
    let matcher = Matcher::with_config(pattern, config)?;
    Ok(matcher.try_is_match(subject)?)
}
