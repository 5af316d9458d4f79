//! Search configuration.

use std::time::Duration;

/// Default number of search states explored before giving up.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Default heap budget, in bytes, for the visited set.
pub const DEFAULT_VISITED_CAPACITY: usize = 2 * (1 << 20);

/// How `|` is scoped during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alternation {
    /// Each `|`-separated branch is an independent whole pattern, tried
    /// against the whole subject.
    #[default]
    WholePattern,
    /// At every search state whose remaining pattern still holds a `|`,
    /// split that remainder into branches and try each against the
    /// remaining subject, then keep stepping through the remainder with `|`
    /// and `*` compared as ordinary characters.
    ///
    /// With this scoping `ab|cd` matches `abcd`.
    Rescan,
}

/// Knobs for a [`crate::Matcher`].
///
/// Setters take and return `self`:
///
/// ```rust
/// use std::time::Duration;
/// use starmatch::Config;
///
/// let config = Config::new()
///     .step_limit(Some(10_000))
///     .time_limit(Some(Duration::from_millis(50)));
/// assert_eq!(config.get_step_limit(), Some(10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    step_limit: Option<usize>,
    time_limit: Option<Duration>,
    memoize: bool,
    visited_capacity: usize,
    alternation: Alternation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_limit: Some(DEFAULT_STEP_LIMIT),
            time_limit: None,
            memoize: true,
            visited_capacity: DEFAULT_VISITED_CAPACITY,
            alternation: Alternation::WholePattern,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of search states per call. `None` removes the limit.
    ///
    /// A `*` spends one step taking each character and one trying to stop
    /// after it, so even a linear match costs about two steps per subject
    /// character: under the default limit a subject longer than half of
    /// [`DEFAULT_STEP_LIMIT`] reports exhaustion against `a*`. Raise the
    /// limit for subjects that long.
    pub fn step_limit(mut self, limit: Option<usize>) -> Self {
        self.step_limit = limit;
        self
    }

    /// Maximum wall-clock time per call. `None` removes the limit.
    ///
    /// The clock is sampled every [`TIME_CHECK_INTERVAL`] steps, so a search
    /// may overrun the limit by that much work.
    pub fn time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Record failed search states so none is explored twice.
    pub fn memoize(mut self, yes: bool) -> Self {
        self.memoize = yes;
        self
    }

    /// Heap budget in bytes for the visited set. Searches that would need
    /// more run unmemoized.
    pub fn visited_capacity(mut self, bytes: usize) -> Self {
        self.visited_capacity = bytes;
        self
    }

    pub fn alternation(mut self, alternation: Alternation) -> Self {
        self.alternation = alternation;
        self
    }

    pub fn get_step_limit(&self) -> Option<usize> {
        self.step_limit
    }

    pub fn get_time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    pub fn get_memoize(&self) -> bool {
        self.memoize
    }

    pub fn get_visited_capacity(&self) -> usize {
        self.visited_capacity
    }

    pub fn get_alternation(&self) -> Alternation {
        self.alternation
    }
}

/// Steps between wall-clock samples.
pub const TIME_CHECK_INTERVAL: usize = 1024;
