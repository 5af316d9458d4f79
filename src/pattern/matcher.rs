//! Pattern matcher: decide whether a [`Pattern`] matches a whole subject.
//!
//! All positions are **character** (not byte) indices.
//!
//! The search is a backtracking walk over `(pattern position, subject
//! position)` states using an explicit job stack. Without memoization its
//! worst case is exponential in the number of stars. With memoization every
//! state is expanded at most once, and only failures need recording because
//! any success ends the search.
//!
//! Stars are expanded lazily: a star state either takes one more repetition
//! or moves past the star, so every step does a bounded amount of work and
//! the step limit bounds the running time.

use std::time::{Duration, Instant};

use itertools::Itertools;
use log::debug;

use super::ast::*;
use super::atom::{atom_matches, raw_matches};
use super::config::{Alternation, Config, TIME_CHECK_INTERVAL};

/// A search stopped before it could decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    StepLimitExceeded { limit: usize },
    TimeLimitExceeded { limit: Duration },
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepLimitExceeded { limit } => {
                write!(f, "Search aborted after {limit} steps")
            }
            Self::TimeLimitExceeded { limit } => {
                write!(f, "Search aborted after {limit:?}")
            }
        }
    }
}

impl std::error::Error for MatchError {}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Test whether `pattern` consumes the whole of `subject`.
pub fn is_match(pattern: &Pattern, config: &Config, subject: &[char]) -> Result<bool, MatchError> {
    let mut budget = Budget::new(config);
    let result = match config.get_alternation() {
        Alternation::WholePattern => match_branches(pattern, config, subject, &mut budget),
        Alternation::Rescan => match_rescan(pattern, config, subject, &mut budget),
    };
    if let Err(ref err) = result {
        debug!(
            "{err} (pattern {:?}, subject of {} chars)",
            pattern.source.iter().collect::<String>(),
            subject.len()
        );
    }
    result
}

// ─── Budget and visited set ─────────────────────────────────────────────────

struct Budget {
    steps: usize,
    step_limit: Option<usize>,
    time_limit: Option<(Instant, Duration)>,
}

impl Budget {
    fn new(config: &Config) -> Self {
        Self {
            steps: 0,
            step_limit: config.get_step_limit(),
            time_limit: config.get_time_limit().map(|limit| (Instant::now(), limit)),
        }
    }

    fn step(&mut self) -> Result<(), MatchError> {
        self.steps += 1;
        if let Some(limit) = self.step_limit
            && self.steps > limit
        {
            return Err(MatchError::StepLimitExceeded { limit });
        }
        if self.steps % TIME_CHECK_INTERVAL == 0
            && let Some((started, limit)) = self.time_limit
            && started.elapsed() > limit
        {
            return Err(MatchError::TimeLimitExceeded { limit });
        }
        Ok(())
    }
}

type Bits = u32;
const BIT_SIZE: usize = Bits::BITS as usize;

/// Bitset of search states already expanded.
struct Visited {
    bits: Vec<Bits>,
}

impl Visited {
    /// Allocate room for `states` states, or `None` when memoization is off
    /// or the set would exceed the configured capacity.
    fn new(config: &Config, states: usize) -> Option<Self> {
        if !config.get_memoize() {
            return None;
        }
        let words = states.div_ceil(BIT_SIZE);
        let bytes = words.saturating_mul(BIT_SIZE / 8);
        if bytes > config.get_visited_capacity() {
            debug!(
                "visited set needs {bytes} bytes (capacity {}), searching without memoization",
                config.get_visited_capacity()
            );
            return None;
        }
        Some(Self {
            bits: vec![0; words],
        })
    }

    /// Mark state `k`. Returns `false` if it was already marked.
    fn insert(&mut self, k: usize) -> bool {
        let word = &mut self.bits[k / BIT_SIZE];
        let mask = 1 << (k % BIT_SIZE);
        if *word & mask == 0 {
            *word |= mask;
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.bits.fill(0);
    }
}

/// False when a memoized state has been seen before.
fn first_visit(visited: &mut Option<Visited>, k: usize) -> bool {
    visited.as_mut().is_none_or(|v| v.insert(k))
}

// ─── Whole-pattern alternation ──────────────────────────────────────────────

/// Try each branch, left to right, against the whole subject.
fn match_branches(
    pattern: &Pattern,
    config: &Config,
    subject: &[char],
    budget: &mut Budget,
) -> Result<bool, MatchError> {
    let widest = pattern.branches.iter().map(|b| b.items.len()).max().unwrap_or(0);
    let mut visited = Visited::new(config, (widest + 1).saturating_mul(subject.len() + 1));
    for branch in &pattern.branches {
        if let Some(v) = visited.as_mut() {
            v.clear();
        }
        if match_items(&branch.items, subject, budget, &mut visited)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Backtracking search over `(item index, subject position)`.
fn match_items(
    items: &[Item],
    subject: &[char],
    budget: &mut Budget,
    visited: &mut Option<Visited>,
) -> Result<bool, MatchError> {
    let stride = subject.len() + 1;
    let mut jobs = vec![(0usize, 0usize)];
    while let Some((ip, at)) = jobs.pop() {
        if !first_visit(visited, ip * stride + at) {
            continue;
        }
        budget.step()?;

        let Some(item) = items.get(ip) else {
            if at == subject.len() {
                return Ok(true);
            }
            continue;
        };
        match item.repeat {
            Repeat::Once => {
                if subject.get(at).is_some_and(|&ch| atom_matches(item.atom, ch)) {
                    jobs.push((ip + 1, at + 1));
                }
            }
            Repeat::ZeroOrMore => {
                // Resuming the star at `at + 1` is the same state as entering
                // it there. Zero repetitions is popped first.
                if subject.get(at).is_some_and(|&ch| atom_matches(item.atom, ch)) {
                    jobs.push((ip, at + 1));
                }
                jobs.push((ip + 1, at));
            }
        }
    }
    Ok(false)
}

// ─── Rescan alternation ─────────────────────────────────────────────────────

/// A rescan search state: subject position, pattern start, and the index
/// into `ends` of the pattern end.
///
/// A `repeating` state sits inside the `c*` at `start` and may only take
/// another `c` or move past the star; a plain state is a full rescan step.
#[derive(Clone, Copy, Debug)]
struct Job {
    at: usize,
    start: usize,
    end: usize,
    repeating: bool,
}

impl Job {
    fn key(&self, plane: usize, stride: usize) -> usize {
        (self.end * plane + self.start * stride + self.at) * 2 + usize::from(self.repeating)
    }
}

/// Walk the raw pattern characters, splitting the remaining pattern at its
/// separators at every state. See [`Alternation::Rescan`].
fn match_rescan(
    pattern: &Pattern,
    config: &Config,
    subject: &[char],
    budget: &mut Budget,
) -> Result<bool, MatchError> {
    let src = &pattern.source;
    // A pattern range always ends at a separator or at the end of the pattern.
    let ends: Vec<usize> = src
        .iter()
        .positions(|&c| c == SEPARATOR)
        .chain(std::iter::once(src.len()))
        .collect();
    let full = ends.len() - 1;

    let stride = subject.len() + 1;
    let plane = (src.len() + 1).saturating_mul(stride);
    let mut visited = Visited::new(config, ends.len().saturating_mul(plane).saturating_mul(2));

    let mut jobs = vec![Job {
        at: 0,
        start: 0,
        end: full,
        repeating: false,
    }];
    while let Some(job) = jobs.pop() {
        if !first_visit(&mut visited, job.key(plane, stride)) {
            continue;
        }
        budget.step()?;

        let Job { at, start, end, .. } = job;
        if job.repeating {
            // Zero further repetitions is popped first.
            if at < subject.len() && raw_matches(src[start], subject[at]) {
                jobs.push(Job { at: at + 1, ..job });
            }
            jobs.push(Job {
                start: start + 2,
                repeating: false,
                ..job
            });
            continue;
        }

        let stop = ends[end];
        if at == subject.len() {
            if start == stop {
                return Ok(true);
            }
        } else if start < stop && raw_matches(src[start], subject[at]) {
            jobs.push(Job {
                at: at + 1,
                start: start + 1,
                ..job
            });
        }

        if start + 1 < stop && src[start + 1] == STAR {
            jobs.push(Job {
                repeating: true,
                ..job
            });
        }

        // `ends[end] == stop`, so any earlier entry from `first` on is a
        // separator inside `start..stop`.
        let first = ends.partition_point(|&p| p < start);
        if first < end {
            let mut from = start;
            let branches: Vec<Job> = (first..=end)
                .map(|e| {
                    let branch = Job {
                        at,
                        start: from,
                        end: e,
                        repeating: false,
                    };
                    from = ends[e] + 1;
                    branch
                })
                .collect();
            jobs.extend(branches.into_iter().rev());
        }
    }
    Ok(false)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
