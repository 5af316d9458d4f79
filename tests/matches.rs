use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use quickcheck::{QuickCheck, TestResult};

use starmatch::pattern::config::DEFAULT_STEP_LIMIT;
use starmatch::{Alternation, Config, Error, MatchError, Matcher, PatternError, matches, matches_with};

fn m(subject: &str, pattern: &str) -> bool {
    matches(subject, pattern).unwrap()
}

fn rescan(subject: &str, pattern: &str) -> bool {
    matches_with(subject, pattern, Config::new().alternation(Alternation::Rescan)).unwrap()
}

fn is_plain(c: char) -> bool {
    !matches!(c, '.' | '*' | '|')
}

fn qc() -> QuickCheck {
    QuickCheck::new().tests(300)
}

/// `(subject, pattern, expected)` vectors shared by both alternation scopes.
/// `ab|cd` against `abcd` is the one case where they disagree.
const VECTORS: &[(&str, &str, bool)] = &[
    ("", "", true),
    ("abc", "", false),
    ("", "abc", false),
    ("abc", "abc", true),
    ("abc", "bca", false),
    ("abc", "abcde", false),
    ("abcde", "abc", false),
    ("abc", "ab.", true),
    ("abc", "...", true),
    ("", "a*", true),
    ("a", "a*", true),
    ("aa", "a*", true),
    ("aaa", "a*", true),
    ("a", "ab*", true),
    ("ab", "ab*", true),
    ("abb", "ab*", true),
    ("abb", "ab*a", false),
    ("abba", "ab*a", true),
    ("abbbbba", "ab*a", true),
    ("abbbbbbbbbbbaaaaa", "ab*a*", true),
    ("abbbbbbbbbbbaaaaa", "abb*bba*aa*aaa", true),
    ("foo", "foo|bar", true),
    ("foo", "bar|foo", true),
    ("foo", "bar|fo*", true),
    ("acb", "a.b", true),
    ("xbc", "abc", false),
    ("axc", "abc", false),
    ("abx", "abc", false),
    ("xabcy", ".*abc.*", true),
    ("ababc", ".*abc.*", true),
    ("abc", "ab*c", true),
    ("abc", "ab*bc", true),
    ("abbc", "ab*bc", true),
    ("abbbbc", "ab*bc", true),
    ("abc", "a.c", true),
    ("axc", "a.c", true),
    ("axyzc", "a.*c", true),
    ("axyzd", "a.*c", false),
    ("a]", "a]", true),
    ("abc", ".*ab.*|.*cd.*", true),
    ("e", "a|b|c|d|e", true),
    ("abcdefg", "abcd*efg", true),
    ("xabyabbbz", ".*ab*.*", true),
    ("xayabbbz", ".*ab*.*", true),
    ("uh-uh", "multiple words of text", false),
    ("multiple words yeah", ".*multiple words.*", true),
    ("abc", ".*ab*c.*", true),
    ("abc", ".*ab*bc.*", true),
    ("abbc", ".*ab*bc.*", true),
    ("abbbbc", ".*ab*bc.*", true),
    ("multiple words, yead", ".*multiple words.*", true),
];

// --- Concrete scenarios ---

#[test]
fn documented_scenarios() {
    assert!(m("aa", "a*"));
    assert!(m("abbbbba", "ab*a"));
    assert!(!m("abb", "ab*a"));
    assert!(m("xabyabbbz", ".*ab*.*"));
    assert!(m("foo", "bar|fo*"));
    assert!(!m("uh-uh", "multiple words of text"));
}

#[test]
fn base_cases() {
    assert!(m("", ""));
    assert!(!m("x", ""));
    assert!(m("", "a*"));
}

#[test]
fn vectors_whole_pattern() {
    for &(subject, pattern, expected) in VECTORS {
        assert_eq!(m(subject, pattern), expected, "{subject:?} ~ {pattern:?}");
    }
    assert!(!m("abcd", "ab|cd"));
}

#[test]
fn vectors_rescan() {
    for &(subject, pattern, expected) in VECTORS {
        assert_eq!(rescan(subject, pattern), expected, "{subject:?} ~ {pattern:?}");
    }
    assert!(rescan("abcd", "ab|cd"));
}

#[test]
fn long_uniform_star() {
    assert!(m(&"a".repeat(666), "a*"));
    assert!(rescan(&"a".repeat(666), "a*"));
}

// --- Errors ---

#[test]
fn invalid_patterns() {
    let cases = [
        ("*", PatternError::LeadingStar { at: 0 }),
        ("ab|*", PatternError::LeadingStar { at: 3 }),
        ("a**", PatternError::RepeatedStar { at: 2 }),
        ("a|", PatternError::EmptyBranch { at: 2 }),
        ("||", PatternError::EmptyBranch { at: 0 }),
    ];
    for (pattern, expected) in cases {
        assert_eq!(matches("a", pattern), Err(Error::InvalidPattern(expected)), "{pattern:?}");
    }
}

#[test]
fn worst_case_trips_default_budget() {
    let pattern = "a*".repeat(16) + "b";
    let subject = "a".repeat(64);
    let config = Config::new().memoize(false);
    assert_eq!(
        matches_with(&subject, &pattern, config),
        Err(Error::ResourceExhausted(MatchError::StepLimitExceeded {
            limit: DEFAULT_STEP_LIMIT
        }))
    );
    // With the memo the same search is cheap and decides.
    assert_eq!(matches(&subject, &pattern), Ok(false));
}

#[test]
fn worst_case_trips_time_limit() {
    let pattern = "a*".repeat(16) + "b";
    let subject = "a".repeat(64);
    let limit = Duration::from_millis(20);
    let config = Config::new().memoize(false).step_limit(None).time_limit(Some(limit));
    let err = matches_with(&subject, &pattern, config).unwrap_err();
    assert_eq!(err, Error::ResourceExhausted(MatchError::TimeLimitExceeded { limit }));
}

#[test]
fn stacked_wildcard_stars_stay_within_budget() {
    // Work per step is bounded, so either answer arrives promptly.
    let pattern = ".*".repeat(5) + "b";
    for n in [60_000, 250_000] {
        let subject = "a".repeat(n);
        for alternation in [Alternation::WholePattern, Alternation::Rescan] {
            let config = Config::new().alternation(alternation);
            let started = Instant::now();
            let result = matches_with(&subject, &pattern, config);
            assert!(
                matches!(result, Ok(false) | Err(Error::ResourceExhausted(_))),
                "n={n} {alternation:?}: {result:?}"
            );
            assert!(started.elapsed() < Duration::from_secs(10), "n={n} {alternation:?}");
        }
    }
    assert_eq!(matches(&"a".repeat(60_000), &pattern), Ok(false));
    assert_eq!(
        matches(&"a".repeat(250_000), &pattern),
        Err(Error::ResourceExhausted(MatchError::StepLimitExceeded {
            limit: DEFAULT_STEP_LIMIT
        }))
    );
}

#[test]
fn linear_star_costs_two_steps_per_char() {
    // One step to take each character and one to try stopping there.
    let subject = "a".repeat(DEFAULT_STEP_LIMIT / 2 + 1);
    assert_eq!(
        matches(&subject, "a*"),
        Err(Error::ResourceExhausted(MatchError::StepLimitExceeded {
            limit: DEFAULT_STEP_LIMIT
        }))
    );
    let config = Config::new().step_limit(Some(DEFAULT_STEP_LIMIT + 8));
    assert_eq!(matches_with(&subject, "a*", config), Ok(true));
    assert_eq!(matches(&"a".repeat(DEFAULT_STEP_LIMIT / 4), "a*"), Ok(true));
}

// --- Concurrency ---

#[test]
fn shared_matcher_across_threads() {
    let matcher = Arc::new(Matcher::new(".*ab*.*|x*").unwrap());
    let subjects = ["xabyabbbz", "xxxx", "zzz", "", "ab", "zb"];
    let expected: Vec<bool> = subjects
        .iter()
        .map(|s| matcher.try_is_match(s).unwrap())
        .collect();
    assert_eq!(expected, vec![true, true, false, true, true, false]);

    thread::scope(|scope| {
        for _ in 0..8 {
            let matcher = Arc::clone(&matcher);
            let expected = &expected;
            scope.spawn(move || {
                for (s, want) in subjects.iter().zip(expected) {
                    assert_eq!(matcher.try_is_match(s), Ok(*want));
                }
            });
        }
    });
}

// --- Properties ---

#[test]
fn prop_literal_self_match() {
    fn prop(s: String) -> bool {
        let s: String = s.chars().filter(|&c| is_plain(c)).collect();
        m(&s, &s)
    }
    qc().quickcheck(prop as fn(String) -> bool);
}

#[test]
fn prop_wildcards_match_exact_length() {
    fn prop(s: String) -> TestResult {
        let n = s.chars().count();
        if n == 0 {
            return TestResult::discard();
        }
        TestResult::from_bool(
            m(&s, &".".repeat(n)) && !m(&s, &".".repeat(n + 1)) && !m(&s, &".".repeat(n - 1)),
        )
    }
    qc().quickcheck(prop as fn(String) -> TestResult);
}

#[test]
fn prop_star_repeats() {
    fn prop(c: char, d: char, k: u8) -> TestResult {
        if !is_plain(c) || !is_plain(d) || c == d {
            return TestResult::discard();
        }
        let run: String = std::iter::repeat_n(c, usize::from(k % 32)).collect();
        let starred = format!("{c}*");
        let tail = format!("{run}{d}");
        TestResult::from_bool(m(&run, &starred) && !m(&tail, &starred))
    }
    qc().quickcheck(prop as fn(char, char, u8) -> TestResult);
}

#[test]
fn prop_alternation_outcome_commutes() {
    fn prop(s: String) -> bool {
        m(&s, "a|b") == m(&s, "b|a")
    }
    qc().quickcheck(prop as fn(String) -> bool);
    for s in ["a", "b", "ab", "ba", "", "c"] {
        assert_eq!(m(s, "a|b"), m(s, "b|a"), "{s:?}");
    }
}

#[test]
fn prop_memo_does_not_change_answers() {
    fn prop(pattern: Vec<u8>, subject: Vec<bool>) -> TestResult {
        const ALPHABET: [char; 5] = ['a', 'b', '.', '*', '|'];
        let pattern: String = pattern
            .iter()
            .take(8)
            .map(|&b| ALPHABET[usize::from(b) % ALPHABET.len()])
            .collect();
        let subject: String = subject
            .iter()
            .take(10)
            .map(|&b| if b { 'a' } else { 'b' })
            .collect();
        for alternation in [Alternation::WholePattern, Alternation::Rescan] {
            let config = Config::new().alternation(alternation).step_limit(None);
            let Ok(memo) = Matcher::with_config(&pattern, config.clone()) else {
                return TestResult::discard();
            };
            let plain = Matcher::with_config(&pattern, config.memoize(false)).unwrap();
            if memo.try_is_match(&subject) != plain.try_is_match(&subject) {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }
    qc().quickcheck(prop as fn(Vec<u8>, Vec<bool>) -> TestResult);
}
