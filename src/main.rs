use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Either;
use log::info;

use starmatch::{Alternation, Config, Matcher};

/// Exit status under `--quiet` when some subject did not match.
const EXIT_NO_MATCH: u8 = 1;
/// Exit status when a subject's search ran out of budget.
const EXIT_EXHAUSTED: u8 = 3;
/// Exit status for an invalid pattern or unreadable input.
const EXIT_FATAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern built from literals, `.`, `*` and `|`
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// Subjects to test; read one per line from stdin when absent
    #[arg(value_name = "SUBJECT")]
    subjects: Vec<String>,

    /// Maximum search steps per subject
    #[arg(long, value_name = "N", conflicts_with = "no_step_limit")]
    step_limit: Option<usize>,

    /// Search without a step limit
    #[arg(long)]
    no_step_limit: bool,

    /// Maximum search time per subject, in milliseconds
    #[arg(long, value_name = "MS")]
    time_limit_ms: Option<u64>,

    /// Disable the visited-state memo
    #[arg(long)]
    no_memo: bool,

    /// Re-split the remaining pattern at `|` at every step
    #[arg(long)]
    rescan: bool,

    /// Print nothing; exit 0 only if every subject matched
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Log search diagnostics to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::new().memoize(!self.no_memo);
        if self.no_step_limit {
            config = config.step_limit(None);
        } else if let Some(n) = self.step_limit {
            config = config.step_limit(Some(n));
        }
        if let Some(ms) = self.time_limit_ms {
            config = config.time_limit(Some(Duration::from_millis(ms)));
        }
        if self.rescan {
            config = config.alternation(Alternation::Rescan);
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    ExitCode::from(run(&args, io::stdin().lock(), &mut io::stdout().lock()))
}

/// Test every subject and return the process exit status.
///
/// Subjects come from `args`, or one per line from `input` when none were
/// given. Fatal errors are reported on stderr.
fn run(args: &Args, input: impl BufRead, out: &mut impl Write) -> u8 {
    try_run(args, input, out).unwrap_or_else(|err| {
        eprintln!("error: {err:#}");
        EXIT_FATAL
    })
}

fn try_run(args: &Args, input: impl BufRead, out: &mut impl Write) -> Result<u8> {
    let matcher = Matcher::with_config(&args.pattern, args.config())
        .with_context(|| format!("invalid pattern {:?}", args.pattern))?;
    info!(
        "pattern {:?}: {} branch(es), {} star(s)",
        matcher.as_str(),
        matcher.pattern().branches.len(),
        matcher.pattern().star_count()
    );

    let subjects = if args.subjects.is_empty() {
        Either::Right(input.lines())
    } else {
        Either::Left(args.subjects.iter().map(|s| Ok(s.clone())))
    };

    let mut all_matched = true;
    let mut exhausted = false;
    for subject in subjects {
        let subject = subject.context("failed to read stdin")?;
        match matcher.try_is_match(&subject) {
            Ok(matched) => {
                all_matched &= matched;
                if !args.quiet {
                    writeln!(out, "{matched}")?;
                }
            }
            Err(err) => {
                all_matched = false;
                exhausted = true;
                if !args.quiet {
                    writeln!(out, "error: {err}")?;
                }
            }
        }
    }
    out.flush()?;

    Ok(if exhausted {
        EXIT_EXHAUSTED
    } else if args.quiet && !all_matched {
        EXIT_NO_MATCH
    } else {
        0
    })
}
