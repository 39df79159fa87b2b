// src/parser/surefire.rs
//! Maven Surefire plain-text reports, e.g.
//!
//! ```text
//! -------------------------------------------------------------------------------
//! Test set: foo.bar.BazTest
//! -------------------------------------------------------------------------------
//! Tests run: 2, Failures: 0, Errors: 0, Skipped: 0, Time elapsed: 0.1 s - in foo.bar.BazTest
//! ```

use crate::error::ParseError;
use crate::stats::TestStatistics;
use regex::Regex;
use std::sync::LazyLock;

pub const PATTERN: &str = "**/surefire-reports/*.txt";

static TESTS_RUN_RE: LazyLock<Regex> = LazyLock::new(|| marker(r"tests run"));
static FAILURES_RE: LazyLock<Regex> = LazyLock::new(|| marker(r"failures"));
static ERRORS_RE: LazyLock<Regex> = LazyLock::new(|| marker(r"errors"));
static SKIPPED_RE: LazyLock<Regex> = LazyLock::new(|| marker(r"skipped"));

fn marker(name: &str) -> Regex {
    Regex::new(&format!(r"(?i){name}:\s*(\d+)")).unwrap_or_else(|_| panic!("Invalid Regex"))
}

/// Statistics from the first summary line in `text`.
///
/// # Errors
/// Returns error if no line carries all four counters, or the only such
/// lines classify more outcomes than they report as run.
pub fn parse(text: &str) -> Result<TestStatistics, ParseError> {
    let mut rejected = None;
    for line in text.lines() {
        match parse_line(line) {
            Some(Ok(stats)) => return Ok(stats),
            Some(Err(err)) => {
                rejected.get_or_insert(err);
            }
            None => {}
        }
    }
    Err(rejected.unwrap_or(ParseError::NoSummaryLine))
}

/// `None` if `line` is not a summary line.
fn parse_line(line: &str) -> Option<Result<TestStatistics, ParseError>> {
    let total = capture(&TESTS_RUN_RE, line)?;
    let failures = capture(&FAILURES_RE, line)?;
    let errors = capture(&ERRORS_RE, line)?;
    let skipped = capture(&SKIPPED_RE, line)?;

    Some(
        TestStatistics::from_total(total, failures, errors, skipped)
            .ok_or(ParseError::NegativePassed { total }),
    )
}

fn capture(re: &Regex, line: &str) -> Option<u64> {
    re.captures(line)?.get(1)?.as_str().parse().ok()
}
