// src/parser/xml.rs
//! XML test reports (Surefire, Gradle, JUnit). Whatever the producer, the
//! counters sit as attributes on the document's first element.

use crate::error::ParseError;
use crate::stats::TestStatistics;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub const PATTERN: &str = "**/*report*/**/*.xml";

const TESTS: &str = "tests";
const ERRORS: &str = "errors";
const FAILURES: &str = "failures";
const SKIPPED: &str = "skipped";

/// Statistics from the attributes of the first element in `text`.
///
/// # Errors
/// Returns error if the document is empty or malformed, or the first element
/// lacks one of `tests`, `errors`, `failures`, `skipped` as an integer.
pub fn parse(text: &str) -> Result<TestStatistics, ParseError> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => return from_element(&element),
            Event::Eof => return Err(ParseError::EmptyDocument),
            _ => {}
        }
    }
}

#[derive(Default)]
struct Counters {
    tests: Option<u64>,
    errors: Option<u64>,
    failures: Option<u64>,
    skipped: Option<u64>,
}

impl Counters {
    fn slot(&mut self, name: &[u8]) -> Option<&mut Option<u64>> {
        match name {
            n if n == TESTS.as_bytes() => Some(&mut self.tests),
            n if n == ERRORS.as_bytes() => Some(&mut self.errors),
            n if n == FAILURES.as_bytes() => Some(&mut self.failures),
            n if n == SKIPPED.as_bytes() => Some(&mut self.skipped),
            _ => None,
        }
    }

    fn found(&self) -> Vec<String> {
        [
            (TESTS, self.tests),
            (ERRORS, self.errors),
            (FAILURES, self.failures),
            (SKIPPED, self.skipped),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_some())
        .map(|(name, _)| name.to_string())
        .collect()
    }
}

fn from_element(element: &BytesStart<'_>) -> Result<TestStatistics, ParseError> {
    let mut counters = Counters::default();

    for attribute in element.attributes() {
        let attribute = attribute?;
        let Some(slot) = counters.slot(attribute.key.local_name().as_ref()) else {
            continue;
        };
        // A non-numeric counter counts as absent.
        *slot = attribute.unescape_value()?.trim().parse().ok();
    }

    let (Some(total), Some(errors), Some(failures), Some(skipped)) = (
        counters.tests,
        counters.errors,
        counters.failures,
        counters.skipped,
    ) else {
        return Err(ParseError::MissingAttributes {
            element: String::from_utf8_lossy(element.name().as_ref()).into_owned(),
            found: counters.found(),
        });
    };

    TestStatistics::from_total(total, failures, errors, skipped)
        .ok_or(ParseError::NegativePassed { total })
}
