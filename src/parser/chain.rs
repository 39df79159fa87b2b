// src/parser/chain.rs
use super::{ReportFormat, ReportParser};
use crate::discovery::Candidate;
use crate::error::{ParseError, PlotError, Result};
use crate::stats::TestStatistics;
use crate::workspace::Workspace;
use encoding_rs::Encoding;
use std::fmt;
use tracing::debug;

/// A parser that claimed a file and then rejected its content.
#[derive(Debug)]
pub struct Rejection {
    pub format: ReportFormat,
    pub error: ParseError,
}

/// Why a file contributed nothing.
#[derive(Debug)]
pub enum FailureReason {
    /// No parser's glob matched the path; content was never read.
    Unclaimed,
    /// Every parser that claimed the path rejected its content.
    Rejected(Vec<Rejection>),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclaimed => f.write_str("no parser accepts this path"),
            Self::Rejected(rejections) => {
                let parts: Vec<String> = rejections
                    .iter()
                    .map(|r| format!("{}: {}", r.format, r.error))
                    .collect();
                f.write_str(&parts.join("; "))
            }
        }
    }
}

/// Result of running the chain against one file.
#[derive(Debug)]
pub enum ParseOutcome {
    Success(TestStatistics),
    Failure(FailureReason),
}

impl ParseOutcome {
    #[must_use]
    pub fn success(self) -> Option<TestStatistics> {
        match self {
            Self::Success(stats) => Some(stats),
            Self::Failure(_) => None,
        }
    }
}

/// Ordered parsers, tried until one succeeds.
///
/// A parser whose glob does not match the path is skipped without reading
/// the file. A parser that matches but rejects the content passes the file
/// on to the next parser, so formats with overlapping globs are settled by
/// content.
#[derive(Debug, Clone)]
pub struct ParserChain {
    parsers: Vec<ReportParser>,
}

impl ParserChain {
    /// Builds a chain trying `formats` in the given order.
    ///
    /// # Errors
    /// Returns `PlotError::EmptyChain` if `formats` is empty.
    pub fn new(formats: &[ReportFormat], encoding: &'static Encoding) -> Result<Self> {
        let parsers = formats
            .iter()
            .map(|&format| ReportParser::new(format, encoding))
            .collect::<Result<Vec<_>>>()?;
        Self::from_parsers(parsers)
    }

    /// # Errors
    /// Returns `PlotError::EmptyChain` if `parsers` is empty.
    pub fn from_parsers(parsers: Vec<ReportParser>) -> Result<Self> {
        if parsers.is_empty() {
            return Err(PlotError::EmptyChain);
        }
        Ok(Self { parsers })
    }

    /// The default XML-then-Surefire chain decoding as UTF-8.
    ///
    /// # Errors
    /// Returns error only if a built-in glob fails to compile.
    pub fn standard() -> Result<Self> {
        Self::new(&ReportFormat::DEFAULT_ORDER, encoding_rs::UTF_8)
    }

    pub fn parse(&self, workspace: &dyn Workspace, candidate: &Candidate) -> ParseOutcome {
        let mut rejections = Vec::new();

        for parser in self.parsers.iter().filter(|p| p.accepts(&candidate.canonical)) {
            match parser.parse(workspace, candidate) {
                Ok(stats) => {
                    debug!("Parsed '{candidate}' as {}: {stats:?}", parser.format());
                    return ParseOutcome::Success(stats);
                }
                Err(error) => {
                    debug!("{} parser rejected '{candidate}': {error}", parser.format());
                    rejections.push(Rejection {
                        format: parser.format(),
                        error,
                    });
                }
            }
        }

        if rejections.is_empty() {
            ParseOutcome::Failure(FailureReason::Unclaimed)
        } else {
            ParseOutcome::Failure(FailureReason::Rejected(rejections))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::MemoryWorkspace;
    use std::path::PathBuf;

    fn candidate(path: &str) -> Candidate {
        Candidate {
            path: PathBuf::from(path),
            canonical: path.to_string(),
        }
    }

    #[test]
    fn empty_chain_is_a_configuration_error() {
        assert!(matches!(
            ParserChain::new(&[], encoding_rs::UTF_8),
            Err(PlotError::EmptyChain)
        ));
    }

    #[test]
    fn falls_back_when_first_parser_rejects_content() {
        // Both globs match; the XML parser rejects plain text.
        let path = "/ws/surefire-reports/Foo.txt";
        let xml_txt = ReportParser {
            format: ReportFormat::Xml,
            pattern: glob::Pattern::new("**/*.txt").unwrap(),
            encoding: encoding_rs::UTF_8,
        };
        let chain = ParserChain::from_parsers(vec![
            xml_txt,
            ReportParser::new(ReportFormat::Surefire, encoding_rs::UTF_8).unwrap(),
        ])
        .unwrap();
        let ws = MemoryWorkspace::new()
            .with_file(path, "Tests run: 10, Failures: 1, Errors: 2, Skipped: 3\n");

        let stats = chain.parse(&ws, &candidate(path)).success();
        assert_eq!(stats, Some(TestStatistics::new(4, 3, 2, 1)));
    }

    #[test]
    fn unclaimed_path_is_never_opened() {
        // The file does not exist; opening it would yield a rejection.
        let chain = ParserChain::standard().unwrap();
        let ws = MemoryWorkspace::new();
        match chain.parse(&ws, &candidate("/ws/notes/readme.md")) {
            ParseOutcome::Failure(FailureReason::Unclaimed) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn all_rejections_are_reported() {
        let path = "/ws/reports/TEST-Foo.xml";
        let ws = MemoryWorkspace::new().with_file(path, r#"<testsuite tests="1"/>"#);
        let chain = ParserChain::standard().unwrap();
        match chain.parse(&ws, &candidate(path)) {
            ParseOutcome::Failure(FailureReason::Rejected(rejections)) => {
                assert_eq!(rejections.len(), 1);
                assert_eq!(rejections[0].format, ReportFormat::Xml);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
