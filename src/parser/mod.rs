// src/parser/mod.rs
//! Format-specific report parsers and the chain that tries them in order.

pub mod chain;
pub mod surefire;
pub mod xml;

pub use self::chain::{FailureReason, ParseOutcome, ParserChain, Rejection};

use crate::discovery::{self, Candidate, MATCH_OPTIONS};
use crate::error::{ParseError, PlotError, Result};
use crate::stats::TestStatistics;
use crate::workspace::Workspace;
use encoding_rs::Encoding;
use glob::Pattern;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Report formats the chain knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// First element of an XML document carries the counters.
    Xml,
    /// Maven Surefire `.txt` summary.
    Surefire,
}

impl ReportFormat {
    /// Default chain order.
    pub const DEFAULT_ORDER: [ReportFormat; 2] = [Self::Xml, Self::Surefire];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Surefire => "surefire",
        }
    }

    /// Glob of the paths this format is willing to attempt.
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Xml => xml::PATTERN,
            Self::Surefire => surefire::PATTERN,
        }
    }

    /// Extracts statistics from decoded report text.
    ///
    /// # Errors
    /// Returns error if the content does not hold this format's counters.
    pub fn parse_text(self, text: &str) -> std::result::Result<TestStatistics, ParseError> {
        match self {
            Self::Xml => xml::parse(text),
            Self::Surefire => surefire::parse(text),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportFormat {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "surefire" | "surefire-txt" | "txt" => Ok(Self::Surefire),
            _ => Err(PlotError::UnknownFormat(s.to_string())),
        }
    }
}

/// Resolves a WHATWG encoding label. `None` means UTF-8.
///
/// # Errors
/// Returns error if the label is not a known encoding.
pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        None => Ok(encoding_rs::UTF_8),
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| PlotError::UnknownEncoding(label.to_string())),
    }
}

/// One format bound to its compiled acceptance glob and a decoding charset.
#[derive(Debug, Clone)]
pub struct ReportParser {
    format: ReportFormat,
    pattern: Pattern,
    encoding: &'static Encoding,
}

impl ReportParser {
    /// # Errors
    /// Returns error if the format's glob fails to compile.
    pub fn new(format: ReportFormat, encoding: &'static Encoding) -> Result<Self> {
        Ok(Self {
            format,
            pattern: discovery::compile(format.pattern())?,
            encoding,
        })
    }

    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        self.pattern.matches_with(path, MATCH_OPTIONS)
    }

    /// Reads and decodes `candidate`, then extracts its statistics.
    ///
    /// The file handle is released before content parsing starts.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or its content is rejected.
    pub fn parse(
        &self,
        workspace: &dyn Workspace,
        candidate: &Candidate,
    ) -> std::result::Result<TestStatistics, ParseError> {
        let mut bytes = Vec::new();
        workspace.open(&candidate.path)?.read_to_end(&mut bytes)?;
        // BOM, when present, overrides the configured charset.
        let (text, _, _) = self.encoding.decode(&bytes);
        self.format.parse_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_round_trip() {
        for format in ReportFormat::DEFAULT_ORDER {
            assert_eq!(format.name().parse::<ReportFormat>().unwrap(), format);
        }
        assert!(matches!(
            "junit".parse::<ReportFormat>(),
            Err(PlotError::UnknownFormat(_))
        ));
    }

    #[test]
    fn acceptance_follows_format_glob() {
        let enc = encoding_rs::UTF_8;
        let xml = ReportParser::new(ReportFormat::Xml, enc).unwrap();
        let txt = ReportParser::new(ReportFormat::Surefire, enc).unwrap();

        assert!(xml.accepts("/ws/target/surefire-reports/TEST-Foo.xml"));
        assert!(xml.accepts("/ws/build/test-results/reports/x/y.xml"));
        assert!(!xml.accepts("/ws/target/results/TEST-Foo.xml"));

        assert!(txt.accepts("/ws/target/surefire-reports/Foo.txt"));
        assert!(!txt.accepts("/ws/target/surefire-reports/Foo.xml"));
    }

    #[test]
    fn encoding_labels_resolve() {
        assert_eq!(resolve_encoding(None).unwrap(), encoding_rs::UTF_8);
        assert_eq!(
            resolve_encoding(Some("latin1")).unwrap(),
            encoding_rs::WINDOWS_1252
        );
        assert!(matches!(
            resolve_encoding(Some("klingon")),
            Err(PlotError::UnknownEncoding(_))
        ));
    }
}
