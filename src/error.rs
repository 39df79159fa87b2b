// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Setup-time failures. Raised while building a chain, pipeline or config,
/// never while parsing an individual report.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Parser chain has no parsers")]
    EmptyChain,

    #[error("No report patterns configured")]
    NoPatterns,

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Unknown character encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Unknown report format '{0}' (expected 'xml' or 'surefire')")]
    UnknownFormat(String),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;

/// Content failure of a single parser against a single file.
///
/// Caught by the chain, which then moves on to the next parser.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read report: {0}")]
    Io(#[from] std::io::Error),

    #[error("no 'Tests run/Failures/Errors/Skipped' summary line")]
    NoSummaryLine,

    #[error("XML document has no elements")]
    EmptyDocument,

    #[error("root element '{element}' lacks statistics attributes (found: {found:?})")]
    MissingAttributes {
        element: String,
        found: Vec<String>,
    },

    #[error("classified outcomes exceed reported total ({total})")]
    NegativePassed { total: u64 },

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
}
