// src/config.rs
use crate::discovery::PatternSet;
use crate::error::{PlotError, Result};
use crate::parser::{self, ReportFormat};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File looked up in the workspace root when no config path is given.
pub const CONFIG_FILE: &str = "plotstat.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Globs selecting report files, matched against canonical paths.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
    /// Charset label for decoding reports. UTF-8 when absent.
    #[serde(default)]
    pub encoding: Option<String>,
    /// Point URL template with `%name%`, `%index%`, `%build%`.
    #[serde(default)]
    pub url: Option<String>,
    /// Parser chain order.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub follow_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            encoding: None,
            url: None,
            formats: default_formats(),
            parallel: default_parallel(),
            follow_links: false,
        }
    }
}

fn default_patterns() -> Vec<String> {
    ReportFormat::DEFAULT_ORDER
        .iter()
        .map(|f| f.pattern().to_string())
        .collect()
}
fn default_formats() -> Vec<String> {
    ReportFormat::DEFAULT_ORDER
        .iter()
        .map(|f| f.name().to_string())
        .collect()
}
fn default_parallel() -> bool { true }

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns error if `content` is not valid config TOML.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path`, or `plotstat.toml` under `root` when no path is given.
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load(root: &Path, path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (root.join(CONFIG_FILE), false),
        };
        if !required && !path.is_file() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(&path).map_err(|source| PlotError::Io {
            source,
            path: path.clone(),
        })?;
        Self::parse_toml(&content)
    }

    /// # Errors
    /// Returns error if the pattern list is empty or holds an invalid glob.
    pub fn pattern_set(&self) -> Result<PatternSet> {
        PatternSet::new(&self.patterns)
    }

    /// # Errors
    /// Returns error if a format name is unknown.
    pub fn formats(&self) -> Result<Vec<ReportFormat>> {
        self.formats.iter().map(|f| f.parse()).collect()
    }

    /// # Errors
    /// Returns error if the encoding label is unknown.
    pub fn encoding(&self) -> Result<&'static Encoding> {
        parser::resolve_encoding(self.encoding.as_deref())
    }

    /// Checks everything the pipeline will need to build its chain.
    ///
    /// # Errors
    /// Returns the first configuration problem found.
    pub fn validate(&self) -> Result<()> {
        self.pattern_set()?;
        if self.formats()?.is_empty() {
            return Err(PlotError::EmptyChain);
        }
        self.encoding()?;
        Ok(())
    }
}
