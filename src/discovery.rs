// src/discovery.rs
//! Report discovery: breadth-first walk of a workspace, selecting files whose
//! canonical path matches any configured glob.
//!
//! Patterns are matched against the canonical absolute path with `/`
//! separators, so they are normally anchored with a leading `**/`.

use crate::cancel::CancellationToken;
use crate::error::{PlotError, Result};
use crate::workspace::{normalize_path, Workspace};
use glob::{MatchOptions, Pattern};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `*` and `?` stop at `/`; `**` crosses it.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A non-empty set of compiled glob patterns, matched with logical OR.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compiles `patterns`.
    ///
    /// # Errors
    /// Returns error if the set is empty or any pattern is not a valid glob.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        if patterns.is_empty() {
            return Err(PlotError::NoPatterns);
        }
        let patterns = patterns
            .iter()
            .map(|p| compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(path, MATCH_OPTIONS))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::as_str)
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.iter().map(|p| format!("'{p}'")).collect();
        write!(f, "[{}]", quoted.join(", "))
    }
}

/// Compiles a single glob with the crate's error type.
///
/// # Errors
/// Returns error if `pattern` is not a valid glob.
pub fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|source| PlotError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A located report file. Carries no parsed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path as handed out by the workspace; used to open the file.
    pub path: PathBuf,
    /// Canonical `/`-separated form; used for pattern matching and logs.
    pub canonical: String,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Walks `root` breadth-first and returns every file matching `patterns`.
///
/// Never fails: an IO error anywhere in the walk is logged and yields an
/// empty result. On cancellation the files collected so far are returned
/// and `cancel` stays set for the caller to observe.
pub fn locate(
    workspace: &dyn Workspace,
    root: &Path,
    patterns: &PatternSet,
    cancel: &CancellationToken,
) -> Vec<Candidate> {
    match walk(workspace, root, patterns, cancel) {
        Ok(found) => found,
        Err(err) => {
            warn!(
                "Failed to traverse fs tree with root '{}': {err}",
                root.display()
            );
            Vec::new()
        }
    }
}

fn walk(
    workspace: &dyn Workspace,
    root: &Path,
    patterns: &PatternSet,
    cancel: &CancellationToken,
) -> std::io::Result<Vec<Candidate>> {
    // The root is resolved even when links below it are not followed.
    let root = workspace.canonical(root)?;
    if !workspace.is_dir(&root)? {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "root is not a directory",
        ));
    }

    let mut found = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([root.clone()]);

    while let Some(dir) = queue.pop_front() {
        if cancel.is_cancelled() {
            warn!(
                "Discovery under '{}' cancelled after {} file(s)",
                root.display(),
                found.len()
            );
            return Ok(found);
        }

        let canonical_dir = workspace.canonical(&dir)?;
        if !visited.insert(canonical_dir.clone()) {
            debug!("Skipping already visited directory '{}'", dir.display());
            continue;
        }

        let mut children = workspace.list(&dir)?;
        children.sort();

        for child in children {
            if workspace.is_dir(&child)? {
                queue.push_back(child);
                continue;
            }
            let canonical = match child.file_name() {
                Some(name) => normalize_path(&canonical_dir.join(name)),
                None => normalize_path(&child),
            };
            if patterns.matches(&canonical) {
                found.push(Candidate {
                    path: child,
                    canonical,
                });
            }
        }
    }

    Ok(found)
}
