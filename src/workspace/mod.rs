// src/workspace/mod.rs
//! The filesystem capabilities report discovery and parsing rely on.
//!
//! Nothing here writes. The locator only lists and classifies entries; the
//! parsers only open files for sequential reads.

mod local;
mod memory;

pub use self::local::LocalWorkspace;
pub use self::memory::MemoryWorkspace;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Read-only view of a build workspace.
pub trait Workspace: Sync {
    /// Immediate children of `dir`, as full paths.
    ///
    /// # Errors
    /// Returns error if `dir` cannot be opened for listing.
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Whether `path` should be descended into.
    ///
    /// # Errors
    /// Returns error if the entry cannot be inspected.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Opens `path` for sequential reads. The handle is closed when dropped.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Canonical form of `path`, used for pattern matching and to recognise
    /// a directory reached twice.
    ///
    /// # Errors
    /// Returns error if the path cannot be resolved.
    fn canonical(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
