// src/workspace/local.rs
use super::Workspace;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// The workspace on the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalWorkspace {
    follow_links: bool,
}

impl LocalWorkspace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend into symlinked directories. Off by default; a link to a
    /// directory is then reported as a plain entry.
    #[must_use]
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }
}

impl Workspace for LocalWorkspace {
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        let meta = if self.follow_links {
            match fs::metadata(path) {
                // Dangling link: report the link itself.
                Err(e) if e.kind() == io::ErrorKind::NotFound => fs::symlink_metadata(path)?,
                other => other?,
            }
        } else {
            fs::symlink_metadata(path)?
        };
        Ok(meta.is_dir())
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn canonical(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}
