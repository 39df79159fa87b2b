// src/workspace/memory.rs
use super::Workspace;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// An in-memory workspace tree.
///
/// Paths are used verbatim as their own canonical form. Directories are
/// created implicitly for every ancestor of an added file.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkspace {
    nodes: BTreeMap<PathBuf, Node>,
    unreadable: BTreeSet<PathBuf>,
}

impl MemoryWorkspace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes
            .insert(path.to_path_buf(), Node::File(contents.into()));
        self
    }

    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes.insert(path.to_path_buf(), Node::Dir);
        self
    }

    /// Makes listing `path` fail with `PermissionDenied`.
    #[must_use]
    pub fn with_unreadable_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self = self.with_dir(path);
        self.unreadable.insert(path.to_path_buf());
        self
    }

    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    fn node(&self, path: &Path) -> io::Result<&Node> {
        self.nodes
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

impl Workspace for MemoryWorkspace {
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if self.unreadable.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                dir.display().to_string(),
            ));
        }
        match self.node(dir)? {
            Node::Dir => Ok(self
                .nodes
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .cloned()
                .collect()),
            Node::File(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a directory: {}", dir.display()),
            )),
        }
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(matches!(self.node(path)?, Node::Dir))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        match self.node(path)? {
            Node::File(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            Node::Dir => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
        }
    }

    fn canonical(&self, path: &Path) -> io::Result<PathBuf> {
        self.node(path).map(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_become_directories() {
        let ws = MemoryWorkspace::new().with_file("/ws/a/b/report.txt", "x");
        assert!(ws.is_dir(Path::new("/ws/a")).unwrap());
        assert!(!ws.is_dir(Path::new("/ws/a/b/report.txt")).unwrap());
        assert_eq!(
            ws.list(Path::new("/ws/a")).unwrap(),
            vec![PathBuf::from("/ws/a/b")]
        );
    }

    #[test]
    fn open_reads_contents() {
        let ws = MemoryWorkspace::new().with_file("/ws/r.txt", "hello");
        let mut s = String::new();
        ws.open(Path::new("/ws/r.txt"))
            .unwrap()
            .read_to_string(&mut s)
            .unwrap();
        assert_eq!(s, "hello");
    }

    #[test]
    fn unreadable_dir_fails_listing() {
        let ws = MemoryWorkspace::new().with_unreadable_dir("/ws/locked");
        assert!(ws.list(Path::new("/ws/locked")).is_err());
        assert!(ws.list(Path::new("/ws")).is_ok());
    }
}
