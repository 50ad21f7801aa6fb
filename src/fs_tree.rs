//! Read-only view of the file tree used by every component.
//!
//! Nothing in the crate writes through this trait, so scanners and resolvers
//! can run against [`DiskTree`] in production and an in-memory tree in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only file tree capability
pub trait FileTree {
    /// Child paths of a directory, in no particular order
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskTree;

impl FileTree for DiskTree {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = fs::read_dir(path)?;
        Ok(entries.flatten().map(|entry| entry.path()).collect())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
pub mod memory {
    use super::FileTree;
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone)]
    enum Node {
        Dir,
        File(String),
    }

    /// In-memory tree for tests. Parent directories are created implicitly.
    #[derive(Debug, Default)]
    pub struct MemoryTree {
        nodes: BTreeMap<PathBuf, Node>,
        denied: BTreeSet<PathBuf>,
    }

    impl MemoryTree {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
            self.add_file(path, content);
            self
        }

        pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
            self.add_dir(path);
            self
        }

        pub fn add_file(&mut self, path: impl AsRef<Path>, content: &str) {
            let path = path.as_ref();
            self.add_parents(path);
            self.nodes
                .insert(path.to_path_buf(), Node::File(content.to_string()));
        }

        pub fn add_dir(&mut self, path: impl AsRef<Path>) {
            let path = path.as_ref();
            self.add_parents(path);
            self.nodes.insert(path.to_path_buf(), Node::Dir);
        }

        /// Make listing or reading this path fail with `PermissionDenied`
        pub fn deny(&mut self, path: impl AsRef<Path>) {
            self.denied.insert(path.as_ref().to_path_buf());
        }

        fn add_parents(&mut self, path: &Path) {
            for ancestor in path.ancestors().skip(1) {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                self.nodes
                    .entry(ancestor.to_path_buf())
                    .or_insert(Node::Dir);
            }
        }

        fn check_access(&self, path: &Path) -> io::Result<()> {
            if self.denied.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("permission denied: {}", path.display()),
                ));
            }
            Ok(())
        }
    }

    impl FileTree for MemoryTree {
        fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
            self.check_access(path)?;
            match self.nodes.get(path) {
                Some(Node::Dir) => Ok(self
                    .nodes
                    .keys()
                    .filter(|candidate| candidate.parent() == Some(path))
                    .cloned()
                    .collect()),
                Some(Node::File(_)) => Err(io::Error::other("not a directory")),
                None => Err(io::Error::from(io::ErrorKind::NotFound)),
            }
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.check_access(path)?;
            match self.nodes.get(path) {
                Some(Node::File(content)) => Ok(content.clone()),
                Some(Node::Dir) => Err(io::Error::other("is a directory")),
                None => Err(io::Error::from(io::ErrorKind::NotFound)),
            }
        }

        fn exists(&self, path: &Path) -> bool {
            self.nodes.contains_key(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            matches!(self.nodes.get(path), Some(Node::Dir))
        }

        fn is_file(&self, path: &Path) -> bool {
            matches!(self.nodes.get(path), Some(Node::File(_)))
        }
    }
}
