//! The content-tree existence check.
//!
//! Router nodes need exactly one question answered about the content tree:
//! does a directory exist at a candidate path? [`ContentTree`] is that seam.
//! [`FsTree`] answers it against real directories under a modules root;
//! [`MemoryTree`] answers it from a fixed set, for tests and demos.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use crate::path::DispatchPath;

/// Answers directory-existence queries against the content-module tree.
pub trait ContentTree: fmt::Debug + Send + Sync {
    /// Returns `true` if a directory exists at the given path, relative to
    /// the tree root.
    fn directory_exists(&self, path: &DispatchPath) -> bool;
}

/// A content tree backed by real directories on disk.
///
/// Segments containing path separators or `.`/`..` are rejected outright,
/// so a crafted URL cannot probe outside the modules root.
#[derive(Debug, Clone)]
pub struct FsTree {
    root: PathBuf,
}

impl FsTree {
    /// Creates a tree rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the tree root.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl ContentTree for FsTree {
    fn directory_exists(&self, path: &DispatchPath) -> bool {
        if path.is_empty() {
            return self.root.is_dir();
        }

        let mut candidate = self.root.clone();
        for segment in path.segments() {
            if segment == "." || segment == ".." || segment.contains(['/', '\\']) {
                tracing::warn!(segment = %segment, "rejecting suspicious tree segment");
                return false;
            }
            candidate.push(segment);
        }
        candidate.is_dir()
    }
}

/// An in-memory content tree holding a fixed set of directory paths.
///
/// # Examples
///
/// ```
/// use waymark_routing::path::DispatchPath;
/// use waymark_routing::tree::{ContentTree, MemoryTree};
///
/// let tree = MemoryTree::with_dirs(["tasks", "tasks/add", "about"]);
/// assert!(tree.directory_exists(&DispatchPath::parse("tasks/add")));
/// assert!(!tree.directory_exists(&DispatchPath::parse("archive")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    dirs: HashSet<String>,
}

impl MemoryTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree containing the given `/`-separated directory paths.
    pub fn with_dirs<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for dir in dirs {
            tree.insert(dir.as_ref());
        }
        tree
    }

    /// Adds a directory path, e.g. `"tasks/add"`.
    pub fn insert(&mut self, dir: &str) {
        self.dirs.insert(DispatchPath::parse(dir).to_string());
    }
}

impl ContentTree for MemoryTree {
    fn directory_exists(&self, path: &DispatchPath) -> bool {
        if path.is_empty() {
            return true;
        }
        self.dirs.contains(&path.to_string())
    }
}
