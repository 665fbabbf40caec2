use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::TraversalConfig;
use crate::entry::{EntryKind, FilesystemEntry, IntoEntry};
use crate::error::TreeError;
use crate::node::{DirectoryNode, FileNode, Node, PlaceholderNode};
use crate::traits::FileSystem;

/// Message carried by a placeholder from the directory factory.
pub const FOLDER_NOT_FOUND: &str = "folder not found";

/// Message carried by a placeholder from the file factory.
pub const FILE_NOT_FOUND: &str = "file not found";

// ---------------------------------------------------------------------------
// ExpansionPolicy
// ---------------------------------------------------------------------------

/// How directories are probed and enumerated.
///
/// Pairs the filesystem with the config in force when a node is built.
/// Every node built through a policy keeps a clone of it (two `Arc`s), so a
/// subtree always expands with the filter it was created under.
#[derive(Clone)]
pub struct ExpansionPolicy {
    fs: Arc<dyn FileSystem>,
    config: Arc<TraversalConfig>,
}

/// The outcome of a full enumeration.
///
/// `fault` is set when enumeration stopped early; `children` then holds
/// whatever was collected before the failure.
pub struct Enumeration {
    pub children: Vec<Node>,
    pub fault: Option<TreeError>,
}

impl ExpansionPolicy {
    pub fn new(fs: Arc<dyn FileSystem>, config: Arc<TraversalConfig>) -> Self {
        Self { fs, config }
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    pub fn filesystem(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// The same filesystem under a different config.
    pub fn with_config(&self, config: Arc<TraversalConfig>) -> Self {
        Self {
            fs: Arc::clone(&self.fs),
            config,
        }
    }

    // ── Factories ─────────────────────────────────────────────────────────

    /// Build a node through the directory factory.
    ///
    /// An existing directory becomes a probed [`DirectoryNode`]; anything
    /// else becomes a [`PlaceholderNode`] saying the folder was not found.
    /// Never fails.
    pub fn create_node(&self, root: impl IntoEntry) -> Node {
        let entry = root.into_entry(self.filesystem());
        match entry.kind {
            EntryKind::Directory => Node::Directory(DirectoryNode::new(entry, self.clone())),
            _ => {
                debug!("No directory at {}", entry.path.display());
                Node::Placeholder(PlaceholderNode::new(entry, FOLDER_NOT_FOUND))
            }
        }
    }

    /// Build a node through the file factory.
    ///
    /// An existing file becomes a [`FileNode`]; anything else becomes a
    /// [`PlaceholderNode`] saying the file was not found. Never fails.
    pub fn create_file_node(&self, file: impl IntoEntry) -> Node {
        let entry = file.into_entry(self.filesystem());
        match entry.kind {
            EntryKind::File => Node::File(FileNode::new(entry)),
            _ => {
                debug!("No file at {}", entry.path.display());
                Node::Placeholder(PlaceholderNode::new(entry, FILE_NOT_FOUND))
            }
        }
    }

    // ── Probe ─────────────────────────────────────────────────────────────

    /// Does `dir` hold at least one subdirectory or one matching file?
    ///
    /// Delegates to [`FileSystem::has_children`], which stops at the first
    /// hit. The caller decides what an error means.
    pub fn probe(&self, dir: &Path) -> Result<bool, TreeError> {
        self.fs.has_children(dir, self.config.filter())
    }

    // ── Enumerate ─────────────────────────────────────────────────────────

    /// Materialise the immediate children of `dir`.
    ///
    /// All subdirectories come first, then all matching files, each group in
    /// the order the filesystem yields them. Child directories are probed but
    /// not enumerated. The first error ends the enumeration; nothing after
    /// it, files included, is read. Entries of the wrong kind (a file out of
    /// `directories`, say) are skipped.
    pub fn enumerate(&self, dir: &Path) -> Enumeration {
        let mut children = Vec::new();

        for res in self.fs.directories(dir) {
            match res {
                Ok(entry) if entry.is_dir() => children.push(self.child_directory(entry)),
                Ok(entry) => skip_mislabelled(&entry, EntryKind::Directory),
                Err(fault) => {
                    return Enumeration {
                        children,
                        fault: Some(fault),
                    }
                }
            }
        }

        for res in self.fs.files(dir, self.config.filter()) {
            match res {
                Ok(entry) if entry.is_file() => children.push(Node::File(FileNode::new(entry))),
                Ok(entry) => skip_mislabelled(&entry, EntryKind::File),
                Err(fault) => {
                    return Enumeration {
                        children,
                        fault: Some(fault),
                    }
                }
            }
        }

        Enumeration {
            children,
            fault: None,
        }
    }

    fn child_directory(&self, entry: FilesystemEntry) -> Node {
        Node::Directory(DirectoryNode::new(entry, self.clone()))
    }
}

fn skip_mislabelled(entry: &FilesystemEntry, expected: EntryKind) {
    warn!(
        "Skipping {}: listed as {:?}, entry says {:?}",
        entry.path.display(),
        expected,
        entry.kind
    );
}

impl fmt::Debug for ExpansionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionPolicy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
