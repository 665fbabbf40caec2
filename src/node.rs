//! Tree nodes: directories that expand once, files, and placeholders.

use std::fmt;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::engine::ExpansionPolicy;
use crate::entry::{EntryKind, FilesystemEntry};
use crate::error::TreeError;
use crate::walk::Walk;

// ---------------------------------------------------------------------------
// ExpansionState
// ---------------------------------------------------------------------------

/// Where a directory is in its lifecycle.
///
/// Transitions only move forward:
///
/// ```text
/// NotProbed ──probe──▶ ProbedEmpty
///     │
///     └─────probe──▶ ProbedExpandable ──expand──▶ Expanded
/// ```
///
/// `NotProbed` is only observable inside the constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionState {
    NotProbed,
    /// Nothing to show, or the probe failed.
    ProbedEmpty,
    /// At least one child exists; none have been read yet.
    ProbedExpandable,
    /// Children have been read and cached.
    Expanded,
}

impl fmt::Display for ExpansionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpansionState::NotProbed => write!(f, "not probed"),
            ExpansionState::ProbedEmpty => write!(f, "empty"),
            ExpansionState::ProbedExpandable => write!(f, "expandable"),
            ExpansionState::Expanded => write!(f, "expanded"),
        }
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single entry in the tree.
#[derive(Debug)]
pub enum Node {
    Directory(DirectoryNode),
    File(FileNode),
    Placeholder(PlaceholderNode),
}

impl Node {
    /// The filesystem descriptor this node was built from.
    pub fn entry(&self) -> &FilesystemEntry {
        match self {
            Node::Directory(d) => &d.entry,
            Node::File(f) => &f.entry,
            Node::Placeholder(p) => &p.entry,
        }
    }

    /// Text to show for this node: the entry name, or the placeholder message.
    pub fn name(&self) -> &str {
        match self {
            Node::Placeholder(p) => &p.message,
            other => &other.entry().name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.entry().path
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Node::Placeholder(_))
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Node::Directory(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_directory_mut(&mut self) -> Option<&mut DirectoryNode> {
        match self {
            Node::Directory(d) => Some(d),
            _ => None,
        }
    }

    /// Directory state; `None` for files and placeholders.
    pub fn expansion_state(&self) -> Option<ExpansionState> {
        self.as_directory().map(DirectoryNode::state)
    }

    /// Whether a presentation layer should offer to expand this node.
    pub fn is_expandable(&self) -> bool {
        self.as_directory().is_some_and(DirectoryNode::is_expandable)
    }

    pub fn is_expanded(&self) -> bool {
        self.as_directory().is_some_and(DirectoryNode::is_expanded)
    }

    /// Cached children. Always empty for files and placeholders, and for
    /// directories that have not been expanded.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Directory(d) => d.children(),
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::Directory(d) => d.children_mut(),
            _ => &mut [],
        }
    }

    /// Handle a "user asked to expand" signal.
    ///
    /// Only directories react; see [`DirectoryNode::on_expand_requested`].
    pub fn on_expand_requested(&mut self) -> &[Node] {
        match self {
            Node::Directory(d) => d.on_expand_requested(),
            _ => &[],
        }
    }

    /// Handle a "user asked to collapse" signal. Never changes the model.
    pub fn on_collapse_requested(&mut self) {
        if let Node::Directory(d) = self {
            d.on_collapse_requested();
        }
    }

    /// Pre-order walk over this node and every materialised descendant.
    ///
    /// Never touches the filesystem.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(std::slice::from_ref(self))
    }
}

// ---------------------------------------------------------------------------
// DirectoryNode
// ---------------------------------------------------------------------------

/// A directory whose children are read on the first expand signal and
/// cached from then on.
pub struct DirectoryNode {
    entry: FilesystemEntry,
    policy: ExpansionPolicy,
    state: ExpansionState,
    children: Vec<Node>,
    fault: Option<TreeError>,
}

impl DirectoryNode {
    /// Build and probe a directory node.
    ///
    /// The probe reads at most one child. If it fails, the node is simply
    /// not expandable.
    pub(crate) fn new(entry: FilesystemEntry, policy: ExpansionPolicy) -> Self {
        let mut node = Self {
            entry,
            policy,
            state: ExpansionState::NotProbed,
            children: Vec::new(),
            fault: None,
        };
        node.probe();
        node
    }

    fn probe(&mut self) {
        self.state = match self.policy.probe(&self.entry.path) {
            Ok(true) => ExpansionState::ProbedExpandable,
            Ok(false) => ExpansionState::ProbedEmpty,
            Err(fault) => {
                warn!(
                    "Cannot probe {}: {}",
                    self.entry.path.display(),
                    describe(&fault)
                );
                self.fault = Some(fault);
                ExpansionState::ProbedEmpty
            }
        };
        debug!("Probed {}: {}", self.entry.path.display(), self.state);
    }

    pub fn entry(&self) -> &FilesystemEntry {
        &self.entry
    }

    pub fn state(&self) -> ExpansionState {
        self.state
    }

    pub fn is_expandable(&self) -> bool {
        match self.state {
            ExpansionState::ProbedExpandable => true,
            ExpansionState::Expanded => !self.children.is_empty(),
            ExpansionState::NotProbed | ExpansionState::ProbedEmpty => false,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.state == ExpansionState::Expanded
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// The last filesystem fault this node recovered from, if any.
    ///
    /// Already logged when it happened; kept for callers that want to show
    /// why a directory looks empty or short.
    pub fn fault(&self) -> Option<&TreeError> {
        self.fault.as_ref()
    }

    /// The config this node filters files with.
    pub fn name_pattern(&self) -> &str {
        self.policy.config().name_pattern()
    }

    /// Read and cache the children, the first time only.
    ///
    /// A directory that probed empty stays empty and is never read. Once
    /// expanded, later signals return the cached children untouched. If the
    /// listing fails part-way, the children read so far are kept and the
    /// directory still counts as expanded.
    pub fn on_expand_requested(&mut self) -> &[Node] {
        match self.state {
            ExpansionState::ProbedExpandable => {
                let listing = self.policy.enumerate(&self.entry.path);
                self.children = listing.children;
                if let Some(fault) = listing.fault {
                    warn!(
                        "Stopped listing {} after {} entries: {}",
                        self.entry.path.display(),
                        self.children.len(),
                        describe(&fault)
                    );
                    self.fault = Some(fault);
                }
                self.state = ExpansionState::Expanded;
                debug!(
                    "Expanded {}: {} children",
                    self.entry.path.display(),
                    self.children.len()
                );
            }
            ExpansionState::Expanded => {
                trace!("{} already expanded", self.entry.path.display());
            }
            ExpansionState::NotProbed | ExpansionState::ProbedEmpty => {
                trace!("{} has nothing to expand", self.entry.path.display());
            }
        }
        &self.children
    }

    /// Collapsing is a presentation concern; the cached children stay.
    pub fn on_collapse_requested(&mut self) {
        trace!("Collapse requested for {}", self.entry.path.display());
    }
}

impl fmt::Debug for DirectoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryNode")
            .field("entry", &self.entry)
            .field("state", &self.state)
            .field("children", &self.children)
            .field("fault", &self.fault)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// FileNode / PlaceholderNode
// ---------------------------------------------------------------------------

/// A file. Leaf, never enumerated.
#[derive(Debug, Clone)]
pub struct FileNode {
    entry: FilesystemEntry,
}

impl FileNode {
    pub(crate) fn new(entry: FilesystemEntry) -> Self {
        debug_assert_eq!(entry.kind, EntryKind::File);
        Self { entry }
    }

    pub fn entry(&self) -> &FilesystemEntry {
        &self.entry
    }
}

/// Stand-in for a root that could not be found.
///
/// A normal, displayable value, not an error.
#[derive(Debug, Clone)]
pub struct PlaceholderNode {
    entry: FilesystemEntry,
    message: String,
}

impl PlaceholderNode {
    pub(crate) fn new(entry: FilesystemEntry, message: impl Into<String>) -> Self {
        Self {
            entry,
            message: message.into(),
        }
    }

    /// The entry that was asked for.
    pub fn entry(&self) -> &FilesystemEntry {
        &self.entry
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// `TreeError`'s own message plus the source, if it has one.
fn describe(fault: &TreeError) -> String {
    match std::error::Error::source(fault) {
        Some(source) => format!("{} ({})", fault, source),
        None => match fault.path() {
            Some(path) => format!("{} at {}", fault, path.display()),
            None => fault.to_string(),
        },
    }
}
