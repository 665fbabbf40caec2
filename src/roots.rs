use std::sync::Arc;

use crate::config::TraversalConfig;
use crate::engine::ExpansionPolicy;
use crate::entry::IntoEntry;
use crate::local::LocalFs;
use crate::node::Node;
use crate::traits::FileSystem;
use crate::walk::Walk;

/// The ordered top-level nodes of a tree.
///
/// Insertion order is display order. Roots may mix directories, files and
/// placeholders. Every mutation builds its new nodes first and only then
/// swaps them in, so a caller never sees a half-updated set.
#[derive(Debug)]
pub struct RootSet {
    policy: ExpansionPolicy,
    roots: Vec<Node>,
}

impl RootSet {
    /// Empty set over the local filesystem.
    pub fn new(config: TraversalConfig) -> Self {
        Self::with_filesystem(LocalFs, config)
    }

    /// Empty set over a custom filesystem.
    pub fn with_filesystem(fs: impl FileSystem + 'static, config: TraversalConfig) -> Self {
        Self::from_policy(ExpansionPolicy::new(Arc::new(fs), Arc::new(config)))
    }

    pub fn from_policy(policy: ExpansionPolicy) -> Self {
        Self {
            policy,
            roots: Vec::new(),
        }
    }

    pub fn policy(&self) -> &ExpansionPolicy {
        &self.policy
    }

    pub fn config(&self) -> &TraversalConfig {
        self.policy.config()
    }

    /// Use `config` for every node built from now on.
    ///
    /// Existing roots and their subtrees, expanded or not, keep filtering
    /// with the config they were built under.
    pub fn set_config(&mut self, config: TraversalConfig) {
        self.policy = self.policy.with_config(Arc::new(config));
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Replace every root with one node from the directory factory.
    pub fn set_single_root(&mut self, root: impl IntoEntry) {
        let node = self.policy.create_node(root);
        self.roots = vec![node];
    }

    /// Replace every root with one node per input, in input order.
    ///
    /// Inputs that do not resolve to a directory become placeholders, so the
    /// resulting length always equals the number of inputs.
    pub fn set_roots<I>(&mut self, roots: I)
    where
        I: IntoIterator,
        I::Item: IntoEntry,
    {
        let nodes = roots
            .into_iter()
            .map(|root| self.policy.create_node(root))
            .collect();
        self.roots = nodes;
    }

    /// Append one node from the directory factory.
    pub fn add_root(&mut self, root: impl IntoEntry) {
        let node = self.policy.create_node(root);
        self.roots.push(node);
    }

    /// Append one node from the file factory.
    pub fn add_file_root(&mut self, file: impl IntoEntry) {
        let node = self.policy.create_file_node(file);
        self.roots.push(node);
    }

    /// Drop every root and its cached subtree.
    pub fn clear(&mut self) {
        self.roots.clear();
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut [Node] {
        &mut self.roots
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.roots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.roots.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order walk over every root and materialised descendant.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.roots)
    }
}

impl Default for RootSet {
    fn default() -> Self {
        Self::new(TraversalConfig::default())
    }
}

impl<'a> IntoIterator for &'a RootSet {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}
