use std::path::PathBuf;
use std::sync::Arc;

use crate::config::TraversalConfig;
use crate::engine::ExpansionPolicy;
use crate::error::TreeError;
use crate::filter::NameFilter;
use crate::local::LocalFs;
use crate::roots::RootSet;
use crate::traits::FileSystem;

// ---------------------------------------------------------------------------
// TreeBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and building a [`RootSet`].
///
/// Created via [`lazytree::tree()`](crate::tree). Configure with chained
/// builder methods, then call [`build()`](TreeBuilder::build).
///
/// # Example
///
/// ```rust,ignore
/// let mut roots = lazytree::tree()
///     .pattern("*.rs")
///     .root("src")
///     .root("tests")
///     .file_root("Cargo.toml")
///     .build()?;
/// ```
pub struct TreeBuilder {
    pattern:          String,
    case_insensitive: bool,
    filesystem:       Option<Arc<dyn FileSystem>>,
    roots:            Vec<PendingRoot>,
}

enum PendingRoot {
    Directory(PathBuf),
    File(PathBuf),
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            pattern:          "*".to_string(),
            case_insensitive: false,
            filesystem:       None,
            roots:            Vec::new(),
        }
    }
}

impl TreeBuilder {
    // ── Filter ────────────────────────────────────────────────────────────

    /// Glob applied to file names during probing and expansion.
    ///
    /// Defaults to `*`. Directories are never filtered.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Match the pattern without regard to case. Off by default.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    // ── Filesystem ────────────────────────────────────────────────────────

    /// Build over a custom [`FileSystem`] instead of [`LocalFs`].
    pub fn filesystem(mut self, fs: impl FileSystem + 'static) -> Self {
        self.filesystem = Some(Arc::new(fs));
        self
    }

    // ── Roots ─────────────────────────────────────────────────────────────

    /// Append a root through the directory factory.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.roots.push(PendingRoot::Directory(path.into()));
        self
    }

    /// Append several roots through the directory factory.
    pub fn roots<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        self.roots
            .extend(paths.into_iter().map(|p| PendingRoot::Directory(p.into())));
        self
    }

    /// Append a root through the file factory.
    pub fn file_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.roots.push(PendingRoot::File(path.into()));
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Compile the config and build every root, in the order added.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidPattern`] if the pattern does not parse.
    /// Missing roots are not errors; they become placeholders.
    pub fn build(self) -> Result<RootSet, TreeError> {
        let filter = NameFilter::new(self.pattern, self.case_insensitive)?;
        let config = TraversalConfig::with_filter(filter);

        let fs: Arc<dyn FileSystem> = match self.filesystem {
            Some(fs) => fs,
            None     => Arc::new(LocalFs),
        };

        let mut set = RootSet::from_policy(ExpansionPolicy::new(fs, Arc::new(config)));
        for root in self.roots {
            match root {
                PendingRoot::Directory(path) => set.add_root(path),
                PendingRoot::File(path)      => set.add_file_root(path),
            }
        }

        Ok(set)
    }
}
