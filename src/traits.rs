use std::path::Path;

use crate::entry::{EntryKind, FilesystemEntry};
use crate::error::TreeError;
use crate::filter::NameFilter;

/// Lazy iterator of entries produced by a [`FileSystem`].
pub type Entries<'a> = Box<dyn Iterator<Item = Result<FilesystemEntry, TreeError>> + 'a>;

/// The filesystem a tree is built over.
///
/// Implement this to put a tree on top of anything directory-shaped: an
/// archive, a remote listing, or an in-memory fake in tests. [`LocalFs`]
/// is the real thing.
///
/// # Laziness
///
/// Both enumeration methods must return *lazy* iterators. Nodes decide
/// whether a directory is expandable by pulling a single element, so an
/// implementation that reads the whole listing up front makes every probe as
/// expensive as a full expansion.
///
/// # Probe cost
///
/// [`has_children`](FileSystem::has_children) decides expandability. The
/// default pulls one item from [`directories`](FileSystem::directories) and,
/// if there is none, one from [`files`](FileSystem::files). For a backend
/// that filters while scanning, a directory with no subdirectories is then
/// read in full before any file is looked at, and opened twice. Override it
/// when a single pass is possible; [`LocalFs`] does.
///
/// # Errors
///
/// Yield `Err` rather than panicking. A failure on the directory itself
/// (permission denied, gone) is typically the first and only item; a failure
/// part-way through stops enumeration of that directory. Nodes recover from
/// all of these; none ever reaches the caller.
///
/// # Thread Safety
///
/// `Send + Sync` are required so trees can be moved to, and shared with,
/// other threads. Nodes never call into the filesystem concurrently on
/// their own.
///
/// [`LocalFs`]: crate::LocalFs
pub trait FileSystem: Send + Sync {
    /// What exists at `path`. Any failure to find out counts as
    /// [`EntryKind::Missing`].
    fn kind_of(&self, path: &Path) -> EntryKind;

    /// Immediate subdirectories of `dir`, unfiltered.
    fn directories<'a>(&'a self, dir: &'a Path) -> Entries<'a>;

    /// Immediate files of `dir` whose names pass `filter`.
    fn files<'a>(&'a self, dir: &'a Path, filter: &'a NameFilter) -> Entries<'a>;

    /// Does `dir` hold at least one subdirectory or one file passing
    /// `filter`? Must stop at the first hit.
    fn has_children(&self, dir: &Path, filter: &NameFilter) -> Result<bool, TreeError> {
        if let Some(first) = self.directories(dir).next() {
            first?;
            return Ok(true);
        }

        match self.files(dir, filter).next() {
            Some(first) => first.map(|_| true),
            None => Ok(false),
        }
    }
}
