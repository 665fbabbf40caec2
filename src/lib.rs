//! # lazytree
//!
//! Lazy filesystem tree model: probe cheaply, enumerate once, never fail on
//! a bad directory.
//!
//! lazytree owns the data model behind an explorer-style tree view: an
//! ordered set of roots, directories that find out whether they have
//! anything to show without listing themselves, and a one-time listing on
//! the first expand signal that is cached from then on. It does **not** own
//! rendering, icons, or event wiring; a presentation layer reads
//! [`Node::name`], [`Node::is_expandable`] and [`Node::is_expanded`] and
//! sends [`Node::on_expand_requested`] back.
//!
//! Filesystem trouble (permission denied, a directory vanishing mid-listing)
//! never reaches the caller. The affected directory degrades to
//! non-expandable or keeps a partial listing, and the fault is logged through
//! `tracing`. A root that does not exist is shown as a [`PlaceholderNode`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let mut roots = lazytree::tree()
//!     .pattern("*.rs")
//!     .root("src")
//!     .file_root("Cargo.toml")
//!     .build()
//!     .unwrap();
//!
//! let src = &mut roots.roots_mut()[0];
//! if src.is_expandable() {
//!     for child in src.on_expand_requested() {
//!         println!("{}", child.name());
//!     }
//! }
//! ```
//!
//! # Custom Filesystems
//!
//! Implement [`FileSystem`] to build a tree over anything directory-shaped:
//!
//! ```rust
//! use std::path::Path;
//! use lazytree::{Entries, EntryKind, FileSystem, FilesystemEntry, NameFilter};
//!
//! // One directory, `/docs`, holding two files.
//! struct Docs;
//!
//! impl FileSystem for Docs {
//!     fn kind_of(&self, path: &Path) -> EntryKind {
//!         match path.to_str() {
//!             Some("/docs") => EntryKind::Directory,
//!             Some("/docs/a.txt") | Some("/docs/b.log") => EntryKind::File,
//!             _ => EntryKind::Missing,
//!         }
//!     }
//!
//!     fn directories<'a>(&'a self, _dir: &'a Path) -> Entries<'a> {
//!         Box::new(std::iter::empty())
//!     }
//!
//!     fn files<'a>(&'a self, dir: &'a Path, filter: &'a NameFilter) -> Entries<'a> {
//!         let names: &[&str] = if dir == Path::new("/docs") { &["a.txt", "b.log"] } else { &[] };
//!         Box::new(
//!             names
//!                 .iter()
//!                 .filter(move |name| filter.is_match(name))
//!                 .map(move |name| Ok(FilesystemEntry::file(dir.join(name)))),
//!         )
//!     }
//! }
//!
//! let mut roots = lazytree::tree()
//!     .filesystem(Docs)
//!     .pattern("*.txt")
//!     .root("/docs")
//!     .root("/nowhere")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(roots.len(), 2);
//! assert!(roots.roots()[1].is_placeholder());
//!
//! let docs = &mut roots.roots_mut()[0];
//! assert!(docs.is_expandable());
//! let children = docs.on_expand_requested();
//! assert_eq!(children.len(), 1);
//! assert_eq!(children[0].name(), "a.txt");
//! ```

#![forbid(unsafe_code)]

pub mod engine;

mod builder;
mod config;
mod entry;
mod error;
mod filter;
mod local;
mod node;
mod roots;
mod traits;
mod walk;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::TreeBuilder;
pub use config::TraversalConfig;
pub use engine::ExpansionPolicy;
pub use entry::{EntryKind, FilesystemEntry, IntoEntry};
pub use error::TreeError;
pub use filter::NameFilter;
pub use local::LocalFs;
pub use node::{DirectoryNode, ExpansionState, FileNode, Node, PlaceholderNode};
pub use roots::RootSet;
pub use traits::{Entries, FileSystem};
pub use walk::Walk;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`TreeBuilder`] to configure and build a [`RootSet`].
///
/// # Example
///
/// ```rust,no_run
/// let roots = lazytree::tree()
///     .pattern("*.txt")
///     .roots(["/var/log", "/does/not/exist"])
///     .build()
///     .unwrap();
///
/// // Missing roots are kept, as placeholders.
/// assert_eq!(roots.len(), 2);
/// ```
pub fn tree() -> TreeBuilder {
    TreeBuilder::default()
}
