use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

use crate::entry::{EntryKind, FilesystemEntry};
use crate::error::TreeError;
use crate::filter::NameFilter;
use crate::traits::{Entries, FileSystem};

// ---------------------------------------------------------------------------
// LocalFs
// ---------------------------------------------------------------------------

/// [`FileSystem`] over the host's real filesystem.
///
/// Listings come from a single-level `ignore` walk with every filter turned
/// off: hidden files are listed, ignore files are not consulted, nothing is
/// sorted. Order is whatever the OS hands back.
///
/// Symbolic links are classified by what they point at. Dangling links are
/// skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn kind_of(&self, path: &Path) -> EntryKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(_) => EntryKind::File,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    debug!("Treating {} as missing: {}", path.display(), e);
                }
                EntryKind::Missing
            }
        }
    }

    fn directories<'a>(&'a self, dir: &'a Path) -> Entries<'a> {
        Box::new(list(dir).filter(|res| match res {
            Ok(entry) => entry.is_dir(),
            Err(_) => true,
        }))
    }

    fn files<'a>(&'a self, dir: &'a Path, filter: &'a NameFilter) -> Entries<'a> {
        Box::new(list(dir).filter(move |res| match res {
            Ok(entry) => entry.is_file() && filter.is_match(&entry.name),
            Err(_) => true,
        }))
    }

    /// One pass over the listing, stopping at the first subdirectory or
    /// matching file. A directory holding only non-matching files is still
    /// read to the end, but only once.
    fn has_children(&self, dir: &Path, filter: &NameFilter) -> Result<bool, TreeError> {
        for res in list(dir) {
            let entry = res?;
            if entry.is_dir() || (entry.is_file() && filter.is_match(&entry.name)) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

// ---------------------------------------------------------------------------
// Single-level listing
// ---------------------------------------------------------------------------

/// Lazily list the immediate children of `dir`.
///
/// Errors are passed through in place so the consumer decides when to stop.
fn list(dir: &Path) -> impl Iterator<Item = Result<FilesystemEntry, TreeError>> {
    let mut builder = WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .hidden(false)
        .parents(false)
        .follow_links(false)
        .max_depth(Some(1));

    let root = dir.to_path_buf();

    builder.build().filter_map(move |res| match res {
        // The walk yields the directory itself first.
        Ok(entry) if entry.depth() == 0 => None,
        Ok(entry) => classify(entry).map(Ok),
        Err(e) => Some(Err(map_ignore_error(e, &root))),
    })
}

fn classify(entry: DirEntry) -> Option<FilesystemEntry> {
    let ft = entry.file_type()?;

    let kind = if ft.is_dir() {
        EntryKind::Directory
    } else if ft.is_symlink() {
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(_) => EntryKind::File,
            Err(e) => {
                debug!("Skipping dangling link {}: {}", entry.path().display(), e);
                return None;
            }
        }
    } else {
        EntryKind::File
    };

    Some(FilesystemEntry {
        name: entry.file_name().to_string_lossy().into_owned(),
        path: entry.into_path(),
        kind,
    })
}

// ---------------------------------------------------------------------------
// Map ignore::Error to TreeError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error, dir: &Path) -> TreeError {
    map_with_path(e, None, dir)
}

/// Peel `WithDepth` / `WithPath` wrappers down to the I/O error, keeping the
/// innermost path seen on the way.
fn map_with_path(e: ignore::Error, path: Option<PathBuf>, dir: &Path) -> TreeError {
    match e {
        ignore::Error::WithDepth { err, .. } => map_with_path(*err, path, dir),
        ignore::Error::WithPath { path: inner, err } => map_with_path(*err, Some(inner), dir),
        ignore::Error::Io(io_err) => {
            let path = path.unwrap_or_else(|| dir.to_path_buf());
            TreeError::from_io(path, io_err, dir)
        }
        other => match path {
            Some(path) => TreeError::Source(format!("{}: {}", path.display(), other)),
            None => TreeError::Source(other.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io(kind: io::ErrorKind) -> ignore::Error {
        ignore::Error::Io(io::Error::from(kind))
    }

    /// The shape the walker produces for a failed `read_dir`.
    fn walker_error(path: &Path, depth: usize, kind: io::ErrorKind) -> ignore::Error {
        ignore::Error::WithPath {
            path: path.to_path_buf(),
            err: Box::new(ignore::Error::WithDepth {
                depth,
                err: Box::new(io(kind)),
            }),
        }
    }

    #[test]
    fn test_nested_not_found_on_dir() {
        let dir = Path::new("/data/gone");
        let err = map_ignore_error(walker_error(dir, 0, io::ErrorKind::NotFound), dir);
        assert!(matches!(err, TreeError::NotFound(p) if p == dir));
    }

    #[test]
    fn test_nested_not_found_on_child_is_vanished() {
        let dir = Path::new("/data");
        let child = dir.join("tmp.swp");
        let err = map_ignore_error(walker_error(&child, 1, io::ErrorKind::NotFound), dir);
        assert!(matches!(err, TreeError::Vanished(p) if p == child));
    }

    #[test]
    fn test_nested_permission_denied() {
        let dir = Path::new("/root/secret");
        let err = map_ignore_error(walker_error(dir, 0, io::ErrorKind::PermissionDenied), dir);
        assert!(matches!(err, TreeError::PermissionDenied(p) if p == dir));
    }

    #[test]
    fn test_other_io_kind() {
        let dir = Path::new("/data");
        let err = map_ignore_error(walker_error(dir, 0, io::ErrorKind::Interrupted), dir);
        assert!(matches!(err, TreeError::Io { ref path, .. } if path == dir));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_depth_outside_path() {
        let dir = Path::new("/data");
        let err = ignore::Error::WithDepth {
            depth: 0,
            err: Box::new(ignore::Error::WithPath {
                path: dir.to_path_buf(),
                err: Box::new(io(io::ErrorKind::PermissionDenied)),
            }),
        };
        assert!(matches!(map_ignore_error(err, dir), TreeError::PermissionDenied(_)));
    }

    #[test]
    fn test_bare_io_uses_dir() {
        let dir = Path::new("/data");
        let err = map_ignore_error(io(io::ErrorKind::NotFound), dir);
        assert!(matches!(err, TreeError::NotFound(p) if p == dir));
    }

    #[test]
    fn test_non_io_becomes_source() {
        let dir = Path::new("/data");
        let err = ignore::Error::Loop {
            ancestor: dir.to_path_buf(),
            child: dir.join("loop"),
        };
        assert!(matches!(map_ignore_error(err, dir), TreeError::Source(_)));
    }

    #[test]
    fn test_listing_missing_dir_yields_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("gone");

        let first = LocalFs.directories(&gone).next().unwrap();
        assert!(matches!(first, Err(TreeError::NotFound(p)) if p == gone));

        let probed = LocalFs.has_children(&gone, &NameFilter::any());
        assert!(matches!(probed, Err(TreeError::NotFound(_))));
    }

    #[test]
    fn test_has_children_single_pass() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.log"), "a").unwrap();
        fs::write(root.join("b.log"), "b").unwrap();

        let txt = NameFilter::new("*.txt", false).unwrap();
        assert!(!LocalFs.has_children(root, &txt).unwrap());
        assert!(LocalFs.has_children(root, &NameFilter::any()).unwrap());

        fs::create_dir(root.join("sub")).unwrap();
        assert!(LocalFs.has_children(root, &txt).unwrap());
    }
}
