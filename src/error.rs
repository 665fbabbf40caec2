use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    // Traversal
    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("path not found")]
    NotFound(PathBuf),

    #[error("entry vanished during enumeration")]
    Vanished(PathBuf),

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Config
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    // Third-party extensibility
    #[error("filesystem error: {0}")]
    Source(String),
}

impl TreeError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::Vanished(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether a node can absorb this error and keep going.
    ///
    /// Everything the filesystem can throw at us is recoverable: the affected
    /// directory degrades to non-expandable (or keeps a partial listing).
    /// Only configuration errors are not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidPattern { .. })
    }

    /// Classify an I/O failure raised while reading `dir`.
    ///
    /// A `NotFound` on `dir` itself means the directory is gone; a `NotFound`
    /// on anything beneath it means a sibling disappeared while we were
    /// enumerating.
    pub(crate) fn from_io(path: PathBuf, err: io::Error, dir: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::NotFound if path == dir => Self::NotFound(path),
            io::ErrorKind::NotFound => Self::Vanished(path),
            _ => Self::Io { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(path: &str, kind: io::ErrorKind, dir: &str) -> TreeError {
        TreeError::from_io(PathBuf::from(path), io::Error::from(kind), Path::new(dir))
    }

    #[test]
    fn test_not_found_on_dir() {
        let err = classify("/a", io::ErrorKind::NotFound, "/a");
        assert!(matches!(err, TreeError::NotFound(_)));
        assert_eq!(err.path(), Some(Path::new("/a")));
    }

    #[test]
    fn test_not_found_on_child() {
        let err = classify("/a/b", io::ErrorKind::NotFound, "/a");
        assert!(matches!(err, TreeError::Vanished(_)));
        assert_eq!(err.path(), Some(Path::new("/a/b")));
    }

    #[test]
    fn test_permission_denied() {
        assert!(matches!(
            classify("/a", io::ErrorKind::PermissionDenied, "/a"),
            TreeError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify("/a/b", io::ErrorKind::PermissionDenied, "/a"),
            TreeError::PermissionDenied(_)
        ));
    }

    #[test]
    fn test_other_kinds_are_io() {
        let err = classify("/a", io::ErrorKind::InvalidData, "/a");
        assert!(matches!(err, TreeError::Io { .. }));
        assert!(err.is_recoverable());
    }
}
