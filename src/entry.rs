use std::path::{Path, PathBuf};

use crate::traits::FileSystem;

/// Immutable descriptor of one filesystem object.
///
/// `kind` is decided once, when the entry is created, from an existence
/// check. Nothing tracks the object afterwards: if it is deleted the entry
/// simply goes stale until whoever owns it builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesystemEntry {
    /// Path as given, absolute or relative.
    pub path: PathBuf,

    /// Display name, normally the last path segment.
    pub name: String,

    /// What the path pointed at when the entry was created.
    pub kind: EntryKind,
}

/// The kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A directory.
    Directory,

    /// A file (anything that is not a directory but exists).
    File,

    /// Nothing exists at the path, or it could not be stat'ed.
    Missing,
}

impl FilesystemEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name, kind }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Missing)
    }

    /// Existence flag as of creation time.
    pub fn exists(&self) -> bool {
        self.kind != EntryKind::Missing
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Last path segment, or the whole path for roots like `/` or `C:\`.
fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

/// Anything a root can be built from.
///
/// Paths are resolved against the filesystem to decide their kind. A
/// [`FilesystemEntry`] is taken as-is, stale or not.
pub trait IntoEntry {
    fn into_entry(self, fs: &dyn FileSystem) -> FilesystemEntry;
}

impl IntoEntry for FilesystemEntry {
    fn into_entry(self, _fs: &dyn FileSystem) -> FilesystemEntry {
        self
    }
}

impl IntoEntry for &FilesystemEntry {
    fn into_entry(self, _fs: &dyn FileSystem) -> FilesystemEntry {
        self.clone()
    }
}

impl IntoEntry for &Path {
    fn into_entry(self, fs: &dyn FileSystem) -> FilesystemEntry {
        FilesystemEntry::new(self, fs.kind_of(self))
    }
}

impl IntoEntry for PathBuf {
    fn into_entry(self, fs: &dyn FileSystem) -> FilesystemEntry {
        let kind = fs.kind_of(&self);
        FilesystemEntry::new(self, kind)
    }
}

impl IntoEntry for &PathBuf {
    fn into_entry(self, fs: &dyn FileSystem) -> FilesystemEntry {
        self.as_path().into_entry(fs)
    }
}

impl IntoEntry for &str {
    fn into_entry(self, fs: &dyn FileSystem) -> FilesystemEntry {
        Path::new(self).into_entry(fs)
    }
}

impl IntoEntry for String {
    fn into_entry(self, fs: &dyn FileSystem) -> FilesystemEntry {
        PathBuf::from(self).into_entry(fs)
    }
}

impl IntoEntry for &String {
    fn into_entry(self, fs: &dyn FileSystem) -> FilesystemEntry {
        Path::new(self).into_entry(fs)
    }
}
