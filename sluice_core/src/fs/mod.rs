//! Filesystem abstraction migrations are discovered on.
//!
//! Paths are `/` separated strings relative to the root of the filesystem.

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::MemoryFs;

use std::fmt;
use std::io::{self, Read};
use time::OffsetDateTime;

/// Kind of directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Metadata of a directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    name: String,
    size: u64,
    is_dir: bool,
    modified: Option<OffsetDateTime>,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64, is_dir: bool) -> FileInfo {
        FileInfo {
            name: name.into(),
            size,
            is_dir,
            modified: None,
        }
    }

    pub fn with_modified(self, modified: OffsetDateTime) -> FileInfo {
        FileInfo {
            modified: Some(modified),
            ..self
        }
    }

    pub(crate) fn from_metadata(name: &str, metadata: &std::fs::Metadata) -> FileInfo {
        FileInfo {
            name: name.into(),
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok().map(OffsetDateTime::from),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Last modification time, if the filesystem tracks it
    pub fn modified(&self) -> Option<&OffsetDateTime> {
        self.modified.as_ref()
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An entry returned by [`Filesystem::read_dir`]
#[derive(Debug, Clone)]
pub struct DirEntry {
    name: String,
    kind: EntryKind,
    info: Option<FileInfo>,
}

impl DirEntry {
    /// `info` is `None` when the filesystem couldn't retrieve the entry's metadata
    pub fn new(name: impl Into<String>, kind: EntryKind, info: Option<FileInfo>) -> DirEntry {
        DirEntry {
            name: name.into(),
            kind,
            info,
        }
    }

    pub fn file(name: impl Into<String>, size: u64) -> DirEntry {
        let name = name.into();
        let info = FileInfo::new(name.clone(), size, false);
        DirEntry::new(name, EntryKind::File, Some(info))
    }

    pub fn directory(name: impl Into<String>) -> DirEntry {
        let name = name.into();
        let info = FileInfo::new(name.clone(), 0, true);
        DirEntry::new(name, EntryKind::Directory, Some(info))
    }

    /// Name of the entry, not its full path
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Metadata of the entry
    pub fn info(&self) -> io::Result<&FileInfo> {
        self.info.as_ref().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("metadata unavailable for {}", self.name),
            )
        })
    }
}

/// A read only hierarchical filesystem.
pub trait Filesystem {
    /// Stream returned when opening a file, owned by the caller
    type File: Read + Send + 'static;

    /// List the entries directly under `path`, directories are not descended into
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;

    /// Open the file at `path` for reading
    fn open(&self, path: &str) -> io::Result<Self::File>;

    /// Release the filesystem. Filesystems that hold no resources keep the default no-op.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Join a directory and an entry name with `/`
pub fn join(root: &str, name: &str) -> String {
    match root.trim_end_matches('/') {
        "" if root.starts_with('/') => format!("/{name}"),
        "" | "." => name.to_owned(),
        dir => format!("{dir}/{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{join, DirEntry, EntryKind};

    #[test]
    fn joins_paths() {
        assert_eq!("migrations/1_a.up.sql", join("migrations", "1_a.up.sql"));
        assert_eq!("migrations/1_a.up.sql", join("migrations/", "1_a.up.sql"));
        assert_eq!("1_a.up.sql", join(".", "1_a.up.sql"));
        assert_eq!("1_a.up.sql", join("", "1_a.up.sql"));
        assert_eq!("/1_a.up.sql", join("/", "1_a.up.sql"));
    }

    #[test]
    fn entry_without_metadata_fails_info() {
        let entry = DirEntry::new("1_a.up.sql", EntryKind::File, None);
        assert!(entry.info().is_err());
        assert_eq!(4, DirEntry::file("1_a.up.sql", 4).info().unwrap().size());
        assert!(DirEntry::directory("nested").is_dir());
    }
}
