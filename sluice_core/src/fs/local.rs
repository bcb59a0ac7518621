use super::{DirEntry, EntryKind, FileInfo, Filesystem};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filesystem backed by a directory on disk.
///
/// All paths are relative to `root`, if `root` is `/srv/app` then
/// `open("migrations/1_init.up.sql")` opens `/srv/app/migrations/1_init.up.sql`.
///
/// Symbolic links are followed when listing: a link to a directory is listed as a
/// directory and its [`FileInfo`] describes the target. A dangling link has no metadata.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl Into<PathBuf>) -> LocalFs {
        LocalFs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match path.trim_start_matches('/') {
            "" | "." => self.root.clone(),
            path => self.root.join(path),
        }
    }
}

impl Filesystem for LocalFs {
    type File = File;

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let dir = self.resolve(path);
        if !std::fs::metadata(&dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            ));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let name = match entry.file_name().to_str() {
                Some(name) => name,
                None => {
                    log::debug!(
                        "ignoring file {} with a non UTF-8 name",
                        entry.path().display()
                    );
                    continue;
                }
            };
            let metadata = std::fs::metadata(entry.path()).ok();
            let is_dir = match &metadata {
                Some(metadata) => metadata.is_dir(),
                None => entry.file_type().is_dir(),
            };
            let kind = if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            let info = metadata.map(|metadata| FileInfo::from_metadata(name, &metadata));
            entries.push(DirEntry::new(name, kind, info));
        }
        Ok(entries)
    }

    fn open(&self, path: &str) -> io::Result<File> {
        File::open(self.resolve(path))
    }
}
