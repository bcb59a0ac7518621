use super::{DirEntry, Filesystem};
use crate::error::PathError;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor};

/// In-memory filesystem.
///
/// Holds files by their full path, directories exist implicitly as path prefixes.
/// Used by [`embed_migrations!`] to serve migrations compiled into the binary.
/// Errors returned by this filesystem always carry a [`PathError`].
///
/// [`embed_migrations!`]: ../../sluice/macro.embed_migrations.html
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<String, Cow<'static, [u8]>>,
    closed: bool,
}

impl MemoryFs {
    pub fn new() -> MemoryFs {
        MemoryFs::default()
    }

    /// Create a filesystem from static `(path, contents)` pairs
    pub fn from_static(files: &[(&'static str, &'static [u8])]) -> MemoryFs {
        let mut fs = MemoryFs::new();
        for (path, contents) in files {
            fs.insert(*path, *contents);
        }
        fs
    }

    /// Add a file, replacing any file previously stored at `path`
    pub fn insert(
        &mut self,
        path: impl AsRef<str>,
        contents: impl Into<Cow<'static, [u8]>>,
    ) -> &mut Self {
        self.files.insert(normalize(path.as_ref()), contents.into());
        self
    }

    pub fn with_file(
        mut self,
        path: impl AsRef<str>,
        contents: impl Into<Cow<'static, [u8]>>,
    ) -> MemoryFs {
        self.insert(path, contents);
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_open(&self, op: &str, path: &str) -> io::Result<()> {
        if self.closed {
            return Err(PathError::new(
                op,
                path,
                io::Error::new(io::ErrorKind::Other, "filesystem is closed"),
            )
            .into());
        }
        Ok(())
    }
}

// strips empty and `.` components so `./migrations/` and `migrations` are the same key
fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|component| !component.is_empty() && *component != ".")
        .collect::<Vec<_>>()
        .join("/")
}

impl Filesystem for MemoryFs {
    type File = Cursor<Cow<'static, [u8]>>;

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        self.check_open("readdir", path)?;

        let dir = normalize(path);
        if self.files.contains_key(&dir) {
            return Err(PathError::new(
                "readdir",
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            )
            .into());
        }

        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };

        let mut entries = Vec::new();
        let mut directories = BTreeSet::new();
        for (key, contents) in self.files.range(prefix.clone()..) {
            let rest = match key.strip_prefix(&prefix) {
                Some(rest) => rest,
                None => break,
            };
            match rest.split_once('/') {
                None => entries.push(DirEntry::file(rest, contents.len() as u64)),
                Some((sub, _)) => {
                    if directories.insert(sub) {
                        entries.push(DirEntry::directory(sub));
                    }
                }
            }
        }

        if entries.is_empty() && !dir.is_empty() {
            return Err(PathError::new("readdir", path, io::ErrorKind::NotFound.into()).into());
        }
        Ok(entries)
    }

    fn open(&self, path: &str) -> io::Result<Self::File> {
        self.check_open("open", path)?;

        match self.files.get(&normalize(path)) {
            Some(contents) => Ok(Cursor::new(contents.clone())),
            None => Err(PathError::new("open", path, io::ErrorKind::NotFound.into()).into()),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.check_open("close", "")?;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryFs;
    use crate::error::carries_path;
    use crate::fs::Filesystem;
    use std::io::{self, Read};

    fn get_fs() -> MemoryFs {
        MemoryFs::from_static(&[
            ("migrations/1_first.up.sql", &b"CREATE TABLE a (id int);"[..]),
            ("migrations/1_first.down.sql", &b"DROP TABLE a;"[..]),
            ("migrations/nested/2_second.up.sql", &b""[..]),
            ("README.md", &b"docs"[..]),
        ])
    }

    #[test]
    fn lists_files_and_implied_directories() {
        let fs = get_fs();
        let entries = fs.read_dir("./migrations/").unwrap();
        let names: Vec<(&str, bool)> = entries.iter().map(|e| (e.name(), e.is_dir())).collect();
        assert_eq!(
            vec![
                ("1_first.down.sql", false),
                ("1_first.up.sql", false),
                ("nested", true)
            ],
            names
        );

        let root: Vec<String> = fs
            .read_dir(".")
            .unwrap()
            .iter()
            .map(|e| e.name().to_owned())
            .collect();
        assert_eq!(vec!["README.md", "migrations"], root);
    }

    #[test]
    fn does_not_list_siblings_sharing_a_prefix() {
        let fs = get_fs().with_file("migrations_old/9_old.up.sql", &b""[..]);
        let entries = fs.read_dir("migrations").unwrap();
        assert!(entries.iter().all(|e| e.name() != "9_old.up.sql"));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let err = get_fs().read_dir("missing").unwrap_err();
        assert_eq!(io::ErrorKind::NotFound, err.kind());
        assert!(carries_path(&err));
        assert!(get_fs().read_dir("README.md").is_err());
    }

    #[test]
    fn opens_files() {
        let mut content = String::new();
        get_fs()
            .open("migrations/1_first.down.sql")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!("DROP TABLE a;", content);
    }

    #[test]
    fn open_error_carries_path() {
        let err = get_fs().open("migrations/9_missing.up.sql").unwrap_err();
        assert_eq!(io::ErrorKind::NotFound, err.kind());
        assert!(carries_path(&err));
    }

    #[test]
    fn close_releases_filesystem() {
        let mut fs = get_fs();
        fs.close().unwrap();
        assert!(fs.is_closed());
        assert!(fs.open("migrations/1_first.up.sql").is_err());
        assert!(fs.close().is_err());
    }
}
