use crate::fs::FileInfo;
use crate::Migration;
use std::fmt;
use std::io;
use thiserror::Error as TError;

/// An Error occurred while discovering or reading migrations
#[derive(Debug)]
pub struct Error {
    kind: Box<Kind>,
}

impl Error {
    /// Instantiate a new Error
    pub(crate) fn new(kind: Kind) -> Error {
        Error {
            kind: Box::new(kind),
        }
    }

    /// Return the kind of error occurred
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Returns true if the error signals that the requested version, file or
    /// directory does not exist.
    pub fn is_not_found(&self) -> bool {
        match self.kind() {
            Kind::Path(err) => err.source.kind() == io::ErrorKind::NotFound,
            Kind::Io(err) => err.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Return the [`PathError`] describing the failed operation, if any.
    /// This also looks inside io errors returned by filesystems that attach their own [`PathError`].
    pub fn path_error(&self) -> Option<&PathError> {
        match self.kind() {
            Kind::Path(err) => Some(err),
            Kind::Io(err) => err
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<PathError>()),
            _ => None,
        }
    }
}

impl From<Kind> for Error {
    fn from(kind: Kind) -> Error {
        Error::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

/// Enum listing possible errors from sluice.
#[derive(Debug, TError)]
pub enum Kind {
    /// An Error from a file name that doesn't follow the migration naming convention
    #[error("migration name {0} must be in the format {{version}}_{{identifier}}.{{up|down}}.{{ext}}")]
    InvalidName(String),
    /// An Error from an invalid version on a file name migration
    #[error("migration version of {0} must be a valid unsigned integer")]
    InvalidVersion(String),
    /// An Error from a file name pattern that can't be used to parse migrations
    #[error("invalid migration name pattern {0}")]
    InvalidPattern(String),
    /// Two files resolve to the same version and direction
    #[error("duplicate migration file: {info}")]
    DuplicateMigration {
        /// the migration that was already registered, when the registry can tell
        existing: Option<Migration>,
        /// the migration that could not be registered
        duplicate: Migration,
        /// metadata of the file the duplicate was parsed from
        info: FileInfo,
    },
    /// An operation failed on a path, either because nothing exists there or
    /// because the filesystem reported an error without naming the path
    #[error(transparent)]
    Path(PathError),
    /// An Error returned by the filesystem, passed through unchanged
    #[error(transparent)]
    Io(io::Error),
    /// An Error parsing sluice Config
    #[error("Error parsing config: {0}")]
    ConfigError(String),
}

/// Records an error together with the operation and the path that caused it.
#[derive(Debug, TError)]
#[error("{op} {path}: {source}")]
pub struct PathError {
    op: String,
    path: String,
    #[source]
    source: io::Error,
}

impl PathError {
    pub fn new(op: impl Into<String>, path: impl Into<String>, source: io::Error) -> PathError {
        PathError {
            op: op.into(),
            path: path.into(),
            source,
        }
    }

    /// The operation that failed, e.g. `open` or `read up for version 3`
    pub fn op(&self) -> &str {
        &self.op
    }

    /// The path the operation was attempted on
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The underlying io error
    pub fn io_error(&self) -> &io::Error {
        &self.source
    }
}

impl From<PathError> for io::Error {
    fn from(err: PathError) -> io::Error {
        io::Error::new(err.source.kind(), err)
    }
}

// checks if an io::Error was built from a PathError and therefore already names its path
pub(crate) fn carries_path(err: &io::Error) -> bool {
    err.get_ref()
        .map(|inner| inner.is::<PathError>())
        .unwrap_or(false)
}
