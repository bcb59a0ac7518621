use crate::error::{carries_path, Error, Kind, PathError};
use crate::fs::{join, DirEntry, Filesystem};
use crate::migration::{Direction, Migration, Version};
use crate::parser::{DefaultParser, Parser};
use crate::registry::{Migrations, Registry};
use std::io;

// outcome of looking at a single directory entry while discovering migrations
enum Step {
    Skip,
    Insert,
    Fatal(Error),
}

fn step<P, R>(parser: &P, migrations: &mut R, entry: &DirEntry) -> Step
where
    P: Parser + ?Sized,
    R: Registry,
{
    if entry.is_dir() {
        log::debug!("skipping directory {}", entry.name());
        return Step::Skip;
    }

    let migration = match parser.parse(entry.name()) {
        Ok(migration) => migration,
        Err(err) => {
            log::debug!("skipping file {}, {}", entry.name(), err);
            return Step::Skip;
        }
    };

    let info = match entry.info() {
        Ok(info) => info,
        Err(err) => {
            log::debug!("skipping file {}, {}", entry.name(), err);
            return Step::Skip;
        }
    };

    if migrations.insert(migration.clone()) {
        return Step::Insert;
    }

    let existing = match migration.direction() {
        Direction::Up => migrations.up(migration.version()),
        Direction::Down => migrations.down(migration.version()),
    }
    .cloned();

    Step::Fatal(Error::new(Kind::DuplicateMigration {
        existing,
        duplicate: migration,
        info: info.clone(),
    }))
}

/// Migration source reading from a [`Filesystem`].
///
/// Migrations are discovered once on creation, files directly under `path`
/// whose name the [`Parser`] accepts are registered, directories and other
/// files are ignored. Migration content is only read through [`FsSource::read_up`]
/// and [`FsSource::read_down`].
#[derive(Debug)]
pub struct FsSource<F, R = Migrations> {
    fs: F,
    path: String,
    migrations: R,
}

impl<F: Filesystem> FsSource<F> {
    /// Discover migrations under `path` using the [`DefaultParser`]
    pub fn new(fs: F, path: impl Into<String>) -> Result<FsSource<F>, Error> {
        FsSource::init(fs, path, &DefaultParser::new(), Migrations::new())
    }
}

impl<F, R> FsSource<F, R>
where
    F: Filesystem,
    R: Registry,
{
    /// Discover migrations under `path` with a custom parser and registry.
    ///
    /// Fails with the filesystem error if `path` can't be listed, or with
    /// [`Kind::DuplicateMigration`] if two files share a version and direction.
    pub fn init<P>(
        fs: F,
        path: impl Into<String>,
        parser: &P,
        mut migrations: R,
    ) -> Result<FsSource<F, R>, Error>
    where
        P: Parser + ?Sized,
    {
        let path = path.into();
        let entries = fs.read_dir(&path).map_err(|err| Error::new(Kind::Io(err)))?;

        let mut found = 0;
        for entry in entries.iter() {
            match step(parser, &mut migrations, entry) {
                Step::Skip => {}
                Step::Insert => found += 1,
                Step::Fatal(err) => return Err(err),
            }
        }
        log::info!("found {} migration files in {}", found, path);

        Ok(FsSource {
            fs,
            path,
            migrations,
        })
    }

    /// The directory migrations were discovered in
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the discovered migrations.
    pub fn migrations(&self) -> &R {
        &self.migrations
    }

    pub fn first(&self) -> Result<Version, Error> {
        self.migrations
            .first()
            .ok_or_else(|| self.not_exist("first".into()))
    }

    pub fn prev(&self, version: Version) -> Result<Version, Error> {
        self.migrations
            .prev(version)
            .ok_or_else(|| self.not_exist(format!("prev for version {version}")))
    }

    pub fn next(&self, version: Version) -> Result<Version, Error> {
        self.migrations
            .next(version)
            .ok_or_else(|| self.not_exist(format!("next for version {version}")))
    }

    /// Open the up migration of `version`, returns its content and identifier.
    /// The caller owns the returned stream.
    pub fn read_up(&self, version: Version) -> Result<(F::File, String), Error> {
        let migration = self
            .migrations
            .up(version)
            .ok_or_else(|| self.not_exist(format!("read up for version {version}")))?;
        self.read(migration)
    }

    /// Open the down migration of `version`, returns its content and identifier.
    /// The caller owns the returned stream.
    pub fn read_down(&self, version: Version) -> Result<(F::File, String), Error> {
        let migration = self
            .migrations
            .down(version)
            .ok_or_else(|| self.not_exist(format!("read down for version {version}")))?;
        self.read(migration)
    }

    /// Release the underlying filesystem
    pub fn close(&mut self) -> Result<(), Error> {
        self.fs.close().map_err(|err| Error::new(Kind::Io(err)))
    }

    fn read(&self, migration: &Migration) -> Result<(F::File, String), Error> {
        let body = self.open(&join(&self.path, migration.raw()))?;
        Ok((body, migration.identifier().to_owned()))
    }

    fn open(&self, path: &str) -> Result<F::File, Error> {
        self.fs.open(path).map_err(|err| {
            // some filesystems return errors that don't include the path
            if carries_path(&err) {
                Error::new(Kind::Io(err))
            } else {
                Error::new(Kind::Path(PathError::new("open", path, err)))
            }
        })
    }

    fn not_exist(&self, op: String) -> Error {
        Error::new(Kind::Path(PathError::new(
            op,
            self.path.as_str(),
            io::ErrorKind::NotFound.into(),
        )))
    }
}
