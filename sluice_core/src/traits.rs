use crate::fs::Filesystem;
use crate::registry::Registry;
use crate::{Error, FsSource, Version};
use std::io::Read;

/// Content of a migration together with its identifier
pub type Body = (Box<dyn Read + Send>, String);

/// A driver providing migrations to a migration engine.
///
/// Traversal methods return an error for which [`Error::is_not_found`] is true
/// when there is no such version.
pub trait Source {
    /// Create a new source from a url.
    fn open(&self, url: &str) -> Result<Box<dyn Source>, Error>;

    /// Release any resource held by the source
    fn close(&mut self) -> Result<(), Error>;

    /// The first available version
    fn first(&self) -> Result<Version, Error>;

    /// The version before `version`
    fn prev(&self, version: Version) -> Result<Version, Error>;

    /// The version after `version`
    fn next(&self, version: Version) -> Result<Version, Error>;

    /// Content and identifier of the up migration of `version`
    fn read_up(&self, version: Version) -> Result<Body, Error>;

    /// Content and identifier of the down migration of `version`
    fn read_down(&self, version: Version) -> Result<Body, Error>;
}

impl<F, R> Source for FsSource<F, R>
where
    F: Filesystem,
    R: Registry,
{
    /// # Panics
    ///
    /// Always, an `FsSource` is built from a [`Filesystem`] and can't be opened from a url
    fn open(&self, _url: &str) -> Result<Box<dyn Source>, Error> {
        panic!("sluice: FsSource does not support open with url");
    }

    fn close(&mut self) -> Result<(), Error> {
        FsSource::close(self)
    }

    fn first(&self) -> Result<Version, Error> {
        FsSource::first(self)
    }

    fn prev(&self, version: Version) -> Result<Version, Error> {
        FsSource::prev(self, version)
    }

    fn next(&self, version: Version) -> Result<Version, Error> {
        FsSource::next(self, version)
    }

    fn read_up(&self, version: Version) -> Result<Body, Error> {
        FsSource::read_up(self, version).map(|(body, identifier)| (boxed(body), identifier))
    }

    fn read_down(&self, version: Version) -> Result<Body, Error> {
        FsSource::read_down(self, version).map(|(body, identifier)| (boxed(body), identifier))
    }
}

fn boxed<T: Read + Send + 'static>(body: T) -> Box<dyn Read + Send> {
    Box::new(body)
}

#[cfg(test)]
mod tests {
    use super::Source;
    use crate::fs::MemoryFs;
    use crate::FsSource;
    use std::io::Read;

    fn get_source() -> Box<dyn Source> {
        let fs = MemoryFs::new()
            .with_file("1_init.up.sql", b"CREATE TABLE a (id int);".to_vec())
            .with_file("2_more.down.sql", b"DROP TABLE b;".to_vec());
        Box::new(FsSource::new(fs, ".").unwrap())
    }

    #[test]
    fn serves_migrations_through_trait_object() {
        let mut source = get_source();
        assert_eq!(1, source.first().unwrap());
        assert_eq!(2, source.next(1).unwrap());
        assert!(source.next(2).unwrap_err().is_not_found());

        let (mut body, identifier) = source.read_up(1).unwrap();
        let mut content = String::new();
        body.read_to_string(&mut content).unwrap();
        assert_eq!("init", identifier);
        assert_eq!("CREATE TABLE a (id int);", content);

        assert!(source.read_up(2).err().unwrap().is_not_found());
        source.close().unwrap();
    }

    #[test]
    #[should_panic(expected = "does not support open with url")]
    fn open_with_url_panics() {
        let source = get_source();
        let _ = source.open("file://migrations");
    }
}
