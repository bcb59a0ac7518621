/*!
Discover and stream versioned migrations from any filesystem.

`sluice` turns a directory of migration files into an ordered migration source.
It finds files named after a version and a direction, lets a migration engine walk
the versions in order and reads the content of each migration on demand.\
The directory can live on disk ([`LocalFs`]), in memory ([`MemoryFs`]), be embedded
in your binary with [`embed_migrations!`], or come from any type implementing [`Filesystem`].

## Usage

- Migrations must be named in the format `{1}_{2}.{3}.{4}` where `{1}` represents the migration version,
  `{2}` the identifier, `{3}` the direction (`up` or `down`) and `{4}` the extension, e.g. `1_create_persons.up.sql`.
- Only files directly in the migrations directory are considered, sub directories and files named otherwise are ignored.
- Two files with the same version and direction are an error.
- Sources implement the [`Source`] trait, a migration engine can walk them with [`Source::first`] and [`Source::next`].

[`embed_migrations!`]: macro.embed_migrations.html

### Example
```rust,no_run
use std::io::Read;
use sluice::{FsSource, LocalFs};

let source = FsSource::new(LocalFs::new("./"), "migrations").unwrap();
let mut version = source.first().unwrap();
loop {
    let (mut body, identifier) = source.read_up(version).unwrap();
    let mut sql = String::new();
    body.read_to_string(&mut sql).unwrap();
    println!("{version} {identifier}: {sql}");

    match source.next(version) {
        Ok(next) => version = next,
        Err(err) if err.is_not_found() => break,
        Err(err) => panic!("{err}"),
    }
}
```
*/

pub use sluice_core::fs::{self, DirEntry, EntryKind, FileInfo};
pub use sluice_core::traits::Body;
pub use sluice_core::{
    DefaultParser, Direction, Error, Filesystem, FsSource, Kind, LocalFs, MemoryFs, Migration,
    Migrations, Parser, PathError, Registry, Source, Version, DEFAULT_PATTERN,
};
#[cfg(feature = "toml")]
pub use sluice_core::config;
pub use sluice_macros::embed_migrations;
