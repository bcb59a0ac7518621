use std::fmt;

/// Migration versions are unsigned and ordered ascending.
pub type Version = u64;

/// The direction a migration file applies in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A migration file discovered on a filesystem.
/// Migrations are created by a [`Parser`](crate::Parser) from the name of the file,
/// its content is only read on demand through a source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Migration {
    version: Version,
    identifier: String,
    direction: Direction,
    raw: String,
}

impl Migration {
    pub fn new(
        version: Version,
        identifier: impl Into<String>,
        direction: Direction,
        raw: impl Into<String>,
    ) -> Migration {
        Migration {
            version,
            identifier: identifier.into(),
            direction,
            raw: raw.into(),
        }
    }

    /// Get the Migration version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get the human readable identifier, `create_users` for `1_create_users.up.sql`
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Get the file name exactly as it was listed on the filesystem
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.raw)
    }
}
