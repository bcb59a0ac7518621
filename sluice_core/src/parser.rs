use crate::error::{Error, Kind};
use crate::migration::{Direction, Migration, Version};

use regex::Regex;

/// Matches `{version}_{identifier}.{up|down}.{ext}`, e.g. `1_create_users.up.sql`
pub const DEFAULT_PATTERN: &str = r"^([0-9]+)_(.*)\.(down|up)\.(.*)$";

/// Turns a file name into a [`Migration`].
/// Names that are not migrations must return an error, sources skip those files.
pub trait Parser {
    fn parse(&self, name: &str) -> Result<Migration, Error>;
}

impl<F> Parser for F
where
    F: Fn(&str) -> Result<Migration, Error>,
{
    fn parse(&self, name: &str) -> Result<Migration, Error> {
        self(name)
    }
}

/// Regex based [`Parser`].
///
/// The first three capture groups of the pattern are the version,
/// the identifier and the direction (`up` or `down`).
#[derive(Clone, Debug)]
pub struct DefaultParser {
    re: Regex,
}

impl DefaultParser {
    pub fn new() -> DefaultParser {
        DefaultParser {
            // safe to call unwrap as DEFAULT_PATTERN is a valid regex
            re: Regex::new(DEFAULT_PATTERN).unwrap(),
        }
    }

    /// Create a parser from a custom pattern, it must have at least three capture groups
    pub fn with_pattern(pattern: &str) -> Result<DefaultParser, Error> {
        let re = Regex::new(pattern)
            .map_err(|err| Error::new(Kind::InvalidPattern(format!("{pattern}, {err}"))))?;

        // captures_len includes the implicit group for the whole match
        if re.captures_len() < 4 {
            return Err(Error::new(Kind::InvalidPattern(format!(
                "{pattern}, expected capture groups for version, identifier and direction"
            ))));
        }

        Ok(DefaultParser { re })
    }

    pub fn pattern(&self) -> &str {
        self.re.as_str()
    }
}

impl Default for DefaultParser {
    fn default() -> Self {
        DefaultParser::new()
    }
}

impl Parser for DefaultParser {
    fn parse(&self, name: &str) -> Result<Migration, Error> {
        let captures = self
            .re
            .captures(name)
            .ok_or_else(|| Error::new(Kind::InvalidName(name.into())))?;

        let group = |i| captures.get(i).map_or("", |m| m.as_str());

        let version: Version = group(1)
            .parse()
            .map_err(|_| Error::new(Kind::InvalidVersion(name.into())))?;

        let direction = match group(3) {
            "up" => Direction::Up,
            "down" => Direction::Down,
            _ => return Err(Error::new(Kind::InvalidName(name.into()))),
        };

        Ok(Migration::new(version, group(2), direction, name))
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultParser, Parser};
    use crate::error::{Error, Kind};
    use crate::migration::{Direction, Migration};

    #[test]
    fn parses_up_migration() {
        let migration = DefaultParser::new().parse("1_create_users.up.sql").unwrap();
        assert_eq!(1, migration.version());
        assert_eq!("create_users", migration.identifier());
        assert_eq!(Direction::Up, migration.direction());
        assert_eq!("1_create_users.up.sql", migration.raw());
    }

    #[test]
    fn parses_down_migration_with_timestamp_version() {
        let migration = DefaultParser::new()
            .parse("20250502120000_add_cars_table.down.sql")
            .unwrap();
        assert_eq!(20250502120000, migration.version());
        assert_eq!("add_cars_table", migration.identifier());
        assert_eq!(Direction::Down, migration.direction());
    }

    #[test]
    fn rejects_names_without_direction() {
        let err = DefaultParser::new().parse("1_create_users.sql").unwrap_err();
        assert!(matches!(err.kind(), Kind::InvalidName(name) if name == "1_create_users.sql"));
        assert!(DefaultParser::new().parse("README.md").is_err());
        assert!(DefaultParser::new().parse("V1__initial.sql").is_err());
    }

    #[test]
    fn rejects_versions_that_overflow() {
        let err = DefaultParser::new()
            .parse("99999999999999999999999_huge.up.sql")
            .unwrap_err();
        assert!(matches!(err.kind(), Kind::InvalidVersion(_)));
    }

    #[test]
    fn parses_with_custom_pattern() {
        let parser = DefaultParser::with_pattern(r"^V([0-9]+)__(\w+)\.(up|down)\.sql$").unwrap();
        let migration = parser.parse("V3__add_brand.down.sql").unwrap();
        assert_eq!(3, migration.version());
        assert_eq!("add_brand", migration.identifier());
        assert_eq!(Direction::Down, migration.direction());
        assert!(parser.parse("3_add_brand.down.sql").is_err());
    }

    #[test]
    fn rejects_pattern_without_enough_groups() {
        let err = DefaultParser::with_pattern(r"^([0-9]+)_(.*)\.sql$").unwrap_err();
        assert!(matches!(err.kind(), Kind::InvalidPattern(_)));
        assert!(DefaultParser::with_pattern("([0-9]+").is_err());
    }

    #[test]
    fn closures_are_parsers() {
        let parser = |name: &str| -> Result<Migration, Error> {
            Ok(Migration::new(7, name, Direction::Up, name))
        };
        assert_eq!(7, parser.parse("anything").unwrap().version());
    }
}
