use crate::migration::{Direction, Migration, Version};
use std::collections::BTreeMap;
use std::ops::Bound;

/// Ordered collection of migrations keyed by version.
///
/// Each version holds at most one up and one down migration.
pub trait Registry {
    /// Register a migration, returns false if a migration with the same
    /// version and direction is already present. The registry is left unchanged in that case.
    fn insert(&mut self, migration: Migration) -> bool;

    /// The lowest version
    fn first(&self) -> Option<Version>;

    /// The version right before `version`, `None` if `version` is the first or isn't registered
    fn prev(&self, version: Version) -> Option<Version>;

    /// The version right after `version`, `None` if `version` is the last or isn't registered
    fn next(&self, version: Version) -> Option<Version>;

    fn up(&self, version: Version) -> Option<&Migration>;

    fn down(&self, version: Version) -> Option<&Migration>;
}

#[derive(Clone, Debug, Default)]
struct Slots {
    up: Option<Migration>,
    down: Option<Migration>,
}

/// The default [`Registry`]
#[derive(Clone, Debug, Default)]
pub struct Migrations {
    index: BTreeMap<Version, Slots>,
}

impl Migrations {
    pub fn new() -> Migrations {
        Migrations::default()
    }

    /// Number of distinct versions
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate versions ascending together with their up and down migrations
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (Version, Option<&Migration>, Option<&Migration>)> + '_ {
        self.index
            .iter()
            .map(|(version, slots)| (*version, slots.up.as_ref(), slots.down.as_ref()))
    }
}

impl Registry for Migrations {
    fn insert(&mut self, migration: Migration) -> bool {
        let slots = self.index.entry(migration.version()).or_default();
        let slot = match migration.direction() {
            Direction::Up => &mut slots.up,
            Direction::Down => &mut slots.down,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(migration);
        true
    }

    fn first(&self) -> Option<Version> {
        self.index.keys().next().copied()
    }

    fn prev(&self, version: Version) -> Option<Version> {
        if !self.index.contains_key(&version) {
            return None;
        }
        self.index.range(..version).next_back().map(|(v, _)| *v)
    }

    fn next(&self, version: Version) -> Option<Version> {
        if !self.index.contains_key(&version) {
            return None;
        }
        self.index
            .range((Bound::Excluded(version), Bound::Unbounded))
            .next()
            .map(|(v, _)| *v)
    }

    fn up(&self, version: Version) -> Option<&Migration> {
        self.index.get(&version).and_then(|slots| slots.up.as_ref())
    }

    fn down(&self, version: Version) -> Option<&Migration> {
        self.index.get(&version).and_then(|slots| slots.down.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::{Migrations, Registry};
    use crate::migration::{Direction, Migration};

    fn migration(version: u64, direction: Direction) -> Migration {
        Migration::new(
            version,
            "foobar",
            direction,
            format!("{version}_foobar.{direction}.sql"),
        )
    }

    fn get_migrations() -> Migrations {
        let mut migrations = Migrations::new();
        for (version, direction) in [
            (7, Direction::Up),
            (1, Direction::Up),
            (1, Direction::Down),
            (3, Direction::Up),
            (4, Direction::Up),
            (4, Direction::Down),
            (5, Direction::Down),
            (7, Direction::Down),
        ] {
            assert!(migrations.insert(migration(version, direction)));
        }
        migrations
    }

    #[test]
    fn first_is_lowest_version() {
        assert_eq!(Some(1), get_migrations().first());
        assert_eq!(None, Migrations::new().first());
    }

    #[test]
    fn traverses_in_version_order() {
        let migrations = get_migrations();
        let mut versions = vec![migrations.first().unwrap()];
        while let Some(next) = migrations.next(*versions.last().unwrap()) {
            versions.push(next);
        }
        assert_eq!(vec![1, 3, 4, 5, 7], versions);

        assert_eq!(None, migrations.prev(1));
        assert_eq!(Some(5), migrations.prev(7));
        assert_eq!(None, migrations.next(7));
    }

    #[test]
    fn prev_and_next_of_unknown_version_are_none() {
        let migrations = get_migrations();
        assert_eq!(None, migrations.next(2));
        assert_eq!(None, migrations.prev(6));
        assert_eq!(None, migrations.next(0));
    }

    #[test]
    fn looks_up_directions_separately() {
        let migrations = get_migrations();
        assert_eq!("3_foobar.up.sql", migrations.up(3).unwrap().raw());
        assert!(migrations.down(3).is_none());
        assert!(migrations.up(5).is_none());
        assert_eq!("5_foobar.down.sql", migrations.down(5).unwrap().raw());
        assert!(migrations.up(42).is_none());
    }

    #[test]
    fn rejects_duplicate_version_and_direction() {
        let mut migrations = get_migrations();
        let duplicate = Migration::new(3, "other", Direction::Up, "3_other.up.sql");
        assert!(!migrations.insert(duplicate));
        assert_eq!("3_foobar.up.sql", migrations.up(3).unwrap().raw());
        assert_eq!(5, migrations.len());
    }

    #[test]
    fn iterates_ascending() {
        let migrations = get_migrations();
        let listed: Vec<(u64, bool, bool)> = migrations
            .iter()
            .map(|(v, up, down)| (v, up.is_some(), down.is_some()))
            .collect();
        assert_eq!(
            vec![
                (1, true, true),
                (3, true, false),
                (4, true, true),
                (5, false, true),
                (7, true, true)
            ],
            listed
        );
    }
}
