use crate::error::Kind;
use crate::fs::LocalFs;
use crate::{DefaultParser, Error, FsSource, Migrations};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// sluice config file used to locate migrations when they are not embedded with the macros
// Config can either be instanced with [`Config::new`] or retrieved from a config file with [`Config::from_file_location`]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    main: Main,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct Main {
    path: PathBuf,
    pattern: Option<String>,
}

impl Config {
    /// create a new config instance pointing to a migrations directory
    pub fn new(path: impl Into<PathBuf>) -> Config {
        Config {
            main: Main {
                path: path.into(),
                pattern: None,
            },
        }
    }

    /// create a new Config instance from a config file located on the file system
    pub fn from_file_location<T: AsRef<Path>>(location: T) -> Result<Config, Error> {
        let file = std::fs::read_to_string(&location).map_err(|err| {
            Error::new(Kind::ConfigError(format!(
                "could not open config file, {}",
                err
            )))
        })?;

        let mut config: Config = toml::from_str(&file).map_err(|err| {
            Error::new(Kind::ConfigError(format!(
                "could not parse config file, {}",
                err
            )))
        })?;

        //replace relative path with canonical path relative to the config file
        if config.main.path.is_relative() {
            let config_dir = location
                .as_ref()
                .parent()
                .unwrap_or_else(|| Path::new("."));
            config.main.path = config_dir.join(&config.main.path);
        }

        config.main.path = config.main.path.canonicalize().map_err(|err| {
            Error::new(Kind::ConfigError(format!(
                "invalid migrations path {}, {}",
                config.main.path.display(),
                err
            )))
        })?;

        if let Some(pattern) = config.pattern() {
            DefaultParser::with_pattern(pattern)?;
        }

        Ok(config)
    }

    pub fn set_path(self, path: impl Into<PathBuf>) -> Config {
        Config {
            main: Main {
                path: path.into(),
                ..self.main
            },
        }
    }

    pub fn set_pattern(self, pattern: &str) -> Config {
        Config {
            main: Main {
                pattern: Some(pattern.into()),
                ..self.main
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.main.path
    }

    pub fn pattern(&self) -> Option<&str> {
        self.main.pattern.as_deref()
    }

    /// The parser for the configured pattern, or the default one
    pub fn parser(&self) -> Result<DefaultParser, Error> {
        match self.pattern() {
            Some(pattern) => DefaultParser::with_pattern(pattern),
            None => Ok(DefaultParser::new()),
        }
    }

    /// Discover the migrations in the configured directory
    pub fn source(&self) -> Result<FsSource<LocalFs>, Error> {
        FsSource::init(
            LocalFs::new(self.path()),
            ".",
            &self.parser()?,
            Migrations::new(),
        )
    }
}
