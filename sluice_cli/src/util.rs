use anyhow::{Context, Result};
use sluice_core::config::Config;
use sluice_core::{FsSource, LocalFs};

use crate::cli::SourceArgs;

pub(crate) fn load_config(args: &SourceArgs) -> Result<Config> {
    let config = match &args.config {
        Some(location) => Config::from_file_location(location)
            .with_context(|| format!("could not parse the config file {}", location.display()))?,
        None => Config::new(&args.path),
    };

    Ok(match &args.pattern {
        Some(pattern) => config.set_pattern(pattern),
        None => config,
    })
}

pub(crate) fn open_source(args: &SourceArgs) -> Result<FsSource<LocalFs>> {
    let config = load_config(args)?;
    config.source().with_context(|| {
        format!(
            "could not read migrations from {}",
            config.path().display()
        )
    })
}
