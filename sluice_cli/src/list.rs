use std::io::{self, Write};

use anyhow::Result;

use crate::cli::SourceArgs;
use crate::util::open_source;

pub fn handle_list_command(args: SourceArgs) -> Result<()> {
    let source = open_source(&args)?;
    let migrations = source.migrations();

    if migrations.is_empty() {
        log::warn!("no migrations found");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (version, up, down) in migrations.iter() {
        writeln!(
            out,
            "{} {} {}",
            version,
            up.map_or("-", |m| m.raw()),
            down.map_or("-", |m| m.raw())
        )?;
    }
    Ok(())
}
