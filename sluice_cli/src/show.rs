use std::io;

use anyhow::{Context, Result};

use crate::cli::ShowArgs;
use crate::util::open_source;

pub fn handle_show_command(args: ShowArgs) -> Result<()> {
    let source = open_source(&args.source)?;

    let (mut body, identifier) = if args.down {
        source.read_down(args.version)
    } else {
        source.read_up(args.version)
    }
    .with_context(|| format!("could not read migration {}", args.version))?;

    log::info!("migration {} {}", args.version, identifier);
    io::copy(&mut body, &mut io::stdout().lock())?;
    Ok(())
}
