//! Main entry point for the sluice cli tool

mod cli;
mod list;
mod show;
mod util;

use anyhow::Error;
use clap::Parser;
use cli::Cli;
use env_logger::{Builder, Target};
use std::io::Write;

fn main() -> Result<(), Error> {
    human_panic::setup_panic!();

    let mut builder = Builder::new();
    builder
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter(None, log::LevelFilter::Info)
        .parse_default_env()
        .target(Target::Stderr)
        .init();

    let args = Cli::parse();

    match args {
        Cli::List(args) => list::handle_list_command(args)?,
        Cli::Show(args) => show::handle_show_command(args)?,
    };

    Ok(())
}
