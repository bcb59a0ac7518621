//! Defines the CLI application

use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Parser)]
#[command(version)]
pub enum Cli {
    /// List the migrations found in the migrations directory
    List(SourceArgs),

    /// Print the content of a migration
    Show(ShowArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Config file location, its path takes precedence over --path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Migrations directory path
    #[arg(short, long, default_value = "./migrations")]
    pub path: PathBuf,

    /// Regex used to parse migration file names, it must capture version, identifier and direction
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Version of the migration
    pub version: u64,

    /// Print the down migration instead of the up one
    #[arg(short, long)]
    pub down: bool,
}
