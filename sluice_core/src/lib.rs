#[cfg(feature = "toml")]
pub mod config;
pub mod error;
pub mod fs;
mod migration;
mod parser;
mod registry;
mod source;
pub mod traits;

pub use crate::error::{Error, Kind, PathError};
pub use crate::fs::{Filesystem, LocalFs, MemoryFs};
pub use crate::migration::{Direction, Migration, Version};
pub use crate::parser::{DefaultParser, Parser, DEFAULT_PATTERN};
pub use crate::registry::{Migrations, Registry};
pub use crate::source::FsSource;
pub use crate::traits::Source;
