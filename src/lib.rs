#![deny(clippy::all)]

mod amdclean;
mod cleaner;
mod file;
mod options;
mod plugin;
mod source_map;

pub use amdclean::*;
pub use cleaner::*;
pub use file::*;
pub use options::*;
pub use plugin::*;
pub use source_map::*;
