//! Command parsing and entity resolution.

mod command;
mod resolver;

pub use command::{Command, SystemCommand, parse_command};
pub use resolver::{display_name, resolve_item};
