// Platform layer: external command execution and privilege checks

pub mod command;
pub mod privilege;

pub use command::{CommandRunner, SystemRunner};
pub use privilege::{is_root, require_root};
