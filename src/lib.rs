// SDR hub provisioning tool

pub mod actions;
pub mod blacklist;
pub mod config;
pub mod error;
pub mod log;
pub mod menu;
pub mod platform;
pub mod systemd;
pub mod utils;

// Re-export commonly used types
pub use actions::Provisioner;
pub use config::Settings;
pub use error::{HubError, Result};
pub use platform::command::{CommandRunner, SystemRunner};
