// Provisioning action routines

use crate::config::Settings;
use crate::platform::command::CommandRunner;
use crate::systemd::Systemd;
use crate::log_warn;

mod base;
mod decoder;
mod monitor;
mod stream;

pub use stream::{STREAM_UNIT, validate_suffix};

/// Tools every action routine shells out to
const REQUIRED_TOOLS: [&str; 5] = ["apt-get", "dpkg", "systemctl", "git", "dpkg-buildpackage"];

/// The five provisioning routines, sharing settings and the command runner.
///
/// Each routine is a linear sequence of external-process invocations; the
/// only state they share is the filesystem and systemd's unit registry.
pub struct Provisioner<'a, R: CommandRunner> {
    pub settings: &'a Settings,
    runner: &'a R,
}

impl<'a, R: CommandRunner> Provisioner<'a, R> {
    pub fn new(settings: &'a Settings, runner: &'a R) -> Self {
        Self { settings, runner }
    }

    pub(crate) fn systemd(&self) -> Systemd<'a, R> {
        Systemd::new(self.runner)
    }

    /// Warn about missing external tools before any action runs.
    /// Non-fatal: the failing action will surface the real error.
    pub fn preflight(&self) {
        for tool in REQUIRED_TOOLS {
            if which::which(tool).is_err() {
                log_warn!("'{}' not found in PATH; some actions will fail", tool);
            }
        }
    }
}
