// Systemd unit generation and service control

use crate::error::Result;
use crate::platform::command::CommandRunner;
use crate::utils::fs::{atomic_write, ensure_dir};
use std::path::{Path, PathBuf};

/// Structured writer for a generated service unit.
///
/// Rendering is kept in one place instead of scattering format strings
/// through the action routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFile {
    name: String,
    description: String,
    after: String,
    exec_start: String,
    restart: String,
    restart_sec: u32,
    wanted_by: String,
}

impl UnitFile {
    /// Create a unit with the defaults shared by all generated services
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            after: "network.target".to_string(),
            exec_start: String::new(),
            restart: "on-failure".to_string(),
            restart_sec: 5,
            wanted_by: "multi-user.target".to_string(),
        }
    }

    pub fn exec_start(mut self, exec_start: impl Into<String>) -> Self {
        self.exec_start = exec_start.into();
        self
    }

    /// Unit file name, e.g. `rtl-tcp.service`
    pub fn file_name(&self) -> String {
        format!("{}.service", self.name)
    }

    pub fn render(&self) -> String {
        format!(
            "[Unit]\n\
             Description={}\n\
             After={}\n\
             \n\
             [Service]\n\
             ExecStart={}\n\
             Restart={}\n\
             RestartSec={}\n\
             \n\
             [Install]\n\
             WantedBy={}\n",
            self.description,
            self.after,
            self.exec_start,
            self.restart,
            self.restart_sec,
            self.wanted_by
        )
    }

    /// Write (or unconditionally overwrite) the unit under the given directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        ensure_dir(dir)?;
        let path = dir.join(self.file_name());
        atomic_write(&path, &self.render())?;
        Ok(path)
    }
}

/// Thin wrapper over `systemctl` operations
pub struct Systemd<'a, R: CommandRunner> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> Systemd<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    pub fn daemon_reload(&self) -> Result<()> {
        self.runner.run("systemctl", &["daemon-reload"]).map(|_| ())
    }

    pub fn enable(&self, unit: &str) -> Result<()> {
        self.runner.run("systemctl", &["enable", unit]).map(|_| ())
    }

    pub fn start(&self, unit: &str) -> Result<()> {
        self.runner.run("systemctl", &["start", unit]).map(|_| ())
    }

    pub fn restart(&self, unit: &str) -> Result<()> {
        self.runner.run("systemctl", &["restart", unit]).map(|_| ())
    }

    pub fn is_active(&self, unit: &str) -> bool {
        self.runner
            .try_run("systemctl", &["is-active", "--quiet", unit])
    }
}
