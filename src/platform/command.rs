// External command execution

use crate::error::{HubError, Result};
use crate::log_debug;
use std::path::Path;
use std::process::{Command, Stdio};

/// Seam over external process invocation.
///
/// Every package-manager, build and service-manager call goes through this
/// trait so the provisioning routines can be exercised against a fake.
pub trait CommandRunner {
    /// Run a command, capture stdout, and fail on a non-zero exit status
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String>;

    /// Run a command and report only whether it exited successfully
    fn try_run(&self, cmd: &str, args: &[&str]) -> bool;

    /// Run a long-lived command with inherited stdio (package installs,
    /// source builds), failing on a non-zero exit status
    fn run_interactive(&self, cmd: &str, args: &[&str]) -> Result<()>;

    /// Like `run_interactive`, but with a working directory
    fn run_interactive_in(&self, dir: &Path, cmd: &str, args: &[&str]) -> Result<()>;
}

fn command_line(cmd: &str, args: &[&str]) -> String {
    if args.is_empty() {
        cmd.to_string()
    } else {
        format!("{} {}", cmd, args.join(" "))
    }
}

/// `CommandRunner` backed by `std::process::Command`
pub struct SystemRunner;

impl SystemRunner {
    fn spawn_err(cmd: &str, e: std::io::Error) -> HubError {
        HubError::Command {
            command: cmd.to_string(),
            status: "spawn failed".to_string(),
            stderr: e.to_string(),
        }
    }

    fn interactive(&self, dir: Option<&Path>, cmd: &str, args: &[&str]) -> Result<()> {
        log_debug!("run {}", command_line(cmd, args));

        let mut c = Command::new(cmd);
        c.args(args);
        if let Some(dir) = dir {
            c.current_dir(dir);
        }

        let status = c.status().map_err(|e| Self::spawn_err(cmd, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(HubError::Command {
                command: command_line(cmd, args),
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<String> {
        log_debug!("run {}", command_line(cmd, args));

        let output = Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Self::spawn_err(cmd, e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(HubError::Command {
                command: command_line(cmd, args),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    fn try_run(&self, cmd: &str, args: &[&str]) -> bool {
        Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn run_interactive(&self, cmd: &str, args: &[&str]) -> Result<()> {
        self.interactive(None, cmd, args)
    }

    fn run_interactive_in(&self, dir: &Path, cmd: &str, args: &[&str]) -> Result<()> {
        self.interactive(Some(dir), cmd, args)
    }
}
