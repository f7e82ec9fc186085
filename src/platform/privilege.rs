// Privilege checks

use crate::error::{HubError, Result};
use std::process::Command;

/// Returns true when the process runs with an effective UID of 0.
///
/// Reads /proc/self/status on Linux and falls back to `id -u` elsewhere.
pub fn is_root() -> bool {
    if let Some(euid) = euid_from_proc() {
        return euid == 0;
    }

    Command::new("id")
        .arg("-u")
        .output()
        .ok()
        .and_then(|o| String::from_utf8_lossy(&o.stdout).trim().parse::<u32>().ok())
        .map(|uid| uid == 0)
        .unwrap_or(false)
}

/// Errors unless the process runs as root
pub fn require_root() -> Result<()> {
    if is_root() {
        Ok(())
    } else {
        Err(HubError::Privilege(
            "sdrhub must be run as root".to_string(),
        ))
    }
}

fn euid_from_proc() -> Option<u32> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("Uid:") {
            // Uid: real effective saved fs
            let euid = rest.split_whitespace().nth(1)?;
            return euid.parse().ok();
        }
    }
    None
}
