// Stream configuration actions: rtl_tcp service units

use super::Provisioner;
use crate::error::{HubError, Result};
use crate::platform::command::CommandRunner;
use crate::systemd::UnitFile;
use crate::log_info;
use std::path::PathBuf;

/// Base name of the generated stream units
pub const STREAM_UNIT: &str = "rtl-tcp";

/// Validates a user-supplied stream name suffix.
/// Empty input is the one rejected user-input case; beyond that the suffix
/// must stay unit-name-safe since it becomes part of a file name.
pub fn validate_suffix(suffix: &str) -> Result<String> {
    let suffix = suffix.trim();
    if suffix.is_empty() {
        return Err(HubError::Input(
            "stream name suffix must not be empty".to_string(),
        ));
    }
    if !suffix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(HubError::Input(format!(
            "stream name suffix '{}' may only contain letters, digits, '-' and '_'",
            suffix
        )));
    }
    Ok(suffix.to_string())
}

fn stream_unit(name: &str, port: u16, device: u32) -> UnitFile {
    UnitFile::new(
        name,
        format!("RTL-SDR TCP stream on port {} (device {})", port, device),
    )
    .exec_start(format!(
        "/usr/bin/rtl_tcp -a 0.0.0.0 -p {} -d {}",
        port, device
    ))
}

impl<R: CommandRunner> Provisioner<'_, R> {
    /// Write and (re)start the primary rtl_tcp stream service
    pub fn primary_stream(&self, port: u16, device: u32) -> Result<PathBuf> {
        self.install_stream(STREAM_UNIT, port, device)
    }

    /// Write and (re)start an additional, suffix-named rtl_tcp stream service
    pub fn extra_stream(&self, suffix: &str, port: u16, device: u32) -> Result<PathBuf> {
        let suffix = validate_suffix(suffix)?;
        let name = format!("{}-{}", STREAM_UNIT, suffix);
        self.install_stream(&name, port, device)
    }

    fn install_stream(&self, name: &str, port: u16, device: u32) -> Result<PathBuf> {
        let unit = stream_unit(name, port, device);
        let path = unit.write_to(&self.settings.systemd_dir)?;
        log_info!("Wrote {}", path.display());

        let systemd = self.systemd();
        systemd.daemon_reload()?;
        systemd.enable(&unit.file_name())?;
        systemd.restart(&unit.file_name())?;

        log_info!(
            "Stream service {} listening on 0.0.0.0:{} (device {})",
            unit.file_name(),
            port,
            device
        );
        Ok(path)
    }
}
