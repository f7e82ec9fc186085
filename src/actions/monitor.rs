// Monitoring agent install action

use super::Provisioner;
use crate::error::Result;
use crate::platform::command::CommandRunner;
use crate::log_info;

impl<R: CommandRunner> Provisioner<'_, R> {
    /// Install the host-metrics agent and enable/restart its service
    pub fn monitor_install(&self) -> Result<()> {
        let settings = self.settings;

        log_info!("Installing {}", settings.monitor_package);
        self.runner
            .run_interactive("apt-get", &["-y", "install", &settings.monitor_package])?;

        let unit = format!("{}.service", settings.monitor_service);
        let systemd = self.systemd();
        systemd.enable(&unit)?;
        systemd.restart(&unit)?;

        log_info!(
            "Monitoring agent {} running; metrics exposed on port {}",
            unit,
            settings.monitor_port
        );
        Ok(())
    }
}
