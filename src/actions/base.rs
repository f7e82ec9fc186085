// Base install action: OS packages and kernel module blacklist

use super::Provisioner;
use crate::blacklist::ensure_blacklisted;
use crate::error::Result;
use crate::platform::command::CommandRunner;
use crate::{log_info, log_warn};

impl<R: CommandRunner> Provisioner<'_, R> {
    /// Refresh and upgrade the package index, install the base package set,
    /// and blacklist the DVB-T kernel modules that grab the RTL-SDR dongle.
    pub fn base_install(&self) -> Result<()> {
        log_info!("Updating package index");
        self.runner.run_interactive("apt-get", &["update"])?;

        log_info!("Upgrading installed packages");
        self.runner.run_interactive("apt-get", &["-y", "upgrade"])?;

        log_info!(
            "Installing base packages: {}",
            self.settings.base_packages.join(" ")
        );
        let mut args = vec!["-y", "install"];
        args.extend(self.settings.base_packages.iter().map(String::as_str));
        self.runner.run_interactive("apt-get", &args)?;

        let added = ensure_blacklisted(
            &self.settings.modprobe_file,
            &self.settings.blacklist_modules,
        )?;
        if added.is_empty() {
            log_info!(
                "Kernel modules already blacklisted in {}",
                self.settings.modprobe_file.display()
            );
        } else {
            log_info!(
                "Blacklisted kernel modules in {}: {}",
                self.settings.modprobe_file.display(),
                added.join(" ")
            );
            log_warn!("Reboot the machine for the module blacklist to take effect");
        }

        log_info!("Base install finished");
        Ok(())
    }
}
