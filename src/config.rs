// Settings for the provisioning tool

use crate::error::Result;
use crate::utils::fs::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default listen port for the primary rtl_tcp stream
pub const DEFAULT_STREAM_PORT: u16 = 1234;

/// Default RTL-SDR device index
pub const DEFAULT_DEVICE_INDEX: u32 = 0;

/// External paths and fixed lists the provisioning routines operate on.
///
/// Loaded from /etc/sdrhub/config.json when present, otherwise defaults.
/// Overriding the paths is also what lets the tests run in a sandbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Kernel module blacklist file
    pub modprobe_file: PathBuf,
    /// Directory generated service units are written to
    pub systemd_dir: PathBuf,
    /// Directory the decoder source tree is cloned and built under
    pub build_root: PathBuf,
    /// Decoder source repository
    pub decoder_repo: String,
    /// Package name produced by the decoder build
    pub decoder_package: String,
    /// Service installed by the decoder package
    pub decoder_service: String,
    /// Monitoring agent package
    pub monitor_package: String,
    /// Service installed by the monitoring agent package
    pub monitor_service: String,
    /// Port the monitoring agent exposes metrics on
    pub monitor_port: u16,
    /// Packages installed by the base install action
    pub base_packages: Vec<String>,
    /// Kernel modules that conflict with librtlsdr and must not auto-load
    pub blacklist_modules: Vec<String>,
    pub default_port: u16,
    pub default_device: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            modprobe_file: PathBuf::from("/etc/modprobe.d/rtl-sdr-blacklist.conf"),
            systemd_dir: PathBuf::from("/etc/systemd/system"),
            build_root: PathBuf::from("/usr/local/src"),
            decoder_repo: "https://github.com/mutability/dump1090.git".to_string(),
            decoder_package: "dump1090-mutability".to_string(),
            decoder_service: "dump1090-mutability".to_string(),
            monitor_package: "prometheus-node-exporter".to_string(),
            monitor_service: "prometheus-node-exporter".to_string(),
            monitor_port: 9100,
            base_packages: [
                "rtl-sdr",
                "librtlsdr-dev",
                "libusb-1.0-0-dev",
                "git",
                "build-essential",
                "debhelper",
                "pkg-config",
                "fakeroot",
            ]
            .map(String::from)
            .to_vec(),
            blacklist_modules: ["dvb_usb_rtl28xxu", "rtl2832", "rtl2830"]
                .map(String::from)
                .to_vec(),
            default_port: DEFAULT_STREAM_PORT,
            default_device: DEFAULT_DEVICE_INDEX,
        }
    }
}

/// Path of the optional settings file
pub fn config_path() -> PathBuf {
    PathBuf::from("/etc/sdrhub/config.json")
}

impl Settings {
    /// Load settings from the config file, or defaults when it is absent
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Persist the settings to the config file
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        atomic_write(&config_path(), &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.default_port, 1234);
        assert_eq!(settings.default_device, 0);
        assert_eq!(settings.monitor_port, 9100);
        assert_eq!(settings.blacklist_modules.len(), 3);
        assert_eq!(
            settings.modprobe_file,
            PathBuf::from("/etc/modprobe.d/rtl-sdr-blacklist.conf")
        );
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.default_port = 14850;
        settings.build_root = PathBuf::from("/tmp/build");

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();

        assert_eq!(back.default_port, 14850);
        assert_eq!(back.build_root, PathBuf::from("/tmp/build"));
        assert_eq!(back.decoder_package, "dump1090-mutability");
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let partial = r#"{ "default_port": 4000 }"#;
        let settings: Settings = serde_json::from_str(partial).unwrap();
        assert_eq!(settings.default_port, 4000);
        assert_eq!(settings.default_device, 0);
        assert_eq!(settings.monitor_package, "prometheus-node-exporter");
    }
}
