// Interactive menu dispatcher

use crate::actions::{Provisioner, STREAM_UNIT};
use crate::error::{HubError, Result};
use crate::platform::command::CommandRunner;
use crate::log_error;
use dialoguer::Input;
use strum::{EnumString, IntoStaticStr};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The six menu options, parsed from the user's single-line selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum MenuChoice {
    #[strum(serialize = "1")]
    BaseInstall,
    #[strum(serialize = "2")]
    PrimaryStream,
    #[strum(serialize = "3")]
    DecoderInstall,
    #[strum(serialize = "4")]
    ExtraStream,
    #[strum(serialize = "5")]
    MonitorInstall,
    #[strum(serialize = "6")]
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::BaseInstall,
        MenuChoice::PrimaryStream,
        MenuChoice::DecoderInstall,
        MenuChoice::ExtraStream,
        MenuChoice::MonitorInstall,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::BaseInstall => "Install base packages and blacklist DVB-T kernel modules",
            MenuChoice::PrimaryStream => "Configure the primary rtl_tcp stream service",
            MenuChoice::DecoderInstall => "Build and install the dump1090 decoder",
            MenuChoice::ExtraStream => "Configure an additional rtl_tcp stream service",
            MenuChoice::MonitorInstall => "Install the node exporter monitoring agent",
            MenuChoice::Exit => "Exit",
        }
    }
}

fn parse_port(raw: &str, default: u16) -> Result<u16> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse()
        .map_err(|_| HubError::Input(format!("'{}' is not a valid port number", raw)))
}

fn parse_device(raw: &str, default: u32) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse()
        .map_err(|_| HubError::Input(format!("'{}' is not a valid device index", raw)))
}

/// Interactive menu over the five provisioning routines
pub struct MenuSystem<'a, R: CommandRunner> {
    provisioner: Provisioner<'a, R>,
}

impl<'a, R: CommandRunner> MenuSystem<'a, R> {
    pub fn new(provisioner: Provisioner<'a, R>) -> Self {
        Self { provisioner }
    }

    /// Show the main menu until the user exits (or stdin closes)
    pub fn run(&self) -> Result<()> {
        loop {
            self.display_menu();

            let line = match Input::<String>::new()
                .with_prompt("Select an option")
                .allow_empty(true)
                .interact_text()
            {
                Ok(line) => line,
                // stdin closed
                Err(_) => break,
            };

            match line.trim().parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => break,
                Ok(choice) => {
                    match self.dispatch(choice) {
                        Ok(()) => {}
                        // Bad input is reported and recovered at the menu;
                        // anything else aborts the run (fail-fast)
                        Err(HubError::Input(msg)) => log_error!("{}", msg),
                        Err(e) => return Err(e),
                    }
                    self.pause();
                }
                Err(_) => {
                    log_error!("Invalid choice '{}': enter a number from 1 to 6", line.trim());
                }
            }
        }
        Ok(())
    }

    fn display_menu(&self) {
        let settings = self.provisioner.settings;

        println!("-----------------------------------------------");
        println!("\x1b[30;46m SDR Hub Setup \x1b[0m\t\tversion: {}", VERSION);
        self.print_unit_status(&format!("{}.service", STREAM_UNIT), "Stream");
        self.print_unit_status(&format!("{}.service", settings.decoder_service), "Decoder");
        println!("-----------------------------------------------");
        for choice in MenuChoice::ALL {
            let key: &'static str = choice.into();
            println!(" {} {}", key, choice.label());
        }
        println!("-----------------------------------------------");
    }

    fn print_unit_status(&self, unit: &str, name: &str) {
        if self.provisioner.systemd().is_active(unit) {
            println!("{}: \x1b[32mactive\x1b[0m ({})", name, unit);
        } else {
            println!("{}: \x1b[31minactive\x1b[0m ({})", name, unit);
        }
    }

    fn dispatch(&self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::BaseInstall => self.provisioner.base_install(),
            MenuChoice::PrimaryStream => {
                let port = self.prompt_port()?;
                let device = self.prompt_device()?;
                self.provisioner.primary_stream(port, device).map(|_| ())
            }
            MenuChoice::DecoderInstall => self.provisioner.decoder_install(),
            MenuChoice::ExtraStream => {
                let suffix = self.prompt_text("Stream name suffix")?;
                let port = self.prompt_port()?;
                let device = self.prompt_device()?;
                self.provisioner
                    .extra_stream(&suffix, port, device)
                    .map(|_| ())
            }
            MenuChoice::MonitorInstall => self.provisioner.monitor_install(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn prompt_port(&self) -> Result<u16> {
        let default = self.provisioner.settings.default_port;
        let raw = self.prompt_text(&format!("Listen port [{}]", default))?;
        parse_port(&raw, default)
    }

    fn prompt_device(&self) -> Result<u32> {
        let default = self.provisioner.settings.default_device;
        let raw = self.prompt_text(&format!("Device index [{}]", default))?;
        parse_device(&raw, default)
    }

    fn prompt_text(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HubError::Input(e.to_string()))
    }

    fn pause(&self) {
        let _ = Input::<String>::new()
            .with_prompt("Press Enter to return to the menu")
            .allow_empty(true)
            .interact_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn selections_map_to_actions() {
        assert_eq!(MenuChoice::from_str("1").unwrap(), MenuChoice::BaseInstall);
        assert_eq!(MenuChoice::from_str("2").unwrap(), MenuChoice::PrimaryStream);
        assert_eq!(MenuChoice::from_str("6").unwrap(), MenuChoice::Exit);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        assert!(MenuChoice::from_str("9").is_err());
        assert!(MenuChoice::from_str("0").is_err());
        assert!(MenuChoice::from_str("").is_err());
        assert!(MenuChoice::from_str("install").is_err());
    }

    #[test]
    fn blank_port_and_device_fall_back_to_defaults() {
        assert_eq!(parse_port("", 1234).unwrap(), 1234);
        assert_eq!(parse_port("  ", 1234).unwrap(), 1234);
        assert_eq!(parse_device("", 0).unwrap(), 0);
    }

    #[test]
    fn explicit_values_override_defaults() {
        assert_eq!(parse_port("2000", 1234).unwrap(), 2000);
        assert_eq!(parse_device(" 1 ", 0).unwrap(), 1);
    }

    #[test]
    fn non_numeric_values_surface_input_errors() {
        assert!(matches!(parse_port("http", 1234), Err(HubError::Input(_))));
        assert!(matches!(parse_device("-1", 0), Err(HubError::Input(_))));
    }
}
