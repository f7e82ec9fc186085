use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use sdrhub::log::{self, LogConfig, LogLevel};
use sdrhub::menu::MenuSystem;
use sdrhub::platform::privilege;
use sdrhub::{Provisioner, Settings, SystemRunner, log_error};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sdrhub", version)]
#[command(about = "sdrhub - provisioning tool for RTL-SDR radio hubs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install base packages and blacklist the DVB-T kernel modules
    Base,

    /// Write and (re)start the primary rtl_tcp stream service
    Stream {
        /// Listen port (default 1234)
        #[arg(long)]
        port: Option<u16>,
        /// RTL-SDR device index (default 0)
        #[arg(long)]
        device: Option<u32>,
    },

    /// Build and install the dump1090 decoder from source
    Decoder,

    /// Write and (re)start an additional, suffix-named rtl_tcp stream service
    AddStream {
        /// Name suffix for the service (rtl-tcp-<suffix>.service)
        suffix: String,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        device: Option<u32>,
    },

    /// Install the node exporter monitoring agent
    Monitor,

    /// Print the resolved settings as JSON
    Config {
        /// Write the settings file with the current values
        #[arg(long)]
        init: bool,
    },

    /// Generate shell completions
    Completions { shell: Shell },
}

/// Reading back the settings is the only action that works unprivileged;
/// `config --init` writes under /etc/sdrhub and needs root like the rest
fn needs_root(command: &Option<Commands>) -> bool {
    !matches!(command, Some(Commands::Config { init: false }))
}

fn init_logging(root: bool) {
    let config = LogConfig {
        level: LogLevel::Info,
        color: true,
        file: root.then(|| PathBuf::from("/var/log/sdrhub.log")),
    };

    // /var/log may be missing on odd setups; fall back to console only
    if log::init(config.clone()).is_err() {
        let _ = log::init(LogConfig {
            file: None,
            ..config
        });
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        generate(*shell, &mut Cli::command(), "sdrhub", &mut io::stdout());
        return Ok(());
    }

    let root = privilege::is_root();
    init_logging(root);

    let privileged = needs_root(&cli.command);
    if privileged {
        if let Err(e) = privilege::require_root() {
            log_error!("{}", e);
            std::process::exit(1);
        }
    }

    let settings = Settings::load()?;
    let runner = SystemRunner;
    let provisioner = Provisioner::new(&settings, &runner);
    if privileged {
        provisioner.preflight();
    }

    match cli.command {
        None => {
            MenuSystem::new(provisioner).run()?;
        }
        Some(Commands::Base) => provisioner.base_install()?,
        Some(Commands::Stream { port, device }) => {
            provisioner.primary_stream(
                port.unwrap_or(settings.default_port),
                device.unwrap_or(settings.default_device),
            )?;
        }
        Some(Commands::Decoder) => provisioner.decoder_install()?,
        Some(Commands::AddStream {
            suffix,
            port,
            device,
        }) => {
            provisioner.extra_stream(
                &suffix,
                port.unwrap_or(settings.default_port),
                device.unwrap_or(settings.default_device),
            )?;
        }
        Some(Commands::Monitor) => provisioner.monitor_install()?,
        Some(Commands::Config { init }) => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if init {
                settings.save()?;
                println!("Wrote {}", sdrhub::config::config_path().display());
            }
        }
        Some(Commands::Completions { .. }) => unreachable!(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_plain_config_read_skips_the_root_gate() {
        assert!(!needs_root(&Some(Commands::Config { init: false })));
        assert!(needs_root(&Some(Commands::Config { init: true })));
        assert!(needs_root(&None));
        assert!(needs_root(&Some(Commands::Base)));
        assert!(needs_root(&Some(Commands::Monitor)));
    }
}
