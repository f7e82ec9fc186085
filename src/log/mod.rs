// Logging infrastructure for sdrhub

use crate::error::{HubError, Result};
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Mutex;

mod formatter;

pub use formatter::LogFormatter;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn color_code(&self) -> u8 {
        match self {
            LogLevel::Debug => 36,
            LogLevel::Info => 32,
            LogLevel::Warn => 33,
            LogLevel::Error => 31,
        }
    }
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub color: bool,
    /// Optional append-only log file (e.g. /var/log/sdrhub.log)
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            color: true,
            file: None,
        }
    }
}

/// Global logger: colored console output plus an optional log file
pub struct Logger {
    config: LogConfig,
    file: Option<Mutex<File>>,
}

impl Logger {
    fn new(config: LogConfig) -> Result<Self> {
        let file = match &config.file {
            Some(path) => {
                let f = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        HubError::Log(format!("Failed to open log file {}: {}", path.display(), e))
                    })?;
                Some(Mutex::new(f))
            }
            None => None,
        };

        Ok(Self { config, file })
    }

    pub fn log(&self, level: LogLevel, module: &str, message: &str) {
        if level < self.config.level {
            return;
        }

        if self.config.color {
            println!("\x1b[{}m{}\x1b[0m", level.color_code(), message);
        } else {
            println!("{}", message);
        }

        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let line = LogFormatter::format_with_timestamp(level, module, message);
                let _ = writeln!(f, "{}", line);
            }
        }
    }
}

static LOGGER: Lazy<Mutex<Option<Logger>>> = Lazy::new(|| Mutex::new(None));

/// Initialize the logging system with the given configuration
pub fn init(config: LogConfig) -> Result<()> {
    let logger = Logger::new(config)?;

    if let Ok(mut global_logger) = LOGGER.lock() {
        *global_logger = Some(logger);
        Ok(())
    } else {
        Err(HubError::Log("Failed to acquire logger lock".to_string()))
    }
}

/// Log a message at the specified level.
/// Falls back to plain console output if the logger was never initialized.
pub fn log(level: LogLevel, module: &str, message: &str) {
    if let Ok(logger_guard) = LOGGER.lock() {
        match logger_guard.as_ref() {
            Some(logger) => logger.log(level, module, message),
            None => println!("{}", LogFormatter::format(level, module, message)),
        }
    }
}

/// Logging macros for convenient use throughout the codebase
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::log::log($crate::log::LogLevel::Debug, module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log::log($crate::log::LogLevel::Info, module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log::log($crate::log::LogLevel::Warn, module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log::log($crate::log::LogLevel::Error, module_path!(), &format!($($arg)*))
    };
}
