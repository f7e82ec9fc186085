// Log message formatting

use crate::log::LogLevel;
use chrono::Local;

pub struct LogFormatter;

impl LogFormatter {
    /// Format a log message with timestamp, level, module, and message
    pub fn format_with_timestamp(level: LogLevel, module: &str, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        format!("[{}] [{}] [{}] {}", timestamp, level.as_str(), module, message)
    }

    /// Format a log message without timestamp
    pub fn format(level: LogLevel, module: &str, message: &str) -> String {
        format!("[{}] [{}] {}", level.as_str(), module, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_includes_level_and_module() {
        let line = LogFormatter::format(LogLevel::Warn, "sdrhub::actions", "reboot required");
        assert_eq!(line, "[WARN] [sdrhub::actions] reboot required");
    }
}
