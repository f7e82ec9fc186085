// Error types for the sdrhub application

use thiserror::Error;

/// Main error type for the sdrhub application
#[derive(Error, Debug)]
pub enum HubError {
    /// Missing privileges for an operation that needs root
    #[error("Permission denied: {0}")]
    Privilege(String),

    /// Invalid user input; the menu reports these and returns to the prompt
    #[error("Invalid input: {0}")]
    Input(String),

    /// An external command ran and exited non-zero
    #[error("Command '{command}' failed with status {status}: {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    /// An expected artifact (built package, unit file) was not found
    #[error("Not found: {0}")]
    Missing(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging system errors
    #[error("Logging error: {0}")]
    Log(String),

    /// I/O errors from standard library
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HubError>;
