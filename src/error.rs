//! Error types for Disha

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Disha error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Filter or application configuration rejected at construction
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Offending field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Ctrl-C handler installation failed
    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
