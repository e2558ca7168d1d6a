//! Error types for league configuration

use thiserror::Error;

/// Result type alias for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur loading or consulting league configuration
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/O errors reading the configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// No configured manager held the roster slot in the given year
    #[error("No manager configured for roster {roster} in {year}")]
    UnknownManager { roster: u64, year: u16 },
}
