//! Error types for the records engine

use thiserror::Error;

/// Result type alias for record reductions
pub type Result<T> = std::result::Result<T, RecordsError>;

/// Errors that can occur while reducing seasons into records
#[derive(Error, Debug)]
pub enum RecordsError {
    /// Sleeper API failures (fetch or decode)
    #[error(transparent)]
    Sleeper(#[from] sleeper_client::SleeperError),

    /// League configuration failures (manager resolution)
    #[error(transparent)]
    Settings(#[from] league_settings::SettingsError),

    /// Playoff bracket shape failures
    #[error(transparent)]
    Bracket(#[from] crate::bracket::BracketError),

    /// A matchup referenced a roster the season's roster list doesn't carry
    #[error("Matchup references roster {roster} not present in season {year}")]
    UnresolvedRoster { roster: u64, year: u16 },
}
