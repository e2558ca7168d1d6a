//! Error types for the transactions engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransactionsError {
    #[error(transparent)]
    Sleeper(#[from] sleeper_client::SleeperError),

    #[error(transparent)]
    Settings(#[from] league_settings::SettingsError),

    /// A move references a roster the transaction does not list
    #[error("Roster {roster} is not a party to transaction {transaction_id}")]
    RosterNotInTransaction { roster: u64, transaction_id: String },

    /// A transaction timestamp decodes to no valid calendar date
    #[error("Transaction {transaction_id} has an invalid timestamp {timestamp}")]
    InvalidTimestamp { transaction_id: String, timestamp: i64 },
}

impl TransactionsError {
    pub fn roster_not_in_transaction(roster: u64, transaction_id: &str) -> Self {
        Self::RosterNotInTransaction { roster, transaction_id: transaction_id.to_string() }
    }

    pub fn invalid_timestamp(transaction_id: &str, timestamp: i64) -> Self {
        Self::InvalidTimestamp { transaction_id: transaction_id.to_string(), timestamp }
    }
}

pub type Result<T> = std::result::Result<T, TransactionsError>;
