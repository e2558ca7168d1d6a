//! Error types for the Sleeper API client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, SleeperError>;

/// Errors that can occur while talking to the Sleeper API
#[derive(Error, Debug)]
pub enum SleeperError {
    /// Transport-level failures and non-success HTTP statuses
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Decode error for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// League metadata carried a season string that is not a year
    #[error("Invalid season '{0}' in league metadata")]
    InvalidSeason(String),
}

impl SleeperError {
    /// Create a new decode error
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode { endpoint: endpoint.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_names_the_endpoint() {
        let source = serde_json::from_slice::<crate::models::NflState>(b"not json").unwrap_err();
        let err = SleeperError::decode("/state/nfl", source);

        assert!(matches!(err, SleeperError::Decode { .. }));
        assert!(err.to_string().contains("/state/nfl"));
    }
}
