//! League configuration file loading

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static configuration for a league
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    /// Sleeper league ID of the current season
    pub league_id: String,

    /// Every manager who has ever held a roster slot
    #[serde(default)]
    pub managers: Vec<ManagerConfig>,
}

/// One manager identity, tied to a roster slot for a range of years
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Stable identity, persistent even if the roster slot changes hands
    pub manager_id: u64,

    /// Roster slot this identity held
    pub roster: u64,

    /// Real-life name shown alongside the team name
    pub name: String,

    pub status: ManagerStatus,

    /// Seasons in which this identity held the roster slot
    pub years_active: Vec<u16>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ManagerStatus {
    Active,
    Inactive,
}

impl LeagueConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
