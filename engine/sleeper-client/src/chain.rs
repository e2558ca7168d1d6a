//! Season chain traversal
//!
//! Sleeper links each league season to its predecessor through
//! `previous_league_id`. The walker follows that chain from the current
//! season back to the league's first year, yielding one `SeasonLink` per
//! season, most recent first. The chain itself is inherently sequential (the
//! next ID is only known once the current season's metadata has arrived), but
//! the three fetches for one season are issued concurrently.

use crate::client::SleeperClient;
use crate::error::{Result, SleeperError};
use crate::models::{LeagueUser, Roster, SeasonStatus};
use std::collections::HashMap;
use tracing::info;

/// One season of the league chain, with the per-season data every engine needs
#[derive(Debug, Clone)]
pub struct SeasonLink {
    pub league_id: String,

    pub year: u16,

    pub status: SeasonStatus,

    pub playoff_week_start: u16,

    pub playoff_teams: u8,

    /// Playoff round format setting; absent on pre-2020 seasons
    pub playoff_round_type: Option<u8>,

    pub previous_league_id: Option<String>,

    pub rosters: Vec<Roster>,

    pub users: HashMap<String, LeagueUser>,
}

/// Normalize Sleeper's "no previous season" markers ("0", empty, absent)
pub fn normalize_league_id(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.is_empty() && id != "0")
}

/// Walks the season chain backward from a starting league ID
pub struct SeasonWalker<'a> {
    client: &'a SleeperClient,
    next_id: Option<String>,
}

impl<'a> SeasonWalker<'a> {
    /// Create a walker starting at the given (usually current) league ID
    pub fn new(client: &'a SleeperClient, league_id: impl Into<String>) -> Self {
        Self { client, next_id: normalize_league_id(Some(league_id.into())) }
    }

    /// Fetch and yield the next season, or `None` when the chain is exhausted.
    ///
    /// Rosters, users, and league metadata are fetched concurrently and
    /// joined; any failure aborts the walk.
    pub async fn advance(&mut self) -> Result<Option<SeasonLink>> {
        let league_id = match self.next_id.take() {
            Some(id) => id,
            None => return Ok(None),
        };

        let (rosters, users, league) = tokio::try_join!(
            self.client.rosters(&league_id),
            self.client.users(&league_id),
            self.client.league(&league_id),
        )?;

        let year: u16 = league
            .season
            .parse()
            .map_err(|_| SleeperError::InvalidSeason(league.season.clone()))?;

        self.next_id = normalize_league_id(league.previous_league_id.clone());

        info!("Walked season {} (league {})", year, league_id);

        Ok(Some(SeasonLink {
            league_id,
            year,
            status: league.status,
            playoff_week_start: league.settings.playoff_week_start,
            playoff_teams: league.settings.playoff_teams,
            playoff_round_type: league.settings.playoff_round_type,
            previous_league_id: league.previous_league_id,
            rosters,
            users,
        }))
    }
}
