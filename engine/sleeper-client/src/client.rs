//! Async HTTP wrapper around the Sleeper API endpoints the engines consume

use crate::error::{Result, SleeperError};
use crate::models::*;
use futures::future::try_join_all;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.sleeper.app/v1";

/// Typed client for the Sleeper API
#[derive(Debug, Clone)]
pub struct SleeperClient {
    http: Client,
    base_url: String,
}

impl SleeperClient {
    /// Create a client against the public Sleeper API
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against an alternate base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { http, base_url: base_url.into() })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        serde_json::from_slice(&body).map_err(|e| SleeperError::decode(path, e))
    }

    /// Fetch league metadata for one season
    pub async fn league(&self, league_id: &str) -> Result<LeagueData> {
        self.get_json(&format!("/league/{}", league_id)).await
    }

    /// Fetch all rosters for a season
    pub async fn rosters(&self, league_id: &str) -> Result<Vec<Roster>> {
        self.get_json(&format!("/league/{}/rosters", league_id)).await
    }

    /// Fetch the season's users, indexed by user ID
    pub async fn users(&self, league_id: &str) -> Result<HashMap<String, LeagueUser>> {
        let users: Vec<LeagueUser> =
            self.get_json(&format!("/league/{}/users", league_id)).await?;
        Ok(users.into_iter().map(|u| (u.user_id.clone(), u)).collect())
    }

    /// Fetch all matchup entries for one week
    pub async fn matchups(&self, league_id: &str, week: u16) -> Result<Vec<Matchup>> {
        self.get_json(&format!("/league/{}/matchups/{}", league_id, week)).await
    }

    /// Fetch a batch of weeks' matchups concurrently, joined all-or-nothing
    pub async fn matchups_for_weeks(
        &self,
        league_id: &str,
        weeks: impl IntoIterator<Item = u16>,
    ) -> Result<Vec<(u16, Vec<Matchup>)>> {
        let fetches = weeks.into_iter().map(|week| async move {
            let matchups = self.matchups(league_id, week).await?;
            Ok::<_, crate::SleeperError>((week, matchups))
        });
        try_join_all(fetches).await
    }

    /// Fetch the drafts held for a season
    pub async fn drafts(&self, league_id: &str) -> Result<Vec<Draft>> {
        self.get_json(&format!("/league/{}/drafts", league_id)).await
    }

    /// Fetch every pick of one draft
    pub async fn draft_picks(&self, draft_id: &str) -> Result<Vec<DraftPick>> {
        self.get_json(&format!("/draft/{}/picks", draft_id)).await
    }

    /// Fetch all transactions processed in one week
    pub async fn transactions(&self, league_id: &str, week: u16) -> Result<Vec<TransactionData>> {
        self.get_json(&format!("/league/{}/transactions/{}", league_id, week)).await
    }

    /// Fetch the current NFL state (season phase and week)
    pub async fn nfl_state(&self) -> Result<NflState> {
        self.get_json("/state/nfl").await
    }
}
