//! Sleeper API data structures
//!
//! Field names mirror the Sleeper wire format. Sleeper omits most numeric
//! fields when they are zero, so roster settings default rather than error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// League metadata for one season
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LeagueData {
    pub league_id: String,

    pub name: String,

    /// Season year as a string, e.g. "2023"
    pub season: String,

    pub status: SeasonStatus,

    /// League ID of the previous season; "0" or absent on the first season
    #[serde(default)]
    pub previous_league_id: Option<String>,

    pub settings: LeagueSettings,
}

/// Lifecycle status of a league season
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    PreDraft,
    Drafting,
    InSeason,
    PostSeason,
    Complete,
    #[serde(other)]
    Unknown,
}

impl SeasonStatus {
    /// True once the season's results are final
    pub fn is_complete(&self) -> bool {
        matches!(self, SeasonStatus::Complete)
    }
}

/// Subset of league settings the record engines need
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LeagueSettings {
    pub playoff_week_start: u16,

    pub playoff_teams: u8,

    /// 0 = one week per round, 1 = two-week championship, 2 = two weeks per
    /// round. Absent on seasons before Sleeper introduced the setting.
    #[serde(default)]
    pub playoff_round_type: Option<u8>,
}

/// One franchise's roster for a season
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Roster {
    pub roster_id: u64,

    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub settings: RosterSettings,
}

/// Season-to-date roster standings
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: u32,

    #[serde(default)]
    pub losses: u32,

    #[serde(default)]
    pub ties: u32,

    /// Integer part of fantasy points scored
    #[serde(default)]
    pub fpts: i64,

    /// Hundredths of a point scored
    #[serde(default)]
    pub fpts_decimal: i64,

    #[serde(default)]
    pub fpts_against: i64,

    #[serde(default)]
    pub fpts_against_decimal: i64,

    /// Integer part of potential (optimal lineup) points
    #[serde(default)]
    pub ppts: i64,

    #[serde(default)]
    pub ppts_decimal: i64,
}

impl RosterSettings {
    /// Games played this season
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Fantasy points for, integer and decimal parts combined
    pub fn points_for(&self) -> f64 {
        self.fpts as f64 + self.fpts_decimal as f64 / 100.0
    }

    /// Fantasy points against, combined
    pub fn points_against(&self) -> f64 {
        self.fpts_against as f64 + self.fpts_against_decimal as f64 / 100.0
    }

    /// Potential points with an optimal lineup, combined
    pub fn potential_points(&self) -> f64 {
        self.ppts as f64 + self.ppts_decimal as f64 / 100.0
    }
}

/// A league member's profile for one season
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LeagueUser {
    pub user_id: String,

    pub display_name: String,

    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default)]
    pub metadata: UserMetadata,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// One roster's side of a weekly head-to-head matchup
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Matchup {
    pub roster_id: u64,

    /// Pairs the two sides of a head-to-head game; absent for bye slots
    #[serde(default)]
    pub matchup_id: Option<u64>,

    #[serde(default)]
    pub points: f64,

    #[serde(default)]
    pub starters: Vec<String>,

    #[serde(default)]
    pub starters_points: Vec<f64>,

    #[serde(default)]
    pub players: Vec<String>,

    #[serde(default)]
    pub players_points: HashMap<String, f64>,
}

/// Current NFL state (week, season phase)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NflState {
    pub week: u16,

    /// "pre", "regular", or "post"
    pub season_type: String,

    pub season: String,
}

/// Draft header for a season
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Draft {
    pub draft_id: String,

    pub season: String,
}

/// One pick of a completed draft
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DraftPick {
    pub player_id: String,

    #[serde(default)]
    pub roster_id: Option<u64>,

    pub round: u8,

    pub pick_no: u32,
}

/// A raw league transaction (trade, waiver claim, or free-agent move)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransactionData {
    pub transaction_id: String,

    /// "complete" or "failed"
    pub status: String,

    /// Server timestamp of the last status change, in epoch milliseconds.
    /// Trades are created at proposal time, so raw order is not chronological.
    pub status_updated: i64,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub roster_ids: Vec<u64>,

    /// player_id -> receiving roster_id
    #[serde(default)]
    pub adds: Option<HashMap<String, u64>>,

    /// player_id -> dropping roster_id
    #[serde(default)]
    pub drops: Option<HashMap<String, u64>>,

    #[serde(default)]
    pub draft_picks: Vec<TradedPick>,

    #[serde(default)]
    pub waiver_budget: Vec<WaiverBudgetMove>,

    #[serde(default)]
    pub settings: Option<TransactionSettings>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TransactionSettings {
    #[serde(default)]
    pub waiver_bid: Option<u64>,
}

/// A draft pick changing hands inside a trade
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TradedPick {
    /// Season the pick will be used in
    pub season: String,

    pub round: u8,

    /// Roster the pick originally belonged to
    pub roster_id: u64,

    /// Roster giving the pick up in this trade
    pub previous_owner_id: u64,

    /// Roster receiving the pick
    pub owner_id: u64,
}

/// Waiver budget (FAAB) moving between rosters inside a trade
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WaiverBudgetMove {
    pub sender: u64,

    pub receiver: u64,

    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roster_settings_combine_decimal_hundredths() {
        let settings = RosterSettings {
            wins: 8,
            losses: 5,
            ties: 1,
            fpts: 1543,
            fpts_decimal: 72,
            fpts_against: 1490,
            fpts_against_decimal: 5,
            ppts: 1750,
            ppts_decimal: 30,
        };

        assert_eq!(settings.games_played(), 14);
        assert!((settings.points_for() - 1543.72).abs() < 1e-9);
        assert!((settings.points_against() - 1490.05).abs() < 1e-9);
        assert!((settings.potential_points() - 1750.30).abs() < 1e-9);
    }

    #[test]
    fn test_roster_settings_default_for_missing_fields() {
        let roster: Roster = serde_json::from_value(json!({
            "roster_id": 3,
            "owner_id": "user123"
        }))
        .unwrap();

        assert_eq!(roster.roster_id, 3);
        assert_eq!(roster.settings.games_played(), 0);
        assert_eq!(roster.settings.points_for(), 0.0);
    }

    #[test]
    fn test_league_data_deserializes_sleeper_shape() {
        let league: LeagueData = serde_json::from_value(json!({
            "league_id": "849999999999999999",
            "name": "The League",
            "season": "2022",
            "status": "complete",
            "previous_league_id": "730000000000000000",
            "settings": {
                "playoff_week_start": 15,
                "playoff_teams": 6,
                "playoff_round_type": 0
            }
        }))
        .unwrap();

        assert!(league.status.is_complete());
        assert_eq!(league.settings.playoff_teams, 6);
        assert_eq!(league.previous_league_id.as_deref(), Some("730000000000000000"));
    }

    #[test]
    fn test_unrecognized_status_maps_to_unknown() {
        let status: SeasonStatus = serde_json::from_value(json!("some_new_phase")).unwrap();
        assert_eq!(status, SeasonStatus::Unknown);
        assert!(!status.is_complete());
    }

    #[test]
    fn test_transaction_deserializes_with_sparse_fields() {
        let tx: TransactionData = serde_json::from_value(json!({
            "transaction_id": "abc",
            "status": "complete",
            "status_updated": 1_668_000_000_000i64,
            "type": "waiver",
            "roster_ids": [4],
            "adds": {"6794": 4},
            "settings": {"waiver_bid": 17}
        }))
        .unwrap();

        assert_eq!(tx.kind, "waiver");
        assert_eq!(tx.adds.as_ref().unwrap().get("6794"), Some(&4));
        assert!(tx.drops.is_none());
        assert!(tx.draft_picks.is_empty());
        assert_eq!(tx.settings.unwrap().waiver_bid, Some(17));
    }
}
