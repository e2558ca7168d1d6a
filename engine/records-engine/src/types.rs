//! Record types produced by the season reducers and the all-time folder
//!
//! Everything here serializes into the persisted records blob, so the shapes
//! double as the cache format.

use league_settings::ManagerDisplay;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One side of a head-to-head matchup result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SideScore {
    pub manager_id: u64,
    pub manager: ManagerDisplay,
    pub fpts: f64,
}

/// A head-to-head matchup reduced to winner, loser, and margin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchupDifferential {
    pub year: u16,
    pub week: u16,
    pub winner: SideScore,
    pub loser: SideScore,
    pub differential: f64,
}

/// One manager's scoring line for one week, with EPE counts
///
/// EPE ("expected performance evaluation") compares the week's score against
/// every other score posted league-wide that week, not just the actual
/// opponent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekScore {
    pub manager_id: u64,
    pub manager: ManagerDisplay,
    pub fpts: f64,
    pub week: u16,
    pub year: u16,
    pub roster_id: u64,
    pub epe_wins: u32,
    pub epe_ties: u32,
    pub epe_losses: u32,
    /// Highest score league-wide that week
    pub week_winner: bool,
    /// Lowest score league-wide that week
    pub week_loser: bool,
}

/// Reference to a single week's score, used for best/worst-week records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekRef {
    pub fpts: f64,
    pub week: u16,
    pub year: u16,
    pub manager_id: u64,
    pub manager: ManagerDisplay,
}

/// A season-long points total for one manager
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonTotal {
    pub fpts: f64,
    pub fptspg: f64,
    pub year: u16,
    pub manager_id: u64,
    pub manager: ManagerDisplay,
}

/// Cumulative EPE record for one manager (one season, or all-time)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpeRecord {
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    /// (wins + ties/2) / (wins + ties + losses) * 100
    pub percentage: f64,
    pub week_winners: u32,
    pub week_losers: u32,
    pub manager_id: u64,
    pub manager: ManagerDisplay,
    pub year: u16,
}

/// One manager's full reduction of a single season's weeks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagerWeekSummary {
    pub manager_id: u64,
    pub manager: ManagerDisplay,
    pub year: u16,
    pub best_week: WeekRef,
    pub worst_week: WeekRef,
    pub total_fpts: f64,
    pub fptspg: f64,
    pub epe_wins: u32,
    pub epe_ties: u32,
    pub epe_losses: u32,
    pub epe_percentage: f64,
    pub week_winners: u32,
    pub week_losers: u32,
}

/// How a player ended up on a roster
///
/// Only draft acquisition is resolvable from draft results; waiver and trade
/// paths are a known gap and stay `Unknown`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Acquisition {
    Draft,
    Unknown,
}

/// A single roster-player's score in a single week for a single manager
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerWeekEntry {
    pub manager_id: u64,
    pub manager: ManagerDisplay,
    pub week: u16,
    pub year: u16,
    pub roster_id: u64,
    pub player_id: String,
    pub points: f64,
    pub benched: bool,
    /// Highest-scoring starter on the roster that week
    pub top_starter: bool,
    /// 1-based rank among the roster's starters by points; 0 when benched
    pub starter_rank: u32,
    pub acquired: Acquisition,
}

/// A player's season-long production while started for one manager
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSeasonTotal {
    pub manager_id: u64,
    pub manager: ManagerDisplay,
    pub year: u16,
    pub player_id: String,
    pub points: f64,
    pub weeks: u32,
}

/// One roster's standings line for one season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonRosterStat {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub fpts_for: f64,
    pub fpts_against: f64,
    pub potential_points: f64,
    pub fptspg: f64,
    pub year: u16,
    pub manager_id: u64,
    pub manager: ManagerDisplay,
}

/// All-time roster record for one manager, with the per-year breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub fpts_for: f64,
    pub fpts_against: f64,
    pub potential_points: f64,
    pub fptspg: f64,
    pub manager_id: u64,
    pub manager: ManagerDisplay,
    pub years: Vec<SeasonRosterStat>,
}

/// One manager's playoff line for one season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayoffSeasonStat {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub fpts_for: f64,
    pub fpts_against: f64,
    pub games: u32,
    pub year: u16,
    pub manager_id: u64,
    pub manager: ManagerDisplay,
}

/// All-time playoff record for one manager
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayoffRosterRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub fpts_for: f64,
    pub fpts_against: f64,
    pub games: u32,
    pub manager_id: u64,
    pub manager: ManagerDisplay,
    pub years: Vec<PlayoffSeasonStat>,
}

/// Per-season leaderboards, one entry of `season_week_records`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonRecords {
    pub year: u16,
    pub biggest_blowouts: Vec<MatchupDifferential>,
    pub closest_matchups: Vec<MatchupDifferential>,
    pub week_bests: Vec<WeekRef>,
    pub week_worsts: Vec<WeekRef>,
    pub season_bests: Vec<SeasonTotal>,
    pub season_worsts: Vec<SeasonTotal>,
    pub season_epe_records: Vec<EpeRecord>,
    pub season_points_records: Vec<WeekScore>,
    pub season_points_lows: Vec<WeekScore>,
    pub player_week_records: Vec<PlayerWeekEntry>,
    pub player_season_records: Vec<PlayerSeasonTotal>,
    pub manager_best_player_weeks: Vec<PlayerWeekEntry>,
    pub manager_best_player_seasons: Vec<PlayerSeasonTotal>,
}

/// The complete records result, written verbatim to the persisted cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordsBundle {
    pub all_time_biggest_blowouts: Vec<MatchupDifferential>,
    pub all_time_closest_matchups: Vec<MatchupDifferential>,
    pub all_time_week_bests: Vec<WeekRef>,
    pub all_time_week_worsts: Vec<WeekRef>,
    pub all_time_season_bests: Vec<SeasonTotal>,
    pub all_time_season_worsts: Vec<SeasonTotal>,
    pub all_time_epe_records: Vec<EpeRecord>,
    pub most_season_long_points: Vec<SeasonTotal>,
    pub least_season_long_points: Vec<SeasonTotal>,
    pub league_week_records: Vec<WeekScore>,
    pub league_week_lows: Vec<WeekScore>,
    pub all_time_player_week_records: Vec<PlayerWeekEntry>,
    pub all_time_player_season_records: Vec<PlayerSeasonTotal>,
    /// Each manager's highest-scoring player week left on the bench
    pub all_time_benched_bests: Vec<PlayerWeekEntry>,
    pub individual_week_records: HashMap<u64, Vec<ManagerWeekSummary>>,
    pub season_week_records: Vec<SeasonRecords>,
    pub league_roster_records: HashMap<u64, RosterRecord>,
    pub playoff_biggest_blowouts: Vec<MatchupDifferential>,
    pub playoff_closest_matchups: Vec<MatchupDifferential>,
    pub playoff_week_records: Vec<WeekScore>,
    pub playoff_week_lows: Vec<WeekScore>,
    pub playoff_player_week_records: Vec<PlayerWeekEntry>,
    pub playoff_roster_records: HashMap<u64, PlayoffRosterRecord>,
    pub current_managers: HashMap<u64, ManagerDisplay>,
    pub current_year: Option<u16>,
    pub last_year: Option<u16>,
    /// Set when the bundle was served from the persisted cache
    #[serde(default)]
    pub stale: bool,
}

impl record_store::Stale for RecordsBundle {
    fn mark_stale(&mut self) {
        self.stale = true;
    }
}
