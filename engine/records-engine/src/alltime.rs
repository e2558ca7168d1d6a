//! All-time folding
//!
//! Accumulates every season's reduction, then collapses the lot into the
//! all-time leaderboards once the chain has been fully walked. Seasons are
//! folded most-recent-first, matching the walk order.

use crate::playoffs::PlayoffReduction;
use crate::rank::{sort_asc, sort_desc, top_n_asc, top_n_desc};
use crate::season::{best_per_manager, epe_percentage, SeasonReduction};
use crate::types::*;
use league_settings::ManagerDisplay;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Accumulator for the all-time reduction
#[derive(Debug, Default)]
pub struct AllTimeFolder {
    differentials: Vec<MatchupDifferential>,
    week_scores: Vec<WeekScore>,
    summaries: BTreeMap<u64, Vec<(ManagerWeekSummary, bool)>>,
    season_points: Vec<(SeasonTotal, bool)>,
    roster_years: BTreeMap<u64, Vec<SeasonRosterStat>>,
    season_records: Vec<SeasonRecords>,
    started_players: Vec<PlayerWeekEntry>,
    benched_players: Vec<PlayerWeekEntry>,
    player_seasons: Vec<PlayerSeasonTotal>,
    playoff_differentials: Vec<MatchupDifferential>,
    playoff_scores: Vec<WeekScore>,
    playoff_players: Vec<PlayerWeekEntry>,
    playoff_years: BTreeMap<u64, Vec<PlayoffSeasonStat>>,
}

impl AllTimeFolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one season's standings lines (already filtered to played seasons)
    pub fn fold_roster_stats(&mut self, stats: Vec<SeasonRosterStat>, complete: bool) {
        for stat in stats {
            self.season_points.push((
                SeasonTotal {
                    fpts: stat.fpts_for,
                    fptspg: stat.fptspg,
                    year: stat.year,
                    manager_id: stat.manager_id,
                    manager: stat.manager.clone(),
                },
                complete,
            ));
            self.roster_years.entry(stat.manager_id).or_default().push(stat);
        }
    }

    /// Fold one season's regular-season reduction
    pub fn fold_season(&mut self, reduction: SeasonReduction) {
        // Seasons with no scored weeks contribute nothing
        if !reduction.records.season_points_records.is_empty() {
            self.season_records.push(reduction.records);
        }

        self.differentials.extend(reduction.differentials);
        self.week_scores.extend(reduction.scores);

        for summary in reduction.summaries {
            self.summaries
                .entry(summary.manager_id)
                .or_default()
                .push((summary, reduction.complete));
        }

        for player in reduction.players {
            if player.benched {
                self.benched_players.push(player);
            } else {
                self.started_players.push(player);
            }
        }
        self.player_seasons.extend(reduction.player_season_totals);
    }

    /// Fold one season's playoff reduction
    pub fn fold_playoffs(&mut self, reduction: PlayoffReduction) {
        self.playoff_differentials.extend(reduction.differentials);
        self.playoff_scores.extend(reduction.scores);
        self.playoff_players
            .extend(reduction.players.into_iter().filter(|p| !p.benched));

        for stat in reduction.roster_stats {
            if stat.games == 0 {
                continue;
            }
            self.playoff_years.entry(stat.manager_id).or_default().push(stat);
        }
    }

    /// Collapse the accumulated seasons into the final records bundle
    pub fn finish(
        self,
        current_managers: HashMap<u64, ManagerDisplay>,
        last_year: Option<u16>,
    ) -> RecordsBundle {
        let mut week_bests = Vec::new();
        let mut week_worsts = Vec::new();
        let mut season_bests = Vec::new();
        let mut season_worsts = Vec::new();
        let mut epe_records = Vec::new();
        let mut individual_week_records: HashMap<u64, Vec<ManagerWeekSummary>> = HashMap::new();

        for (manager_id, seasons) in &self.summaries {
            let mut best_week: Option<&WeekRef> = None;
            let mut worst_week: Option<&WeekRef> = None;
            let mut best_season: Option<&ManagerWeekSummary> = None;
            let mut worst_season: Option<&ManagerWeekSummary> = None;
            let mut wins = 0u32;
            let mut ties = 0u32;
            let mut losses = 0u32;
            let mut week_winners = 0u32;
            let mut week_losers = 0u32;
            let mut latest_year = 0u16;

            for (summary, complete) in seasons {
                if best_week.map(|b| summary.best_week.fpts > b.fpts).unwrap_or(true) {
                    best_week = Some(&summary.best_week);
                }
                if worst_week.map(|w| summary.worst_week.fpts < w.fpts).unwrap_or(true) {
                    worst_week = Some(&summary.worst_week);
                }
                if best_season.map(|b| summary.total_fpts > b.total_fpts).unwrap_or(true) {
                    best_season = Some(summary);
                }
                // In-progress seasons never qualify as a worst season
                if *complete
                    && worst_season
                        .map(|w| summary.total_fpts < w.total_fpts)
                        .unwrap_or(true)
                {
                    worst_season = Some(summary);
                }

                wins += summary.epe_wins;
                ties += summary.epe_ties;
                losses += summary.epe_losses;
                week_winners += summary.week_winners;
                week_losers += summary.week_losers;
                latest_year = latest_year.max(summary.year);
            }

            if let Some(week) = best_week {
                week_bests.push(week.clone());
            }
            if let Some(week) = worst_week {
                week_worsts.push(week.clone());
            }
            if let Some(summary) = best_season {
                season_bests.push(season_total(summary));
            }
            if let Some(summary) = worst_season {
                season_worsts.push(season_total(summary));
            }

            let reference = &seasons[0].0;
            epe_records.push(EpeRecord {
                wins,
                ties,
                losses,
                percentage: epe_percentage(wins, ties, losses),
                week_winners,
                week_losers,
                manager_id: *manager_id,
                manager: reference.manager.clone(),
                year: latest_year,
            });

            individual_week_records.insert(
                *manager_id,
                seasons.iter().map(|(summary, _)| summary.clone()).collect(),
            );
        }

        sort_desc(&mut week_bests, |w| w.fpts);
        sort_asc(&mut week_worsts, |w| w.fpts);
        sort_desc(&mut season_bests, |t| t.fpts);
        sort_asc(&mut season_worsts, |t| t.fpts);
        sort_desc(&mut epe_records, |e| e.percentage);

        let current_year = self.season_records.first().map(|r| r.year);

        let most_season_long_points = top_n_desc(
            self.season_points.iter().map(|(total, _)| total.clone()).collect(),
            10,
            |t| t.fpts,
        );
        let least_season_long_points = top_n_asc(
            self.season_points
                .iter()
                .filter(|(_, complete)| *complete)
                .map(|(total, _)| total.clone())
                .collect(),
            10,
            |t| t.fpts,
        );

        let league_roster_records = collapse_roster_years(self.roster_years);
        let playoff_roster_records = collapse_playoff_years(self.playoff_years);

        info!(
            "Folded {} seasons into all-time records ({} managers)",
            self.season_records.len(),
            individual_week_records.len()
        );

        RecordsBundle {
            all_time_biggest_blowouts: top_n_desc(self.differentials.clone(), 10, |d| {
                d.differential
            }),
            all_time_closest_matchups: top_n_asc(self.differentials, 10, |d| d.differential),
            all_time_week_bests: week_bests,
            all_time_week_worsts: week_worsts,
            all_time_season_bests: season_bests,
            all_time_season_worsts: season_worsts,
            all_time_epe_records: epe_records,
            most_season_long_points,
            least_season_long_points,
            league_week_records: top_n_desc(self.week_scores.clone(), 10, |s| s.fpts),
            league_week_lows: top_n_asc(self.week_scores, 10, |s| s.fpts),
            all_time_player_week_records: top_n_desc(
                self.started_players.clone(),
                10,
                |p| p.points,
            ),
            all_time_player_season_records: top_n_desc(self.player_seasons, 10, |p| p.points),
            all_time_benched_bests: best_per_manager(
                &self.benched_players,
                |p| p.manager_id,
                |p| p.points,
            ),
            individual_week_records,
            season_week_records: self.season_records,
            league_roster_records,
            playoff_biggest_blowouts: top_n_desc(self.playoff_differentials.clone(), 10, |d| {
                d.differential
            }),
            playoff_closest_matchups: top_n_asc(self.playoff_differentials, 10, |d| {
                d.differential
            }),
            playoff_week_records: top_n_desc(self.playoff_scores.clone(), 10, |s| s.fpts),
            playoff_week_lows: top_n_asc(self.playoff_scores, 10, |s| s.fpts),
            playoff_player_week_records: top_n_desc(self.playoff_players, 10, |p| p.points),
            playoff_roster_records,
            current_managers,
            current_year,
            last_year,
            stale: false,
        }
    }
}

fn season_total(summary: &ManagerWeekSummary) -> SeasonTotal {
    SeasonTotal {
        fpts: summary.total_fpts,
        fptspg: summary.fptspg,
        year: summary.year,
        manager_id: summary.manager_id,
        manager: summary.manager.clone(),
    }
}

fn collapse_roster_years(
    roster_years: BTreeMap<u64, Vec<SeasonRosterStat>>,
) -> HashMap<u64, RosterRecord> {
    let mut records = HashMap::new();
    for (manager_id, years) in roster_years {
        let manager = years[0].manager.clone();
        let mut record = RosterRecord {
            wins: 0,
            losses: 0,
            ties: 0,
            fpts_for: 0.0,
            fpts_against: 0.0,
            potential_points: 0.0,
            fptspg: 0.0,
            manager_id,
            manager,
            years,
        };
        for year in &record.years {
            record.wins += year.wins;
            record.losses += year.losses;
            record.ties += year.ties;
            record.fpts_for += year.fpts_for;
            record.fpts_against += year.fpts_against;
            record.potential_points += year.potential_points;
        }
        let games = record.wins + record.losses + record.ties;
        if games > 0 {
            record.fptspg = record.fpts_for / games as f64;
        }
        records.insert(manager_id, record);
    }
    records
}

fn collapse_playoff_years(
    playoff_years: BTreeMap<u64, Vec<PlayoffSeasonStat>>,
) -> HashMap<u64, PlayoffRosterRecord> {
    let mut records = HashMap::new();
    for (manager_id, years) in playoff_years {
        let manager = years[0].manager.clone();
        let mut record = PlayoffRosterRecord {
            wins: 0,
            losses: 0,
            ties: 0,
            fpts_for: 0.0,
            fpts_against: 0.0,
            games: 0,
            manager_id,
            manager,
            years,
        };
        for year in &record.years {
            record.wins += year.wins;
            record.losses += year.losses;
            record.ties += year.ties;
            record.fpts_for += year.fpts_for;
            record.fpts_against += year.fpts_against;
            record.games += year.games;
        }
        records.insert(manager_id, record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftLookup;
    use crate::season::{reduce_season, SeasonContext};
    use sleeper_client::Matchup;

    fn display(name: &str) -> ManagerDisplay {
        ManagerDisplay {
            avatar: "avatar".to_string(),
            name: name.to_string(),
            real_name: name.to_string(),
        }
    }

    fn context(year: u16, complete: bool) -> SeasonContext {
        let rosters = HashMap::from([
            (1u64, (10u64, display("A"))),
            (2u64, (20u64, display("B"))),
        ]);
        SeasonContext::new(year, complete, rosters)
    }

    fn matchup(roster_id: u64, points: f64) -> Matchup {
        Matchup {
            roster_id,
            matchup_id: Some(1),
            points,
            starters: Vec::new(),
            starters_points: Vec::new(),
            players: Vec::new(),
            players_points: HashMap::new(),
        }
    }

    fn season(year: u16, complete: bool, weeks: &[(f64, f64)]) -> SeasonReduction {
        let ctx = context(year, complete);
        let weekly: Vec<(u16, Vec<Matchup>)> = weeks
            .iter()
            .enumerate()
            .map(|(i, (a, b))| (i as u16 + 1, vec![matchup(1, *a), matchup(2, *b)]))
            .collect();
        reduce_season(&ctx, &weekly, &DraftLookup::empty()).unwrap()
    }

    #[test]
    fn test_best_week_ever_spans_seasons() {
        let mut folder = AllTimeFolder::new();
        // Folded most-recent-first, as the engine walks
        folder.fold_season(season(2022, false, &[(120.0, 100.0)]));
        folder.fold_season(season(2021, true, &[(150.0, 90.0), (80.0, 95.0)]));

        let bundle = folder.finish(HashMap::new(), Some(2021));

        let best_a = bundle
            .all_time_week_bests
            .iter()
            .find(|w| w.manager_id == 10)
            .unwrap();
        assert_eq!((best_a.year, best_a.week), (2021, 1));
        assert!((best_a.fpts - 150.0).abs() < 1e-9);

        // League-wide bests are sorted descending
        assert!((bundle.all_time_week_bests[0].fpts - 150.0).abs() < 1e-9);
        assert_eq!(bundle.current_year, Some(2022));
        assert_eq!(bundle.last_year, Some(2021));
    }

    #[test]
    fn test_worst_season_ever_excludes_in_progress() {
        let mut folder = AllTimeFolder::new();
        // Current season is worse for manager A, but still in progress
        folder.fold_season(season(2022, false, &[(60.0, 100.0)]));
        folder.fold_season(season(2021, true, &[(150.0, 90.0), (140.0, 95.0)]));

        let bundle = folder.finish(HashMap::new(), Some(2021));

        let worst_a = bundle
            .all_time_season_worsts
            .iter()
            .find(|t| t.manager_id == 10)
            .unwrap();
        assert_eq!(worst_a.year, 2021);
        assert!((worst_a.fpts - 290.0).abs() < 1e-9);

        // Best season may still come from the in-progress year for B
        let best_b = bundle
            .all_time_season_bests
            .iter()
            .find(|t| t.manager_id == 20)
            .unwrap();
        assert_eq!(best_b.year, 2021);
    }

    #[test]
    fn test_worst_lists_order_lowest_first() {
        let mut folder = AllTimeFolder::new();
        folder.fold_season(season(2022, true, &[(120.0, 100.0)]));
        folder.fold_season(season(2021, true, &[(90.0, 130.0), (95.0, 140.0)]));

        let bundle = folder.finish(HashMap::new(), Some(2021));

        // A's worst week (90 in 2021) leads B's (100 in 2022)
        assert_eq!(bundle.all_time_week_worsts[0].manager_id, 10);
        assert!((bundle.all_time_week_worsts[0].fpts - 90.0).abs() < 1e-9);
        assert!(bundle
            .all_time_week_worsts
            .windows(2)
            .all(|w| w[0].fpts <= w[1].fpts));

        // B's worst season (100 in 2022) leads A's (120 in 2022)
        assert_eq!(bundle.all_time_season_worsts[0].manager_id, 20);
        assert!((bundle.all_time_season_worsts[0].fpts - 100.0).abs() < 1e-9);
        assert!(bundle
            .all_time_season_worsts
            .windows(2)
            .all(|w| w[0].fpts <= w[1].fpts));
    }

    #[test]
    fn test_epe_records_accumulate_counts_not_averages() {
        let mut folder = AllTimeFolder::new();
        folder.fold_season(season(2022, true, &[(120.0, 100.0)]));
        folder.fold_season(season(2021, true, &[(90.0, 100.0), (110.0, 100.0)]));

        let bundle = folder.finish(HashMap::new(), Some(2021));

        let epe_a = bundle
            .all_time_epe_records
            .iter()
            .find(|e| e.manager_id == 10)
            .unwrap();
        assert_eq!((epe_a.wins, epe_a.ties, epe_a.losses), (2, 0, 1));
        assert!((epe_a.percentage - 2.0 / 3.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_roster_records_fold_only_played_years() {
        let mut folder = AllTimeFolder::new();
        folder.fold_roster_stats(
            vec![SeasonRosterStat {
                wins: 8,
                losses: 6,
                ties: 0,
                fpts_for: 1400.0,
                fpts_against: 1300.0,
                potential_points: 1600.0,
                fptspg: 100.0,
                year: 2022,
                manager_id: 10,
                manager: display("A"),
            }],
            true,
        );
        folder.fold_roster_stats(
            vec![SeasonRosterStat {
                wins: 6,
                losses: 8,
                ties: 0,
                fpts_for: 1200.0,
                fpts_against: 1350.0,
                potential_points: 1500.0,
                fptspg: 1200.0 / 14.0,
                year: 2021,
                manager_id: 10,
                manager: display("A"),
            }],
            true,
        );

        let bundle = folder.finish(HashMap::new(), Some(2021));

        let record = bundle.league_roster_records.get(&10).unwrap();
        assert_eq!((record.wins, record.losses), (14, 14));
        assert_eq!(record.years.len(), 2);
        assert!((record.fpts_for - 2600.0).abs() < 1e-9);
        assert!((record.fptspg - 2600.0 / 28.0).abs() < 1e-9);

        assert_eq!(bundle.most_season_long_points.len(), 2);
        assert!((bundle.most_season_long_points[0].fpts - 1400.0).abs() < 1e-9);
        assert!((bundle.least_season_long_points[0].fpts - 1200.0).abs() < 1e-9);
    }
}
