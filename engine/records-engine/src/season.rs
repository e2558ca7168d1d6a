//! Regular-season reduction
//!
//! Folds one season's weekly matchups into scored weeks, head-to-head
//! differentials, per-player attribution, per-manager summaries, and the
//! season leaderboards. All reductions are pure over already-fetched data so
//! each season can be tested independently.

use crate::draft::DraftLookup;
use crate::error::{RecordsError, Result};
use crate::rank::{sort_desc, top_n_asc, top_n_desc};
use crate::types::*;
use league_settings::{LeagueManagers, ManagerDisplay};
use sleeper_client::{Matchup, SeasonLink};
use std::collections::{BTreeMap, HashMap};

/// Resolved manager identities for one season
#[derive(Debug, Clone)]
pub struct SeasonContext {
    pub year: u16,
    /// Season results are final (or the regular season has fully played out)
    pub complete: bool,
    rosters: HashMap<u64, (u64, ManagerDisplay)>,
}

impl SeasonContext {
    pub fn new(year: u16, complete: bool, rosters: HashMap<u64, (u64, ManagerDisplay)>) -> Self {
        Self { year, complete, rosters }
    }

    /// Resolve every roster of a season link to its manager identity
    pub fn from_link(
        link: &SeasonLink,
        managers: &LeagueManagers,
        complete: bool,
    ) -> Result<Self> {
        let mut rosters = HashMap::new();
        for roster in &link.rosters {
            let identity = managers.resolve(roster.roster_id, link.year)?;
            let display = managers.display(identity, roster, &link.users);
            rosters.insert(roster.roster_id, (identity.manager_id, display));
        }
        Ok(Self { year: link.year, complete, rosters })
    }

    /// Manager display info keyed by manager ID
    pub fn displays(&self) -> HashMap<u64, ManagerDisplay> {
        self.rosters.values().cloned().collect()
    }

    fn manager_for(&self, roster_id: u64) -> Result<(u64, &ManagerDisplay)> {
        self.rosters
            .get(&roster_id)
            .map(|(id, display)| (*id, display))
            .ok_or(RecordsError::UnresolvedRoster { roster: roster_id, year: self.year })
    }
}

/// One week's reduction output
#[derive(Debug, Clone, Default)]
pub struct WeekReduction {
    pub scores: Vec<WeekScore>,
    pub differentials: Vec<MatchupDifferential>,
    pub players: Vec<PlayerWeekEntry>,
}

/// Reduce one week's matchup entries.
///
/// EPE counts compare each entry against every entry that week; the tie count
/// is decremented once to drop the self-comparison. The weekly high scorer is
/// the entry that beat everyone else; the low scorer beat no one (an entry is
/// never flagged both).
pub fn reduce_week(
    ctx: &SeasonContext,
    week: u16,
    matchups: &[Matchup],
    draft: &DraftLookup,
) -> Result<WeekReduction> {
    let mut scores = Vec::with_capacity(matchups.len());
    let mut players = Vec::new();
    let mut pairs: BTreeMap<u64, Vec<usize>> = BTreeMap::new();

    for matchup in matchups {
        let (manager_id, display) = ctx.manager_for(matchup.roster_id)?;

        let index = scores.len();
        scores.push(WeekScore {
            manager_id,
            manager: display.clone(),
            fpts: matchup.points,
            week,
            year: ctx.year,
            roster_id: matchup.roster_id,
            epe_wins: 0,
            epe_ties: 0,
            epe_losses: 0,
            week_winner: false,
            week_loser: false,
        });

        if let Some(matchup_id) = matchup.matchup_id {
            pairs.entry(matchup_id).or_default().push(index);
        }

        attribute_players(ctx, matchup, manager_id, display, week, draft, &mut players);
    }

    let entry_count = scores.len();
    let points: Vec<f64> = scores.iter().map(|s| s.fpts).collect();
    for (i, score) in scores.iter_mut().enumerate() {
        let mut wins = 0u32;
        let mut ties = 0u32;
        let mut losses = 0u32;
        for (j, other) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            if score.fpts > *other {
                wins += 1;
            } else if score.fpts == *other {
                ties += 1;
            } else {
                losses += 1;
            }
        }
        score.epe_wins = wins;
        score.epe_ties = ties;
        score.epe_losses = losses;

        if wins as usize == entry_count.saturating_sub(1) {
            score.week_winner = true;
        } else if wins == 0 {
            score.week_loser = true;
        }
    }

    let mut differentials = Vec::new();
    for (_, sides) in pairs {
        if sides.len() != 2 {
            continue;
        }
        let (mut winner, mut loser) = (&scores[sides[0]], &scores[sides[1]]);
        if winner.fpts < loser.fpts {
            std::mem::swap(&mut winner, &mut loser);
        }
        differentials.push(MatchupDifferential {
            year: ctx.year,
            week,
            winner: SideScore {
                manager_id: winner.manager_id,
                manager: winner.manager.clone(),
                fpts: winner.fpts,
            },
            loser: SideScore {
                manager_id: loser.manager_id,
                manager: loser.manager.clone(),
                fpts: loser.fpts,
            },
            differential: winner.fpts - loser.fpts,
        });
    }

    Ok(WeekReduction { scores, differentials, players })
}

/// Attribute every roster player's week to the owning manager
fn attribute_players(
    ctx: &SeasonContext,
    matchup: &Matchup,
    manager_id: u64,
    display: &ManagerDisplay,
    week: u16,
    draft: &DraftLookup,
    out: &mut Vec<PlayerWeekEntry>,
) {
    let mut ranked = matchup.starters_points.clone();
    sort_desc(&mut ranked, |p| *p);

    for player_id in &matchup.players {
        let points = matchup.players_points.get(player_id).copied().unwrap_or(0.0);
        let benched = !matchup.starters.contains(player_id);

        let (starter_rank, top_starter) = if benched {
            (0, false)
        } else {
            // First occurrence of the score wins the lower rank on ties
            let rank = ranked
                .iter()
                .position(|p| *p == points)
                .map(|i| i as u32 + 1)
                .unwrap_or(0);
            let top = ranked.first().map(|max| *max == points).unwrap_or(false);
            (rank, top)
        };

        let acquired = if draft.was_drafted(matchup.roster_id, player_id) {
            Acquisition::Draft
        } else {
            Acquisition::Unknown
        };

        out.push(PlayerWeekEntry {
            manager_id,
            manager: display.clone(),
            week,
            year: ctx.year,
            roster_id: matchup.roster_id,
            player_id: player_id.clone(),
            points,
            benched,
            top_starter,
            starter_rank,
            acquired,
        });
    }
}

/// One season fully reduced
#[derive(Debug, Clone)]
pub struct SeasonReduction {
    pub year: u16,
    pub complete: bool,
    pub scores: Vec<WeekScore>,
    pub differentials: Vec<MatchupDifferential>,
    pub players: Vec<PlayerWeekEntry>,
    pub summaries: Vec<ManagerWeekSummary>,
    pub player_season_totals: Vec<PlayerSeasonTotal>,
    pub records: SeasonRecords,
}

/// Reduce a whole season's weekly matchups into records and leaderboards
pub fn reduce_season(
    ctx: &SeasonContext,
    weekly: &[(u16, Vec<Matchup>)],
    draft: &DraftLookup,
) -> Result<SeasonReduction> {
    let mut scores = Vec::new();
    let mut differentials = Vec::new();
    let mut players = Vec::new();

    for (week, matchups) in weekly {
        let reduction = reduce_week(ctx, *week, matchups, draft)?;
        scores.extend(reduction.scores);
        differentials.extend(reduction.differentials);
        players.extend(reduction.players);
    }

    let summaries = summarize_managers(ctx, &scores);
    let player_season_totals = total_player_seasons(&players);
    let records =
        build_season_records(ctx, &scores, &differentials, &players, &summaries, &player_season_totals);

    Ok(SeasonReduction {
        year: ctx.year,
        complete: ctx.complete,
        scores,
        differentials,
        players,
        summaries,
        player_season_totals,
        records,
    })
}

/// Per-manager season summary: best/worst week, totals, EPE percentage
fn summarize_managers(ctx: &SeasonContext, scores: &[WeekScore]) -> Vec<ManagerWeekSummary> {
    let mut grouped: BTreeMap<u64, Vec<&WeekScore>> = BTreeMap::new();
    for score in scores {
        grouped.entry(score.manager_id).or_default().push(score);
    }

    let mut summaries = Vec::with_capacity(grouped.len());
    for (manager_id, entries) in grouped {
        let mut best = entries[0];
        let mut worst = entries[0];
        let mut total_fpts = 0.0;
        let mut epe_wins = 0u32;
        let mut epe_ties = 0u32;
        let mut epe_losses = 0u32;
        let mut week_winners = 0u32;
        let mut week_losers = 0u32;

        for &entry in &entries {
            if entry.fpts > best.fpts {
                best = entry;
            }
            if entry.fpts < worst.fpts {
                worst = entry;
            }
            total_fpts += entry.fpts;
            epe_wins += entry.epe_wins;
            epe_ties += entry.epe_ties;
            epe_losses += entry.epe_losses;
            week_winners += entry.week_winner as u32;
            week_losers += entry.week_loser as u32;
        }

        summaries.push(ManagerWeekSummary {
            manager_id,
            manager: entries[0].manager.clone(),
            year: ctx.year,
            best_week: week_ref(best),
            worst_week: week_ref(worst),
            total_fpts,
            fptspg: total_fpts / entries.len() as f64,
            epe_wins,
            epe_ties,
            epe_losses,
            epe_percentage: epe_percentage(epe_wins, epe_ties, epe_losses),
            week_winners,
            week_losers,
        });
    }

    summaries
}

pub(crate) fn epe_percentage(wins: u32, ties: u32, losses: u32) -> f64 {
    let games = (wins + ties + losses) as f64;
    if games == 0.0 {
        return 0.0;
    }
    (wins as f64 + ties as f64 / 2.0) / games * 100.0
}

fn week_ref(score: &WeekScore) -> WeekRef {
    WeekRef {
        fpts: score.fpts,
        week: score.week,
        year: score.year,
        manager_id: score.manager_id,
        manager: score.manager.clone(),
    }
}

/// Sum started player weeks into per-manager player season totals
fn total_player_seasons(players: &[PlayerWeekEntry]) -> Vec<PlayerSeasonTotal> {
    let mut totals: BTreeMap<(u64, String), PlayerSeasonTotal> = BTreeMap::new();
    for entry in players.iter().filter(|p| !p.benched) {
        let total = totals
            .entry((entry.manager_id, entry.player_id.clone()))
            .or_insert_with(|| PlayerSeasonTotal {
                manager_id: entry.manager_id,
                manager: entry.manager.clone(),
                year: entry.year,
                player_id: entry.player_id.clone(),
                points: 0.0,
                weeks: 0,
            });
        total.points += entry.points;
        total.weeks += 1;
    }
    totals.into_values().collect()
}

fn build_season_records(
    ctx: &SeasonContext,
    scores: &[WeekScore],
    differentials: &[MatchupDifferential],
    players: &[PlayerWeekEntry],
    summaries: &[ManagerWeekSummary],
    player_season_totals: &[PlayerSeasonTotal],
) -> SeasonRecords {
    let mut week_bests: Vec<WeekRef> = summaries.iter().map(|s| s.best_week.clone()).collect();
    let mut week_worsts: Vec<WeekRef> = summaries.iter().map(|s| s.worst_week.clone()).collect();
    sort_desc(&mut week_bests, |w| w.fpts);
    sort_desc(&mut week_worsts, |w| w.fpts);

    let season_totals: Vec<SeasonTotal> = summaries
        .iter()
        .map(|s| SeasonTotal {
            fpts: s.total_fpts,
            fptspg: s.fptspg,
            year: s.year,
            manager_id: s.manager_id,
            manager: s.manager.clone(),
        })
        .collect();
    let season_bests = top_n_desc(season_totals.clone(), season_totals.len(), |t| t.fpts);
    let season_worsts = top_n_asc(season_totals, usize::MAX, |t| t.fpts);

    let mut season_epe_records: Vec<EpeRecord> = summaries
        .iter()
        .map(|s| EpeRecord {
            wins: s.epe_wins,
            ties: s.epe_ties,
            losses: s.epe_losses,
            percentage: s.epe_percentage,
            week_winners: s.week_winners,
            week_losers: s.week_losers,
            manager_id: s.manager_id,
            manager: s.manager.clone(),
            year: s.year,
        })
        .collect();
    sort_desc(&mut season_epe_records, |e| e.percentage);

    let started: Vec<PlayerWeekEntry> =
        players.iter().filter(|p| !p.benched).cloned().collect();

    SeasonRecords {
        year: ctx.year,
        biggest_blowouts: top_n_desc(differentials.to_vec(), 10, |d| d.differential),
        closest_matchups: top_n_asc(differentials.to_vec(), 10, |d| d.differential),
        week_bests,
        week_worsts,
        season_bests,
        season_worsts,
        season_epe_records,
        season_points_records: top_n_desc(scores.to_vec(), 10, |s| s.fpts),
        season_points_lows: top_n_asc(scores.to_vec(), 10, |s| s.fpts),
        player_week_records: top_n_desc(started.clone(), 10, |p| p.points),
        player_season_records: top_n_desc(player_season_totals.to_vec(), 10, |p| p.points),
        manager_best_player_weeks: best_per_manager(&started, |p| p.manager_id, |p| p.points),
        manager_best_player_seasons: best_per_manager(
            player_season_totals,
            |p| p.manager_id,
            |p| p.points,
        ),
    }
}

/// Each manager's single best entry, sorted descending
pub(crate) fn best_per_manager<T: Clone>(
    items: &[T],
    group: impl Fn(&T) -> u64,
    key: impl Fn(&T) -> f64,
) -> Vec<T> {
    let mut best: BTreeMap<u64, &T> = BTreeMap::new();
    for item in items {
        match best.get_mut(&group(item)) {
            Some(existing) => {
                if key(item) > key(*existing) {
                    *existing = item;
                }
            }
            None => {
                best.insert(group(item), item);
            }
        }
    }
    let mut out: Vec<T> = best.into_values().cloned().collect();
    sort_desc(&mut out, key);
    out
}

/// Standings lines for every roster that played at least one game.
///
/// Zero-game seasons are skipped entirely rather than zero-filled.
pub fn roster_season_stats(
    link: &SeasonLink,
    managers: &LeagueManagers,
) -> Result<Vec<SeasonRosterStat>> {
    let mut stats = Vec::new();
    for roster in &link.rosters {
        let games = roster.settings.games_played();
        if games == 0 {
            continue;
        }

        let identity = managers.resolve(roster.roster_id, link.year)?;
        let display = managers.display(identity, roster, &link.users);
        let fpts_for = roster.settings.points_for();

        stats.push(SeasonRosterStat {
            wins: roster.settings.wins,
            losses: roster.settings.losses,
            ties: roster.settings.ties,
            fpts_for,
            fpts_against: roster.settings.points_against(),
            potential_points: roster.settings.potential_points(),
            fptspg: fpts_for / games as f64,
            year: link.year,
            manager_id: identity.manager_id,
            manager: display,
        });
    }
    Ok(stats)
}
