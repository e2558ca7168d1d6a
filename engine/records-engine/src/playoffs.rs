//! Playoff reduction
//!
//! Playoff weeks reuse the regular-season week reducer, but only the matchup
//! slots the bracket shape marks relevant count; byes and consolation games
//! are fetched with the rest of the week and discarded here. Results land in
//! playoff-specific accumulators so they never mix with regular-season
//! records.

use crate::bracket::BracketShape;
use crate::draft::DraftLookup;
use crate::error::Result;
use crate::season::{reduce_week, SeasonContext};
use crate::types::{MatchupDifferential, PlayerWeekEntry, PlayoffSeasonStat, WeekScore};
use sleeper_client::Matchup;
use std::collections::BTreeMap;

/// One season's playoff bracket fully reduced
#[derive(Debug, Clone, Default)]
pub struct PlayoffReduction {
    pub year: u16,
    pub scores: Vec<WeekScore>,
    pub differentials: Vec<MatchupDifferential>,
    pub players: Vec<PlayerWeekEntry>,
    /// Per-manager playoff line; only managers with at least one bracket game
    pub roster_stats: Vec<PlayoffSeasonStat>,
}

/// Reduce the playoff weeks of one season.
///
/// `weekly` holds the fetched playoff weeks in order; the offset of each week
/// from `playoff_week_start` selects the bracket round's relevant slots.
pub fn reduce_playoffs(
    ctx: &SeasonContext,
    shape: &BracketShape,
    playoff_week_start: u16,
    weekly: &[(u16, Vec<Matchup>)],
    draft: &DraftLookup,
) -> Result<PlayoffReduction> {
    let mut scores = Vec::new();
    let mut differentials = Vec::new();
    let mut players = Vec::new();

    for (week, matchups) in weekly {
        let offset = week.saturating_sub(playoff_week_start);
        let slots = match shape.relevant_slots(offset) {
            Some(slots) => slots,
            None => continue,
        };

        let relevant: Vec<Matchup> = matchups
            .iter()
            .filter(|m| m.matchup_id.map(|id| slots.contains(&id)).unwrap_or(false))
            .cloned()
            .collect();

        let reduction = reduce_week(ctx, *week, &relevant, draft)?;
        scores.extend(reduction.scores);
        differentials.extend(reduction.differentials);
        players.extend(reduction.players);
    }

    let roster_stats = accumulate_playoff_stats(ctx.year, &differentials);

    Ok(PlayoffReduction { year: ctx.year, scores, differentials, players, roster_stats })
}

/// Fold bracket-game results into per-manager playoff lines
fn accumulate_playoff_stats(
    year: u16,
    differentials: &[MatchupDifferential],
) -> Vec<PlayoffSeasonStat> {
    let mut stats: BTreeMap<u64, PlayoffSeasonStat> = BTreeMap::new();

    for diff in differentials {
        let tie = diff.differential == 0.0;

        let winner = line(&mut stats, year, &diff.winner);
        if tie {
            winner.ties += 1;
        } else {
            winner.wins += 1;
        }
        winner.fpts_for += diff.winner.fpts;
        winner.fpts_against += diff.loser.fpts;
        winner.games += 1;

        let loser = line(&mut stats, year, &diff.loser);
        if tie {
            loser.ties += 1;
        } else {
            loser.losses += 1;
        }
        loser.fpts_for += diff.loser.fpts;
        loser.fpts_against += diff.winner.fpts;
        loser.games += 1;
    }

    stats.into_values().collect()
}

fn line<'a>(
    stats: &'a mut BTreeMap<u64, PlayoffSeasonStat>,
    year: u16,
    side: &crate::types::SideScore,
) -> &'a mut PlayoffSeasonStat {
    stats.entry(side.manager_id).or_insert_with(|| PlayoffSeasonStat {
        wins: 0,
        losses: 0,
        ties: 0,
        fpts_for: 0.0,
        fpts_against: 0.0,
        games: 0,
        year,
        manager_id: side.manager_id,
        manager: side.manager.clone(),
    })
}
