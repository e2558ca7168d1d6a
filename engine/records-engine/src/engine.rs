//! Records engine entry point
//!
//! Walks the season chain once, reduces each season (regular weeks, then the
//! playoff bracket), and folds everything into the all-time bundle. Seasons
//! are sequential by necessity; the fetches inside one season are concurrent.

use crate::alltime::AllTimeFolder;
use crate::bracket::BracketShape;
use crate::draft::DraftLookup;
use crate::playoffs::reduce_playoffs;
use crate::season::{reduce_season, roster_season_stats, SeasonContext};
use crate::types::RecordsBundle;
use anyhow::{Context, Result};
use league_settings::{LeagueConfig, LeagueManagers};
use sleeper_client::{SeasonWalker, SleeperClient};
use tracing::{info, warn};

/// Computes the complete records bundle for a league
pub struct RecordsEngine {
    client: SleeperClient,
    league_id: String,
    managers: LeagueManagers,
}

impl RecordsEngine {
    pub fn new(client: SleeperClient, config: &LeagueConfig) -> Self {
        Self {
            client,
            league_id: config.league_id.clone(),
            managers: LeagueManagers::from_config(config),
        }
    }

    /// Walk the whole season chain and compute every record and leaderboard.
    ///
    /// Any fetch, decode, or resolution failure aborts the computation; there
    /// is no partial-result mode.
    pub async fn compute(&self) -> Result<RecordsBundle> {
        let state = self.client.nfl_state().await.context("Failed to fetch NFL state")?;

        // Last fully played week of the current NFL season
        let completed_week = match state.season_type.as_str() {
            "regular" => state.week.saturating_sub(1),
            "post" => 18,
            _ => 0,
        };

        let mut walker = SeasonWalker::new(&self.client, self.league_id.clone());
        let mut folder = AllTimeFolder::new();
        let mut current_managers = None;
        let mut last_year = None;

        while let Some(link) =
            walker.advance().await.context("Failed to walk season chain")?
        {
            let year = link.year;
            last_year = Some(year);

            let last_regular_week = link.playoff_week_start.saturating_sub(1);
            // The regular season is fully played once the status flips to
            // complete or the league has reached its playoff weeks.
            let complete = link.status.is_complete() || completed_week > last_regular_week;
            let regular_end = if complete {
                last_regular_week
            } else {
                completed_week.min(last_regular_week)
            };

            let ctx = SeasonContext::from_link(&link, &self.managers, complete)?;
            if current_managers.is_none() {
                current_managers = Some(ctx.displays());
            }

            folder.fold_roster_stats(roster_season_stats(&link, &self.managers)?, complete);

            let draft = DraftLookup::fetch(&self.client, &link.league_id)
                .await
                .with_context(|| format!("Failed to fetch draft results for {}", year))?;

            let weekly = if regular_end >= 1 {
                self.client
                    .matchups_for_weeks(&link.league_id, 1..=regular_end)
                    .await
                    .with_context(|| format!("Failed to fetch matchups for {}", year))?
            } else {
                Vec::new()
            };

            info!("Reducing season {} ({} regular weeks)", year, weekly.len());
            folder.fold_season(reduce_season(&ctx, &weekly, &draft)?);

            self.reduce_season_playoffs(&link, &ctx, &draft, completed_week, &mut folder)
                .await?;
        }

        Ok(folder.finish(current_managers.unwrap_or_default(), last_year))
    }

    async fn reduce_season_playoffs(
        &self,
        link: &sleeper_client::SeasonLink,
        ctx: &SeasonContext,
        draft: &DraftLookup,
        completed_week: u16,
        folder: &mut AllTimeFolder,
    ) -> Result<()> {
        if link.playoff_teams == 0 {
            warn!("Season {} has no playoff bracket configured", link.year);
            return Ok(());
        }

        let shape = BracketShape::resolve(link.playoff_teams, link.playoff_round_type, link.year)
            .with_context(|| format!("Unresolvable playoff bracket for {}", link.year))?;

        let playoff_end = link.playoff_week_start + shape.playoff_length() - 1;
        let playoff_last = if link.status.is_complete() {
            playoff_end
        } else {
            completed_week.min(playoff_end)
        };
        if playoff_last < link.playoff_week_start {
            return Ok(());
        }

        let weekly = self
            .client
            .matchups_for_weeks(&link.league_id, link.playoff_week_start..=playoff_last)
            .await
            .with_context(|| format!("Failed to fetch playoff matchups for {}", link.year))?;

        info!("Reducing {} playoff weeks for season {}", weekly.len(), link.year);
        folder.fold_playoffs(reduce_playoffs(
            ctx,
            &shape,
            link.playoff_week_start,
            &weekly,
            draft,
        )?);

        Ok(())
    }
}
