//! Transactions engine entry point
//!
//! Walks the season chain once to learn the league ids and each season's
//! manager identities, fans out one transactions fetch per (league, week)
//! pair, then digests and totals the combined feed.

use crate::digest::{digest_transaction, ChainSnapshot};
use crate::error::Result;
use crate::totals::accumulate_totals;
use crate::types::TransactionsBundle;
use anyhow::Context;
use futures::future::try_join_all;
use league_settings::{LeagueConfig, LeagueManagers};
use sleeper_client::{SeasonWalker, SleeperClient};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::info;

const MAX_TRANSACTION_WEEK: u16 = 18;

/// Computes the complete transactions bundle for a league
pub struct TransactionsEngine {
    client: SleeperClient,
    league_id: String,
    managers: LeagueManagers,
}

/// One (league, week) transactions fetch per entry, every season getting the
/// same week range
pub fn fetch_plan(league_ids: &[String], week: u16) -> Vec<(String, u16)> {
    let week = week.clamp(1, MAX_TRANSACTION_WEEK);
    league_ids
        .iter()
        .flat_map(|id| (1..=week).map(move |w| (id.clone(), w)))
        .collect()
}

impl TransactionsEngine {
    pub fn new(client: SleeperClient, config: &LeagueConfig) -> Self {
        Self {
            client,
            league_id: config.league_id.clone(),
            managers: LeagueManagers::from_config(config),
        }
    }

    /// Fetch, digest, and total every transaction in the league's history
    pub async fn compute(&self) -> anyhow::Result<TransactionsBundle> {
        let state = self.client.nfl_state().await.context("Failed to fetch NFL state")?;
        let week = if state.season_type == "regular" {
            state.week
        } else {
            MAX_TRANSACTION_WEEK
        };

        let snapshot = self
            .build_chain_snapshot()
            .await
            .context("Failed to walk season chain")?;

        let plan = fetch_plan(&snapshot.league_ids, week);
        info!(
            "Fetching transactions for {} seasons, {} week batches",
            snapshot.league_ids.len(),
            plan.len()
        );

        let batches = try_join_all(
            plan.iter().map(|(league_id, week)| self.client.transactions(league_id, *week)),
        )
        .await
        .context("Failed to fetch transactions")?;

        let mut raw: Vec<_> = batches.into_iter().flatten().collect();
        // Trades are recorded at proposal time; completion order is what
        // readers expect
        raw.sort_by_key(|tx| Reverse(tx.status_updated));

        let mut digested = Vec::new();
        for tx in &raw {
            if let Some(entry) = digest_transaction(tx, &snapshot, &self.managers)? {
                digested.push(entry);
            }
        }

        let totals = accumulate_totals(&digested, &snapshot, &self.managers)?;
        let transactions = digested.into_iter().map(|(tx, _)| tx).collect();

        Ok(TransactionsBundle {
            transactions,
            totals,
            current_managers: snapshot.current_managers,
            stale: false,
        })
    }

    /// Walk the whole chain, capturing league ids and per-season manager
    /// display info
    async fn build_chain_snapshot(&self) -> Result<ChainSnapshot> {
        let mut walker = SeasonWalker::new(&self.client, self.league_id.clone());
        let mut snapshot = ChainSnapshot::default();

        while let Some(link) = walker.advance().await? {
            snapshot.league_ids.push(link.league_id.clone());

            let mut season_managers = HashMap::new();
            for roster in &link.rosters {
                let identity = self.managers.resolve(roster.roster_id, link.year)?;
                let display = self.managers.display(identity, roster, &link.users);
                season_managers.insert(identity.manager_id, display);
            }

            if snapshot.current_managers.is_empty() {
                snapshot.current_managers = season_managers.clone();
                snapshot.current_season = link.year;
            }
            snapshot.prev_managers.insert(link.year, season_managers);
        }

        Ok(snapshot)
    }
}
