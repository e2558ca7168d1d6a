//! Draft results lookup for player acquisition tagging

use crate::error::Result;
use futures::future::try_join_all;
use sleeper_client::SleeperClient;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Which players each roster drafted in one season
#[derive(Debug, Clone, Default)]
pub struct DraftLookup {
    by_roster: HashMap<u64, HashSet<String>>,
}

impl DraftLookup {
    /// An empty lookup; every player resolves as not drafted
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch the season's drafts and index picks by roster
    pub async fn fetch(client: &SleeperClient, league_id: &str) -> Result<Self> {
        let drafts = client.drafts(league_id).await?;

        let pick_batches =
            try_join_all(drafts.iter().map(|draft| client.draft_picks(&draft.draft_id))).await?;

        let mut by_roster: HashMap<u64, HashSet<String>> = HashMap::new();
        for pick in pick_batches.into_iter().flatten() {
            if let Some(roster_id) = pick.roster_id {
                by_roster.entry(roster_id).or_default().insert(pick.player_id);
            }
        }

        debug!("Indexed draft picks for {} rosters in league {}", by_roster.len(), league_id);

        Ok(Self { by_roster })
    }

    /// Whether the roster acquired the player through the draft
    pub fn was_drafted(&self, roster_id: u64, player_id: &str) -> bool {
        self.by_roster
            .get(&roster_id)
            .map(|players| players.contains(player_id))
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub fn with_picks(picks: &[(u64, &str)]) -> Self {
        let mut by_roster: HashMap<u64, HashSet<String>> = HashMap::new();
        for (roster_id, player_id) in picks {
            by_roster.entry(*roster_id).or_default().insert((*player_id).to_string());
        }
        Self { by_roster }
    }
}
