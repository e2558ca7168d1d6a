//! Per-manager transaction totals
//!
//! Every roster party to a transaction is charged one count of its kind, both
//! all-time and under the transaction's season. Counts are keyed by manager
//! id, so a roster slot handed between managers splits cleanly across its
//! owners' active years.

use crate::digest::ChainSnapshot;
use crate::error::Result;
use crate::types::{DigestedTransaction, TransactionCounts, TransactionTotals};
use league_settings::{LeagueManagers, ManagerDisplay};

pub fn accumulate_totals(
    digested: &[(DigestedTransaction, u16)],
    snapshot: &ChainSnapshot,
    managers: &LeagueManagers,
) -> Result<TransactionTotals> {
    let mut totals = TransactionTotals::default();

    for (transaction, season) in digested {
        for roster in &transaction.rosters {
            let identity = managers.resolve(*roster, *season)?;
            let display = snapshot
                .display(*season, identity.manager_id)
                .cloned()
                .unwrap_or_else(|| ManagerDisplay::unknown(&identity.name));

            totals
                .all_time
                .entry(identity.manager_id)
                .or_insert_with(|| TransactionCounts::new(identity.manager_id, display.clone()))
                .bump(transaction.kind);

            totals
                .seasons
                .entry(*season)
                .or_default()
                .entry(identity.manager_id)
                .or_insert_with(|| TransactionCounts::new(identity.manager_id, display))
                .bump(transaction.kind);
        }
    }

    Ok(totals)
}
