//! Digested transaction shapes
//!
//! A raw Sleeper transaction indexes players and picks by roster id. The
//! digested form re-expresses every asset movement as a row of slots parallel
//! to the transaction's roster list, so a two-team trade renders as columns
//! per team with the moving asset at the source column and a destination
//! marker at the receiving column.

use league_settings::ManagerDisplay;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Trade,
    Waiver,
}

/// Provenance of a traded draft pick that moved more than once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickProvenance {
    /// Display name of the pick's original manager, when the transaction
    /// happened in an earlier season and the name may have changed since
    pub original_name: Option<String>,

    /// Roster the pick originally belonged to
    pub original_roster: u64,
}

/// One asset changing hands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MoveAction {
    /// Waiver claim or free-agent pickup; `bid` carries the winning FAAB bid
    Added { player: String, bid: Option<u64> },

    Dropped { player: String },

    /// Player leaving this roster as one leg of a trade
    TradedPlayer { player: String },

    /// Draft pick leaving this roster as one leg of a trade
    TradedPick { season: String, round: u8, original_owner: Option<PickProvenance> },

    /// Waiver budget leaving this roster as one leg of a trade
    TradedBudget { amount: u64 },
}

/// One slot of a move row, positionally matched to the roster list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum MoveSlot {
    None,
    Action(MoveAction),
    /// The roster receiving the asset in this row
    Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestedTransaction {
    pub id: String,

    /// Formatted completion date, e.g. "Nov 3 2023, 9:41AM"
    pub date: String,

    pub kind: TransactionKind,

    /// Rosters party to the transaction; move rows index into this list
    pub rosters: Vec<u64>,

    /// One row per moving asset, each row one slot per roster
    pub moves: Vec<Vec<MoveSlot>>,

    /// Display info per roster as of the transaction's season, present only
    /// when that season is not the current one
    pub previous_owners: Option<Vec<ManagerDisplay>>,
}

/// Trade and waiver counts for one manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCounts {
    pub trades: u32,
    pub waivers: u32,
    pub manager: ManagerDisplay,
    pub manager_id: u64,
}

impl TransactionCounts {
    pub fn new(manager_id: u64, manager: ManagerDisplay) -> Self {
        Self { trades: 0, waivers: 0, manager, manager_id }
    }

    pub fn bump(&mut self, kind: TransactionKind) {
        match kind {
            TransactionKind::Trade => self.trades += 1,
            TransactionKind::Waiver => self.waivers += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionTotals {
    /// Counts per manager across every season
    pub all_time: HashMap<u64, TransactionCounts>,

    /// Counts per season per manager
    pub seasons: HashMap<u16, HashMap<u64, TransactionCounts>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsBundle {
    /// Every digested transaction, most recent first
    pub transactions: Vec<DigestedTransaction>,

    pub totals: TransactionTotals,

    pub current_managers: HashMap<u64, ManagerDisplay>,

    /// Set when the bundle was served from a persisted snapshot
    #[serde(default)]
    pub stale: bool,
}

impl record_store::Stale for TransactionsBundle {
    fn mark_stale(&mut self) {
        self.stale = true;
    }
}

/// The first `per_kind` trades and waivers, in feed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPreview {
    pub trades: Vec<DigestedTransaction>,
    pub waivers: Vec<DigestedTransaction>,
}

/// Pull a short preview off the front of an already-sorted transaction feed
pub fn preview(transactions: &[DigestedTransaction], per_kind: usize) -> TransactionPreview {
    let mut trades = Vec::new();
    let mut waivers = Vec::new();

    for transaction in transactions {
        if trades.len() >= per_kind && waivers.len() >= per_kind {
            break;
        }
        match transaction.kind {
            TransactionKind::Trade if trades.len() < per_kind => {
                trades.push(transaction.clone());
            }
            TransactionKind::Waiver if waivers.len() < per_kind => {
                waivers.push(transaction.clone());
            }
            _ => {}
        }
    }

    TransactionPreview { trades, waivers }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(id: &str, kind: TransactionKind) -> DigestedTransaction {
        DigestedTransaction {
            id: id.to_string(),
            date: "Nov 3 2023, 9:41AM".to_string(),
            kind,
            rosters: vec![1, 2],
            moves: Vec::new(),
            previous_owners: None,
        }
    }

    #[test]
    fn test_preview_takes_first_n_of_each_kind() {
        let feed = vec![
            transaction("t1", TransactionKind::Trade),
            transaction("w1", TransactionKind::Waiver),
            transaction("w2", TransactionKind::Waiver),
            transaction("t2", TransactionKind::Trade),
            transaction("w3", TransactionKind::Waiver),
            transaction("w4", TransactionKind::Waiver),
            transaction("t3", TransactionKind::Trade),
            transaction("t4", TransactionKind::Trade),
        ];

        let preview = preview(&feed, 3);
        let trade_ids: Vec<&str> = preview.trades.iter().map(|t| t.id.as_str()).collect();
        let waiver_ids: Vec<&str> = preview.waivers.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(trade_ids, vec!["t1", "t2", "t3"]);
        assert_eq!(waiver_ids, vec!["w1", "w2", "w3"]);
    }

    #[test]
    fn test_preview_with_sparse_feed_returns_fewer() {
        let feed = vec![transaction("w1", TransactionKind::Waiver)];
        let preview = preview(&feed, 3);
        assert!(preview.trades.is_empty());
        assert_eq!(preview.waivers.len(), 1);
    }
}
