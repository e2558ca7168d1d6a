//! Transaction digestion
//!
//! Turns one raw Sleeper transaction into the positional move rows of
//! [`DigestedTransaction`]. An add with a simultaneous drop of the same
//! player is one trade leg (the player left one roster for another); an
//! unpaired add is a waiver claim or pickup, an unpaired drop a release.
//! Failed waiver claims are discarded.
//!
//! Seasons are derived from the completion timestamp, so a trade processed in
//! January belongs to a calendar year the league has no season for; such
//! transactions fall back to the season the chain was walked from.

use crate::error::{Result, TransactionsError};
use crate::types::{DigestedTransaction, MoveAction, MoveSlot, PickProvenance, TransactionKind};
use chrono::{DateTime, Datelike, Utc};
use league_settings::{LeagueManagers, ManagerDisplay};
use sleeper_client::models::TransactionData;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Everything the digester needs to know about the walked season chain
#[derive(Debug, Clone, Default)]
pub struct ChainSnapshot {
    /// League ids, most recent season first
    pub league_ids: Vec<String>,

    /// Per-season manager display info, keyed by year then manager id
    pub prev_managers: HashMap<u16, HashMap<u64, ManagerDisplay>>,

    /// The most recent season's display info
    pub current_managers: HashMap<u64, ManagerDisplay>,

    pub current_season: u16,
}

impl ChainSnapshot {
    /// Map a calendar-derived season onto one the chain actually has.
    /// January trades land in the next calendar year; charge those to the
    /// season in progress.
    pub fn effective_season(&self, season: u16) -> u16 {
        if self.prev_managers.contains_key(&season) {
            season
        } else {
            self.current_season
        }
    }

    pub fn display(&self, season: u16, manager_id: u64) -> Option<&ManagerDisplay> {
        self.prev_managers.get(&season).and_then(|m| m.get(&manager_id))
    }
}

/// Decode an epoch-millisecond completion timestamp
pub fn format_timestamp(transaction_id: &str, millis: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| TransactionsError::invalid_timestamp(transaction_id, millis))
}

fn slot_index(rosters: &[u64], roster: u64, transaction_id: &str) -> Result<usize> {
    rosters
        .iter()
        .position(|r| *r == roster)
        .ok_or_else(|| TransactionsError::roster_not_in_transaction(roster, transaction_id))
}

/// Digest one raw transaction.
///
/// Returns `None` for failed transactions. On success the digested
/// transaction is paired with the effective season it belongs to.
pub fn digest_transaction(
    tx: &TransactionData,
    snapshot: &ChainSnapshot,
    managers: &LeagueManagers,
) -> Result<Option<(DigestedTransaction, u16)>> {
    if tx.status == "failed" {
        return Ok(None);
    }

    let completed = format_timestamp(&tx.transaction_id, tx.status_updated)?;
    let season = snapshot.effective_season(completed.year() as u16);

    let kind = if tx.kind == "trade" { TransactionKind::Trade } else { TransactionKind::Waiver };
    let bid = tx.settings.as_ref().and_then(|s| s.waiver_bid);
    let rosters = tx.roster_ids.clone();

    let mut moves = Vec::new();
    let mut handled: HashSet<&str> = HashSet::new();

    // BTreeMap iteration keeps move rows deterministic
    let adds: BTreeMap<&String, u64> =
        tx.adds.iter().flatten().map(|(p, r)| (p, *r)).collect();
    let drops: BTreeMap<&String, u64> =
        tx.drops.iter().flatten().map(|(p, r)| (p, *r)).collect();

    for (player, to_roster) in &adds {
        handled.insert(player.as_str());

        let mut row = vec![MoveSlot::None; rosters.len()];
        match drops.get(player) {
            // The same player added here and dropped there is one trade leg
            Some(from_roster) => {
                row[slot_index(&rosters, *from_roster, &tx.transaction_id)?] =
                    MoveSlot::Action(MoveAction::TradedPlayer { player: player.to_string() });
                row[slot_index(&rosters, *to_roster, &tx.transaction_id)?] =
                    MoveSlot::Destination;
            }
            None => {
                row[slot_index(&rosters, *to_roster, &tx.transaction_id)?] =
                    MoveSlot::Action(MoveAction::Added { player: player.to_string(), bid });
            }
        }
        moves.push(row);
    }

    for (player, from_roster) in &drops {
        if handled.contains(player.as_str()) {
            continue;
        }
        let mut row = vec![MoveSlot::None; rosters.len()];
        row[slot_index(&rosters, *from_roster, &tx.transaction_id)?] =
            MoveSlot::Action(MoveAction::Dropped { player: player.to_string() });
        moves.push(row);
    }

    for pick in &tx.draft_picks {
        let mut row = vec![MoveSlot::None; rosters.len()];

        // A pick that already changed hands once carries its origin
        let original_owner = if pick.roster_id != pick.previous_owner_id {
            let original_name = if season != snapshot.current_season {
                let identity = managers.resolve(pick.roster_id, season)?;
                snapshot.display(season, identity.manager_id).map(|d| d.name.clone())
            } else {
                None
            };
            Some(PickProvenance { original_name, original_roster: pick.roster_id })
        } else {
            None
        };

        row[slot_index(&rosters, pick.previous_owner_id, &tx.transaction_id)?] =
            MoveSlot::Action(MoveAction::TradedPick {
                season: pick.season.clone(),
                round: pick.round,
                original_owner,
            });
        row[slot_index(&rosters, pick.owner_id, &tx.transaction_id)?] = MoveSlot::Destination;
        moves.push(row);
    }

    for budget in &tx.waiver_budget {
        let mut row = vec![MoveSlot::None; rosters.len()];
        row[slot_index(&rosters, budget.sender, &tx.transaction_id)?] =
            MoveSlot::Action(MoveAction::TradedBudget { amount: budget.amount });
        row[slot_index(&rosters, budget.receiver, &tx.transaction_id)?] = MoveSlot::Destination;
        moves.push(row);
    }

    let previous_owners = if season != snapshot.current_season {
        let mut owners = Vec::with_capacity(rosters.len());
        for roster in &rosters {
            let identity = managers.resolve(*roster, season)?;
            let display = snapshot
                .display(season, identity.manager_id)
                .cloned()
                .unwrap_or_else(|| ManagerDisplay::unknown(&identity.name));
            owners.push(display);
        }
        Some(owners)
    } else {
        None
    };

    let digested = DigestedTransaction {
        id: tx.transaction_id.clone(),
        date: completed.format("%b %-d %Y, %-I:%M%p").to_string(),
        kind,
        rosters,
        moves,
        previous_owners,
    };

    Ok(Some((digested, season)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_settings::{LeagueConfig, ManagerConfig, ManagerStatus};
    use sleeper_client::models::{TradedPick, TransactionSettings, WaiverBudgetMove};

    // Nov 3 2023, 9:41:00 UTC
    const NOV_2023: i64 = 1_699_004_460_000;
    // Jan 10 2024, 12:00:00 UTC
    const JAN_2024: i64 = 1_704_888_000_000;

    fn managers() -> LeagueManagers {
        let config = LeagueConfig {
            league_id: "league".to_string(),
            managers: vec![
                ManagerConfig {
                    manager_id: 10,
                    roster: 1,
                    name: "Alice".to_string(),
                    status: ManagerStatus::Active,
                    years_active: vec![2022, 2023],
                },
                ManagerConfig {
                    manager_id: 20,
                    roster: 2,
                    name: "Bob".to_string(),
                    status: ManagerStatus::Active,
                    years_active: vec![2022, 2023],
                },
                ManagerConfig {
                    manager_id: 30,
                    roster: 3,
                    name: "Carol".to_string(),
                    status: ManagerStatus::Active,
                    years_active: vec![2022, 2023],
                },
            ],
        };
        LeagueManagers::from_config(&config)
    }

    fn display(name: &str) -> ManagerDisplay {
        ManagerDisplay {
            avatar: "avatar".to_string(),
            name: name.to_string(),
            real_name: name.to_string(),
        }
    }

    fn snapshot() -> ChainSnapshot {
        let season_managers: HashMap<u64, ManagerDisplay> = [
            (10, display("Team Alice")),
            (20, display("Team Bob")),
            (30, display("Team Carol")),
        ]
        .into_iter()
        .collect();

        ChainSnapshot {
            league_ids: vec!["2023".to_string(), "2022".to_string()],
            prev_managers: [
                (2023u16, season_managers.clone()),
                (2022u16, season_managers.clone()),
            ]
            .into_iter()
            .collect(),
            current_managers: season_managers,
            current_season: 2023,
        }
    }

    fn base_transaction(kind: &str) -> TransactionData {
        TransactionData {
            transaction_id: "tx1".to_string(),
            status: "complete".to_string(),
            status_updated: NOV_2023,
            kind: kind.to_string(),
            roster_ids: vec![1, 2],
            adds: None,
            drops: None,
            draft_picks: Vec::new(),
            waiver_budget: Vec::new(),
            settings: None,
        }
    }

    #[test]
    fn test_failed_transactions_are_discarded() {
        let mut tx = base_transaction("waiver");
        tx.status = "failed".to_string();
        let digested = digest_transaction(&tx, &snapshot(), &managers()).unwrap();
        assert!(digested.is_none());
    }

    #[test]
    fn test_single_leg_trade_has_source_and_destination() {
        let mut tx = base_transaction("trade");
        tx.adds = Some([("player_a".to_string(), 2u64)].into_iter().collect());
        tx.drops = Some([("player_a".to_string(), 1u64)].into_iter().collect());

        let (digested, season) =
            digest_transaction(&tx, &snapshot(), &managers()).unwrap().unwrap();

        assert_eq!(season, 2023);
        assert_eq!(digested.kind, TransactionKind::Trade);
        assert_eq!(digested.moves.len(), 1);
        assert_eq!(
            digested.moves[0],
            vec![
                MoveSlot::Action(MoveAction::TradedPlayer { player: "player_a".to_string() }),
                MoveSlot::Destination,
            ]
        );
        assert!(digested.previous_owners.is_none());
    }

    #[test]
    fn test_waiver_claim_carries_bid_and_unpaired_drop() {
        let mut tx = base_transaction("waiver");
        tx.roster_ids = vec![2];
        tx.adds = Some([("player_a".to_string(), 2u64)].into_iter().collect());
        tx.drops = Some([("player_b".to_string(), 2u64)].into_iter().collect());
        tx.settings = Some(TransactionSettings { waiver_bid: Some(17) });

        let (digested, _) =
            digest_transaction(&tx, &snapshot(), &managers()).unwrap().unwrap();

        assert_eq!(digested.kind, TransactionKind::Waiver);
        assert_eq!(digested.moves.len(), 2);
        assert_eq!(
            digested.moves[0],
            vec![MoveSlot::Action(MoveAction::Added {
                player: "player_a".to_string(),
                bid: Some(17),
            })]
        );
        assert_eq!(
            digested.moves[1],
            vec![MoveSlot::Action(MoveAction::Dropped { player: "player_b".to_string() })]
        );
    }

    #[test]
    fn test_rewired_pick_carries_provenance() {
        let mut tx = base_transaction("trade");
        tx.status_updated = JAN_2024;
        // Roster 2 sends Carol's original 2024 2nd to roster 1
        tx.draft_picks = vec![TradedPick {
            season: "2024".to_string(),
            round: 2,
            roster_id: 3,
            previous_owner_id: 2,
            owner_id: 1,
        }];

        let snapshot = snapshot();
        let (digested, season) =
            digest_transaction(&tx, &snapshot, &managers()).unwrap().unwrap();

        // January 2024 maps back onto the 2023 season
        assert_eq!(season, 2023);
        match &digested.moves[0][1] {
            MoveSlot::Action(MoveAction::TradedPick { season, round, original_owner }) => {
                assert_eq!(season, "2024");
                assert_eq!(*round, 2);
                let provenance = original_owner.as_ref().unwrap();
                assert_eq!(provenance.original_roster, 3);
                // Current-season trades omit the historical name
                assert!(provenance.original_name.is_none());
            }
            other => panic!("unexpected slot {:?}", other),
        }
        assert_eq!(digested.moves[0][0], MoveSlot::Destination);
    }

    #[test]
    fn test_prior_season_trade_has_previous_owners_and_pick_names() {
        let mut tx = base_transaction("trade");
        tx.status_updated = 1_667_471_460_000; // Nov 3 2022
        tx.draft_picks = vec![TradedPick {
            season: "2023".to_string(),
            round: 1,
            roster_id: 3,
            previous_owner_id: 1,
            owner_id: 2,
        }];

        let (digested, season) =
            digest_transaction(&tx, &snapshot(), &managers()).unwrap().unwrap();

        assert_eq!(season, 2022);
        let owners = digested.previous_owners.unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].name, "Team Alice");
        assert_eq!(owners[1].name, "Team Bob");

        match &digested.moves[0][0] {
            MoveSlot::Action(MoveAction::TradedPick { original_owner, .. }) => {
                let provenance = original_owner.as_ref().unwrap();
                assert_eq!(provenance.original_name.as_deref(), Some("Team Carol"));
            }
            other => panic!("unexpected slot {:?}", other),
        }
    }

    #[test]
    fn test_budget_moves_between_rosters() {
        let mut tx = base_transaction("trade");
        tx.waiver_budget = vec![WaiverBudgetMove { sender: 2, receiver: 1, amount: 25 }];

        let (digested, _) =
            digest_transaction(&tx, &snapshot(), &managers()).unwrap().unwrap();

        assert_eq!(
            digested.moves[0],
            vec![
                MoveSlot::Destination,
                MoveSlot::Action(MoveAction::TradedBudget { amount: 25 }),
            ]
        );
    }

    #[test]
    fn test_move_references_unlisted_roster_is_an_error() {
        let mut tx = base_transaction("trade");
        tx.adds = Some([("player_a".to_string(), 9u64)].into_iter().collect());

        let err = digest_transaction(&tx, &snapshot(), &managers()).unwrap_err();
        assert!(matches!(
            err,
            TransactionsError::RosterNotInTransaction { roster: 9, .. }
        ));
    }

    #[test]
    fn test_date_format() {
        let tx = base_transaction("waiver");
        let (digested, _) =
            digest_transaction(&tx, &snapshot(), &managers()).unwrap().unwrap();
        assert_eq!(digested.date, "Nov 3 2023, 9:41AM");
    }
}
