//! # Transactions Engine
//!
//! Chain-wide transaction history for a league: fetch every processed week
//! across every season, digest raw transactions into positional move rows,
//! and total trades and waivers per manager.
//!
//! ## Architecture
//!
//! - **ChainSnapshot / engine**: season-chain walk and the fetch fan-out
//! - **digest**: pure per-transaction digestion
//! - **totals**: per-manager counts, all-time and per season
//!
//! Digestion and totalling are pure over fetched data; only
//! `TransactionsEngine` touches the network.

pub mod digest;
pub mod engine;
pub mod error;
pub mod totals;
pub mod types;

pub use digest::{digest_transaction, ChainSnapshot};
pub use engine::{fetch_plan, TransactionsEngine};
pub use error::{Result, TransactionsError};
pub use totals::accumulate_totals;
pub use types::{
    preview, DigestedTransaction, MoveAction, MoveSlot, PickProvenance, TransactionCounts,
    TransactionKind, TransactionPreview, TransactionTotals, TransactionsBundle,
};
