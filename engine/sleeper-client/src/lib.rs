//! # Sleeper API Client
//!
//! Thin typed client for the Sleeper fantasy-football API, plus the season
//! chain walker the record engines are built on.
//!
//! ## Architecture
//!
//! - **SleeperClient**: async HTTP wrapper returning parsed domain objects
//! - **SeasonWalker**: walks the backward-linked chain of league seasons,
//!   fetching the metadata for each season concurrently before yielding it
//!
//! The client carries no retry or caching policy. Any fetch or decode failure
//! surfaces as a `SleeperError` and aborts the caller's computation.

pub mod chain;
pub mod client;
pub mod error;
pub mod models;

pub use chain::{SeasonLink, SeasonWalker};
pub use client::SleeperClient;
pub use error::{Result, SleeperError};
pub use models::{
    Draft, DraftPick, LeagueData, LeagueUser, Matchup, NflState, Roster, RosterSettings,
    SeasonStatus, TradedPick, TransactionData, WaiverBudgetMove,
};
