//! # Records Engine
//!
//! Multi-season aggregation and ranking engine for league records.
//!
//! ## Architecture
//!
//! - **SeasonContext / season**: pure per-season reduction of weekly matchups
//!   into scores, differentials, player attribution, and leaderboards
//! - **bracket / playoffs**: declarative playoff bracket shapes and the
//!   playoff-week reduction built on them
//! - **AllTimeFolder**: folds every season's reduction into the all-time
//!   leaderboards after the chain walk completes
//! - **RecordsEngine**: orchestrates the chain walk and fetches
//!
//! Reductions are pure over already-fetched data, so each season can be
//! exercised in isolation; only `RecordsEngine` touches the network.

pub mod alltime;
pub mod bracket;
pub mod draft;
pub mod engine;
pub mod error;
pub mod playoffs;
pub mod rank;
pub mod season;
pub mod types;

pub use alltime::AllTimeFolder;
pub use bracket::{BracketError, BracketShape, RoundFormat};
pub use draft::DraftLookup;
pub use engine::RecordsEngine;
pub use error::{RecordsError, Result};
pub use playoffs::{reduce_playoffs, PlayoffReduction};
pub use season::{reduce_season, reduce_week, roster_season_stats, SeasonContext, SeasonReduction};
pub use types::RecordsBundle;
