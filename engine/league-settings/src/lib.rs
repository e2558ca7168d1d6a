//! # League Settings
//!
//! Static league configuration: the league ID and the manager identities that
//! own each roster slot over time. Roster slots persist across seasons, but
//! ownership can change hands between years, so resolving "who held roster 3
//! in 2021" filters the configured identities by their active-year ranges.

pub mod config;
pub mod error;
pub mod managers;

pub use config::{LeagueConfig, ManagerConfig, ManagerStatus};
pub use error::{Result, SettingsError};
pub use managers::{LeagueManagers, ManagerDisplay};
