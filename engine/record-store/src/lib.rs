//! # Record Store
//!
//! Refresh-capable caching for computed record bundles. Each slot keeps a
//! fresh copy in memory and a JSON snapshot on disk; snapshot-served values
//! are marked stale so readers know a recompute may change them.

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{RecordStore, Stale};
