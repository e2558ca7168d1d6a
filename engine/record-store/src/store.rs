//! Cached record slots
//!
//! Each store holds one bundle under a fixed name with three tiers: the
//! in-memory slot (fresh), a persisted JSON snapshot on disk (served as
//! stale), and the compute path. A non-refresh lookup prefers memory, then
//! the snapshot, then computes; a refresh lookup skips the snapshot tier.
//! Computed values are written through to both tiers.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::future::Future;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Marker the store flips on snapshot-served values
pub trait Stale {
    fn mark_stale(&mut self);
}

/// Snapshot envelope; the write time distinguishes snapshot ages in logs
#[derive(Serialize, Deserialize)]
struct Snapshot<T> {
    written_at: DateTime<Utc>,
    value: T,
}

pub struct RecordStore<T> {
    name: &'static str,
    dir: PathBuf,
    memory: RwLock<Option<T>>,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Stale,
{
    pub fn open(dir: impl Into<PathBuf>, name: &'static str) -> Self {
        Self { name, dir: dir.into(), memory: RwLock::new(None) }
    }

    fn snapshot_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.name))
    }

    /// Serve the slot: memory first, then (unless refreshing) the disk
    /// snapshot marked stale, else run `compute` and write through.
    pub async fn load_or_compute<Fut>(&self, refresh: bool, compute: Fut) -> anyhow::Result<T>
    where
        Fut: Future<Output = anyhow::Result<T>>,
    {
        if let Some(value) = self.memory.read().await.as_ref() {
            debug!("Serving '{}' from memory", self.name);
            return Ok(value.clone());
        }

        if !refresh {
            if let Some(mut value) = self.read_snapshot()? {
                value.mark_stale();
                return Ok(value);
            }
        }

        let value = compute.await?;
        self.write_snapshot(&value)?;
        *self.memory.write().await = Some(value.clone());
        Ok(value)
    }

    fn read_snapshot(&self) -> Result<Option<T>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path).map_err(|e| StoreError::read(&path, e))?;
        let snapshot: Snapshot<T> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::malformed(self.name, e))?;

        info!(
            "Serving '{}' from snapshot written at {}",
            self.name, snapshot.written_at
        );
        Ok(Some(snapshot.value))
    }

    fn write_snapshot(&self, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::write(&self.dir, e))?;

        let path = self.snapshot_path();
        let file = File::create(&path).map_err(|e| StoreError::write(&path, e))?;
        let mut writer = BufWriter::new(file);

        let snapshot = SnapshotRef { written_at: Utc::now(), value };
        serde_json::to_writer(&mut writer, &snapshot)
            .map_err(|e| StoreError::encode(self.name, e))?;
        writer.flush().map_err(|e| StoreError::write(&path, e))?;

        debug!("Wrote snapshot '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Path of the persisted snapshot file, for diagnostics
    pub fn path(&self) -> PathBuf {
        self.snapshot_path()
    }
}

// Borrows the value so writing does not clone the whole bundle
#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    written_at: DateTime<Utc>,
    value: &'a T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Bundle {
        total: u32,
        stale: bool,
    }

    impl Stale for Bundle {
        fn mark_stale(&mut self) {
            self.stale = true;
        }
    }

    fn fresh(total: u32) -> Bundle {
        Bundle { total, stale: false }
    }

    #[tokio::test]
    async fn test_miss_computes_and_serves_fresh() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");

        let value = store.load_or_compute(false, async { Ok(fresh(7)) }).await.unwrap();
        assert_eq!(value, fresh(7));
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_memory_hit_skips_compute() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");

        store.load_or_compute(false, async { Ok(fresh(7)) }).await.unwrap();
        let value = store
            .load_or_compute(false, async { panic!("compute must not run") })
            .await
            .unwrap();
        assert_eq!(value, fresh(7));
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_adds_only_stale() {
        let dir = tempdir().unwrap();
        {
            let store: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");
            store.load_or_compute(false, async { Ok(fresh(7)) }).await.unwrap();
        }

        // A new store with an empty memory serves the snapshot as stale
        let store: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");
        let value = store
            .load_or_compute(false, async { panic!("compute must not run") })
            .await
            .unwrap();
        assert_eq!(value, Bundle { total: 7, stale: true });
    }

    #[tokio::test]
    async fn test_refresh_bypasses_snapshot() {
        let dir = tempdir().unwrap();
        {
            let store: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");
            store.load_or_compute(false, async { Ok(fresh(7)) }).await.unwrap();
        }

        let store: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");
        let value = store.load_or_compute(true, async { Ok(fresh(9)) }).await.unwrap();
        assert_eq!(value, fresh(9));

        // The refreshed value replaced the snapshot on disk
        let reopened: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");
        let value = reopened
            .load_or_compute(false, async { panic!("compute must not run") })
            .await
            .unwrap();
        assert_eq!(value, Bundle { total: 9, stale: true });
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_an_error() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");
        std::fs::write(store.path(), "{not json").unwrap();

        let err = store
            .load_or_compute(false, async { Ok(fresh(1)) })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[tokio::test]
    async fn test_compute_failure_propagates() {
        let dir = tempdir().unwrap();
        let store: RecordStore<Bundle> = RecordStore::open(dir.path(), "records");

        let err = store
            .load_or_compute(true, async { anyhow::bail!("upstream down") })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("upstream down"));
        assert!(!store.path().exists());
    }
}
