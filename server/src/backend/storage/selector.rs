//! # Backend Selector
//!
//! Decides once per process lifetime whether the preferred Postgres backend
//! is usable and exposes a single store-shaped facade over whichever backend
//! won. The choice is cached for the life of the process; an operator
//! restarts to re-probe.

use async_trait::async_trait;
use tracing::{info, warn};

use super::json::JsonPrayerRepository;
use super::postgres::{PgConnection, PgPrayerRepository};
use super::{PrayerStore, StoreError, StoreResult};
use crate::backend::config::PreferredBackendConfig;
use crate::backend::domain::models::prayer::{
    EntrySource, NewPrayerEntry, PrayerEntry, PrayerPatch,
};

/// The selected store: either the preferred database plus the file store it
/// mirrors writes into, or the file store alone.
pub enum SelectedStore {
    Preferred {
        db: PgPrayerRepository,
        mirror: JsonPrayerRepository,
    },
    Fallback {
        file: JsonPrayerRepository,
    },
}

impl SelectedStore {
    /// Probe the preferred backend and settle on a store.
    ///
    /// With no configuration present the fallback is selected outright and
    /// no connection is ever attempted. Otherwise a client is constructed
    /// and a single-row read is issued under a short timeout; any failure
    /// is logged and demotes the process to the fallback file store.
    pub async fn select(
        config: Option<PreferredBackendConfig>,
        fallback: JsonPrayerRepository,
    ) -> Self {
        match Self::try_preferred(config.as_ref()).await {
            Ok(db) => {
                info!("preferred backend selected, mirroring writes into the fallback file");
                SelectedStore::Preferred {
                    db,
                    mirror: fallback,
                }
            }
            // Expected when the process runs without database settings;
            // not a fault worth a warning
            Err(StoreError::ConfigurationMissing(reason)) => {
                info!("{reason}, using fallback file store");
                SelectedStore::Fallback { file: fallback }
            }
            Err(e) => {
                warn!("preferred backend unavailable ({e}), using fallback file store");
                SelectedStore::Fallback { file: fallback }
            }
        }
    }

    /// Returns before any client is constructed when configuration is
    /// absent, so an unconfigured process never attempts a connection.
    async fn try_preferred(
        config: Option<&PreferredBackendConfig>,
    ) -> StoreResult<PgPrayerRepository> {
        let config = config.ok_or_else(|| {
            StoreError::ConfigurationMissing("preferred backend not configured".to_string())
        })?;
        let connection = PgConnection::connect(config).await?;
        connection.probe().await?;
        Ok(PgPrayerRepository::new(connection))
    }

    /// Which backend is serving requests.
    pub fn active_backend(&self) -> EntrySource {
        match self {
            SelectedStore::Preferred { .. } => EntrySource::Preferred,
            SelectedStore::Fallback { .. } => EntrySource::Fallback,
        }
    }

    /// The preferred repository, when it is the active backend.
    pub fn preferred(&self) -> Option<&PgPrayerRepository> {
        match self {
            SelectedStore::Preferred { db, .. } => Some(db),
            SelectedStore::Fallback { .. } => None,
        }
    }

    /// The fallback file repository, whichever role it currently plays
    /// (active store or write-through mirror).
    pub fn fallback(&self) -> &JsonPrayerRepository {
        match self {
            SelectedStore::Preferred { mirror, .. } => mirror,
            SelectedStore::Fallback { file } => file,
        }
    }
}

#[async_trait]
impl PrayerStore for SelectedStore {
    /// Route the write to the active backend. While the preferred backend
    /// is active the entry is also written into the fallback file so a
    /// current backup copy always exists; a mirror failure is logged but
    /// never fails the primary write.
    async fn add(&self, entry: &NewPrayerEntry) -> StoreResult<PrayerEntry> {
        match self {
            SelectedStore::Preferred { db, mirror } => {
                let stored = db.add(entry).await?;
                if let Err(e) = mirror.add(entry).await {
                    warn!("write-through mirror to fallback file failed: {e}");
                }
                Ok(stored)
            }
            SelectedStore::Fallback { file } => file.add(entry).await,
        }
    }

    async fn get_all(&self) -> StoreResult<Vec<PrayerEntry>> {
        match self {
            SelectedStore::Preferred { db, .. } => db.get_all().await,
            SelectedStore::Fallback { file } => file.get_all().await,
        }
    }

    async fn update(&self, id: i64, patch: &PrayerPatch) -> StoreResult<PrayerEntry> {
        match self {
            SelectedStore::Preferred { db, .. } => db.update(id, patch).await,
            SelectedStore::Fallback { file } => file.update(id, patch).await,
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        match self {
            SelectedStore::Preferred { db, .. } => db.delete(id).await,
            SelectedStore::Fallback { file } => file.delete(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::prayer::DurationUnit;
    use crate::backend::storage::json::JsonConnection;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn fallback_repo() -> (JsonPrayerRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (JsonPrayerRepository::new(connection), temp_dir)
    }

    fn sample_entry(name: &str, minutes: i64) -> NewPrayerEntry {
        NewPrayerEntry {
            name: name.to_string(),
            duration_minutes: minutes,
            unit: DurationUnit::Minutes,
            description: String::new(),
            recorded_at: Utc.with_ymd_and_hms(2025, 3, 10, 8, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_missing_configuration_selects_fallback_without_probe() {
        let (fallback, _guard) = fallback_repo();

        // No configuration: selection must short-circuit before any client
        // is constructed, so this resolves immediately even though no
        // database exists anywhere near this test.
        let store = SelectedStore::select(None, fallback).await;

        assert_eq!(store.active_backend(), EntrySource::Fallback);
        assert!(store.preferred().is_none());
    }

    #[tokio::test]
    async fn test_fallback_store_serves_reads_and_writes() {
        let (fallback, _guard) = fallback_repo();
        let store = SelectedStore::select(None, fallback).await;

        let stored = store.add(&sample_entry("Maria", 60)).await.unwrap();
        assert_eq!(stored.source, EntrySource::Fallback);

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Maria");
    }

    #[tokio::test]
    async fn test_fallback_store_rejects_addressed_mutations() {
        let (fallback, _guard) = fallback_repo();
        let store = SelectedStore::select(None, fallback).await;

        assert!(matches!(
            store.update(3, &PrayerPatch::default()).await,
            Err(StoreError::UnsupportedOperation("update"))
        ));
        assert!(matches!(
            store.delete(3).await,
            Err(StoreError::UnsupportedOperation("delete"))
        ));
    }
}
