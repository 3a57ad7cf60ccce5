//! Synchronization and backup helper.
//!
//! Two administrative operations: a one-directional copy of fallback-file
//! entries into the preferred database (deduplicated by entry signature),
//! and a point-in-time snapshot of the active backend to a timestamped
//! file. Both are invoked out-of-band through the admin API, never as part
//! of request handling.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::models::prayer::{NewPrayerEntry, PrayerEntry};
use super::stats::{compute_stats, PrayerStats};
use crate::backend::storage::{PrayerStore, SelectedStore, StoreError, StoreResult};

/// Outcome of a fallback-to-preferred migration.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub migrated: u32,
    pub skipped: u32,
    pub failed: u32,
    pub failures: Vec<String>,
}

/// Outcome of a backup snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupReport {
    pub file_path: PathBuf,
    pub entry_count: usize,
}

/// On-disk shape of a backup snapshot.
#[derive(Serialize)]
struct BackupDocument {
    backup_timestamp: DateTime<Utc>,
    statistics: PrayerStats,
    prayers: Vec<PrayerEntry>,
}

#[derive(Clone)]
pub struct SyncService {
    store: Arc<SelectedStore>,
}

impl SyncService {
    pub fn new(store: Arc<SelectedStore>) -> Self {
        Self { store }
    }

    /// Copy every fallback entry whose signature is not already present in
    /// the preferred store into it.
    ///
    /// Fails as a whole (a structured error, not a crash) when the
    /// preferred backend is not the active one; partial per-entry failures
    /// are collected in the report instead of aborting the run.
    pub async fn sync_fallback_into_preferred(&self) -> StoreResult<SyncReport> {
        let preferred = self
            .store
            .preferred()
            .ok_or(StoreError::UnsupportedOperation("sync"))?;

        let fallback_entries = self.store.fallback().get_all().await?;
        let preferred_entries = preferred.get_all().await?;

        info!(
            "syncing {} fallback entries against {} preferred entries",
            fallback_entries.len(),
            preferred_entries.len()
        );

        let report = migrate_missing(&fallback_entries, &preferred_entries, preferred).await;
        info!(
            "sync finished: {} migrated, {} skipped, {} failed",
            report.migrated, report.skipped, report.failed
        );
        Ok(report)
    }

    /// Write a snapshot of the active backend (entries plus their current
    /// statistics) to a new timestamped file in the data directory.
    ///
    /// Read-only with respect to the live store.
    pub async fn create_backup_snapshot(&self) -> StoreResult<BackupReport> {
        let entries = self.store.get_all().await?;
        let now = Utc::now();

        let document = BackupDocument {
            backup_timestamp: now,
            statistics: compute_stats(&entries),
            prayers: entries,
        };

        let stamp = now.format("%Y%m%d_%H%M%S").to_string();
        let file_path = self.store.fallback().connection().backup_file_path(&stamp);
        fs::write(&file_path, serde_json::to_vec_pretty(&document)?)?;

        info!(
            "backup snapshot written to {} ({} entries)",
            file_path.display(),
            document.prayers.len()
        );
        Ok(BackupReport {
            file_path,
            entry_count: document.prayers.len(),
        })
    }
}

/// Add every source entry whose signature is absent from the existing set
/// to the target store. Signatures of freshly migrated entries join the set
/// so duplicates within the source batch are skipped too.
async fn migrate_missing(
    source: &[PrayerEntry],
    existing: &[PrayerEntry],
    target: &dyn PrayerStore,
) -> SyncReport {
    let mut seen: HashSet<String> = existing.iter().map(PrayerEntry::signature).collect();
    let mut report = SyncReport {
        migrated: 0,
        skipped: 0,
        failed: 0,
        failures: Vec::new(),
    };

    for entry in source {
        let signature = entry.signature();
        if seen.contains(&signature) {
            report.skipped += 1;
            continue;
        }

        let new_entry = NewPrayerEntry {
            name: entry.name.clone(),
            duration_minutes: entry.duration_minutes,
            unit: entry.unit,
            description: entry.description.clone(),
            recorded_at: entry.recorded_at,
        };

        match target.add(&new_entry).await {
            Ok(_) => {
                seen.insert(signature);
                report.migrated += 1;
            }
            Err(e) => {
                warn!("failed to migrate entry for '{}': {e}", entry.name);
                report.failed += 1;
                report.failures.push(format!("{}: {e}", entry.name));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::prayer::{DurationUnit, EntrySource};
    use crate::backend::storage::json::{JsonConnection, JsonPrayerRepository};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn entry(name: &str, minutes: i64, second: u32) -> PrayerEntry {
        PrayerEntry {
            id: None,
            name: name.to_string(),
            duration_minutes: minutes,
            unit: DurationUnit::Minutes,
            description: String::new(),
            recorded_at: Utc.with_ymd_and_hms(2025, 3, 10, 8, 30, second).unwrap(),
            created_at: None,
            source: EntrySource::Fallback,
        }
    }

    fn json_store(temp_dir: &TempDir) -> JsonPrayerRepository {
        JsonPrayerRepository::new(JsonConnection::new(temp_dir.path()).unwrap())
    }

    async fn fallback_only_service(temp_dir: &TempDir) -> SyncService {
        let store = Arc::new(SelectedStore::select(None, json_store(temp_dir)).await);
        SyncService::new(store)
    }

    #[tokio::test]
    async fn test_sync_without_preferred_backend_is_a_structured_failure() {
        let temp_dir = TempDir::new().unwrap();
        let service = fallback_only_service(&temp_dir).await;

        let result = service.sync_fallback_into_preferred().await;
        assert!(matches!(
            result,
            Err(StoreError::UnsupportedOperation("sync"))
        ));
    }

    #[tokio::test]
    async fn test_migrate_skips_entries_already_present_by_signature() {
        let temp_dir = TempDir::new().unwrap();
        let target = json_store(&temp_dir);

        let source = vec![entry("A", 60, 0), entry("B", 30, 1)];
        // Same signature as the first source entry, produced by a different
        // backend with an id attached
        let existing = vec![PrayerEntry {
            id: Some(9),
            source: EntrySource::Preferred,
            ..entry("A", 60, 0)
        }];

        let report = migrate_missing(&source, &existing, &target).await;

        assert_eq!(report.migrated, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 0);

        let migrated = target.get_all().await.unwrap();
        assert_eq!(migrated.len(), 1);
        assert_eq!(migrated[0].name, "B");
    }

    #[tokio::test]
    async fn test_migrate_deduplicates_within_the_source_batch() {
        let temp_dir = TempDir::new().unwrap();
        let target = json_store(&temp_dir);

        let source = vec![entry("A", 60, 0), entry("A", 60, 0)];
        let report = migrate_missing(&source, &[], &target).await;

        assert_eq!(report.migrated, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(target.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_backup_snapshot_holds_entries_and_statistics() {
        let temp_dir = TempDir::new().unwrap();
        let fallback = json_store(&temp_dir);
        for e in [entry("A", 60, 0), entry("B", 30, 1)] {
            fallback
                .add(&NewPrayerEntry {
                    name: e.name.clone(),
                    duration_minutes: e.duration_minutes,
                    unit: e.unit,
                    description: e.description.clone(),
                    recorded_at: e.recorded_at,
                })
                .await
                .unwrap();
        }

        let store = Arc::new(SelectedStore::select(None, fallback).await);
        let service = SyncService::new(store.clone());

        let report = service.create_backup_snapshot().await.unwrap();
        assert_eq!(report.entry_count, 2);
        assert!(report
            .file_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("backup_prayers_"));

        let raw = fs::read_to_string(&report.file_path).unwrap();
        let document: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(document["backup_timestamp"].is_string());
        assert_eq!(document["statistics"]["total_entries"], 2);
        assert_eq!(document["statistics"]["total_minutes"], 90);
        assert_eq!(document["prayers"].as_array().unwrap().len(), 2);

        // The live store was only read, never mutated
        assert_eq!(store.get_all().await.unwrap().len(), 2);
    }
}
