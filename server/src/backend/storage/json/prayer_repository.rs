use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

use super::connection::JsonConnection;
use crate::backend::domain::models::prayer::{
    DurationUnit, EntrySource, NewPrayerEntry, PrayerEntry, PrayerPatch,
};
use crate::backend::storage::{PrayerStore, StoreError, StoreResult};

/// On-disk shape of a single fallback entry.
///
/// `timestamp` duplicates `recorded_at` as epoch seconds; it is redundant
/// but retained so the document stays importable by the tooling that reads
/// the historical format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPrayer {
    name: String,
    duration_minutes: i64,
    unit: DurationUnit,
    recorded_at: DateTime<Utc>,
    timestamp: f64,
    #[serde(default)]
    description: String,
}

/// The whole fallback document: one list of entries in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrayerDocument {
    #[serde(default)]
    prayers: Vec<StoredPrayer>,
}

/// File-backed prayer repository.
///
/// All entries live in one JSON document; `add` reads the document, appends
/// and rewrites it in place. There is no partial-write protection and no
/// lock across the read-modify-write, so a crash mid-write can corrupt the
/// file and concurrent writers can lose updates. `update`/`delete` are not
/// supported because file entries carry no stable identifier.
#[derive(Clone)]
pub struct JsonPrayerRepository {
    connection: JsonConnection,
}

impl JsonPrayerRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &JsonConnection {
        &self.connection
    }

    /// Read the whole document. A missing file is an empty document; a file
    /// that exists but fails to parse is an error, never an empty list.
    fn read_document(&self) -> StoreResult<PrayerDocument> {
        let path = self.connection.data_file_path();

        if !path.exists() {
            return Ok(PrayerDocument::default());
        }

        let raw = fs::read_to_string(&path)?;
        let document = serde_json::from_str(&raw)?;
        Ok(document)
    }

    fn write_document(&self, document: &PrayerDocument) -> StoreResult<()> {
        let path = self.connection.data_file_path();
        let raw = serde_json::to_vec_pretty(document)?;
        fs::write(&path, raw)?;
        Ok(())
    }

    fn to_entry(stored: StoredPrayer) -> PrayerEntry {
        PrayerEntry {
            id: None,
            name: stored.name,
            duration_minutes: stored.duration_minutes,
            unit: stored.unit,
            description: stored.description,
            recorded_at: stored.recorded_at,
            created_at: None,
            source: EntrySource::Fallback,
        }
    }
}

#[async_trait]
impl PrayerStore for JsonPrayerRepository {
    async fn add(&self, entry: &NewPrayerEntry) -> StoreResult<PrayerEntry> {
        let mut document = self.read_document()?;

        let stored = StoredPrayer {
            name: entry.name.clone(),
            duration_minutes: entry.duration_minutes,
            unit: entry.unit,
            recorded_at: entry.recorded_at,
            timestamp: entry.recorded_at.timestamp_millis() as f64 / 1000.0,
            description: entry.description.clone(),
        };
        document.prayers.push(stored.clone());

        self.write_document(&document)?;

        info!(
            "stored prayer entry in file store: {} ({} min)",
            entry.name, entry.duration_minutes
        );
        Ok(Self::to_entry(stored))
    }

    async fn get_all(&self) -> StoreResult<Vec<PrayerEntry>> {
        let document = self.read_document()?;
        Ok(document.prayers.into_iter().map(Self::to_entry).collect())
    }

    async fn update(&self, _id: i64, _patch: &PrayerPatch) -> StoreResult<PrayerEntry> {
        Err(StoreError::UnsupportedOperation("update"))
    }

    async fn delete(&self, _id: i64) -> StoreResult<()> {
        Err(StoreError::UnsupportedOperation("delete"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn setup_test_repo() -> (JsonPrayerRepository, TempDir) {
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
    async fn test_add_then_get_all_round_trip() {
        let (repo, _guard) = setup_test_repo();

        let stored = repo.add(&sample_entry("Maria", 45)).await.unwrap();
        assert_eq!(stored.name, "Maria");
        assert_eq!(stored.duration_minutes, 45);
        assert!(stored.id.is_none());
        assert_eq!(stored.source, EntrySource::Fallback);

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Maria");
        assert_eq!(all[0].duration_minutes, 45);
    }

    #[tokio::test]
    async fn test_get_all_preserves_insertion_order() {
        let (repo, _guard) = setup_test_repo();

        for (name, minutes) in [("first", 10), ("second", 20), ("third", 30)] {
            repo.add(&sample_entry(name, minutes)).await.unwrap();
        }

        let all = repo.get_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_get_all_on_missing_file_is_empty_not_error() {
        let (repo, _guard) = setup_test_repo();

        let all = repo.get_all().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error_not_empty() {
        let (repo, _guard) = setup_test_repo();
        fs::write(repo.connection().data_file_path(), "{not json").unwrap();

        let result = repo.get_all().await;
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_are_unsupported() {
        let (repo, _guard) = setup_test_repo();
        repo.add(&sample_entry("Maria", 45)).await.unwrap();

        let update = repo.update(1, &PrayerPatch::default()).await;
        assert!(matches!(
            update,
            Err(StoreError::UnsupportedOperation("update"))
        ));

        let delete = repo.delete(1).await;
        assert!(matches!(
            delete,
            Err(StoreError::UnsupportedOperation("delete"))
        ));

        // No partial mutation happened
        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Maria");
    }

    #[tokio::test]
    async fn test_document_keeps_redundant_epoch_timestamp() {
        let (repo, _guard) = setup_test_repo();
        let entry = sample_entry("Maria", 45);
        repo.add(&entry).await.unwrap();

        let raw = fs::read_to_string(repo.connection().data_file_path()).unwrap();
        let document: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let stored = &document["prayers"][0];

        assert_eq!(stored["unit"], "minutes");
        assert_eq!(
            stored["timestamp"].as_f64().unwrap() as i64,
            entry.recorded_at.timestamp()
        );
    }
}
