//! Prayer entry service: validation, unit normalization and delegation to
//! the selected store.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::commands::prayers::{AddPrayerCommand, UpdatePrayerCommand};
use super::models::prayer::{EntrySource, NewPrayerEntry, PrayerEntry, PrayerPatch};
use super::stats::{compute_stats, PrayerStats};
use crate::backend::storage::{PrayerStore, SelectedStore, StoreError, StoreResult};

#[derive(Clone)]
pub struct PrayerService {
    store: Arc<SelectedStore>,
}

impl PrayerService {
    pub fn new(store: Arc<SelectedStore>) -> Self {
        Self { store }
    }

    /// Validate, normalize and persist a new entry.
    ///
    /// Validation happens before any I/O: a rejected command never touches
    /// the store.
    pub async fn add_prayer(&self, command: AddPrayerCommand) -> StoreResult<PrayerEntry> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("name must not be empty".to_string()));
        }
        if command.duration < 0 {
            return Err(StoreError::Validation(
                "duration must not be negative".to_string(),
            ));
        }

        let unit = command.unit.unwrap_or_default();
        let duration_minutes = unit.to_minutes(command.duration).ok_or_else(|| {
            StoreError::Validation(format!("duration of {} {unit} is too large", command.duration))
        })?;

        let entry = NewPrayerEntry {
            name: name.to_string(),
            duration_minutes,
            unit,
            description: command.description.unwrap_or_default(),
            recorded_at: command.recorded_at.unwrap_or_else(Utc::now),
        };

        info!(
            "adding prayer entry: {} ({} min)",
            entry.name, entry.duration_minutes
        );
        self.store.add(&entry).await
    }

    /// Every entry held by the active backend.
    pub async fn list_prayers(&self) -> StoreResult<Vec<PrayerEntry>> {
        self.store.get_all().await
    }

    /// Statistics over whatever the active backend currently returns.
    pub async fn get_stats(&self) -> StoreResult<PrayerStats> {
        let entries = self.store.get_all().await?;
        Ok(compute_stats(&entries))
    }

    /// Update an existing entry; preferred backend only.
    pub async fn update_prayer(
        &self,
        id: i64,
        command: UpdatePrayerCommand,
    ) -> StoreResult<PrayerEntry> {
        if let Some(name) = &command.name {
            if name.trim().is_empty() {
                return Err(StoreError::Validation("name must not be empty".to_string()));
            }
        }
        if command.unit.is_some() && command.duration.is_none() {
            return Err(StoreError::Validation(
                "a unit without a duration is ambiguous; supply both".to_string(),
            ));
        }

        // The unit tag always follows the duration it describes: a plain
        // duration re-tags the entry as minutes
        let (duration_minutes, unit) = match command.duration {
            Some(duration) if duration < 0 => {
                return Err(StoreError::Validation(
                    "duration must not be negative".to_string(),
                ));
            }
            Some(duration) => {
                let unit = command.unit.unwrap_or_default();
                let minutes = unit.to_minutes(duration).ok_or_else(|| {
                    StoreError::Validation(format!("duration of {duration} {unit} is too large"))
                })?;
                (Some(minutes), Some(unit))
            }
            None => (None, None),
        };

        let patch = PrayerPatch {
            name: command.name.map(|n| n.trim().to_string()),
            duration_minutes,
            unit,
            description: command.description,
        };
        if patch.is_empty() {
            return Err(StoreError::Validation(
                "update carries no fields".to_string(),
            ));
        }

        info!("updating prayer entry {id}");
        self.store.update(id, &patch).await
    }

    /// Delete an existing entry; preferred backend only.
    pub async fn delete_prayer(&self, id: i64) -> StoreResult<()> {
        info!("deleting prayer entry {id}");
        self.store.delete(id).await
    }

    /// Which backend is serving requests.
    pub fn active_backend(&self) -> EntrySource {
        self.store.active_backend()
    }
}
