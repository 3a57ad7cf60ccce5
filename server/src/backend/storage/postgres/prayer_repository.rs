use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;
use tracing::info;

use super::db::PgConnection;
use crate::backend::domain::models::prayer::{
    DurationUnit, EntrySource, NewPrayerEntry, PrayerEntry, PrayerPatch,
};
use crate::backend::storage::{PrayerStore, StoreError, StoreResult};

/// Postgres-backed prayer repository.
///
/// Rows carry a server-assigned id and creation timestamp, which makes the
/// addressed `update`/`delete` operations possible here and nowhere else.
#[derive(Clone)]
pub struct PgPrayerRepository {
    connection: PgConnection,
}

impl PgPrayerRepository {
    pub fn new(connection: PgConnection) -> Self {
        Self { connection }
    }

    fn from_row(row: &PgRow) -> PrayerEntry {
        let unit: String = row.get("unit");
        PrayerEntry {
            id: Some(row.get::<i64, _>("id")),
            name: row.get("name"),
            duration_minutes: row.get("time_minutes"),
            unit: DurationUnit::from_tag(&unit),
            description: row.get("description"),
            recorded_at: row.get::<DateTime<Utc>, _>("recorded_at"),
            created_at: Some(row.get::<DateTime<Utc>, _>("created_at")),
            source: EntrySource::Preferred,
        }
    }
}

#[async_trait]
impl PrayerStore for PgPrayerRepository {
    async fn add(&self, entry: &NewPrayerEntry) -> StoreResult<PrayerEntry> {
        let row = sqlx::query(
            r#"
            INSERT INTO prayers (name, time_minutes, unit, recorded_at, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, time_minutes, unit, recorded_at, description, created_at
            "#,
        )
        .bind(&entry.name)
        .bind(entry.duration_minutes)
        .bind(entry.unit.as_str())
        .bind(entry.recorded_at)
        .bind(&entry.description)
        .fetch_one(self.connection.pool())
        .await?;

        let stored = Self::from_row(&row);
        info!(
            "stored prayer entry in database: {} ({} min, id {:?})",
            stored.name, stored.duration_minutes, stored.id
        );
        Ok(stored)
    }

    async fn get_all(&self) -> StoreResult<Vec<PrayerEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, time_minutes, unit, recorded_at, description, created_at
            FROM prayers
            ORDER BY recorded_at DESC
            "#,
        )
        .fetch_all(self.connection.pool())
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    async fn update(&self, id: i64, patch: &PrayerPatch) -> StoreResult<PrayerEntry> {
        let row = sqlx::query(
            r#"
            UPDATE prayers
            SET name = COALESCE($2, name),
                time_minutes = COALESCE($3, time_minutes),
                unit = COALESCE($4, unit),
                description = COALESCE($5, description)
            WHERE id = $1
            RETURNING id, name, time_minutes, unit, recorded_at, description, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.duration_minutes)
        .bind(patch.unit.map(DurationUnit::as_str))
        .bind(patch.description.as_deref())
        .fetch_optional(self.connection.pool())
        .await?;

        match row {
            Some(row) => {
                info!("updated prayer entry {id}");
                Ok(Self::from_row(&row))
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM prayers WHERE id = $1")
            .bind(id)
            .execute(self.connection.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!("deleted prayer entry {id}");
        Ok(())
    }
}
