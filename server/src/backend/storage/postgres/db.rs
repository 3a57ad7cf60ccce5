use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::backend::config::PreferredBackendConfig;
use crate::backend::storage::{StoreError, StoreResult};

/// How long the startup probe may take before the preferred backend is
/// declared unreachable.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// PgConnection manages the pool against the hosted Postgres backend.
#[derive(Clone)]
pub struct PgConnection {
    pool: PgPool,
}

impl PgConnection {
    /// Connect with the configured URL and credential and bootstrap the
    /// schema. Connection failures come back as `BackendUnreachable` so the
    /// selector can fall back instead of aborting startup.
    pub async fn connect(config: &PreferredBackendConfig) -> StoreResult<Self> {
        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| StoreError::BackendUnreachable(format!("invalid connection URL: {e}")))?
            .password(&config.key);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(PROBE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::BackendUnreachable(e.to_string()))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Set up the required database schema.
    async fn setup_schema(pool: &PgPool) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prayers (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                time_minutes BIGINT NOT NULL,
                unit TEXT NOT NULL DEFAULT 'minutes',
                recorded_at TIMESTAMPTZ NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_prayers_recorded_at
            ON prayers(recorded_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Lightweight availability check: a single-row select under a short
    /// timeout. Run once at startup by the backend selector.
    pub async fn probe(&self) -> StoreResult<()> {
        let query = sqlx::query("SELECT id FROM prayers LIMIT 1").fetch_optional(&self.pool);

        match tokio::time::timeout(PROBE_TIMEOUT, query).await {
            Ok(Ok(_)) => {
                info!("preferred backend probe succeeded");
                Ok(())
            }
            Ok(Err(e)) => Err(StoreError::BackendUnreachable(e.to_string())),
            Err(_) => Err(StoreError::BackendUnreachable(format!(
                "probe timed out after {}s",
                PROBE_TIMEOUT.as_secs()
            ))),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
