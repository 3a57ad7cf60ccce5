//! # Storage Traits
//!
//! Defines the storage abstraction that lets the domain layer work against
//! either concrete backend (the hosted Postgres store or the local JSON
//! file) without modification, plus the error contract both share.

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::domain::models::prayer::{NewPrayerEntry, PrayerEntry, PrayerPatch};

/// Errors surfaced by the storage layer.
///
/// The variants keep "medium unreachable" apart from "invalid input": a
/// caller may fall back or alert on the former but must not retry the
/// latter unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Preferred backend not configured. Expected at startup; triggers
    /// fallback selection and is never a user-facing failure.
    #[error("preferred backend not configured: {0}")]
    ConfigurationMissing(String),

    /// Preferred backend configured but not responding.
    #[error("backend unreachable: {0}")]
    BackendUnreachable(String),

    /// Operation the active backend cannot perform (the file store has no
    /// stable identifier scheme for update/delete).
    #[error("{0} is not supported by the fallback file store")]
    UnsupportedOperation(&'static str),

    /// Update/delete target absent in the preferred backend.
    #[error("no prayer entry found with id {0}")]
    NotFound(i64),

    /// Rejected before any I/O was attempted.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Fallback file medium failure.
    #[error("file store error: {0}")]
    Io(#[from] std::io::Error),

    /// Fallback file exists but cannot be parsed. Distinct from "no data";
    /// a malformed document must never read back as an empty list.
    #[error("malformed data file: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Preferred backend medium failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Interface both prayer stores implement.
///
/// `add` never silently drops data: the persisted entry (with whatever
/// identifier the medium assigned) or a failure is always returned.
/// `get_all` returns an empty list only when the medium genuinely holds no
/// data, never to mask an error.
#[async_trait]
pub trait PrayerStore: Send + Sync {
    /// Persist a new entry and return it as stored.
    async fn add(&self, entry: &NewPrayerEntry) -> StoreResult<PrayerEntry>;

    /// Retrieve every entry this medium holds.
    async fn get_all(&self) -> StoreResult<Vec<PrayerEntry>>;

    /// Apply a field-wise update to the entry with the given id.
    async fn update(&self, id: i64, patch: &PrayerPatch) -> StoreResult<PrayerEntry>;

    /// Remove the entry with the given id.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}
