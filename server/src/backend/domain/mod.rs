//! # Domain Module
//!
//! Business logic for the prayer tracker, independent of the HTTP layer and
//! of whichever storage backend was selected at startup.
//!
//! - **models**: the prayer entry entity, duration units and normalization
//! - **prayer_service**: validation and CRUD over the selected store
//! - **stats**: pure statistics aggregation toward the 1000 hour goal
//! - **sync_service**: fallback-to-preferred migration and backup snapshots
//! - **commands**: plain input types the services consume

pub mod commands;
pub mod models;
pub mod prayer_service;
pub mod stats;
pub mod sync_service;

pub use prayer_service::PrayerService;
pub use sync_service::SyncService;
