//! # Storage Module
//!
//! Data persistence for the prayer tracker. One trait (`PrayerStore`)
//! fronts two concrete media: the hosted Postgres database and a local
//! JSON document. The selector probes the database once at startup and
//! settles on whichever backend is actually usable, mirroring writes into
//! the file while the database is active.
//!
//! The domain layer only ever sees the trait and the selected facade; which
//! medium is underneath is a deployment detail.

pub mod json;
pub mod postgres;
pub mod selector;
pub mod traits;

pub use selector::SelectedStore;
pub use traits::{PrayerStore, StoreError, StoreResult};
