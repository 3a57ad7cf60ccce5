//! File-backed fallback store: a single JSON document of prayer entries.

pub mod connection;
pub mod prayer_repository;

pub use connection::JsonConnection;
pub use prayer_repository::JsonPrayerRepository;
