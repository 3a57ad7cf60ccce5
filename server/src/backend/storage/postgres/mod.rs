//! Database-backed preferred store against the hosted Postgres backend.

pub mod db;
pub mod prayer_repository;

pub use db::PgConnection;
pub use prayer_repository::PgPrayerRepository;
