//! # Backend Module
//!
//! Everything behind the HTTP listener, layered the usual way:
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, statistics, sync)
//!     ↓
//! Storage Layer (backend selector, Postgres / JSON file stores)
//! ```
//!
//! `initialize_backend` wires the layers together exactly once at startup:
//! it builds the fallback file store, lets the selector probe the preferred
//! database, and hands the resolved store to the services. Nothing here is
//! a global; the state travels explicitly through the router.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::backend::config::Config;
use crate::backend::domain::{PrayerService, SyncService};
use crate::backend::storage::json::{JsonConnection, JsonPrayerRepository};
use crate::backend::storage::SelectedStore;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub prayer_service: PrayerService,
    pub sync_service: SyncService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: Config) -> Result<AppState> {
    info!("setting up fallback file store in {}", config.data_dir.display());
    let connection = JsonConnection::new(&config.data_dir)?;
    let fallback = JsonPrayerRepository::new(connection);

    info!("selecting storage backend");
    let store = Arc::new(SelectedStore::select(config.preferred, fallback).await);
    info!("active backend: {}", store.active_backend());

    info!("setting up application state");
    Ok(AppState {
        prayer_service: PrayerService::new(store.clone()),
        sync_service: SyncService::new(store),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // The public submission form is served from a different origin, so the
    // API accepts cross-origin requests from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/prayers", io::rest::prayer_apis::router())
        .nest("/admin", io::rest::admin_apis::router())
        .route("/health", get(io::rest::health_apis::health_check));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
