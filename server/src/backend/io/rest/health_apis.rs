//! # Health Endpoint
//!
//! Reports which backend is serving requests, so an operator can tell at a
//! glance whether the process fell back to the local file store.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;

use crate::backend::AppState;
use shared::HealthResponse;

/// Report process health and the active backend
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        active_backend: state.prayer_service.active_backend().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    (StatusCode::OK, Json(response))
}
