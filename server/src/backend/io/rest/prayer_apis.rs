//! # REST API for Prayer Entries
//!
//! Endpoints for recording, listing, updating and deleting prayer-time
//! entries, plus the aggregated statistics view.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use tracing::{error, info};

use super::mappers::prayer_mapper::PrayerMapper;
use super::error_response;
use crate::backend::domain::commands::prayers::{AddPrayerCommand, UpdatePrayerCommand};
use crate::backend::AppState;
use shared::{
    AddPrayerRequest, AddPrayerResponse, DeletePrayerResponse, PrayerListResponse,
    UpdatePrayerRequest, UpdatePrayerResponse,
};

/// Create a router for prayer entry APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_prayer).get(list_prayers))
        .route("/stats", get(get_prayer_stats))
        .route("/:id", put(update_prayer).delete(delete_prayer))
}

/// Record a new prayer entry
pub async fn add_prayer(
    State(state): State<AppState>,
    Json(request): Json<AddPrayerRequest>,
) -> impl IntoResponse {
    info!("POST /api/prayers - request: {:?}", request);

    let command = AddPrayerCommand {
        name: request.name,
        duration: request.duration,
        unit: request.unit.map(PrayerMapper::unit_to_domain),
        description: request.description,
        recorded_at: None,
    };

    match state.prayer_service.add_prayer(command).await {
        Ok(entry) => {
            let response = AddPrayerResponse {
                prayer: PrayerMapper::to_dto(entry),
                success_message: "Prayer time recorded successfully!".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to add prayer: {e}");
            error_response(e)
        }
    }
}

/// List all prayer entries held by the active backend
pub async fn list_prayers(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/prayers");

    match state.prayer_service.list_prayers().await {
        Ok(entries) => {
            let prayers: Vec<shared::Prayer> =
                entries.into_iter().map(PrayerMapper::to_dto).collect();
            let response = PrayerListResponse {
                count: prayers.len(),
                prayers,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list prayers: {e}");
            error_response(e)
        }
    }
}

/// Aggregated statistics toward the 1000 hour goal
pub async fn get_prayer_stats(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/prayers/stats");

    match state.prayer_service.get_stats().await {
        Ok(stats) => (StatusCode::OK, Json(PrayerMapper::stats_to_dto(stats))).into_response(),
        Err(e) => {
            error!("Failed to compute stats: {e}");
            error_response(e)
        }
    }
}

/// Update an existing entry; preferred backend only
pub async fn update_prayer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePrayerRequest>,
) -> impl IntoResponse {
    info!("PUT /api/prayers/{id} - request: {:?}", request);

    let command = UpdatePrayerCommand {
        name: request.name,
        duration: request.duration,
        unit: request.unit.map(PrayerMapper::unit_to_domain),
        description: request.description,
    };

    match state.prayer_service.update_prayer(id, command).await {
        Ok(entry) => {
            let response = UpdatePrayerResponse {
                prayer: PrayerMapper::to_dto(entry),
                success_message: "Prayer entry updated successfully!".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update prayer {id}: {e}");
            error_response(e)
        }
    }
}

/// Delete an existing entry; preferred backend only
pub async fn delete_prayer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/prayers/{id}");

    match state.prayer_service.delete_prayer(id).await {
        Ok(()) => {
            let response = DeletePrayerResponse {
                deleted_id: id,
                success_message: "Prayer entry deleted successfully!".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to delete prayer {id}: {e}");
            error_response(e)
        }
    }
}
