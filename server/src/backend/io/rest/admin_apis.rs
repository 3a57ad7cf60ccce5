//! # REST API for Administrative Operations
//!
//! Out-of-band endpoints: migrating fallback-file entries into the
//! preferred database and writing point-in-time backup snapshots.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::{error, info};

use super::error_response;
use crate::backend::AppState;
use shared::{BackupResponse, SyncResponse};

/// Create a router for administrative APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sync", post(sync_fallback))
        .route("/backup", post(create_backup))
}

/// Migrate fallback entries into the preferred backend
pub async fn sync_fallback(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/admin/sync");

    match state.sync_service.sync_fallback_into_preferred().await {
        Ok(report) => {
            let response = SyncResponse {
                migrated_count: report.migrated,
                skipped_count: report.skipped,
                failed_count: report.failed,
                failures: report.failures,
                success_message: format!(
                    "Migrated {} entries into the preferred backend",
                    report.migrated
                ),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to sync fallback entries: {e}");
            error_response(e)
        }
    }
}

/// Write a timestamped backup snapshot of the active backend
pub async fn create_backup(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/admin/backup");

    match state.sync_service.create_backup_snapshot().await {
        Ok(report) => {
            let response = BackupResponse {
                file_path: report.file_path.display().to_string(),
                entry_count: report.entry_count,
                success_message: format!("Backed up {} entries", report.entry_count),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create backup snapshot: {e}");
            error_response(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{config::Config, create_router, initialize_backend};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use shared::BackupResponse;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn setup_test_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            port: 0,
            data_dir: temp_dir.path().to_path_buf(),
            preferred: None,
        };
        let app_state = initialize_backend(config).await.unwrap();
        (create_router(app_state), temp_dir)
    }

    #[tokio::test]
    async fn test_sync_without_preferred_backend_is_a_client_error() {
        let (app, _guard) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/admin/sync")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: shared::ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(parsed.error.contains("sync"));
    }

    #[tokio::test]
    async fn test_backup_reports_path_and_count() {
        let (app, guard) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/admin/backup")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: BackupResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.entry_count, 0);
        assert!(parsed.file_path.starts_with(guard.path().to_str().unwrap()));
    }
}
