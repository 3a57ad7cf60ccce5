//! # REST API Interface Layer
//!
//! HTTP endpoints for the prayer tracker. This layer handles request and
//! response serialization, translation of storage errors to HTTP status
//! codes and per-request logging; all business rules live in the domain
//! layer below it.
//!
//! Every failed request gets an `ErrorResponse` body with a non-2xx status,
//! so failures are never shaped like successes with empty data.

pub mod admin_apis;
pub mod health_apis;
pub mod mappers;
pub mod prayer_apis;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use shared::ErrorResponse;

use crate::backend::storage::StoreError;

/// Translate a storage error into the structured failure envelope.
pub(crate) fn error_response(error: StoreError) -> Response {
    (
        status_for(&error),
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

fn status_for(error: &StoreError) -> StatusCode {
    match error {
        StoreError::Validation(_) | StoreError::UnsupportedOperation(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::ConfigurationMissing(_) | StoreError::BackendUnreachable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        StoreError::Io(_) | StoreError::Corrupt(_) | StoreError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
