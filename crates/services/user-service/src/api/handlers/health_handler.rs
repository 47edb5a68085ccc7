//! Health check handler.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub services: ServiceHealth,
}

/// Per-dependency health
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    pub storage: StorageStatus,
}

/// Storage backend status
#[derive(Debug, Serialize, ToSchema)]
pub struct StorageStatus {
    pub backend: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check with storage connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => StorageStatus {
                backend: "database".to_string(),
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                StorageStatus {
                    backend: "database".to_string(),
                    status: "unhealthy".to_string(),
                    error: Some(e.to_string()),
                }
            }
        },
        None => StorageStatus {
            backend: "memory".to_string(),
            status: "healthy".to_string(),
            error: None,
        },
    };

    let healthy = storage.error.is_none();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        services: ServiceHealth { storage },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
