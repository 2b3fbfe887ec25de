use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::{internal_error, AppState, ErrorResponse};
use crate::sync;

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateResponse {
    pub success: bool,
    pub updated_records: usize,
    pub timestamp: String,
}

/// Ingest a fresh batch of transport records from the upstream feed
#[utoipa::path(
    post,
    path = "/api/update",
    responses(
        (status = 200, description = "Records ingested", body = UpdateResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "update"
)]
pub async fn refresh_transport(
    State(state): State<AppState>,
) -> Result<Json<UpdateResponse>, (StatusCode, Json<ErrorResponse>)> {
    match sync::refresh_records(&state.store).await {
        Ok(count) => {
            tracing::info!(count, "Successfully updated transport records");
            Ok(Json(UpdateResponse {
                success: true,
                updated_records: count,
                timestamp: Utc::now().to_rfc3339(),
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "Transport data refresh failed");
            Err(internal_error("Failed to update transport data"))
        }
    }
}
