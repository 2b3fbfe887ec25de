use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::{internal_error, AppState, ErrorResponse};
use crate::models::PredictedRecord;

/// Lookback window for considering stored records current.
const RECENCY_WINDOW_SECS: i64 = 5 * 60;

/// Maximum number of predictions returned per query.
const MAX_RESULTS: usize = 10;

fn default_location() -> String {
    "sydney".to_string()
}

fn default_type() -> String {
    "all".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TransportQuery {
    /// Requested location. Echoed back in the response; records are not
    /// filtered by it.
    #[serde(default = "default_location")]
    pub location: String,
    /// Transport type filter (`bus`, `train`, `light-rail`), or `all`.
    #[serde(rename = "type", default = "default_type")]
    pub transport_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransportListResponse {
    pub success: bool,
    pub data: Vec<PredictedRecord>,
    pub timestamp: String,
    pub location: String,
}

/// Predicted arrivals for currently tracked vehicles
#[utoipa::path(
    get,
    path = "/api/transport",
    params(TransportQuery),
    responses(
        (status = 200, description = "Predicted arrivals, soonest first", body = TransportListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "transport"
)]
pub async fn list_transport(
    State(state): State<AppState>,
    Query(params): Query<TransportQuery>,
) -> Result<Json<TransportListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let now = Utc::now();

    let records = state
        .store
        .scan_recent(now.timestamp() - RECENCY_WINDOW_SECS)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to scan transport records");
            internal_error("Failed to retrieve transport data")
        })?;

    let mut data: Vec<PredictedRecord> = records
        .iter()
        .filter(|r| params.transport_type == "all" || r.transport_type == params.transport_type)
        .map(|r| state.predictor.predict(r, now))
        .collect();

    // Soonest predicted arrivals first, capped at the top results.
    data.sort_by_key(|p| p.predicted_arrival_mins);
    data.truncate(MAX_RESULTS);

    Ok(Json(TransportListResponse {
        success: true,
        data,
        timestamp: now.to_rfc3339(),
        location: params.location,
    }))
}
