use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::AppState;
use crate::services::{estimate, validate_energy, Estimate};

use super::helpers::{json_error, lock_dashboard};

/// Latest calculation with its summary figures.
pub async fn results_get(State(state): State<AppState>) -> Response {
    let dashboard = lock_dashboard(&state);
    match (dashboard.results(), dashboard.stats()) {
        (Some(results), Some(stats)) => Json(json!({
            "energy_kwh": results.energy_kwh,
            "calculated_at": results.calculated_at,
            "results": results.rows,
            "stats": stats,
        }))
        .into_response(),
        _ => json_error(StatusCode::NOT_FOUND, "No calculation has been run yet"),
    }
}

/// Single-region estimate: `{"source": "api" | "fallback", "data": {...}}`.
pub async fn emission_get(
    State(state): State<AppState>,
    Path((region, energy)): Path<(String, f64)>,
) -> Response {
    let energy = match validate_energy(energy) {
        Ok(e) => e,
        Err(e) => return json_error(StatusCode::BAD_REQUEST, e.to_string()),
    };
    let region = region.trim().to_uppercase();
    let est = estimate(&state.estimator, &region, energy).await;
    let body = match &est {
        Estimate::Api(result) => json!({ "source": est.provenance(), "data": result }),
        Estimate::Fallback { result, reason } => json!({
            "source": est.provenance(),
            "data": result,
            "reason": reason.to_string(),
        }),
    };
    (StatusCode::OK, Json(body)).into_response()
}
