use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use dossier_upstream::GeocodeCandidate;
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeParams {
    q: Option<String>,
}

/// `GET /api/v1/geocode?q=...`
///
/// Short or missing queries return an empty list without contacting the
/// geocoder.
pub(super) async fn geocode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<Vec<GeocodeCandidate>>, ApiError> {
    let query = params.q.unwrap_or_default();

    match state.geocoder.search(&query).await {
        Ok(candidates) => Ok(Json(candidates)),
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "geocode lookup failed");
            Err(ApiError::new(
                StatusCode::BAD_GATEWAY,
                "Geocoding service unavailable",
                Some(e.to_string()),
                state.expose_error_details,
            ))
        }
    }
}
