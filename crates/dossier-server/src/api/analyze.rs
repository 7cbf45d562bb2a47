use axum::{body::Bytes, extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    address: Option<String>,
}

/// `POST /api/v1/analyze-property`
///
/// The body is decoded by hand so that a malformed request gets the same
/// 500 envelope as every other failure.
pub(super) async fn analyze_property(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: AnalyzeRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "invalid analyze-property body");
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Invalid request body",
            Some(e.to_string()),
            state.expose_error_details,
        )
    })?;

    let address = request.address.unwrap_or_default();

    match state.aggregator.analyze(&address).await {
        Ok(dossier) => Ok(Json(dossier)),
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                kind = e.kind().as_str(),
                error = %e,
                "analyze-property failed"
            );
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
                e.details(),
                state.expose_error_details,
            ))
        }
    }
}
