use axum::{extract::State, Extension, Json};

use super::{labs_client, map_labs_error, ApiError, AppState};
use crate::middleware::RequestId;

/// Pass-through proxy for SERP organic live tasks.
///
/// The request body is forwarded untouched; the client wraps it in the
/// one-element array the upstream API expects.
pub(super) async fn serp_live(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(task): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let client = labs_client(&state.config).map_err(|e| map_labs_error(&request_id.0, e))?;
    let payload = client
        .serp_organic_live(&task)
        .await
        .map_err(|e| map_labs_error(&request_id.0, e))?;

    Ok(Json(payload))
}
