use axum::{extract::State, Extension, Json};

use kwfusion_labs::RelatedKeywordsRequest;

use super::{labs_client, map_labs_error, ApiError, AppState};
use crate::middleware::RequestId;

/// Proxies a related-keywords search to the upstream API.
///
/// On success the response body is the upstream payload verbatim; the
/// dashboard normalizes it client-side and treats a missing
/// `tasks/result/items` envelope as zero results rather than an error.
pub(super) async fn related_keywords(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RelatedKeywordsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.keyword.trim().is_empty() {
        return Err(ApiError::bad_request("keyword must not be empty"));
    }

    let client = labs_client(&state.config).map_err(|e| map_labs_error(&request_id.0, e))?;
    let payload = client
        .related_keywords(&request)
        .await
        .map_err(|e| map_labs_error(&request_id.0, e))?;

    tracing::info!(
        request_id = %request_id.0,
        keyword = %request.keyword,
        "related keywords fetched"
    );
    Ok(Json(payload))
}
