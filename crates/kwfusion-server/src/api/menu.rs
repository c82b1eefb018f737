use axum::{extract::State, Extension, Json};

use kwfusion_labs::MenuOptions;

use super::{labs_client, map_labs_error, ApiError, AppState};
use crate::middleware::RequestId;

/// Returns the location/language options for the search form.
pub(super) async fn keyword_menu(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<MenuOptions>, ApiError> {
    let client = labs_client(&state.config).map_err(|e| map_labs_error(&request_id.0, e))?;
    let options = client
        .locations_and_languages()
        .await
        .map_err(|e| map_labs_error(&request_id.0, e))?;

    Ok(Json(options))
}
