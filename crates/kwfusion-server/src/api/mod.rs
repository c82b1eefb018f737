mod keywords;
mod menu;
mod serp;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use kwfusion_labs::{Credentials, LabsClient, LabsError};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<kwfusion_core::AppConfig>,
}

/// Error response in the upstream wire shape.
///
/// The dashboard reads `message` and expects `tasks` to be an empty array on
/// failure, so server-side errors mirror the envelope the upstream API uses.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
    pub tasks: Vec<serde_json::Value>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(super) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorEnvelope {
            status: self.status.as_u16(),
            message: self.message,
            tasks: Vec::new(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

/// Builds a `LabsClient` from per-request credentials and app config.
///
/// Credentials are resolved from the environment here, before any network
/// call, so a missing secret becomes a configuration error for this request
/// rather than a startup failure.
pub(super) fn labs_client(config: &kwfusion_core::AppConfig) -> Result<LabsClient, LabsError> {
    let credentials = Credentials::from_env()?;
    LabsClient::with_base_url(credentials, config.request_timeout_secs, &config.labs_base_url)
}

pub(super) fn map_labs_error(request_id: &str, error: LabsError) -> ApiError {
    match error {
        LabsError::MissingCredentials(var) => {
            tracing::error!(request_id = %request_id, var = %var, "API credentials not configured");
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "API credentials not configured",
            )
        }
        LabsError::Http(e) => {
            tracing::error!(request_id = %request_id, error = %e, "upstream request failed");
            ApiError::new(StatusCode::BAD_GATEWAY, "failed to fetch keyword data")
        }
        LabsError::Api { code, message } => {
            tracing::warn!(request_id = %request_id, code, message = %message, "upstream reported failure");
            ApiError::new(StatusCode::BAD_GATEWAY, message)
        }
        LabsError::Deserialize { context, .. } => {
            tracing::error!(request_id = %request_id, context = %context, "upstream response unreadable");
            ApiError::new(
                StatusCode::BAD_GATEWAY,
                "upstream returned an unreadable response",
            )
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/keywords/related",
            post(keywords::related_keywords),
        )
        .route("/api/v1/keywords/menu", get(menu::keyword_menu))
        .route("/api/v1/serp", post(serp::serp_live))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
