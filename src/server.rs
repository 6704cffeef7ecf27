use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::proxy::{self, AddressValidator};
use crate::translate::address_types::{AddressInput, ErrorResponse};

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

pub const SERVICE_NAME: &str = "Address Validation API";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub config: ProxyConfig,
    pub validator: Arc<dyn AddressValidator>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/validate-address/", post(handle_validate_address))
        .route("/validate-address", post(handle_validate_address))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_validate_address(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("validate_address", %request_id);

    let mut response = validate(state, body).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn validate(state: Arc<AppState>, body: Bytes) -> Response {
    let input: AddressInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected request body");
            let err = ErrorResponse::new(format!("Invalid request body: {e}"));
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(err)).into_response();
        }
    };

    tracing::info!(
        country = %input.country,
        has_state = input.state.is_some(),
        has_postal_code = input.postal_code.is_some(),
        "Validation request"
    );

    match proxy::validate_address(&input, state.validator.as_ref()).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &ProxyError) -> Response {
    match err {
        ProxyError::UpstreamRejected { .. } => {
            tracing::warn!(status = err.status_code(), "Upstream rejection forwarded")
        }
        _ => tracing::error!(error = %err, "Validation failed"),
    }

    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(ErrorResponse::new(err.detail()))).into_response()
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": state.config.upstream.base_url,
    }))
}
